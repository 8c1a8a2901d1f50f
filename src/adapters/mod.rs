//! Infrastructure adapters. Implement outbound ports.
//!
//! GitHub API, token file, message catalog, terminal UI.

pub mod github;
pub mod locale;
pub mod persistence;
pub mod ui;
