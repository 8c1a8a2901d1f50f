//! repo-viewer: GitHub repository viewer with token sign-in, hexagonal architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
