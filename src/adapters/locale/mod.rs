//! Localized strings. Implements MessageProvider.

pub mod catalog;

pub use catalog::Catalog;
