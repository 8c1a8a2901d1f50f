//! Local persistence adapters.

pub mod token_json;

pub use token_json::JsonTokenStore;
