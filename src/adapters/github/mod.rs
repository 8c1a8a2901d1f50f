//! GitHub REST adapter. Implements Authenticator and RepoCatalog.

pub mod client;
pub mod mapper;

pub use client::GithubClient;
