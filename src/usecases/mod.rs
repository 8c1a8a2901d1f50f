//! Application use cases. Orchestrate domain logic via ports.

pub mod sign_in_flow;

pub use sign_in_flow::{Action, SignInFlow, State, DEFAULT_ACTION_BUFFER};
