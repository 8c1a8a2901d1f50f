//! Navigation port. Use cases request screen changes; the UI performs them.

/// Screens reachable from the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Repository list shown after a successful sign-in.
    Main,
}

/// Fire-and-forget navigation. Must not block.
pub trait Router: Send + Sync {
    fn navigate_to_main(&self);
}
