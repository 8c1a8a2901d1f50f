//! Implements Router by forwarding destinations to the screen loop.

use crate::ports::{Destination, Router};
use tokio::sync::mpsc;
use tracing::debug;

/// Router backed by an unbounded channel; never blocks the caller.
pub struct ChannelRouter {
    tx: mpsc::UnboundedSender<Destination>,
}

impl ChannelRouter {
    /// Returns the router and the receiving end for the UI.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Destination>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Router for ChannelRouter {
    fn navigate_to_main(&self) {
        if self.tx.send(Destination::Main).is_err() {
            debug!("navigation dropped: UI closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_navigation_is_delivered() {
        let (router, mut rx) = ChannelRouter::new();
        router.navigate_to_main();
        router.navigate_to_main();

        assert_eq!(rx.try_recv(), Ok(Destination::Main));
        assert_eq!(rx.try_recv(), Ok(Destination::Main));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_is_ignored() {
        let (router, rx) = ChannelRouter::new();
        drop(rx);
        router.navigate_to_main();
    }
}
