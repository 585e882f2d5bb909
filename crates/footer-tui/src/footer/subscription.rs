//! Subscription lifecycle between the footer and the store.
//!
//! ```text
//!  Unsubscribed ──connect──▶ Subscribed { generation }
//!       ▲                          │
//!       └──────────release─────────┘
//! ```
//!
//! Notifications are forwarded tagged with the generation that produced
//! them.  Anything arriving after `release`, or from an older generation, is
//! refused by [`StoreLink::accepts`] and dropped.

use footer_proto::protocol::StoreSnapshot;
use footer_proto::store::{Store, Subscription};
use tracing::debug;

/// A store change as delivered to the footer.
#[derive(Debug, Clone)]
pub struct StoreNotification {
    pub generation: u64,
    pub snapshot: StoreSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Unsubscribed,
    Subscribed { generation: u64 },
}

#[derive(Debug)]
pub struct StoreLink {
    state: LinkState,
    last_generation: u64,
    subscription: Option<Subscription>,
}

impl Default for StoreLink {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreLink {
    pub fn new() -> Self {
        Self {
            state: LinkState::Unsubscribed,
            last_generation: 0,
            subscription: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, LinkState::Subscribed { .. })
    }

    /// Subscribe and return the snapshot to initialise from.  An existing
    /// subscription is released first.
    pub fn connect<F>(&mut self, store: &dyn Store, forward: F) -> StoreSnapshot
    where
        F: Fn(StoreNotification) + Send + Sync + 'static,
    {
        self.release();
        self.last_generation += 1;
        let generation = self.last_generation;

        let subscription = store.subscribe(Box::new(move |snapshot: &StoreSnapshot| {
            forward(StoreNotification {
                generation,
                snapshot: snapshot.clone(),
            });
        }));
        self.subscription = Some(subscription);
        self.state = LinkState::Subscribed { generation };
        debug!("footer: subscribed (generation {})", generation);

        store.snapshot()
    }

    /// Drop the store subscription.  Returns false when there was nothing to
    /// release.
    pub fn release(&mut self) -> bool {
        let released = match self.subscription.take() {
            Some(mut subscription) => subscription.unsubscribe(),
            None => false,
        };
        if let LinkState::Subscribed { generation } = self.state {
            debug!("footer: unsubscribed (generation {})", generation);
        }
        self.state = LinkState::Unsubscribed;
        released
    }

    pub fn accepts(&self, notification: &StoreNotification) -> bool {
        match self.state {
            LinkState::Subscribed { generation } => notification.generation == generation,
            LinkState::Unsubscribed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footer_proto::protocol::StoreAction;
    use footer_proto::store::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn collector() -> (
        Arc<Mutex<Vec<StoreNotification>>>,
        impl Fn(StoreNotification) + Send + Sync + 'static,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |n: StoreNotification| sink.lock().unwrap().push(n))
    }

    #[test]
    fn test_connect_then_release() {
        let store = MemoryStore::default();
        let mut link = StoreLink::new();
        assert_eq!(link.state(), LinkState::Unsubscribed);

        let (seen, sink) = collector();
        link.connect(&store, sink);
        assert_eq!(link.state(), LinkState::Subscribed { generation: 1 });
        assert_eq!(store.subscriber_count(), 1);

        store.dispatch(StoreAction::SetJukeboxIndex { index: 1 });
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(link.accepts(&seen.lock().unwrap()[0]));

        assert!(link.release());
        assert!(!link.release());
        assert_eq!(store.subscriber_count(), 0);
        assert!(!link.accepts(&seen.lock().unwrap()[0]));
    }

    #[test]
    fn test_reconnect_refuses_old_generation() {
        let store = MemoryStore::default();
        let mut link = StoreLink::new();
        let (seen, sink) = collector();
        link.connect(&store, sink);
        store.dispatch(StoreAction::SetJukeboxIndex { index: 1 });

        let (_seen2, sink2) = collector();
        link.connect(&store, sink2);
        assert_eq!(store.subscriber_count(), 1);
        assert!(!link.accepts(&seen.lock().unwrap()[0]));
    }
}
