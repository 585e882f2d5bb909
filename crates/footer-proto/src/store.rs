//! Store: the process-wide state container the footer reads from.
//!
//! Consumers depend on the [`Store`] trait only.  [`MemoryStore`] is the
//! in-process implementation: every `dispatch` reduces the action into the
//! snapshot, bumps `rev`, then calls every subscribed handler with the
//! committed snapshot on the dispatching thread.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use tracing::debug;

use crate::protocol::{StoreAction, StoreSnapshot};

/// Callback invoked after each committed state change.
pub type Handler = Box<dyn Fn(&StoreSnapshot) + Send + Sync>;

pub trait Store: Send + Sync {
    /// Clone of the current snapshot.
    fn snapshot(&self) -> StoreSnapshot;

    /// Register `handler`; it stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    fn subscribe(&self, handler: Handler) -> Subscription;

    /// Fire-and-forget command.
    fn dispatch(&self, action: StoreAction);
}

/// Handle for a registered handler.  Unsubscribing is idempotent, and
/// dropping the handle unsubscribes.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the handler.  Returns false when already released.
    pub fn unsubscribe(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

type Registry = Mutex<BTreeMap<u64, Arc<Handler>>>;

pub struct MemoryStore {
    state: RwLock<StoreSnapshot>,
    handlers: Arc<Registry>,
    next_id: Mutex<u64>,
}

impl MemoryStore {
    pub fn new(initial: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(initial),
            handlers: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Mutex::new(0),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreSnapshot::default())
    }
}

impl Store for MemoryStore {
    fn snapshot(&self) -> StoreSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self, handler: Handler) -> Subscription {
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            *next += 1;
            *next
        };
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(handler));
        debug!("store: subscriber {} registered", id);

        let registry: Weak<Registry> = Arc::downgrade(&self.handlers);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&id);
                debug!("store: subscriber {} released", id);
            }
        })
    }

    fn dispatch(&self, action: StoreAction) {
        let tag = action.tag();
        let committed = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.apply(action);
            state.clone()
        };
        debug!("store: {:?} committed at rev {}", tag, committed.rev);

        // Handlers run without the registry lock held so they may dispatch
        // or unsubscribe themselves.
        let handlers: Vec<Arc<Handler>> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for handler in handlers {
            (*handler)(&committed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ActionTag, Stream};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(count: &Arc<AtomicUsize>) -> Handler {
        let count = Arc::clone(count);
        Box::new(move |_snap: &StoreSnapshot| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_notifies_with_committed_snapshot() {
        let store = MemoryStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        let _sub = store.subscribe(Box::new(move |snap: &StoreSnapshot| {
            seen2
                .lock()
                .unwrap()
                .push((snap.rev, snap.last_action, snap.profile.stream.clone()));
        }));

        store.dispatch(StoreAction::LoadStream {
            stream: Stream::jukebox("mix"),
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[0].1, Some(ActionTag::LoadStream));
        assert_eq!(seen[0].2, Stream::jukebox("mix"));
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = MemoryStore::default();
        let count = Arc::new(AtomicUsize::new(0));
        let mut sub = store.subscribe(counting_handler(&count));
        assert_eq!(store.subscriber_count(), 1);

        assert!(sub.unsubscribe());
        assert!(!sub.unsubscribe());
        assert!(!sub.is_active());
        assert_eq!(store.subscriber_count(), 0);

        store.dispatch(StoreAction::SetJukeboxIndex { index: 2 });
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_releases_handler() {
        let store = MemoryStore::default();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let _sub = store.subscribe(counting_handler(&count));
            store.dispatch(StoreAction::SetJukeboxIndex { index: 1 });
        }
        store.dispatch(StoreAction::SetJukeboxIndex { index: 2 });
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_store_is_harmless() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut sub = {
            let store = MemoryStore::default();
            store.subscribe(counting_handler(&count))
        };
        assert!(sub.unsubscribe());
        assert!(!sub.unsubscribe());
    }
}
