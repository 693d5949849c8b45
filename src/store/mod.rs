//! Reactive entity stores.
//!
//! An [`EntityStore`] holds the current sequence of entities for one
//! operation. Every write publishes a brand-new snapshot (`Arc<Vec<T>>`);
//! published snapshots are never mutated, so a subscriber holding one sees a
//! stable value. Subscribers receive the full replacement sequence on every
//! write, not a diff.
//!
//! Two subscription flavours exist: [`Subscription`] queues every snapshot,
//! [`LatestSubscription`] keeps only the newest one.

mod registry;

pub use registry::Stores;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Observable, append-only container for one entity collection.
///
/// Cloning yields another handle to the same store.
#[derive(Debug)]
pub struct EntityStore<T> {
    name: &'static str,
    inner: Arc<Mutex<StoreState<T>>>,
}

#[derive(Debug)]
struct StoreState<T> {
    snapshot: Arc<Vec<T>>,
    subscribers: Vec<Subscriber<T>>,
}

type Slot<T> = Mutex<Option<Arc<Vec<T>>>>;

#[derive(Debug)]
enum Subscriber<T> {
    Every(Sender<Arc<Vec<T>>>),
    Latest(Weak<Slot<T>>),
}

impl<T> Subscriber<T> {
    /// Deliver `snapshot`; false once the receiving side is gone.
    fn deliver(&self, snapshot: &Arc<Vec<T>>) -> bool {
        match self {
            Subscriber::Every(sender) => sender.send(Arc::clone(snapshot)).is_ok(),
            Subscriber::Latest(slot) => match slot.upgrade() {
                Some(slot) => {
                    *lock_slot(&slot) = Some(Arc::clone(snapshot));
                    true
                }
                None => false,
            },
        }
    }
}

fn lock_slot<T>(slot: &Slot<T>) -> MutexGuard<'_, Option<Arc<Vec<T>>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> EntityStore<T> {
    /// Create an empty store.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(StoreState {
                snapshot: Arc::new(Vec::new()),
                subscribers: Vec::new(),
            })),
        }
    }

    /// Operation name the store belongs to.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.lock().snapshot)
    }

    /// Entities in the current snapshot.
    pub fn len(&self) -> usize {
        self.lock().snapshot.len()
    }

    /// True when the current snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.lock().snapshot.is_empty()
    }

    /// Replace the published value and notify subscribers.
    pub fn set(&self, value: Vec<T>) {
        let mut state = self.lock();
        state.publish(Arc::new(value));
    }

    /// Publish `old ++ new` as the next snapshot.
    ///
    /// Returns the length of the new snapshot.
    pub fn append(&self, new_entities: Vec<T>) -> usize {
        let mut state = self.lock();
        let mut next = Vec::with_capacity(state.snapshot.len() + new_entities.len());
        next.extend(state.snapshot.iter().cloned());
        next.extend(new_entities);
        let len = next.len();
        state.publish(Arc::new(next));
        len
    }

    /// Register for change notification.
    ///
    /// The subscription queues every snapshot published after this call.
    /// The queue is unbounded: a subscription that is kept alive but never
    /// drained retains each snapshot it was sent, and since every snapshot
    /// is a full copy, memory grows quadratically with the number of
    /// entities. Drop the subscription when done, or use
    /// [`EntityStore::subscribe_latest`] when only the newest value matters.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = mpsc::channel();
        self.lock().subscribers.push(Subscriber::Every(sender));
        Subscription { receiver }
    }

    /// Register for change notification, keeping only the newest snapshot.
    ///
    /// Each publish overwrites the pending value, so an undrained
    /// subscription holds at most one snapshot.
    pub fn subscribe_latest(&self) -> LatestSubscription<T> {
        let slot = Arc::new(Mutex::new(None));
        self.lock()
            .subscribers
            .push(Subscriber::Latest(Arc::downgrade(&slot)));
        LatestSubscription { slot }
    }

    /// Live subscribers, counting ones dropped since the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState<T>> {
        // A panic while holding the lock cannot leave a half-written
        // snapshot: publishing is a single pointer swap.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> StoreState<T> {
    fn publish(&mut self, snapshot: Arc<Vec<T>>) {
        self.snapshot = Arc::clone(&snapshot);
        // Dropped subscribers are pruned here.
        self.subscribers
            .retain(|subscriber| subscriber.deliver(&snapshot));
    }
}

/// Receiving end of a store subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: Receiver<Arc<Vec<T>>>,
}

impl<T> Subscription<T> {
    /// Next pending snapshot, if any. Never blocks.
    pub fn try_next(&self) -> Option<Arc<Vec<T>>> {
        self.receiver.try_recv().ok()
    }

    /// Most recent pending snapshot, discarding older ones.
    pub fn latest(&self) -> Option<Arc<Vec<T>>> {
        self.receiver.try_iter().last()
    }

    /// All pending snapshots in publish order.
    pub fn drain(&self) -> Vec<Arc<Vec<T>>> {
        self.receiver.try_iter().collect()
    }
}

/// Subscription that only ever holds the newest unread snapshot.
#[derive(Debug)]
pub struct LatestSubscription<T> {
    slot: Arc<Slot<T>>,
}

impl<T> LatestSubscription<T> {
    /// Take the newest snapshot published since the last call, if any.
    pub fn take(&self) -> Option<Arc<Vec<T>>> {
        lock_slot(&self.slot).take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store: EntityStore<u32> = EntityStore::new("Numbers");
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.name(), "Numbers");
    }

    #[test]
    fn append_keeps_old_then_new_order() {
        let store = EntityStore::new("Numbers");
        store.append(vec![1, 2]);
        let len = store.append(vec![3]);
        assert_eq!(len, 3);
        assert_eq!(*store.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn append_replaces_snapshot_identity() {
        let store = EntityStore::new("Numbers");
        store.append(vec![1]);
        let before = store.snapshot();
        store.append(vec![2]);
        let after = store.snapshot();

        assert!(!Arc::ptr_eq(&before, &after), "Each write publishes a new snapshot");
        assert_eq!(*before, vec![1], "Old snapshot is never mutated");
        assert_eq!(*after, vec![1, 2]);
    }

    #[test]
    fn append_empty_still_publishes() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe();
        store.append(Vec::<u32>::new());
        let published = subscription.try_next().expect("snapshot published");
        assert!(published.is_empty());
    }

    #[test]
    fn set_replaces_contents() {
        let store = EntityStore::new("Numbers");
        store.append(vec![1, 2]);
        store.set(vec![9]);
        assert_eq!(*store.snapshot(), vec![9]);
    }

    #[test]
    fn subscriber_receives_full_snapshots_in_order() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe();

        store.append(vec![1]);
        store.append(vec![2, 3]);

        let received = subscription.drain();
        assert_eq!(received.len(), 2);
        assert_eq!(*received[0], vec![1]);
        assert_eq!(*received[1], vec![1, 2, 3]);
    }

    #[test]
    fn subscriber_only_sees_later_writes() {
        let store = EntityStore::new("Numbers");
        store.append(vec![1]);
        let subscription = store.subscribe();
        assert!(subscription.try_next().is_none());

        store.append(vec![2]);
        assert_eq!(*subscription.try_next().unwrap(), vec![1, 2]);
    }

    #[test]
    fn latest_skips_intermediate_snapshots() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe();
        store.append(vec![1]);
        store.append(vec![2]);
        store.append(vec![3]);

        assert_eq!(*subscription.latest().unwrap(), vec![1, 2, 3]);
        assert!(subscription.try_next().is_none());
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let store = EntityStore::new("Numbers");
        let kept = store.subscribe();
        let dropped = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(dropped);
        store.append(vec![1]);

        assert_eq!(store.subscriber_count(), 1);
        assert!(kept.try_next().is_some());
    }

    #[test]
    fn undrained_subscription_queues_every_snapshot() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe();
        for n in 0..5 {
            store.append(vec![n]);
        }

        let pending = subscription.drain();
        assert_eq!(pending.len(), 5);
        assert_eq!(*pending[4], vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn latest_subscription_holds_only_newest_snapshot() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe_latest();
        store.append(vec![1]);
        let first = store.snapshot();
        store.append(vec![2]);
        store.append(vec![3]);

        assert_eq!(Arc::strong_count(&first), 1, "Superseded snapshots are released");
        assert_eq!(*subscription.take().unwrap(), vec![1, 2, 3]);
        assert!(subscription.take().is_none());

        store.append(vec![4]);
        assert_eq!(*subscription.take().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn latest_subscription_only_sees_later_writes() {
        let store = EntityStore::new("Numbers");
        store.append(vec![1]);
        let subscription = store.subscribe_latest();
        assert!(subscription.take().is_none());
    }

    #[test]
    fn dropped_latest_subscription_is_pruned_on_publish() {
        let store = EntityStore::new("Numbers");
        let subscription = store.subscribe_latest();
        assert_eq!(store.subscriber_count(), 1);

        drop(subscription);
        store.append(vec![1]);

        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let store = EntityStore::new("Numbers");
        let handle = store.clone();
        let subscription = store.subscribe();

        handle.append(vec![5]);

        assert_eq!(*store.snapshot(), vec![5]);
        assert_eq!(*subscription.try_next().unwrap(), vec![5]);
    }
}
