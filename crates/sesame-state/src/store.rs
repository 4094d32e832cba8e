//! The observable state container.

use crate::subscription::{Detach, Subscription};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Listener<T> = dyn Fn(&T, &T) + Send + Sync;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Arc<Listener<T>>)>,
}

impl<T> Detach for Mutex<Registry<T>>
where
    T: 'static,
{
    fn detach(&self, id: u64) {
        self.lock().entries.retain(|(entry_id, _)| *entry_id != id);
    }
}

/// A value with synchronous change notification.
///
/// Mutations go through [`update`](Self::update) or [`set`](Self::set).
/// Each mutation runs while holding the state lock, so no reader ever sees
/// a half-applied change. Listeners then run on the calling thread, after
/// the lock is released, and receive the previous and next value. A
/// listener may therefore read the store, or even mutate it, without
/// deadlocking.
///
/// # Example
///
/// ```
/// use sesame_state::Store;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// let store = Store::new(1_u32);
/// let seen = Arc::new(AtomicU32::new(0));
///
/// let sink = Arc::clone(&seen);
/// let sub = store.subscribe(move |_prev, next| sink.store(*next, Ordering::SeqCst));
///
/// store.set(5);
/// assert_eq!(seen.load(Ordering::SeqCst), 5);
///
/// drop(sub);
/// store.set(9);
/// assert_eq!(seen.load(Ordering::SeqCst), 5);
/// ```
pub struct Store<T> {
    state: Mutex<T>,
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Store<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Mutex::new(initial),
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.state.lock().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock())
    }

    /// Replaces the value and notifies listeners.
    pub fn set(&self, next: T) {
        self.update(|state| *state = next);
    }

    /// Mutates the value in place and notifies listeners.
    ///
    /// Listeners are notified on every call, whether or not `f` changed
    /// anything; compare `prev` and `next` in the listener if that matters.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, prev, next) = {
            let mut state = self.state.lock();
            let prev = state.clone();
            let result = f(&mut state);
            (result, prev, state.clone())
        };
        self.notify(&prev, &next);
        result
    }

    /// Registers a listener called with `(prev, next)` after each mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(listener)));
            id
        };
        let weak: Weak<dyn Detach> = Arc::downgrade(&self.registry) as Weak<Mutex<Registry<T>>>;
        Subscription::new(id, weak)
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().entries.len()
    }

    fn notify(&self, prev: &T, next: &T) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Arc<Listener<T>>> = self
            .registry
            .lock()
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        tracing::trace!(listeners = listeners.len(), "store changed");
        for listener in listeners {
            listener(prev, next);
        }
    }
}

impl<T> Default for Store<T>
where
    T: Clone + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Store<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.lock())
            .field("subscribers", &self.registry.lock().entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn get_and_set() {
        let store = Store::new(String::from("a"));
        store.set("b".into());
        assert_eq!(store.get(), "b");
        assert_eq!(store.read(String::len), 1);
    }

    #[test]
    fn update_returns_closure_result() {
        let store = Store::new(vec![1, 2]);
        let len = store.update(|v| {
            v.push(3);
            v.len()
        });
        assert_eq!(len, 3);
    }

    #[test]
    fn listener_receives_prev_and_next() {
        let store = Store::new(10_i32);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        store
            .subscribe(move |prev, next| sink.lock().push((*prev, *next)))
            .keep();

        store.set(11);
        store.update(|v| *v *= 2);

        assert_eq!(*log.lock(), vec![(10, 11), (11, 22)]);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let store = Store::new(0_u8);
        let order = Arc::new(Mutex::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                store.subscribe(move |_, _| order.lock().push(i))
            })
            .collect();

        store.set(1);
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let store = Store::new(0_u8);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let sub = store.subscribe(move |_, _| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.subscriber_count(), 1);
        assert!(sub.is_active());

        store.set(1);
        sub.unsubscribe();
        store.set(2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_store_is_inert() {
        let store = Store::new(0_u8);
        let sub = store.subscribe(|_, _| {});
        drop(store);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn listener_can_read_store_during_notification() {
        let store = Arc::new(Store::new(1_u32));
        let observed = Arc::new(AtomicUsize::new(0));

        let inner = Arc::clone(&store);
        let obs = Arc::clone(&observed);
        store
            .subscribe(move |_, _| {
                obs.store(inner.get() as usize, Ordering::SeqCst);
            })
            .keep();

        store.set(7);
        assert_eq!(observed.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn listener_can_mutate_store_without_deadlock() {
        let store = Arc::new(Store::new(0_u32));
        let inner = Arc::downgrade(&store);
        store
            .subscribe(move |_, next| {
                if *next == 1 {
                    if let Some(s) = inner.upgrade() {
                        s.set(2);
                    }
                }
            })
            .keep();

        store.set(1);
        assert_eq!(store.get(), 2);
    }
}
