//! Listener registration handles.

use std::sync::Weak;

/// Something a [`Subscription`] can detach itself from.
pub(crate) trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

/// Handle for a registered listener.
///
/// The listener stays attached for as long as the handle lives. Dropping the
/// handle detaches it; [`keep`](Self::keep) leaves it attached for the
/// lifetime of the store instead.
///
/// The handle holds only a weak reference, so it never keeps a store alive.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Detach>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<dyn Detach>) -> Self {
        Self {
            id,
            registry: Some(registry),
        }
    }

    /// Detaches the listener now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    /// Leaves the listener attached until the store itself is dropped.
    pub fn keep(mut self) {
        self.registry = None;
    }

    /// Returns `true` while the store this subscription belongs to is alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|r| r.strong_count() > 0)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|w| w.upgrade()) {
            registry.detach(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
