//! Change notification for top-level container mutations.
//!
//! Every [`Container`](super::Container) owns an [`Observers`] registry.
//! `set` and `remove` on that container notify subscribers synchronously, in
//! registration order. Mutations inside nested containers only notify the
//! nested container's own registry.
//!
//! Dispatch runs over a snapshot of the subscriber list, so a callback may
//! unsubscribe itself (or anyone else) through a cloned [`Observers`] handle
//! without disturbing the dispatch in progress. A subscriber removed during
//! dispatch still receives the change being dispatched.

use std::{cell::RefCell, fmt, rc::Rc};

use super::Value;

/// A single top-level change.
#[derive(Debug, Clone, Copy)]
pub struct ValueChange<'a> {
    pub key: &'a str,
    /// Previous value, `None` if the key was absent.
    pub old: Option<&'a Value>,
    /// New value, `None` if the key was removed.
    pub new: Option<&'a Value>,
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn(&ValueChange<'_>)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

/// Shared handle to a container's subscriber list.
///
/// Cloning the handle shares the registry; it does not copy subscribers.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Rc<RefCell<Registry>>,
}

impl Observers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback and returns the id used to unsubscribe it.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValueChange<'_>) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push((id, Rc::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|(sub, _)| *sub != id);
        registry.subscribers.len() != before
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Returns true if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn notify(&self, change: &ValueChange<'_>) {
        let snapshot: Vec<Callback> = {
            let registry = self.inner.borrow();
            if registry.subscribers.is_empty() {
                return;
            }
            registry
                .subscribers
                .iter()
                .map(|(_, callback)| Rc::clone(callback))
                .collect()
        };
        for callback in snapshot {
            callback(change);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.len())
            .finish()
    }
}
