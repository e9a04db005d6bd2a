//! The shopper currently using the kiosk.
//!
//! A single observable slot: whoever identified last owns the session until
//! they log out. Listeners fire synchronously on every write, after the
//! internal lock has been released, so they may read the store themselves.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::debug;

use crate::model::lead::Lead;

type Listener = Arc<dyn Fn(Option<&Lead>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    user: Option<Lead>,
    listeners: BTreeMap<u64, Listener>,
    next_id: u64,
}

#[derive(Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // Listeners run outside the lock; a poisoned slot is still consistent.
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn get_user(&self) -> Option<Lead> {
        lock(&self.inner).user.clone()
    }

    /// Replaces the current user and notifies every listener once.
    pub fn set_user(&self, user: Option<Lead>) {
        let listeners: Vec<Listener> = {
            let mut inner = lock(&self.inner);
            inner.user = user.clone();
            inner.listeners.values().cloned().collect()
        };
        debug!(
            listeners = listeners.len(),
            user = user.as_ref().map(|u| u.email.as_str()).unwrap_or("-"),
            "Session changed"
        );
        for listener in listeners {
            listener(user.as_ref());
        }
    }

    pub fn clear(&self) {
        self.set_user(None);
    }

    /// Applies `f` to the held user when it is the lead `id`, then notifies.
    /// `f` runs under the lock and must not call back into the store.
    pub fn update_if<F>(&self, id: &bson::oid::ObjectId, f: F) -> bool
    where
        F: FnOnce(&mut Lead),
    {
        let (user, listeners): (Option<Lead>, Vec<Listener>) = {
            let mut inner = lock(&self.inner);
            match inner.user.as_mut() {
                Some(user) if user.id.as_ref() == Some(id) => f(user),
                _ => return false,
            }
            (inner.user.clone(), inner.listeners.values().cloned().collect())
        };
        debug!(listeners = listeners.len(), "Session user updated");
        for listener in listeners {
            listener(user.as_ref());
        }
        true
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&Lead>) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Arc::new(callback));
        Subscription { id, store: Arc::downgrade(&self.inner) }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

/// Registration handle; the listener is removed on `unsubscribe` or drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Consumes the handle; removal happens in `Drop`.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner).listeners.remove(&self.id);
        }
    }
}
