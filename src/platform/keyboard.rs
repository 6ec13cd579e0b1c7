//! Keyboard show/hide notifications with scoped subscriptions

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// What the on-screen keyboard is about to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    WillShow { height: f32 },
    WillHide,
}

type KeyboardHandler = Arc<dyn Fn(&KeyboardEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<u64, KeyboardHandler>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Delivers keyboard events to subscribers in subscription order.
#[derive(Clone, Default)]
pub struct KeyboardNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl KeyboardNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`. It stays registered until the returned guard is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> KeyboardSubscription
    where
        F: Fn(&KeyboardEvent) + Send + Sync + 'static,
    {
        let mut reg = lock(&self.registry);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.handlers.insert(id, Arc::new(handler));
        log::trace!("keyboard subscriber {} added", id);
        KeyboardSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every current subscriber
    pub fn post(&self, event: KeyboardEvent) {
        // Handlers run outside the lock so they may drop subscriptions.
        let handlers: Vec<KeyboardHandler> = lock(&self.registry).handlers.values().cloned().collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }
}

/// Guard for one registered handler; unsubscribes on drop.
pub struct KeyboardSubscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).handlers.remove(&self.id);
            log::trace!("keyboard subscriber {} removed", self.id);
        }
    }
}
