use crate::store::{Key, Store};
use std::any::{Any, TypeId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&'static str)>;

/// In-memory store. Subscribers are called synchronously with a key name after every write.
#[derive(Default)]
pub struct MemoryStore {
    slots: HashMap<TypeId, Box<dyn Any>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, f: impl FnMut(&'static str) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a change listener, return false if listener not found.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        len != self.subscribers.len()
    }

    /// Return true if a key was written at least once.
    pub fn contains<K: Key>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<K>())
    }
}

impl Store for MemoryStore {
    fn get<K: Key>(&self) -> K::Value {
        self.slots
            .get(&TypeId::of::<K>())
            .and_then(|slot| slot.downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::initial)
    }

    fn set<K: Key>(&mut self, value: K::Value) {
        self.slots.insert(TypeId::of::<K>(), Box::new(value));
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(K::NAME);
        }
    }
}
