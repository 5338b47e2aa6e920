//! Keyed state container shared between the session controllers and the rendering layer.
//!
//! Every key is a zero-sized type implementing [`Key`], this makes a value type of each
//! store slot known at compile time. Controllers never own a store, they receive it from the
//! composition root and mutate it through the [`Store`] trait, so any container
//! (an in-memory one like [`MemoryStore`] or a bridge into a real UI framework) may be plugged in.

pub mod keys;
mod memory;

pub use memory::{MemoryStore, SubscriptionId};

use std::fmt::Debug;

/// Typed store key.
pub trait Key: 'static {
    type Value: Clone + Debug + PartialEq + 'static;

    /// Key name, used for change notification and logs.
    const NAME: &'static str;

    /// Value of the slot before the first write.
    fn initial() -> Self::Value;
}

/// Generic key/value container with change notification.
pub trait Store {
    /// Return current value for a key (or initial value if key is never set).
    fn get<K: Key>(&self) -> K::Value;

    /// Write a value and notify subscribers about a change.
    fn set<K: Key>(&mut self, value: K::Value);

    /// Read-modify-write a value, subscribers are notified once.
    fn update<K, F>(&mut self, f: F)
    where
        K: Key,
        F: FnOnce(&mut K::Value),
    {
        let mut value = self.get::<K>();
        f(&mut value);
        self.set::<K>(value);
    }
}

/// Define a set of store keys.
///
/// ```ignore
/// store_keys! {
///     /// Documentation.
///     ShowModal: bool = false, "show_modal";
/// }
/// ```
#[macro_export]
macro_rules! store_keys {
    ($($(#[$meta:meta])* $key:ident: $ty:ty = $init:expr, $name:literal;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $key;

            impl $crate::store::Key for $key {
                type Value = $ty;
                const NAME: &'static str = $name;

                fn initial() -> Self::Value {
                    $init
                }
            }
        )+
    };
}
