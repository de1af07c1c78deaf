//! Change-detecting value cells.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it. Owners pair a property with a [`Signal`](crate::Signal) and
//! emit only when `set()` returns `true`:
//!
//! ```
//! use horizon_steps_core::{Property, Signal};
//!
//! struct Cursor {
//!     index: Property<usize>,
//!     index_changed: Signal<usize>,
//! }
//!
//! impl Cursor {
//!     fn move_to(&self, index: usize) {
//!         if self.index.set(index) {
//!             self.index_changed.emit(index);
//!         }
//!     }
//! }
//!
//! let cursor = Cursor { index: Property::new(0), index_changed: Signal::new() };
//! cursor.move_to(3);
//! assert_eq!(cursor.index.get(), 3);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// when `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

static_assertions::assert_impl_all!(Property<usize>: Send, Sync);

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// A read-only view of a property.
///
/// Handed to collaborators that observe a value they must never write.
pub struct ReadOnlyProperty<'a, T> {
    inner: &'a Property<T>,
}

impl<'a, T: Clone> ReadOnlyProperty<'a, T> {
    /// Create a read-only view of a property.
    pub fn new(property: &'a Property<T>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }
}
