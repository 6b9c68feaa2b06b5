//! Sod stands for Static or Dynamic. An enum to encapsulate values which
//! are either dynamically, heap-allocated values, or statics.
//!
//! This allows us to define a default primitive which is used throughout
//! without the overhead of reference counting, while still supporting the
//! flexibility to create primitives with arbitrary work factors.
//!
//! Thanks to the `Deref` implementation, either variant is treated like
//! the inner type without needing to worry about which it is.

use std::ops::Deref;
use std::sync::Arc;

/// Enum to hold either static references or reference-counted owned objects.
/// Implements `Deref` to `T` for ease of use.
/// Since internal data is either a static reference, or an `Arc`, cloning
/// is a cheap operation.
pub enum Sod<T: ?Sized + 'static> {
    /// Static reference to T
    Static(&'static T),
    /// Dynamically allocated T, on the heap, atomically reference-counted.
    Dynamic(Arc<Box<T>>),
}

impl<T: ?Sized> Deref for Sod<T> {
    type Target = T;
    fn deref(&self) -> &T {
        match *self {
            Sod::Static(t) => t,
            Sod::Dynamic(ref t) => t,
        }
    }
}

impl<T: ?Sized> Clone for Sod<T> {
    fn clone(&self) -> Sod<T> {
        match *self {
            Sod::Static(t) => Sod::Static(t),
            Sod::Dynamic(ref t) => Sod::Dynamic(t.clone()),
        }
    }
}
