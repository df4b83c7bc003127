//! `Heap<T>`: the only way a `Value` variant holds an `Arc`-backed payload.
//!
//! The constructor is `pub(super)`, so values can only reach the heap through
//! a `Value` factory method (`Value::string`, `Value::list`, ...) -- no
//! caller outside this crate can construct a `Heap` directly, which is what
//! keeps every heap-backed `Value` variant's refcounting uniform.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An `Arc`-backed heap allocation. Cloning bumps the refcount; it never
/// deep-copies `T`.
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Reclaim the inner value if this is the only remaining reference.
    /// Returns the `Heap` unchanged if another reference is still live.
    pub fn try_into_inner(self) -> Result<T, Self> {
        Arc::try_unwrap(self.0).map_err(Self)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

#[cfg(test)]
mod tests;
