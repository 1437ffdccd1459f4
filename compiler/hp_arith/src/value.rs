//! Owned arbitrary-precision values.
//!
//! A [`Value`] is move-only in spirit: duplication goes through [`Clone`],
//! release happens in [`Drop`]. Debug builds keep a per-thread count of live
//! values so tests can assert that every value produced along a code path was
//! released again. Constants cached inside an
//! [`EvaluationContext`](crate::EvaluationContext) are plain `BigFloat`s and
//! are not counted.

use std::fmt;

use astro_float::BigFloat;

#[cfg(debug_assertions)]
mod accounting {
    use std::cell::Cell;

    thread_local! {
        static LIVE: Cell<isize> = const { Cell::new(0) };
    }

    #[inline]
    pub(super) fn acquire() {
        LIVE.with(|live| live.set(live.get() + 1));
    }

    #[inline]
    pub(super) fn release() {
        LIVE.with(|live| live.set(live.get() - 1));
    }

    pub(super) fn live() -> isize {
        LIVE.with(Cell::get)
    }
}

#[cfg(not(debug_assertions))]
mod accounting {
    #[inline]
    pub(super) fn acquire() {}

    #[inline]
    pub(super) fn release() {}

    pub(super) fn live() -> isize {
        0
    }
}

/// Number of values created on this thread and not yet dropped.
///
/// Always `0` in release builds.
pub fn live_values() -> isize {
    accounting::live()
}

/// Snapshot of [`live_values`] for leak assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeakCheck {
    baseline: isize,
}

impl LeakCheck {
    pub fn start() -> Self {
        LeakCheck {
            baseline: live_values(),
        }
    }

    /// Values created since [`LeakCheck::start`] that are still alive.
    pub fn outstanding(&self) -> isize {
        live_values() - self.baseline
    }
}

/// An arbitrary-precision float owned by exactly one holder.
pub struct Value {
    inner: BigFloat,
}

impl Value {
    /// Take ownership of an already rounded float.
    pub(crate) fn from_big(inner: BigFloat) -> Self {
        accounting::acquire();
        Value { inner }
    }

    #[inline]
    pub fn as_big(&self) -> &BigFloat {
        &self.inner
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        !self.inner.is_zero() && self.inner.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.inner.is_zero() && self.inner.is_positive()
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.inner.is_inf()
    }

    #[inline]
    pub fn is_plus_infinity(&self) -> bool {
        self.inner.is_inf_pos()
    }

    #[inline]
    pub fn is_minus_infinity(&self) -> bool {
        self.inner.is_inf_neg()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Value::from_big(self.inner.clone())
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        accounting::release();
    }
}

/// Numeric equality; `+0 == -0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.inner)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
