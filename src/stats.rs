//! Operation counters. Trees bump these while they work so comparisons and rotations are
//! measured rather than estimated.

use std::cell::Cell;
use std::cmp::Ordering;

/// A snapshot of a tree's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    /// Value comparisons made by `insert`, `search` and `delete`.
    pub comparisons: u64,
    /// Single rotations. A double rotation counts as two.
    pub rotations: u64,
}

/// Counters owned by a tree. `Cell`s let `search(&self)` count too.
#[derive(Debug, Default, Clone)]
pub(crate) struct Stats {
    comparisons: Cell<u64>,
    rotations: Cell<u64>,
}

impl Stats {
    /// Compares `a` to `b`, counting the comparison.
    pub(crate) fn compare<T: Ord>(&self, a: &T, b: &T) -> Ordering {
        self.comparisons.set(self.comparisons.get() + 1);
        a.cmp(b)
    }

    pub(crate) fn rotated(&self) {
        self.rotations.set(self.rotations.get() + 1);
    }

    pub(crate) fn counts(&self) -> Counts {
        Counts {
            comparisons: self.comparisons.get(),
            rotations: self.rotations.get(),
        }
    }

    pub(crate) fn reset(&self) {
        self.comparisons.set(0);
        self.rotations.set(0);
    }
}
