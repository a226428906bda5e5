//! Shared test helpers.

use std::cmp::Ordering;


/// A value ordered by `key` alone, so equal keys stay distinguishable by `tag`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tagged {
    pub(crate) key: i32,
    pub(crate) tag: char,
}

impl Tagged {
    pub(crate) fn new(key: i32, tag: char) -> Self {
        Self { key, tag }
    }
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
