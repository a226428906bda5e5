//! Measures real operations against either tree.
//!
//! Comparisons and rotations come from the trees' own counters, so the numbers are what the
//! trees actually did rather than an estimate. Elapsed times are wall clock and only meaningful
//! in optimized builds.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::{avl, unbalanced, Counts, SearchTree};

/// Searches are repeated this many times and the elapsed time averaged.
pub const SEARCH_RUNS: u32 = 3;

/// What a batch of operations cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Operations performed.
    pub operations: usize,
    /// Key comparisons made.
    pub comparisons: u64,
    /// Rotations made. Always zero for the unbalanced tree.
    pub rotations: u64,
    /// Wall clock time taken.
    pub elapsed: Duration,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "comparisons: {} | rotations: {} | time: {:.3} ms",
            self.comparisons,
            self.rotations,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

/// Inserts `values` in order into a fresh tree and returns it with the cost.
pub fn measure_insertion<T, S>(values: &[T]) -> (S, Metrics)
where
    T: Ord + Clone,
    S: SearchTree<T>,
{
    let mut tree = S::default();
    let start = Instant::now();
    for value in values {
        tree.insert(value.clone());
    }
    let elapsed = start.elapsed();

    let metrics = collect(tree.counts(), values.len(), elapsed);
    debug!(kind = S::KIND, %metrics, "measured insertion");
    (tree, metrics)
}

/// Inserts one value into an existing tree.
pub fn measure_insert<T, S>(tree: &mut S, value: T) -> Metrics
where
    T: Ord,
    S: SearchTree<T>,
{
    tree.reset_counts();
    let start = Instant::now();
    tree.insert(value);
    let elapsed = start.elapsed();

    let metrics = collect(tree.counts(), 1, elapsed);
    debug!(kind = S::KIND, %metrics, "measured insert");
    metrics
}

/// Searches `tree` for each of `probes`, [`SEARCH_RUNS`] times over. Counts are per run.
pub fn measure_search<T, S>(tree: &S, probes: &[T]) -> Metrics
where
    T: Ord,
    S: SearchTree<T>,
{
    tree.reset_counts();
    let mut found = 0;
    let start = Instant::now();
    for _ in 0..SEARCH_RUNS {
        found = probes.iter().filter(|p| tree.contains(p)).count();
    }
    let elapsed = start.elapsed() / SEARCH_RUNS;

    let mut metrics = collect(tree.counts(), probes.len(), elapsed);
    metrics.comparisons /= u64::from(SEARCH_RUNS);
    debug!(kind = S::KIND, found, %metrics, "measured search");
    metrics
}

/// Deletes each of `probes` from `tree`.
pub fn measure_removal<T, S>(tree: &mut S, probes: &[T]) -> Metrics
where
    T: Ord,
    S: SearchTree<T>,
{
    tree.reset_counts();
    let start = Instant::now();
    let removed = probes.iter().filter(|p| tree.delete(p).is_some()).count();
    let elapsed = start.elapsed();

    let metrics = collect(tree.counts(), probes.len(), elapsed);
    debug!(kind = S::KIND, removed, %metrics, "measured removal");
    metrics
}

fn collect(counts: Counts, operations: usize, elapsed: Duration) -> Metrics {
    Metrics {
        operations,
        comparisons: counts.comparisons,
        rotations: counts.rotations,
        elapsed,
    }
}

/// One tree's costs over a whole workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// [`SearchTree::KIND`] of the tree measured.
    pub kind: &'static str,
    /// Cost of building the tree.
    pub insertion: Metrics,
    /// Cost of searching it.
    pub search: Metrics,
    /// Cost of deleting from it.
    pub removal: Metrics,
    /// Height once every value was inserted.
    pub height: Option<usize>,
    /// Values left after the removals.
    pub remaining: usize,
}

/// Builds a tree from `values`, then searches for and deletes `probes`.
#[instrument(skip_all, fields(kind = S::KIND, values = values.len(), probes = probes.len()))]
pub fn profile<T, S>(values: &[T], probes: &[T]) -> Profile
where
    T: Ord + Clone,
    S: SearchTree<T>,
{
    let (mut tree, insertion) = measure_insertion::<T, S>(values);
    let height = tree.height();
    let search = measure_search(&tree, probes);
    let removal = measure_removal(&mut tree, probes);

    Profile {
        kind: S::KIND,
        insertion,
        search,
        removal,
        height,
        remaining: tree.len(),
    }
}

/// The same workload run against both trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// [`unbalanced::Tree`]'s costs.
    pub unbalanced: Profile,
    /// [`avl::Tree`]'s costs.
    pub avl: Profile,
}

/// Profiles both trees over `values` and `probes`.
pub fn compare<T: Ord + Clone>(values: &[T], probes: &[T]) -> Comparison {
    Comparison {
        unbalanced: profile::<T, unbalanced::Tree<T>>(values, probes),
        avl: profile::<T, avl::Tree<T>>(values, probes),
    }
}
