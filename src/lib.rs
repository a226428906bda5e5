//! This crate exposes two ordered in-memory indexes, an unbalanced Binary Search Tree and an
//! AVL tree, plus the tooling to load records into them and compare how they behave.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Both trees here accept equal values. Inserting a value equal to one already stored sends it
//! right, so it sorts after the earlier one, and nothing done to the tree afterwards changes that
//! relative order.
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree; [`avl::Tree`] does exactly that, [`unbalanced::Tree`] doesn't and turns into a
//! chain when fed sorted input. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## Around the trees
//!
//! - [`record`] and [`ingest`] turn a `steamcharts`-style CSV into [`record::Game`]s, ordered by
//!   their average concurrent players.
//! - [`analysis`] answers exploratory questions by walking a tree.
//! - [`harness`] times and counts real operations against either tree through [`SearchTree`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod analysis;
pub mod avl;
pub mod error;
pub mod harness;
pub mod ingest;
pub mod iter;
pub mod node;
pub mod record;
pub mod stats;
pub mod unbalanced;

#[cfg(test)]
mod test;

pub use error::{Error, InvariantViolation};
pub use iter::Order;
pub use node::BinaryNode;
pub use stats::Counts;

use iter::Traversal;

/// The operations both trees support, so code can be written once and run against either.
///
/// # Examples
///
/// ```
/// use ordtree::{avl, unbalanced, SearchTree};
///
/// fn build<S: SearchTree<i32>>() -> S {
///     let mut tree = S::default();
///     for x in 1..=31 {
///         tree.insert(x);
///     }
///     tree
/// }
///
/// assert_eq!(build::<unbalanced::Tree<i32>>().height(), Some(30));
/// assert_eq!(build::<avl::Tree<i32>>().height(), Some(4));
/// ```
pub trait SearchTree<T: Ord>: Default {
    /// The tree's node type.
    type Node: BinaryNode<Value = T>;

    /// A short name for reports.
    const KIND: &'static str;

    /// Inserts a value. Equal values are kept; the newer one sorts after the older.
    ///
    /// Nothing is returned: rotations may move the new node before the call ends. Use
    /// [`search`](Self::search) to borrow the stored value.
    fn insert(&mut self, value: T);

    /// Finds a stored value equal to `value`.
    fn search(&self, value: &T) -> Option<&T>;

    /// Removes a stored value equal to `value` and returns it.
    fn delete(&mut self, value: &T) -> Option<T>;

    /// The number of values stored.
    fn len(&self) -> usize;

    /// Number of edges on the longest root-to-leaf path, `None` when empty.
    fn height(&self) -> Option<usize>;

    /// The root node, if any.
    fn root(&self) -> Option<&Self::Node>;

    /// Comparisons and rotations made so far.
    fn counts(&self) -> Counts;

    /// Zeroes the counters.
    fn reset_counts(&self);

    /// Checks the tree's structural invariants.
    fn validate(&self) -> Result<(), InvariantViolation>;

    /// Returns `true` if a value equal to `value` is stored.
    fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Returns `true` if the tree holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the values in the given order.
    fn traverse(&self, order: Order) -> Traversal<'_, Self::Node> {
        Traversal::new(self.root(), order)
    }

    /// The smallest value.
    fn min(&self) -> Option<&T> {
        self.root().map(|n| node::leftmost(n).value())
    }

    /// The largest value.
    fn max(&self) -> Option<&T> {
        self.root().map(|n| node::rightmost(n).value())
    }
}
