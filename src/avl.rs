//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! Every node records its height. After each insert or delete the heights along the changed
//! path are recomputed on the way back up and any node whose subtrees differ in height by more
//! than one is fixed with a single or double rotation. The tree height therefore stays
//! `O(lg N)`, which also bounds the recursion depth of the mutating operations.
//!
//! # Examples
//!
//! ```
//! use ordtree::avl::Tree;
//! use ordtree::BinaryNode;
//!
//! let mut tree = Tree::new();
//! tree.insert(1);
//! tree.insert(2);
//! tree.insert(3);
//!
//! // Sorted input doesn't build a chain: 2 was rotated up.
//! let root = tree.root().unwrap();
//! assert_eq!(root.value(), &2);
//! assert_eq!(tree.height(), Some(1));
//!
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::InvariantViolation;
use crate::iter::{InOrder, LevelOrder, Order, PostOrder, PreOrder, Traversal};
use crate::node::{self, BinaryNode};
use crate::stats::{Counts, Stats};
use crate::SearchTree;

type Link<T> = Option<Box<Node<T>>>;

/// Height of a possibly empty subtree. An empty subtree is one level below a leaf.
fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |n| n.height)
}

/// A node of an AVL [`Tree`]. Besides its value and children it keeps the height of the subtree
/// rooted at it.
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,

    /// How many edges are on the longest path down to a leaf. A node with no children has a
    /// height of 0.
    height: i32,
}

impl<T> BinaryNode for Node<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// The height stored on this node.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `height(left) - height(right)`. Positive means left heavy.
    ///
    /// See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }
}

/// Rotate `node` to the right. This moves the left child up and `node` down. Used when the left
/// side is too tall, so `node` must have a left child.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///       node                pivot
///       /   \               /   \
///    pivot   z   rotate -> x    node
///    /   \                      /  \
///   x     y                    y    z
/// ```
fn rotate_right<T>(mut node: Box<Node<T>>, stats: &Stats) -> Box<Node<T>> {
    let mut pivot = node.left.take().expect("rotate right => left child");
    node.left = pivot.right.take();
    node.fix_height();
    pivot.right = Some(node);
    pivot.fix_height();
    stats.rotated();
    pivot
}

/// Mirror image of [`rotate_right`].
fn rotate_left<T>(mut node: Box<Node<T>>, stats: &Stats) -> Box<Node<T>> {
    let mut pivot = node.right.take().expect("rotate left => right child");
    node.right = pivot.left.take();
    node.fix_height();
    pivot.left = Some(node);
    pivot.fix_height();
    stats.rotated();
    pivot
}

/// Recomputes the height of `node` and, if its subtrees now differ in height by two, rotates to
/// restore the AVL invariant. Returns the root of the rebalanced subtree.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
fn rebalance<T>(mut node: Box<Node<T>>, stats: &Stats) -> Box<Node<T>> {
    node.fix_height();
    let balance = node.balance_factor();

    let root = if balance > 1 {
        let left = node.left.take().expect("left heavy => left child");
        // Left-right case: straighten the kink first.
        node.left = Some(if left.balance_factor() < 0 {
            rotate_left(left, stats)
        } else {
            left
        });
        rotate_right(node, stats)
    } else if balance < -1 {
        let right = node.right.take().expect("right heavy => right child");
        // Right-left case.
        node.right = Some(if right.balance_factor() > 0 {
            rotate_right(right, stats)
        } else {
            right
        });
        rotate_left(node, stats)
    } else {
        node
    };

    // In debug builds, after balancing, assert that we've restored/maintained the AVL invariant.
    if cfg!(debug_assertions) {
        assert_eq!(
            root.height,
            height(&root.left).max(height(&root.right)) + 1
        );
        assert!(root.balance_factor().abs() <= 1);
    }
    root
}

fn insert<T: Ord>(link: Link<T>, value: T, stats: &Stats) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Node::leaf(value);
    };
    match stats.compare(&value, &node.value) {
        Ordering::Less => node.left = Some(insert(node.left.take(), value, stats)),
        Ordering::Equal | Ordering::Greater => {
            node.right = Some(insert(node.right.take(), value, stats))
        }
    }
    rebalance(node, stats)
}

/// Deletes the first node found holding a value equal to `value` from the subtree at `link`.
/// Returns the new subtree root and the removed value. A subtree without a match comes back
/// unchanged.
fn delete<T: Ord>(link: Link<T>, value: &T, stats: &Stats) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let removed = match stats.compare(value, &node.value) {
        Ordering::Less => {
            let (left, removed) = delete(node.left.take(), value, stats);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = delete(node.right.take(), value, stats);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, Some(node.value)),
            // An AVL node with one child has a leaf there, already balanced.
            (Some(child), None) | (None, Some(child)) => return (Some(child), Some(node.value)),
            // If we have two children we have to figure out which node to promote. We choose
            // here this node's predecessor. That is, the largest node in this node's left
            // subtree.
            (Some(left), right) => {
                let (left, predecessor) = delete_largest(left, stats);
                node.left = left;
                node.right = right;
                Some(mem::replace(&mut node.value, predecessor))
            }
        },
    };

    match removed {
        Some(_) => (Some(rebalance(node, stats)), removed),
        None => (Some(node), None),
    }
}

/// Returns a new subtree without its largest node, and that node's value. Every node on the
/// way down is rebalanced on the way back up.
fn delete_largest<T>(mut node: Box<Node<T>>, stats: &Stats) -> (Link<T>, T) {
    match node.right.take() {
        None => {
            let Node { value, left, .. } = *node;
            (left, value)
        }
        Some(right) => {
            let (right, largest) = delete_largest(right, stats);
            node.right = right;
            (Some(rebalance(node, stats)), largest)
        }
    }
}

/// A self-balancing Binary Search Tree. Ordering and duplicate handling match
/// [`unbalanced::Tree`][crate::unbalanced::Tree]: less goes left, everything else goes right,
/// and rotations never change the sorted order of the values.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
    stats: Stats,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            stats: Stats::default(),
        }
    }

    /// The number of values stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of edges on the longest path from the root to a leaf, `None` when empty. Read
    /// straight off the root.
    pub fn height(&self) -> Option<usize> {
        self.root.as_ref().map(|n| n.height as usize)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// The smallest value.
    pub fn min(&self) -> Option<&T> {
        self.root().map(|n| node::leftmost(n).value())
    }

    /// The largest value.
    pub fn max(&self) -> Option<&T> {
        self.root().map(|n| node::rightmost(n).value())
    }

    /// Iterates the values in sorted order.
    pub fn in_order(&self) -> InOrder<'_, Node<T>> {
        InOrder::new(self.root())
    }

    /// Iterates the values node first, then left subtree, then right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, Node<T>> {
        PreOrder::new(self.root())
    }

    /// Iterates the values left subtree first, then right subtree, then node.
    pub fn post_order(&self) -> PostOrder<'_, Node<T>> {
        PostOrder::new(self.root())
    }

    /// Iterates the values breadth first.
    pub fn level_order(&self) -> LevelOrder<'_, Node<T>> {
        LevelOrder::new(self.root())
    }

    /// Iterates the values in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_, Node<T>> {
        Traversal::new(self.root(), order)
    }

    /// Comparisons and rotations made so far.
    pub fn counts(&self) -> Counts {
        self.stats.counts()
    }

    /// Zeroes the counters.
    pub fn reset_counts(&self) {
        self.stats.reset();
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl<T: Ord> Tree<T> {
    /// Inserts a value and rebalances. A value equal to one already stored ends up after it in
    /// sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in 1..=7 {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.height(), Some(2));
    /// assert_eq!(tree.level_order().copied().collect::<Vec<_>>(), [4, 2, 6, 1, 3, 5, 7]);
    /// ```
    pub fn insert(&mut self, value: T) {
        self.root = Some(insert(self.root.take(), value, &self.stats));
        self.len += 1;
    }

    /// Finds a stored value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::avl::Tree;
    ///
    /// let tree: Tree<i32> = (1..=100).collect();
    ///
    /// assert_eq!(tree.search(&42), Some(&42));
    /// assert_eq!(tree.search(&101), None);
    /// ```
    pub fn search(&self, value: &T) -> Option<&T> {
        node::find(self.root(), value, &self.stats)
    }

    /// Returns `true` if a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Removes the first value found equal to `value`, rebalances, and returns it. Returns
    /// `None`, leaving the tree untouched, if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::avl::Tree;
    ///
    /// let mut tree: Tree<i32> = (1..=7).collect();
    ///
    /// assert_eq!(tree.delete(&4), Some(4));
    /// assert_eq!(tree.delete(&4), None);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let (root, removed) = delete(self.root.take(), value, &self.stats);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Checks the ordering invariant, every stored height, every balance factor and the tracked
    /// length.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        node::check_order(self.root(), self.len)?;

        let mut nodes = InOrder::new(self.root());
        let mut position = 0;
        while let Some(n) = nodes.next_node() {
            let actual = height(&n.left).max(height(&n.right)) + 1;
            if n.height != actual {
                return Err(InvariantViolation::StaleHeight {
                    position,
                    stored: n.height,
                    actual,
                });
            }
            let balance = n.balance_factor();
            if balance.abs() > 1 {
                return Err(InvariantViolation::Unbalanced { position, balance });
            }
            position += 1;
        }
        Ok(())
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> SearchTree<T> for Tree<T> {
    type Node = Node<T>;

    const KIND: &'static str = "avl";

    fn insert(&mut self, value: T) {
        Tree::insert(self, value)
    }

    fn search(&self, value: &T) -> Option<&T> {
        Tree::search(self, value)
    }

    fn delete(&mut self, value: &T) -> Option<T> {
        Tree::delete(self, value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> Option<usize> {
        Tree::height(self)
    }

    fn root(&self) -> Option<&Node<T>> {
        Tree::root(self)
    }

    fn counts(&self) -> Counts {
        Tree::counts(self)
    }

    fn reset_counts(&self) {
        Tree::reset_counts(self)
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        Tree::validate(self)
    }
}
