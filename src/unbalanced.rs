//! A plain Binary Search Tree with no rebalancing. Its shape is entirely decided by insertion
//! order: inserting sorted values builds a chain and every operation degrades to `O(n)`.
//!
//! Everything here is iterative (insert and delete walk a cursor over the child slots,
//! traversals keep explicit stacks and even `Drop` and `Clone` avoid recursion) so a chain of
//! any length is safe to build and throw away.
//!
//! # Examples
//!
//! ```
//! use ordtree::unbalanced::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! tree.insert(1);
//! assert_eq!(tree.search(&1), Some(&1));
//!
//! // Equal values are kept, the later one after the earlier one.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting removes one copy at a time and hands it back.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
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

/// A node of an unbalanced [`Tree`]. Only the tree can change it; from the outside it can be
/// read through [`BinaryNode`].
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
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

/// An unbalanced Binary Search Tree. Values comparing `Less` than a node go to its left, all
/// others (including equal ones) go to its right.
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

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        free(self.root.take());
    }
}

impl<T: Clone> Clone for Tree<T> {
    /// Copies the tree node for node, keeping its exact shape. Nodes are rebuilt bottom up in
    /// post-order so deep trees don't recurse.
    fn clone(&self) -> Self {
        let mut built: Vec<Box<Node<T>>> = Vec::new();
        let mut nodes = PostOrder::new(self.root());
        while let Some(node) = nodes.next_node() {
            // Post-order finishes the left subtree, then the right one, so the right child is on
            // top of the stack.
            let right = node
                .right
                .as_ref()
                .map(|_| built.pop().expect("right subtree was rebuilt"));
            let left = node
                .left
                .as_ref()
                .map(|_| built.pop().expect("left subtree was rebuilt"));
            built.push(Box::new(Node {
                value: node.value.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
            stats: self.stats.clone(),
        }
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

    /// Number of edges on the longest path from the root to a leaf, `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::unbalanced::Tree;
    ///
    /// // Sorted input gives a chain.
    /// let tree: Tree<i32> = (1..=5).collect();
    /// assert_eq!(tree.height(), Some(4));
    /// ```
    pub fn height(&self) -> Option<usize> {
        node::height(self.root())
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

    /// Comparisons made so far. This tree never rotates.
    pub fn counts(&self) -> Counts {
        self.stats.counts()
    }

    /// Zeroes the counters.
    pub fn reset_counts(&self) {
        self.stats.reset();
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        free(self.root.take());
        self.len = 0;
    }
}

impl<T: Ord> Tree<T> {
    /// Inserts a value. This always succeeds: a value equal to one already stored is placed in
    /// that value's right subtree, after it in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::unbalanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn insert(&mut self, value: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match self.stats.compare(&value, &node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(Node::leaf(value));
        self.len += 1;
    }

    /// Finds a stored value equal to `value`. With duplicates, this is the one closest to the
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::unbalanced::Tree;
    ///
    /// let tree: Tree<i32> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.search(&3), Some(&3));
    /// assert_eq!(tree.search(&4), None);
    /// ```
    pub fn search(&self, value: &T) -> Option<&T> {
        node::find(self.root(), value, &self.stats)
    }

    /// Returns `true` if a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Removes the first value found equal to `value` and returns it. Returns `None`, leaving the
    /// tree untouched, if there is none.
    ///
    /// A node with two children keeps its place and takes the largest value of its left subtree
    /// instead; the node that held that value is spliced out.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::unbalanced::Tree;
    ///
    /// let mut tree: Tree<i32> = [5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [4, 3, 1, 8]);
    /// assert_eq!(tree.delete(&5), None);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let slot = seek(&mut self.root, value, &self.stats);
        let removed = unlink(slot)?;
        self.len -= 1;
        Some(removed)
    }

    /// Checks the ordering invariant and the tracked length.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        node::check_order(self.root(), self.len)
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

    const KIND: &'static str = "unbalanced";

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

/// Walks down from `slot` to the slot holding the first value equal to `value`, or to the empty
/// slot where the search fell off the tree.
fn seek<'a, T: Ord>(mut slot: &'a mut Link<T>, value: &T, stats: &Stats) -> &'a mut Link<T> {
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => stats.compare(value, &node.value),
            None => return slot,
        };
        if ordering == Ordering::Equal {
            return slot;
        }

        let node = slot.as_deref_mut().expect("slot was just seen occupied");
        slot = match ordering {
            Ordering::Less => &mut node.left,
            _ => &mut node.right,
        };
    }
}

/// Removes the node in `slot` and returns its value, relinking whatever is left in its place.
fn unlink<T>(slot: &mut Link<T>) -> Option<T> {
    let mut node = slot.take()?;
    match (node.left.take(), node.right.take()) {
        (None, None) => Some(node.value),
        (Some(child), None) | (None, Some(child)) => {
            *slot = Some(child);
            Some(node.value)
        }
        (Some(left), Some(right)) => {
            let mut left = Some(left);
            let predecessor = pop_max(&mut left).expect("left subtree is not empty");
            let removed = mem::replace(&mut node.value, predecessor);
            node.left = left;
            node.right = Some(right);
            *slot = Some(node);
            Some(removed)
        }
    }
}

/// Removes the largest node under `slot`, handing its left child (it has no right one) to its
/// parent's slot, and returns its value.
fn pop_max<T>(mut slot: &mut Link<T>) -> Option<T> {
    while slot.as_ref().is_some_and(|n| n.right.is_some()) {
        slot = &mut slot.as_mut().expect("loop condition saw a node").right;
    }
    let mut node = slot.take()?;
    *slot = node.left.take();
    Some(node.value)
}

/// Drops a subtree one node at a time.
fn free<T>(root: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::Tagged;

    fn values<'a>(it: impl Iterator<Item = &'a i32>) -> Vec<i32> {
        it.copied().collect()
    }

    #[test]
    fn insert_and_search() {
        let keys = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = Tree::new();
        assert!(tree.search(&10).is_none());

        for key in keys {
            tree.insert(key);
            inserted.push(key);
            for inserted in &inserted {
                assert_eq!(tree.search(inserted), Some(inserted));
            }
        }
        assert_eq!(tree.search(&0), None);
        assert_eq!(tree.search(&11), None);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn ascending_input_is_a_right_chain() {
        let tree: Tree<i32> = (1..=5).collect();

        assert_eq!(tree.height(), Some(4));
        let mut node = tree.root();
        for expected in 1..=5 {
            let n = node.expect("chain is five long");
            assert_eq!(n.value(), &expected);
            assert!(n.left().is_none());
            node = n.right();
        }
        assert!(node.is_none());
    }

    #[test]
    fn height_of_small_trees() {
        let mut tree = Tree::new();
        assert_eq!(tree.height(), None);
        tree.insert(2);
        assert_eq!(tree.height(), Some(0));
        tree.insert(1);
        tree.insert(3);
        assert_eq!(tree.height(), Some(1));
    }

    #[test]
    fn duplicates_go_right_of_the_earlier_copy() {
        let mut tree = Tree::new();
        tree.insert(Tagged::new(5, 'a'));
        tree.insert(Tagged::new(5, 'b'));
        tree.insert(Tagged::new(3, 'c'));
        tree.insert(Tagged::new(5, 'd'));

        let root = tree.root().unwrap();
        assert_eq!(root.value().tag, 'a');
        assert_eq!(root.right().unwrap().value().tag, 'b');

        let tags: String = tree.in_order().map(|t| t.tag).collect();
        assert_eq!(tags, "cabd");

        // Search stops at the first match on the path, which is the oldest copy.
        assert_eq!(tree.search(&Tagged::new(5, '?')).unwrap().tag, 'a');
    }

    #[test]
    fn delete_leaf() {
        let mut tree: Tree<i32> = [5, 3, 7].into_iter().collect();

        assert_eq!(tree.delete(&7), Some(7));
        assert_eq!(tree.search(&7), None);
        assert_eq!(values(tree.pre_order()), [5, 3]);
    }

    #[test]
    fn delete_with_only_right_child() {
        let mut tree: Tree<i32> = [5, 3, 7, 9, 8].into_iter().collect();

        assert_eq!(tree.delete(&7), Some(7));
        assert_eq!(values(tree.pre_order()), [5, 3, 9, 8]);
    }

    #[test]
    fn delete_with_only_left_child() {
        let mut tree: Tree<i32> = [5, 3, 7, 6].into_iter().collect();

        assert_eq!(tree.delete(&7), Some(7));
        assert_eq!(values(tree.pre_order()), [5, 3, 6]);
    }

    #[test]
    fn delete_root_with_one_child() {
        let mut tree: Tree<i32> = [5, 8, 7, 9].into_iter().collect();

        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.root().map(|n| *n.value()), Some(8));
        assert_eq!(values(tree.pre_order()), [8, 7, 9]);

        let mut tree: Tree<i32> = [5, 3].into_iter().collect();
        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(values(tree.pre_order()), [3]);
    }

    #[test]
    fn delete_last_value_empties_tree() {
        let mut tree = Tree::new();
        tree.insert(5);

        assert_eq!(tree.delete(&5), Some(5));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn delete_two_children_promotes_left_maximum() {
        let mut tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

        assert_eq!(tree.delete(&5), Some(5));

        let root = tree.root().unwrap();
        assert_eq!(root.value(), &4);
        let three = root.left().unwrap();
        assert_eq!(three.value(), &3);
        assert_eq!(three.left().map(|n| *n.value()), Some(1));
        assert!(three.right().is_none());
        assert_eq!(values(tree.in_order()), [1, 3, 4, 7, 8, 9]);
        tree.validate().unwrap();
    }

    #[test]
    fn delete_deep_predecessor_relinks_its_parent() {
        //         8
        //       /   \
        //      3     9
        //     / \
        //    1   6
        //       / \
        //      4   7
        //       \
        //        5
        let mut tree: Tree<i32> = [8, 3, 9, 1, 6, 4, 7, 5].into_iter().collect();

        // The predecessor of 8 is 7, a right child of 6, not of 8.
        assert_eq!(tree.delete(&8), Some(8));
        assert_eq!(values(tree.pre_order()), [7, 3, 1, 6, 4, 5, 9]);

        // Now the predecessor of 7 is 6 and it has a left subtree that must move up.
        assert_eq!(tree.delete(&7), Some(7));
        assert_eq!(values(tree.pre_order()), [6, 3, 1, 4, 5, 9]);
        tree.validate().unwrap();
    }

    #[test]
    fn delete_missing_value_changes_nothing() {
        let mut tree: Tree<i32> = [5, 3, 8].into_iter().collect();

        assert_eq!(tree.delete(&4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(values(tree.level_order()), [5, 3, 8]);

        let mut empty = Tree::<i32>::new();
        assert_eq!(empty.delete(&1), None);
    }

    #[test]
    fn delete_duplicates_one_at_a_time() {
        let mut tree = Tree::new();
        for tag in ['a', 'b', 'c'] {
            tree.insert(Tagged::new(1, tag));
        }
        tree.insert(Tagged::new(0, 'z'));

        assert_eq!(tree.delete(&Tagged::new(1, '?')).unwrap().tag, 'a');
        assert_eq!(tree.delete(&Tagged::new(1, '?')).unwrap().tag, 'b');
        assert_eq!(tree.len(), 2);
        let tags: String = tree.in_order().map(|t| t.tag).collect();
        assert_eq!(tags, "zc");
    }

    #[test]
    fn min_and_max() {
        let tree: Tree<i32> = [5, 3, 8, 1, 9].into_iter().collect();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&9));
        assert_eq!(Tree::<i32>::new().min(), None);
    }

    #[test]
    fn counts_comparisons() {
        let tree: Tree<i32> = (1..=5).collect();
        // 0 + 1 + 2 + 3 + 4 comparisons walking down the chain.
        assert_eq!(tree.counts().comparisons, 10);
        assert_eq!(tree.counts().rotations, 0);

        tree.reset_counts();
        assert_eq!(tree.search(&5), Some(&5));
        assert_eq!(tree.counts().comparisons, 5);
    }

    #[test]
    fn clone_keeps_shape() {
        let tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9, 6].into_iter().collect();
        let mut copy = tree.clone();

        assert_eq!(values(copy.pre_order()), values(tree.pre_order()));
        assert_eq!(copy.len(), tree.len());

        copy.delete(&5);
        assert_eq!(tree.search(&5), Some(&5));
        assert_eq!(copy.search(&5), None);
    }

    /// Builds the chain sorted insertion would, without paying the quadratic insertion cost.
    fn right_chain(len: u32) -> Tree<u32> {
        let mut root = None;
        for value in (0..len).rev() {
            root = Some(Box::new(Node {
                value,
                left: None,
                right: root,
            }));
        }
        Tree {
            root,
            len: len as usize,
            stats: Stats::default(),
        }
    }

    #[test]
    fn long_chains_do_not_overflow_the_stack() {
        let mut tree = right_chain(500_000);
        tree.validate().unwrap();
        assert_eq!(tree.height(), Some(499_999));
        assert_eq!(tree.in_order().count(), 500_000);
        assert_eq!(tree.post_order().count(), 500_000);

        let copy = tree.clone();
        assert_eq!(tree.delete(&499_999), Some(499_999));
        tree.insert(499_999);
        assert_eq!(tree.max(), Some(&499_999));
        drop(copy);
        tree.clear();
        assert!(tree.is_empty());

        // And the implicit drop at the end of scope.
        let _tree = right_chain(500_000);
    }

    #[test]
    fn debug_lists_sorted_values() {
        let tree: Tree<i32> = [2, 3, 1].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "[1, 2, 3]");
    }
}

#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a sorted vector, checking every result against
    /// the vector.
    fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, model: &mut Vec<i8>) -> bool {
        for op in ops {
            match op {
                Op::Insert(v) => {
                    tree.insert(*v);
                    let at = model.partition_point(|x| x <= v);
                    model.insert(at, *v);
                }
                Op::Remove(v) => {
                    let expected = model.iter().position(|x| x == v).map(|i| model.remove(i));
                    if tree.delete(v) != expected {
                        return false;
                    }
                }
                Op::Search(v) => {
                    if tree.contains(v) != model.contains(v) {
                        return false;
                    }
                }
                Op::Iter => {
                    if !tree.in_order().eq(model.iter()) {
                        return false;
                    }
                }
            }
        }
        tree.validate().is_ok() && tree.len() == model.len()
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model)
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.search(x) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn clone_preserves_pre_order(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.into_iter().collect();

            tree.clone().pre_order().eq(tree.pre_order())
        }
    }
}
