//! The node shape both trees share, and the read-only algorithms written once against it.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::error::InvariantViolation;
use crate::iter::InOrder;
use crate::stats::Stats;

/// Read access to a binary tree node: its value and its (optional) children.
///
/// Both [`unbalanced::Node`][crate::unbalanced::Node] and [`avl::Node`][crate::avl::Node]
/// implement this, so traversals and structural checks work on either.
pub trait BinaryNode {
    /// The stored value.
    type Value;

    /// The value held by this node.
    fn value(&self) -> &Self::Value;

    /// The root of the left subtree, if any.
    fn left(&self) -> Option<&Self>;

    /// The root of the right subtree, if any.
    fn right(&self) -> Option<&Self>;

    /// Returns `true` if the node has no children.
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// Descends from `node` and returns the first value on the path that compares equal to `value`.
pub(crate) fn find<'a, N>(
    mut node: Option<&'a N>,
    value: &N::Value,
    stats: &Stats,
) -> Option<&'a N::Value>
where
    N: BinaryNode,
    N::Value: Ord,
{
    while let Some(n) = node {
        node = match stats.compare(value, n.value()) {
            Ordering::Less => n.left(),
            Ordering::Equal => return Some(n.value()),
            Ordering::Greater => n.right(),
        };
    }
    None
}

pub(crate) fn leftmost<N: BinaryNode>(mut node: &N) -> &N {
    while let Some(left) = node.left() {
        node = left;
    }
    node
}

pub(crate) fn rightmost<N: BinaryNode>(mut node: &N) -> &N {
    while let Some(right) = node.right() {
        node = right;
    }
    node
}

/// Number of edges on the longest root-to-leaf path, `None` for an empty tree. Computed level by
/// level so it doesn't recurse.
pub(crate) fn height<N: BinaryNode>(root: Option<&N>) -> Option<usize> {
    let mut queue: VecDeque<(&N, usize)> = root.map(|n| (n, 0)).into_iter().collect();
    let mut height = None;
    while let Some((node, depth)) = queue.pop_front() {
        height = height.max(Some(depth));
        queue.extend(node.left().map(|n| (n, depth + 1)));
        queue.extend(node.right().map(|n| (n, depth + 1)));
    }
    height
}

/// Checks the in-order sequence is non-decreasing and that `len` nodes are reachable.
pub(crate) fn check_order<N>(root: Option<&N>, len: usize) -> Result<(), InvariantViolation>
where
    N: BinaryNode,
    N::Value: Ord,
{
    let mut nodes = InOrder::new(root);
    let mut previous = None;
    let mut reachable = 0;
    while let Some(node) = nodes.next_node() {
        if previous.is_some_and(|p| node.value() < p) {
            return Err(InvariantViolation::Unordered {
                position: reachable,
            });
        }
        previous = Some(node.value());
        reachable += 1;
    }

    if reachable != len {
        return Err(InvariantViolation::LengthMismatch {
            reported: len,
            reachable,
        });
    }
    Ok(())
}
