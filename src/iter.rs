//! Traversal iterators shared by both trees.
//!
//! Every iterator keeps its own explicit stack or queue, so walking a degenerate chain of any
//! length costs heap, not call stack. Iterators borrow the tree; asking the tree for a new one
//! restarts the walk from the root, and cloning one forks the walk at its current position.
//!
//! # Examples
//!
//! ```
//! use ordtree::iter::Order;
//! use ordtree::unbalanced::Tree;
//!
//! let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
//!
//! assert_eq!(tree.traverse(Order::InOrder).copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(tree.traverse(Order::PreOrder).copied().collect::<Vec<_>>(), [2, 1, 3]);
//! assert_eq!(tree.traverse(Order::PostOrder).copied().collect::<Vec<_>>(), [1, 3, 2]);
//! assert_eq!(tree.traverse(Order::LevelOrder).copied().collect::<Vec<_>>(), [2, 1, 3]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::error::ParseOrderError;
use crate::node::BinaryNode;

/// The four supported visiting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields values in sorted order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
    /// Breadth first, each level left to right.
    LevelOrder,
}

impl Order {
    /// All orders, in declaration order.
    pub const ALL: [Order; 4] = [
        Order::InOrder,
        Order::PreOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::InOrder => "in-order",
            Order::PreOrder => "pre-order",
            Order::PostOrder => "post-order",
            Order::LevelOrder => "level-order",
        };
        f.write_str(name)
    }
}

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(Order::InOrder),
            "pre" | "preorder" | "pre-order" => Ok(Order::PreOrder),
            "post" | "postorder" | "post-order" => Ok(Order::PostOrder),
            "level" | "levelorder" | "level-order" | "bfs" => Ok(Order::LevelOrder),
            _ => Err(ParseOrderError(s.to_string())),
        }
    }
}

/// In-order (sorted) iterator.
pub struct InOrder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: BinaryNode> InOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a N> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// Pre-order iterator.
pub struct PreOrder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: BinaryNode> PreOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a N> {
        let node = self.stack.pop()?;
        // Right first so the left child is popped first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// Post-order iterator.
pub struct PostOrder<'a, N> {
    /// Each entry remembers whether its children have already been pushed.
    stack: Vec<(&'a N, bool)>,
}

impl<'a, N: BinaryNode> PostOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a N> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
        None
    }
}

/// Level-order (breadth first) iterator.
pub struct LevelOrder<'a, N> {
    queue: VecDeque<&'a N>,
}

impl<'a, N: BinaryNode> LevelOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a N> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}

/// Generates the `Iterator`, `FusedIterator` and `Clone` impls for a traversal type. `Clone` is
/// written by hand so it doesn't require `N: Clone`; only the references are copied.
macro_rules! traversal_impls {
    ($($ty:ident { $field:ident }),* $(,)?) => {$(
        impl<'a, N: BinaryNode> Iterator for $ty<'a, N> {
            type Item = &'a N::Value;

            fn next(&mut self) -> Option<Self::Item> {
                self.next_node().map(|n| n.value())
            }
        }

        impl<'a, N: BinaryNode> FusedIterator for $ty<'a, N> {}

        impl<'a, N> Clone for $ty<'a, N> {
            fn clone(&self) -> Self {
                Self {
                    $field: self.$field.clone(),
                }
            }
        }
    )*};
}

traversal_impls!(
    InOrder { stack },
    PreOrder { stack },
    PostOrder { stack },
    LevelOrder { queue },
);

/// An iterator over any of the four [`Order`]s, picked at runtime.
pub enum Traversal<'a, N> {
    /// See [`InOrder`].
    InOrder(InOrder<'a, N>),
    /// See [`PreOrder`].
    PreOrder(PreOrder<'a, N>),
    /// See [`PostOrder`].
    PostOrder(PostOrder<'a, N>),
    /// See [`LevelOrder`].
    LevelOrder(LevelOrder<'a, N>),
}

impl<'a, N: BinaryNode> Traversal<'a, N> {
    pub(crate) fn new(root: Option<&'a N>, order: Order) -> Self {
        match order {
            Order::InOrder => Self::InOrder(InOrder::new(root)),
            Order::PreOrder => Self::PreOrder(PreOrder::new(root)),
            Order::PostOrder => Self::PostOrder(PostOrder::new(root)),
            Order::LevelOrder => Self::LevelOrder(LevelOrder::new(root)),
        }
    }
}

impl<'a, N: BinaryNode> Iterator for Traversal<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::InOrder(it) => it.next(),
            Self::PreOrder(it) => it.next(),
            Self::PostOrder(it) => it.next(),
            Self::LevelOrder(it) => it.next(),
        }
    }
}

impl<'a, N: BinaryNode> FusedIterator for Traversal<'a, N> {}

impl<'a, N> Clone for Traversal<'a, N> {
    fn clone(&self) -> Self {
        match self {
            Self::InOrder(it) => Self::InOrder(it.clone()),
            Self::PreOrder(it) => Self::PreOrder(it.clone()),
            Self::PostOrder(it) => Self::PostOrder(it.clone()),
            Self::LevelOrder(it) => Self::LevelOrder(it.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unbalanced::Tree;

    /// ```text
    ///        5
    ///      /   \
    ///     3     8
    ///    / \   / \
    ///   1   4 7   9
    /// ```
    fn full_tree() -> Tree<i32> {
        [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
    }

    fn collect(tree: &Tree<i32>, order: Order) -> Vec<i32> {
        tree.traverse(order).copied().collect()
    }

    #[test]
    fn all_orders_on_full_tree() {
        let tree = full_tree();
        assert_eq!(collect(&tree, Order::InOrder), [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(collect(&tree, Order::PreOrder), [5, 3, 1, 4, 8, 7, 9]);
        assert_eq!(collect(&tree, Order::PostOrder), [1, 4, 3, 7, 9, 8, 5]);
        assert_eq!(collect(&tree, Order::LevelOrder), [5, 3, 8, 1, 4, 7, 9]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = Tree::<i32>::new();
        for order in Order::ALL {
            assert_eq!(tree.traverse(order).next(), None);
        }
    }

    #[test]
    fn traversals_restart_and_fork() {
        let tree = full_tree();
        let mut first = tree.in_order();
        assert_eq!(first.next(), Some(&1));
        assert_eq!(first.next(), Some(&3));

        let fork = first.clone();
        assert_eq!(fork.copied().collect::<Vec<_>>(), [4, 5, 7, 8, 9]);
        assert_eq!(first.copied().collect::<Vec<_>>(), [4, 5, 7, 8, 9]);

        // A fresh iterator starts over.
        assert_eq!(tree.in_order().next(), Some(&1));
    }

    #[test]
    fn iterators_are_fused() {
        let tree = full_tree();
        let mut it = tree.post_order();
        for _ in 0..7 {
            assert!(it.next().is_some());
        }
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn order_parses_short_and_long_names() {
        assert_eq!("in".parse(), Ok(Order::InOrder));
        assert_eq!("Pre-Order".parse(), Ok(Order::PreOrder));
        assert_eq!("postorder".parse(), Ok(Order::PostOrder));
        assert_eq!(" level ".parse(), Ok(Order::LevelOrder));
        assert_eq!(
            "sideways".parse::<Order>(),
            Err(ParseOrderError("sideways".to_string()))
        );
    }

    #[test]
    fn order_display_round_trips() {
        for order in Order::ALL {
            assert_eq!(order.to_string().parse(), Ok(order));
        }
    }
}
