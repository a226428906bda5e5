//! Property tests against the public API of both trees.
//!
//! Every tree is checked against a sorted `Vec` that holds the same values. The properties are
//! written once over [`SearchTree`] and instantiated per tree in the submodules.

use ordtree::{Order, SearchTree};
use quickcheck::{Arbitrary, Gen};

mod avl;
mod unbalanced;

/// Something to do to a tree.
#[derive(Copy, Clone, Debug)]
enum Op<V> {
    /// Insert the V
    Insert(V),
    /// Remove one copy of the V
    Remove(V),
}

impl<V: Arbitrary> Arbitrary for Op<V> {
    fn arbitrary(g: &mut Gen) -> Self {
        if *g.choose(&[true, true, false]).unwrap() {
            Op::Insert(V::arbitrary(g))
        } else {
            Op::Remove(V::arbitrary(g))
        }
    }
}

/// Applies `ops` to a tree and to a sorted `Vec`, checking every delete returns what the `Vec`
/// says it should.
fn do_ops<S: SearchTree<i8>>(ops: &[Op<i8>], tree: &mut S, model: &mut Vec<i8>) -> bool {
    for op in ops {
        match *op {
            Op::Insert(x) => {
                tree.insert(x);
                let pos = model.partition_point(|&y| y <= x);
                model.insert(pos, x);
            }
            Op::Remove(x) => {
                let expected = model.binary_search(&x).ok().map(|pos| model.remove(pos));
                if tree.delete(&x) != expected {
                    return false;
                }
            }
        }
    }
    true
}

/// The tree holds exactly the model's values and is structurally sound.
fn agrees<S: SearchTree<i8>>(tree: &S, model: &[i8]) -> bool {
    tree.len() == model.len()
        && tree.is_empty() == model.is_empty()
        && tree.traverse(Order::InOrder).eq(model.iter())
        && tree.validate().is_ok()
}

fn build<S: SearchTree<i8>>(xs: &[i8]) -> S {
    let mut tree = S::default();
    for &x in xs {
        tree.insert(x);
    }
    tree
}

fn fuzz<S: SearchTree<i8>>(ops: &[Op<i8>]) -> bool {
    let mut tree = S::default();
    let mut model = Vec::new();

    do_ops(ops, &mut tree, &mut model) && agrees(&tree, &model)
}

fn contains<S: SearchTree<i8>>(xs: &[i8]) -> bool {
    let tree: S = build(xs);
    xs.iter().all(|x| tree.search(x) == Some(x))
}

fn contains_not<S: SearchTree<i8>>(xs: &[i8], nots: &[i8]) -> bool {
    let tree: S = build(xs);
    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| !tree.contains(x))
}

fn with_deletions<S: SearchTree<i8>>(xs: &[i8], deletes: &[i8]) -> bool {
    let mut tree: S = build(xs);
    for delete in deletes {
        tree.delete(delete);
    }

    // Each delete takes out a single copy.
    let mut still_present = xs.to_vec();
    for delete in deletes {
        if let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }
    still_present.sort_unstable();

    deletes
        .iter()
        .filter(|x| !still_present.contains(x))
        .all(|x| tree.search(x).is_none())
        && agrees(&tree, &still_present)
}

fn traversals_visit_everything<S: SearchTree<i8>>(xs: &[i8]) -> bool {
    let tree: S = build(xs);
    let mut sorted = xs.to_vec();
    sorted.sort_unstable();

    let root = tree.root().map(|n| *ordtree::BinaryNode::value(n));
    Order::ALL.iter().all(|&order| {
        let mut seen: Vec<i8> = tree.traverse(order).copied().collect();
        let ends = match order {
            Order::PreOrder | Order::LevelOrder => seen.first().copied() == root,
            Order::PostOrder => seen.last().copied() == root,
            Order::InOrder => seen == sorted,
        };
        seen.sort_unstable();
        ends && seen == sorted
    })
}

fn min_max<S: SearchTree<i8>>(xs: &[i8]) -> bool {
    let tree: S = build(xs);
    tree.min() == xs.iter().min() && tree.max() == xs.iter().max()
}
