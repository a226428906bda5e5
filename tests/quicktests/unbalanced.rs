use ordtree::unbalanced::Tree;

use crate::Op;

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        crate::fuzz::<Tree<i8>>(&ops)
    }

    fn contains(xs: Vec<i8>) -> bool {
        crate::contains::<Tree<i8>>(&xs)
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        crate::contains_not::<Tree<i8>>(&xs, &nots)
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        crate::with_deletions::<Tree<i8>>(&xs, &deletes)
    }

    fn traversals_visit_everything(xs: Vec<i8>) -> bool {
        crate::traversals_visit_everything::<Tree<i8>>(&xs)
    }

    fn min_max(xs: Vec<i8>) -> bool {
        crate::min_max::<Tree<i8>>(&xs)
    }

    fn sorted_input_makes_a_chain(xs: Vec<i8>) -> bool {
        let mut xs = xs;
        xs.sort_unstable();
        let tree: Tree<i8> = xs.iter().copied().collect();
        tree.height() == xs.len().checked_sub(1)
    }

    fn search_cost_is_depth(xs: Vec<i8>) -> bool {
        let tree: Tree<i8> = xs.iter().copied().collect();
        let Some(&last) = xs.last() else { return true };
        tree.reset_counts();
        tree.search(&last);
        tree.counts().comparisons as usize <= tree.height().unwrap_or(0) + 1
    }
}
