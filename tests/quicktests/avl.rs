use ordtree::avl::Tree;

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

    fn every_balance_factor_in_range(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model = Vec::new();
        crate::do_ops(&ops, &mut tree, &mut model) && balanced(tree.root())
    }

    fn sorted_input_stays_shallow(n: u16) -> bool {
        let n = usize::from(n % 4096);
        let tree: Tree<usize> = (0..n).collect();
        // Any AVL tree with n nodes is at most about 1.44 lg(n + 2) high.
        tree.height().map_or(n == 0, |h| (h as f64) < 1.45 * ((n + 2) as f64).log2())
    }
}

fn balanced(node: Option<&ordtree::avl::Node<i8>>) -> bool {
    use ordtree::BinaryNode;

    match node {
        None => true,
        Some(n) => {
            n.balance_factor().abs() <= 1 && balanced(n.left()) && balanced(n.right())
        }
    }
}
