use rebuild_bst::{Node, Tree};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], mut bst: Tree<T>, set: &mut HashSet<T>) -> Tree<T>
where
    T: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Delete(x) => {
                bst.delete(x);
                set.remove(x);
            }
            Op::Rebalance => bst.rebalance(),
        }
    }

    bst
}

/// Whether every node's children are on the correct side of it.
fn children_are_ordered<T: Ord>(tree: &Tree<T>) -> bool {
    let mut ordered = true;
    tree.preorder_with(|node: &Node<T>| {
        ordered &= node.left().map_or(true, |l| l.value() < node.value());
        ordered &= node.right().map_or(true, |r| r.value() > node.value());
    });
    ordered
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut set = HashSet::new();

        let tree = do_ops(&ops, Tree::new(), &mut set);
        tree.len() == set.len() && set.iter().all(|x| tree.contains(x))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        xs.iter().all(|x| tree.find(x).map(Node::value) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs.iter().copied());
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::from_values(xs.iter().copied());
        for delete in &deletes {
            tree.delete(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| tree.find(x).is_none())
            && still_present.iter().all(|x| tree.find(x).is_some())
    }

    fn inorder_is_strictly_ascending(ops: Vec<Op<i8>>) -> bool {
        let tree = do_ops(&ops, Tree::new(), &mut HashSet::new());
        let values = tree.inorder();

        values.windows(2).all(|pair| pair[0] < pair[1]) && children_are_ordered(&tree)
    }

    fn duplicate_insert_keeps_inorder(xs: Vec<i8>) -> bool {
        let mut tree = Tree::from_values(xs.iter().copied());
        let before: Vec<i8> = tree.inorder().into_iter().copied().collect();

        let reinserted = xs.iter().any(|x| tree.insert(*x));

        let unchanged = tree.inorder().into_iter().copied().eq(before);
        !reinserted && unchanged
    }

    fn traversals_visit_every_value(xs: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs);
        let mut expected = tree.inorder();
        expected.sort();

        let all_match = [tree.level_order(), tree.preorder(), tree.postorder()]
            .into_iter()
            .all(|mut values| {
                values.sort();
                values == expected
            });
        all_match
    }
}
