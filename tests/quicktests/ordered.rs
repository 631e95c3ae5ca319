use std::collections::BTreeMap;

use redblack::{OrderedTree, Rotate, TreeError};

use crate::Op;

/// Applies a set of operations to a tree and a multiset of the same elements.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, counts: &mut BTreeMap<T, usize>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                if tree.delete(x).is_some() {
                    let count = counts.get_mut(x).expect("deleted an element never inserted");
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(x);
                    }
                }
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        crate::init_logger();
        let mut tree = OrderedTree::new();
        let mut counts = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut counts);
        let expected: Vec<_> = counts
            .iter()
            .flat_map(|(x, count)| std::iter::repeat(x).take(*count))
            .collect();
        tree.iter().collect::<Vec<_>>() == expected && tree.len() == expected.len()
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        nots.iter()
            .filter(|x| !xs.contains(x))
            .all(|x| tree.search(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn rotations_keep_in_order(xs: Vec<i8>, picks: Vec<u8>) -> bool {
        let mut tree: OrderedTree<_> = xs.iter().copied().collect();
        let before: Vec<_> = tree.iter().copied().collect();

        for (i, pick) in picks.iter().enumerate() {
            let ids: Vec<_> = tree.breadth_first().map(|v| v.id()).collect();
            if ids.is_empty() {
                break;
            }
            let id = ids[*pick as usize % ids.len()];
            let rotated = if i % 2 == 0 {
                tree.rotate_left(id)
            } else {
                tree.rotate_right(id)
            };
            if rotated.is_err() {
                return false;
            }
        }
        tree.iter().copied().collect::<Vec<_>>() == before
    }
}

#[test]
fn sorted_inserts_build_a_chain() {
    let tree: OrderedTree<_> = (0..100).collect();

    assert_eq!(tree.height(), 99);
    let mut depths = Vec::new();
    tree.pre_order(|v| depths.push(v.depth()));
    assert_eq!(depths, (0..100).collect::<Vec<_>>());
}

#[test]
fn empty_tree_errors() {
    let tree = OrderedTree::<i32>::new();

    assert_eq!(tree.root().err(), Some(TreeError::EmptyStructure));
    assert_eq!(tree.min(), Err(TreeError::EmptyStructure));
    assert_eq!(tree.max(), Err(TreeError::EmptyStructure));
    assert_eq!(tree.to_string(), "");
}
