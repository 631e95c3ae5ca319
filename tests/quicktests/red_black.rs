use std::collections::BTreeSet;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use redblack::{Color, OrderedTree, RedBlackTree, Rotate, TreeError};

use crate::{assert_red_black, Op};

quickcheck::quickcheck! {
    fn invariants_hold_after_every_operation(ops: Vec<Op<i16>>) -> bool {
        crate::init_logger();
        let mut tree = RedBlackTree::new();
        let mut model: Vec<i16> = Vec::new();

        for op in &ops {
            match op {
                Op::Insert(x) => {
                    tree.insert(*x);
                    model.push(*x);
                }
                Op::Remove(x) => {
                    let expected = model.iter().position(|y| y == x).map(|i| model.swap_remove(i));
                    if tree.delete(x) != expected {
                        return false;
                    }
                }
            }
            assert_red_black(&tree);
        }

        model.sort();
        tree.len() == model.len() && tree.iter().copied().collect::<Vec<_>>() == model
    }
}

quickcheck::quickcheck! {
    fn invariants_hold_with_many_ties(ops: Vec<Op<u8>>) -> bool {
        let mut tree = RedBlackTree::new();
        let mut model: Vec<u8> = Vec::new();

        for op in &ops {
            match op {
                Op::Insert(x) => {
                    tree.insert(x % 4);
                    model.push(x % 4);
                }
                Op::Remove(x) => {
                    let x = x % 4;
                    let expected = model.iter().position(|y| *y == x).map(|i| model.swap_remove(i));
                    if tree.delete(&x) != expected {
                        return false;
                    }
                }
            }
            assert_red_black(&tree);
        }

        model.sort();
        tree.iter().copied().collect::<Vec<_>>() == model
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let tree: RedBlackTree<_> = xs.iter().copied().collect();
        let bound = 2.0 * ((tree.len() + 1) as f64).log2();

        (tree.height() as f64) < bound.max(1.0)
    }
}

quickcheck::quickcheck! {
    fn same_elements_as_plain_tree(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut balanced: RedBlackTree<_> = xs.iter().copied().collect();
        let mut plain: OrderedTree<_> = xs.iter().copied().collect();
        for x in &deletes {
            if balanced.delete(x) != plain.delete(x) {
                return false;
            }
        }

        balanced.iter().eq(plain.iter())
    }
}

#[test]
fn shuffled_stress() {
    crate::init_logger();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut xs: Vec<u32> = (0..2000).collect();
    xs.shuffle(&mut rng);

    let mut tree = RedBlackTree::with_capacity(xs.len());
    for x in &xs {
        tree.insert(*x);
    }
    assert_eq!(tree.len(), 2000);
    let black_height = assert_red_black(&tree);
    assert!(black_height >= 6);

    xs.shuffle(&mut rng);
    let (gone, kept) = xs.split_at(1200);
    for x in gone {
        assert_eq!(tree.delete(x), Some(*x));
    }
    assert_red_black(&tree);

    let expected: BTreeSet<_> = kept.iter().copied().collect();
    assert_eq!(tree.len(), expected.len());
    assert!(tree.iter().eq(expected.iter()));
    assert!(gone.iter().all(|x| !tree.contains(x)));
}

#[test]
fn insert_then_delete_scenario() {
    let mut tree: RedBlackTree<_> = [10, 5, 20, 3, 7, 15, 25].into_iter().collect();

    let root = tree.root().unwrap();
    assert_eq!(root.element(), &10);
    assert_eq!(root.color(), Some(Color::Black));
    assert_red_black(&tree);

    assert_eq!(tree.delete(&5), Some(5));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 7, 10, 15, 20, 25]);
    assert_eq!(tree.len(), 6);
    assert_red_black(&tree);
}

#[test]
fn ties_rotate_to_the_right() {
    let tree: RedBlackTree<_> = [0, 0, 0].into_iter().collect();

    let root = tree.root().unwrap();
    assert_eq!(root.left().map(|v| *v.element()), Some(0));
    assert_eq!(root.right().map(|v| *v.element()), Some(0));
    assert_eq!(assert_red_black(&tree), 2);
}

#[test]
fn outside_rotation_is_unsupported() {
    let mut tree: RedBlackTree<_> = (1..=3).collect();
    let root = tree.root().unwrap().id();

    assert!(matches!(tree.rotate_left(root), Err(TreeError::UnsupportedOperation(_))));
    assert!(matches!(tree.rotate_right(root), Err(TreeError::UnsupportedOperation(_))));
    assert_eq!(tree.root().map(|v| *v.element()), Ok(2));
}

#[test]
fn handles_go_stale() {
    let mut tree: RedBlackTree<_> = (1..=3).collect();
    let one = tree.search(&1).unwrap().id();
    assert_eq!(tree.vertex(one).map(|v| *v.element()), Ok(1));

    tree.delete(&1);
    assert_eq!(tree.vertex(one).err(), Some(TreeError::InvalidArgument));
    assert_eq!(tree.color(one), None);
}

#[test]
fn empty_tree() {
    let mut tree = RedBlackTree::<i32>::new();

    assert!(tree.search(&1).is_none());
    assert_eq!(tree.delete(&1), None);
    assert_eq!(tree.height(), -1);
    assert!(tree.breadth_first().next().is_none());
    assert_eq!(tree.min(), Err(TreeError::EmptyStructure));
}
