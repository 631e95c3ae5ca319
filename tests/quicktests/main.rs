use quickcheck::{Arbitrary, Gen};
use redblack::{Color, RedBlackTree, Vertex};

mod ordered;
mod red_black;

/// The things a quicktest can do to a tree.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the element
    Insert(T),
    /// Delete one copy of the element
    Remove(T),
}

impl<T: Arbitrary> Arbitrary for Op<T> {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Routes the crate's `log` output through the test harness. Run with `RUST_LOG=trace` to watch
/// every rebalancing step.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Walks a red-black tree through its public views and panics unless all five invariants hold.
/// Returns the black height of the tree.
pub fn assert_red_black<T: Ord + std::fmt::Debug>(tree: &RedBlackTree<T>) -> usize {
    fn black_height<T: Ord + std::fmt::Debug>(vertex: Option<Vertex<'_, T>>) -> usize {
        let Some(vertex) = vertex else {
            return 1;
        };
        let color = vertex.color().expect("every red-black vertex is colored");
        let (left, right) = (vertex.left(), vertex.right());

        if let Some(left) = left {
            assert!(left.element() <= vertex.element(), "{:?} is out of order", left);
        }
        if let Some(right) = right {
            // Only insertion sends ties left. Rotations can lift a tie above its twin.
            assert!(right.element() >= vertex.element(), "{:?} is out of order", right);
        }
        for child in [left, right].into_iter().flatten() {
            assert_eq!(child.parent().map(|p| p.id()), Some(vertex.id()));
            if color == Color::Red {
                assert_eq!(child.color(), Some(Color::Black), "red {:?} under red", child);
            }
        }

        let left_height = black_height(left);
        let right_height = black_height(right);
        assert_eq!(left_height, right_height, "black heights differ below {:?}", vertex);
        left_height + usize::from(color == Color::Black)
    }

    if let Ok(root) = tree.root() {
        assert_eq!(root.color(), Some(Color::Black), "red root");
        assert!(!root.has_parent());
    }
    black_height(tree.root().ok())
}
