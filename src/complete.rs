//! A complete binary tree on top of the [`BinaryTree`] shell: every level is full except maybe
//! the last, which fills from the left. Elements don't need any ordering.
//!
//! Vertices are addressed by their heap number. The root is 1 and the children of `k` are `2k`
//! and `2k + 1`, so the bits of a number below its leading one spell the path from the root
//! (0 for left, 1 for right). The next free slot is number `len + 1` and the last vertex in
//! level order is number `len`.
//!
//! # Examples
//!
//! ```
//! use redblack::CompleteTree;
//!
//! let mut tree: CompleteTree<_> = ['a', 'b', 'c', 'd'].into_iter().collect();
//! assert_eq!(tree.to_string(), "a\n├─›b\n│  └─›d\n└─»c\n");
//!
//! // The last vertex in level order fills the hole.
//! assert_eq!(tree.delete(&'a'), Some('a'));
//! assert_eq!(tree.iter().collect::<String>(), "dbc");
//! assert_eq!(tree.height(), 1);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

use crate::binary_tree::{BinaryTree, BreadthFirst};
use crate::vertex::{Link, Side, Vertex, VertexId};

/// A complete binary tree. Shell queries (`root`, `vertex`, `search`, `contains`,
/// `breadth_first`, ...) are available through `Deref` to [`BinaryTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteTree<T> {
    tree: BinaryTree<T>,
}

impl<T> Default for CompleteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for CompleteTree<T> {
    type Target = BinaryTree<T>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<T> CompleteTree<T> {
    /// Generates a new, empty `CompleteTree`.
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }

    /// Generates a new, empty `CompleteTree` with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: BinaryTree::with_capacity(capacity),
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The height of the tree, `⌊lg N⌋`, or -1 when it's empty.
    pub fn height(&self) -> isize {
        match self.tree.len {
            0 => -1,
            len => len.ilog2() as isize,
        }
    }

    /// The vertex with heap number `number`, which must be at least 1.
    fn at(&self, number: usize) -> Link {
        let mut current = self.tree.root?;
        for bit in (0..number.ilog2()).rev() {
            let side = if (number >> bit) & 1 == 0 {
                Side::Left
            } else {
                Side::Right
            };
            current = self.tree.child(current, side)?;
        }
        Some(current)
    }

    /// Adds `element` at the next free slot in level order: right of the last vertex on the
    /// bottom level, or leftmost on a new level.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::CompleteTree;
    ///
    /// let mut tree = CompleteTree::new();
    /// let root = tree.insert(1);
    /// let left = tree.insert(2);
    ///
    /// assert_eq!(tree.vertex(left).unwrap().parent().map(|v| v.id()), Some(root));
    /// ```
    pub fn insert(&mut self, element: T) -> VertexId {
        let id = self.tree.allocate(Some(element), None);
        let number = self.tree.len + 1;
        if number == 1 {
            self.tree.root = Some(id);
        } else {
            let parent = self
                .at(number / 2)
                .expect("the parent of the next free slot is already filled");
            let side = if number % 2 == 0 {
                Side::Left
            } else {
                Side::Right
            };
            self.tree.set_child(parent, side, Some(id));
        }
        self.tree.len += 1;
        log::debug!("CompleteTree::insert {:?}, size {}", id, self.tree.len);

        if cfg!(debug_assertions) {
            self.assert_complete();
        }
        id
    }

    /// Deletes the first vertex in level order holding `element` and returns the element. The
    /// last vertex in level order gives up its element to fill the hole and is removed instead.
    /// If no vertex holds `element`, nothing happens.
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let found = self.tree.search(element)?.id();
        let last = self
            .at(self.tree.len)
            .expect("a non-empty complete tree has a last vertex");
        if found != last {
            self.tree.swap_elements(found, last);
        }
        self.tree.replace(last, None);
        self.tree.len -= 1;
        log::debug!("CompleteTree::delete {:?}, size {}", last, self.tree.len);

        if cfg!(debug_assertions) {
            self.assert_complete();
        }
        self.tree.release(last)
    }

    /// Calls `action` on every vertex in level order.
    pub fn bfs<'a, F>(&'a self, action: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        self.tree.breadth_first().for_each(action);
    }

    /// Iterates over the elements in level order.
    pub fn iter(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            vertices: self.tree.breadth_first(),
        }
    }

    /// Checks the links and that the vertices fill heap numbers `1..=len` exactly, panicking
    /// otherwise.
    pub(crate) fn assert_complete(&self) {
        self.tree.assert_links();
        let mut pending: VecDeque<(VertexId, usize)> =
            self.tree.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, number)) = pending.pop_front() {
            assert!(
                number <= self.tree.len,
                "{:?} sits past the last level-order slot",
                id
            );
            pending.extend(self.tree.left(id).map(|left| (left, 2 * number)));
            pending.extend(self.tree.right(id).map(|right| (right, 2 * number + 1)));
        }
    }
}

/// Level-order iterator over the elements of a [`CompleteTree`].
pub struct LevelOrder<'a, T> {
    vertices: BreadthFirst<'a, T>,
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.vertices.next().map(|vertex| vertex.element())
    }
}

impl<T> FromIterator<T> for CompleteTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for CompleteTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a CompleteTree<T> {
    type Item = &'a T;
    type IntoIter = LevelOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for CompleteTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_levels_left_to_right() {
        let tree: CompleteTree<_> = (1..=6).collect();

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            tree.to_string(),
            "1\n├─›2\n│  ├─›4\n│  └─»5\n└─»3\n   └─›6\n"
        );
        let six = tree.search(&6).unwrap();
        assert_eq!(six.parent().map(|v| *v.element()), Some(3));
        assert_eq!(six.depth(), 2);
    }

    #[test]
    fn height_is_floor_lg() {
        let mut tree = CompleteTree::new();
        assert_eq!(tree.height(), -1);

        for n in 1..=64usize {
            tree.insert(n);
            let expected = (usize::BITS - 1 - n.leading_zeros()) as isize;
            assert_eq!(tree.height(), expected);
            assert_eq!(tree.height(), tree.tree.height());
        }
    }

    #[test]
    fn delete_moves_the_last_vertex() {
        let mut tree: CompleteTree<_> = (1..=5).collect();

        assert_eq!(tree.delete(&2), Some(2));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 5, 3, 4]);
        assert_eq!(tree.len(), 4);
        tree.assert_complete();
    }

    #[test]
    fn delete_the_last_vertex_itself() {
        let mut tree: CompleteTree<_> = (1..=3).collect();

        assert_eq!(tree.delete(&3), Some(3));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn delete_down_to_empty() {
        let mut tree: CompleteTree<_> = [7].into_iter().collect();

        assert_eq!(tree.delete(&8), None);
        assert_eq!(tree.delete(&7), Some(7));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.delete(&7), None);

        tree.insert(9);
        assert_eq!(tree.root().map(|v| *v.element()), Ok(9));
    }

    #[test]
    fn bfs_visits_in_level_order() {
        let tree: CompleteTree<_> = "abcde".chars().collect();
        let mut depths = Vec::new();
        tree.bfs(|v| depths.push((*v.element(), v.depth())));

        assert_eq!(
            depths,
            vec![('a', 0), ('b', 1), ('c', 1), ('d', 2), ('e', 2)]
        );
    }

    #[test]
    fn duplicates_delete_first_in_level_order() {
        let mut tree: CompleteTree<_> = [1, 2, 1, 3].into_iter().collect();

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
