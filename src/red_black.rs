//! A self-balancing Binary Search Tree (specifically, a red-black tree) layered over
//! [`OrderedTree`]. Every vertex is tagged red or black and after every insert or delete the tree
//! satisfies:
//!
//! 1. Every vertex is red or black.
//! 2. The root is black.
//! 3. Absent children count as black leaves.
//! 4. A red vertex has two black children.
//! 5. Every path from the root down to an absent child passes the same number of black
//!    vertices.
//!
//! Together these keep the height within `2 * lg(N + 1)`. Insertion and deletion reuse the
//! ordered tree's structural work and then walk back up recoloring and rotating. Rotations are
//! only used internally: rotating a red-black tree from outside would break the invariants so
//! [`Rotate`] always fails here.
//!
//! # Examples
//!
//! ```
//! use redblack::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//!
//! // Ascending inserts don't degrade into a chain.
//! assert_eq!(tree.height(), 3);
//! let root = tree.root().unwrap();
//! assert_eq!(root.element(), &2);
//! assert_eq!(tree.color(root.id()), Some(Color::Black));
//!
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6, 7]);
//! ```

use std::fmt;
use std::ops::Deref;

use crate::error::TreeError;
use crate::ordered::{Iter, OrderedTree, Rotate};
use crate::vertex::{Color, Link, Side, VertexId};

/// A red-black tree. Read-only queries (`search`, `iter`, traversals, `height`, `root`, ...) are
/// available through `Deref` to [`OrderedTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedBlackTree<T> {
    tree: OrderedTree<T>,
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RedBlackTree<T> {
    type Target = OrderedTree<T>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<T> RedBlackTree<T> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    /// Generates a new, empty `RedBlackTree` with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: OrderedTree::with_capacity(capacity),
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The color of the vertex named by `vertex`, or `None` if it isn't a live, colored vertex
    /// of this tree.
    pub fn color(&self, vertex: VertexId) -> Option<Color> {
        let node = self.tree.shell().slot(vertex)?;
        node.element.as_ref()?;
        node.color
    }

    /// Inserts the given element and rebalances. Returns the handle of the vertex holding the
    /// element, which stays valid until the next mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::{Color, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// let root = tree.insert(2);
    /// let left = tree.insert(1);
    ///
    /// assert_eq!(tree.color(root), Some(Color::Black));
    /// assert_eq!(tree.color(left), Some(Color::Red));
    /// ```
    pub fn insert(&mut self, element: T) -> VertexId
    where
        T: Ord,
    {
        let id = self.tree.insert_colored(element, Some(Color::Red));
        self.balance_insert(id);
        log::debug!("RedBlackTree::insert {:?}, size {}", id, self.len());

        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
        id
    }

    /// Deletes a vertex holding `element`, rebalances, and returns the element. If the tree
    /// doesn't hold `element`, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<_> = [10, 5, 20, 3, 7, 15, 25].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.delete(&5), None);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let found = self.tree.search_id(element)?;
        let target = self.tree.swap_with_predecessor(found);

        let child = {
            let shell = self.tree.shell();
            shell.left(target).or(shell.right(target))
        };
        // A childless vertex borrows a black phantom leaf so the fixup has a vertex to start
        // from. It never outlives this call.
        let (replacement, phantom) = match child {
            Some(child) => (child, None),
            None => {
                let shell = self.tree.shell_mut();
                let phantom = shell.allocate(None, Some(Color::Black));
                shell.set_child(target, Side::Left, Some(phantom));
                (phantom, Some(phantom))
            }
        };

        let shell = self.tree.shell_mut();
        shell.replace(target, Some(replacement));
        shell.len -= 1;

        if self.is_red(Some(replacement)) {
            self.paint(replacement, Color::Black);
        } else if self.is_black(Some(target)) {
            self.balance_delete(replacement);
        }

        let shell = self.tree.shell_mut();
        if let Some(phantom) = phantom {
            shell.replace(phantom, None);
            shell.release(phantom);
        }
        let removed = shell.release(target);
        log::debug!("RedBlackTree::delete {:?}, size {}", target, shell.len());

        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
        removed
    }

    fn is_red(&self, link: Link) -> bool {
        link.map_or(false, |id| {
            self.tree.shell().node(id).color == Some(Color::Red)
        })
    }

    fn is_black(&self, link: Link) -> bool {
        !self.is_red(link)
    }

    fn paint(&mut self, id: VertexId, color: Color) {
        self.tree.shell_mut().node_mut(id).color = Some(color);
    }

    /// Restores the invariants after `inserted` was attached as a red leaf.
    fn balance_insert(&mut self, inserted: VertexId) {
        let mut vertex = inserted;
        loop {
            let shell = self.tree.shell();
            let Some(parent) = shell.parent(vertex) else {
                log::trace!("insert: {:?} is the root", vertex);
                self.paint(vertex, Color::Black);
                return;
            };
            if self.is_black(Some(parent)) {
                log::trace!("insert: parent of {:?} is black", vertex);
                return;
            }

            let grandparent = shell
                .parent(parent)
                .expect("a red vertex is never the root");
            let uncle = shell.sibling(parent);
            if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
                log::trace!("insert: uncle of {:?} is red", vertex);
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                vertex = grandparent;
                continue;
            }

            let side = shell.side_of(vertex).expect("vertex has a parent");
            let parent_side = shell.side_of(parent).expect("parent has a parent");
            if side != parent_side {
                log::trace!("insert: {:?} is crossed with its parent", vertex);
                self.tree.rotate_at(parent, side.opposite());
                vertex = parent;
                continue;
            }

            log::trace!("insert: {:?} is straight with its parent", vertex);
            self.paint(parent, Color::Black);
            self.paint(grandparent, Color::Red);
            self.tree.rotate_at(grandparent, side.opposite());
            return;
        }
    }

    /// Restores the invariants when every path through `deficient` is one black vertex short.
    fn balance_delete(&mut self, deficient: VertexId) {
        let mut vertex = deficient;
        loop {
            let shell = self.tree.shell();
            let (Some(parent), Some(side)) = (shell.parent(vertex), shell.side_of(vertex)) else {
                log::trace!("delete: {:?} is the root", vertex);
                return;
            };
            let sibling = shell
                .child(parent, side.opposite())
                .expect("a vertex short on black height has a sibling");

            if self.is_red(Some(sibling)) {
                log::trace!("delete: sibling of {:?} is red", vertex);
                self.paint(parent, Color::Red);
                self.paint(sibling, Color::Black);
                self.tree.rotate_at(parent, side);
                continue;
            }

            let near = shell.child(sibling, side);
            let far = shell.child(sibling, side.opposite());
            if self.is_black(near) && self.is_black(far) {
                if self.is_black(Some(parent)) {
                    log::trace!("delete: family of {:?} is all black", vertex);
                    self.paint(sibling, Color::Red);
                    vertex = parent;
                    continue;
                }
                log::trace!("delete: parent of {:?} is red, nephews black", vertex);
                self.paint(sibling, Color::Red);
                self.paint(parent, Color::Black);
                return;
            }

            if let Some(near) = near.filter(|&near| self.is_red(Some(near))) {
                log::trace!("delete: near nephew of {:?} is red", vertex);
                self.paint(sibling, Color::Red);
                self.paint(near, Color::Black);
                self.tree.rotate_at(sibling, side.opposite());
                continue;
            }

            log::trace!("delete: far nephew of {:?} is red", vertex);
            let parent_color = self.tree.shell().node(parent).color;
            self.tree.shell_mut().node_mut(sibling).color = parent_color;
            self.paint(parent, Color::Black);
            if let Some(far) = far {
                self.paint(far, Color::Black);
            }
            self.tree.rotate_at(parent, side);
            return;
        }
    }

    /// Checks the ordered tree's links and order plus the five red-black invariants, panicking
    /// on the first violation.
    pub(crate) fn assert_invariants(&self)
    where
        T: Ord,
    {
        self.tree.shell().assert_links();
        self.tree.assert_order();
        assert!(self.is_black(self.tree.shell().root), "red root");
        self.checked_black_height(self.tree.shell().root);
    }

    /// The number of black vertices on every path from `link` down to an absent child.
    fn checked_black_height(&self, link: Link) -> usize {
        let Some(id) = link else {
            return 1;
        };
        let node = self.tree.shell().node(id);
        assert!(node.color.is_some(), "{:?} has no color", id);
        if self.is_red(link) {
            assert!(
                self.is_black(node.left) && self.is_black(node.right),
                "red {:?} has a red child",
                id
            );
        }

        let left = self.checked_black_height(node.left);
        let right = self.checked_black_height(node.right);
        assert_eq!(left, right, "black heights differ below {:?}", id);
        left + usize::from(self.is_black(link))
    }
}

impl<T> Rotate for RedBlackTree<T> {
    fn rotate_left(&mut self, _vertex: VertexId) -> Result<(), TreeError> {
        Err(TreeError::UnsupportedOperation(
            "red-black trees can't be rotated left from outside",
        ))
    }

    fn rotate_right(&mut self, _vertex: VertexId) -> Result<(), TreeError> {
        Err(TreeError::UnsupportedOperation(
            "red-black trees can't be rotated right from outside",
        ))
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draws the tree like [`BinaryTree`][crate::BinaryTree] does, writing each vertex as `B{x}` or
/// `R{x}`.
impl<T: fmt::Display> fmt::Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.shell().render(f, &|vertex, f| match vertex.color() {
            Some(Color::Red) => write!(f, "R{{{}}}", vertex),
            _ => write!(f, "B{{{}}}", vertex),
        })
    }
}
