//! A plain (unbalanced) Binary Search Tree on top of the [`BinaryTree`] shell.
//!
//! Insertion sends elements strictly greater than a vertex to its right and everything else
//! (equal elements included) to its left, so duplicates are allowed. Rotations keep the in-order
//! sequence but may leave a tie in a right subtree, so the ordering that always holds is "left
//! subtree <= vertex <= right subtree". Deleting a vertex with two children
//! swaps its element with its in-order *predecessor* (the largest element of its left subtree)
//! and removes the predecessor's vertex instead.
//!
//! # Examples
//!
//! ```
//! use redblack::{OrderedTree, Rotate};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! let one = tree.insert(1);
//! tree.insert(0);
//! tree.insert(2);
//! assert_eq!(tree.search(&1).map(|v| v.id()), Some(one));
//!
//! // Rotating at the root lifts its left child.
//! tree.rotate_right(one).unwrap();
//! assert_eq!(tree.root().map(|v| *v.element()), Ok(0));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! // Deleting a vertex hands back its element.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use crate::binary_tree::BinaryTree;
use crate::error::TreeError;
use crate::vertex::{Color, Side, Vertex, VertexId};

/// Structural rotations around a vertex.
///
/// ```text
///    Option<parent>                 Option<parent>
///      /                              /
///     q        rotate_right(q) ->    p
///    / \                            / \
///   p   z                          x   q
///  / \     <- rotate_left(p)          / \
/// x   y                              y   z
/// ```
pub trait Rotate {
    /// Lifts the right child of `vertex` into its place. Does nothing if there is no right
    /// child.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `vertex` doesn't name a live vertex of this tree, or
    /// [`TreeError::UnsupportedOperation`] if the tree doesn't allow outside rotations.
    fn rotate_left(&mut self, vertex: VertexId) -> Result<(), TreeError>;

    /// Lifts the left child of `vertex` into its place. Does nothing if there is no left child.
    ///
    /// # Errors
    ///
    /// See [`Rotate::rotate_left`].
    fn rotate_right(&mut self, vertex: VertexId) -> Result<(), TreeError>;
}

/// A Binary Search Tree. This can be used for inserting, finding, and deleting elements.
///
/// Read-only queries of the underlying shell ([`BinaryTree::height`], [`BinaryTree::root`],
/// rendering, ...) are available through `Deref`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedTree<T> {
    tree: BinaryTree<T>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for OrderedTree<T> {
    type Target = BinaryTree<T>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DepthFirst {
    PreOrder,
    InOrder,
    PostOrder,
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }

    /// Generates a new, empty `OrderedTree` with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: BinaryTree::with_capacity(capacity),
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub(crate) fn shell(&self) -> &BinaryTree<T> {
        &self.tree
    }

    pub(crate) fn shell_mut(&mut self) -> &mut BinaryTree<T> {
        &mut self.tree
    }

    /// Inserts the given element and returns the handle of the new vertex holding it.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// let first = tree.insert(1);
    /// let second = tree.insert(1);
    ///
    /// // Equal elements are kept and go to the left.
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.id(), first);
    /// assert_eq!(root.left().map(|v| v.id()), Some(second));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, element: T) -> VertexId
    where
        T: Ord,
    {
        let id = self.insert_colored(element, None);
        log::debug!("OrderedTree::insert {:?}, size {}", id, self.tree.len);
        id
    }

    /// Attaches a new vertex where the ordered descent for `element` falls off the tree.
    pub(crate) fn insert_colored(&mut self, element: T, color: Option<Color>) -> VertexId
    where
        T: Ord,
    {
        let mut parent = None;
        let mut current = self.tree.root;
        while let Some(id) = current {
            let side = match self.tree.element(id) {
                Some(existing) if element > *existing => Side::Right,
                _ => Side::Left,
            };
            parent = Some((id, side));
            current = self.tree.child(id, side);
        }

        let id = self.tree.allocate(Some(element), color);
        match parent {
            Some((parent, side)) => self.tree.set_child(parent, side, Some(id)),
            None => self.tree.root = Some(id),
        }
        self.tree.len += 1;

        if cfg!(debug_assertions) {
            if let Some((parent, side)) = parent {
                let (element, parent_element) = (self.tree.element(id), self.tree.element(parent));
                match side {
                    Side::Left => assert!(element <= parent_element),
                    Side::Right => assert!(element > parent_element),
                }
            }
        }
        id
    }

    /// Finds the vertex holding `element` by descending from the root. If no vertex holds it,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.search(&3).map(|v| v.depth()), Some(1));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<Vertex<'_, T>>
    where
        T: Ord,
    {
        self.search_id(element)
            .and_then(|id| self.tree.vertex(id).ok())
    }

    pub(crate) fn search_id(&self, element: &T) -> Option<VertexId>
    where
        T: Ord,
    {
        let mut current = self.tree.root;
        while let Some(id) = current {
            current = match element.cmp(self.tree.element(id)?) {
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.tree.right(id),
                Ordering::Less => self.tree.left(id),
            };
        }
        None
    }

    /// Whether the tree holds `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.search_id(element).is_some()
    }

    /// Deletes a vertex holding `element` and returns the element. If the tree doesn't hold
    /// `element`, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.delete(&42), None);
    ///
    /// // The predecessor of 5 took its place.
    /// assert_eq!(tree.root().map(|v| *v.element()), Ok(3));
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let found = self.search_id(element)?;
        let target = self.swap_with_predecessor(found);
        let replacement = self.tree.left(target).or_else(|| self.tree.right(target));
        self.tree.replace(target, replacement);
        self.tree.len -= 1;
        log::debug!("OrderedTree::delete {:?}, size {}", target, self.tree.len);

        if cfg!(debug_assertions) {
            self.tree.assert_links();
        }
        self.tree.release(target)
    }

    /// If `id` has two children, moves its element into its in-order predecessor (and the
    /// predecessor's element into `id`) and returns the predecessor. Otherwise returns `id`.
    /// Either way the returned vertex has at most one child and holds the element to delete.
    pub(crate) fn swap_with_predecessor(&mut self, id: VertexId) -> VertexId {
        let (Some(left), Some(_)) = (self.tree.left(id), self.tree.right(id)) else {
            return id;
        };
        let mut predecessor = left;
        while let Some(right) = self.tree.right(predecessor) {
            predecessor = right;
        }
        self.tree.swap_elements(id, predecessor);
        predecessor
    }

    /// Rotates toward `direction` around `pivot`: rotating right lifts the left child and vice
    /// versa. Does nothing if the child that should be lifted is absent.
    pub(crate) fn rotate_at(&mut self, pivot: VertexId, direction: Side) {
        let rising_side = direction.opposite();
        let Some(rising) = self.tree.child(pivot, rising_side) else {
            return;
        };
        log::trace!("rotate {:?} at {:?}", direction, pivot);

        self.tree.replace(pivot, Some(rising));
        let moved = self.tree.child(rising, direction);
        self.tree.set_child(pivot, rising_side, moved);
        self.tree.set_child(rising, direction, Some(pivot));
    }

    /// Calls `action` on every vertex, each vertex before its subtrees.
    pub fn pre_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        Self::depth_first(self.tree.root().ok(), DepthFirst::PreOrder, &mut action);
    }

    /// Calls `action` on every vertex in ascending order of elements.
    pub fn in_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        Self::depth_first(self.tree.root().ok(), DepthFirst::InOrder, &mut action);
    }

    /// Calls `action` on every vertex, each vertex after its subtrees.
    pub fn post_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        Self::depth_first(self.tree.root().ok(), DepthFirst::PostOrder, &mut action);
    }

    fn depth_first<'a, F>(vertex: Option<Vertex<'a, T>>, order: DepthFirst, action: &mut F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        let Some(vertex) = vertex else {
            return;
        };
        if order == DepthFirst::PreOrder {
            action(vertex);
        }
        Self::depth_first(vertex.left(), order, action);
        if order == DepthFirst::InOrder {
            action(vertex);
        }
        Self::depth_first(vertex.right(), order, action);
        if order == DepthFirst::PostOrder {
            action(vertex);
        }
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.tree.root().ok())
    }

    /// The smallest element.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn min(&self) -> Result<&T, TreeError> {
        let mut vertex = self.tree.root()?;
        while let Some(left) = vertex.left() {
            vertex = left;
        }
        Ok(vertex.element())
    }

    /// The largest element.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn max(&self) -> Result<&T, TreeError> {
        let mut vertex = self.tree.root()?;
        while let Some(right) = vertex.right() {
            vertex = right;
        }
        Ok(vertex.element())
    }

    /// Checks that an in-order walk never goes down, panicking otherwise.
    pub(crate) fn assert_order(&self)
    where
        T: Ord,
    {
        let elements: Vec<_> = self.iter().collect();
        assert!(
            elements.windows(2).all(|pair| pair[0] <= pair[1]),
            "in-order walk is not sorted"
        );
    }
}

impl<T> Rotate for OrderedTree<T> {
    fn rotate_left(&mut self, vertex: VertexId) -> Result<(), TreeError> {
        if !self.tree.is_live(vertex) {
            return Err(TreeError::InvalidArgument);
        }
        self.rotate_at(vertex, Side::Left);
        Ok(())
    }

    fn rotate_right(&mut self, vertex: VertexId) -> Result<(), TreeError> {
        if !self.tree.is_live(vertex) {
            return Err(TreeError::InvalidArgument);
        }
        self.rotate_at(vertex, Side::Right);
        Ok(())
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

/// In-order cursor over the elements of a tree. Only the left spine below each pending vertex
/// is kept on the stack, never the whole order.
pub struct Iter<'a, T> {
    stack: Vec<Vertex<'a, T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<Vertex<'a, T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut vertex: Option<Vertex<'a, T>>) {
        while let Some(v) = vertex {
            self.stack.push(v);
            vertex = v.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.stack.pop()?;
        self.push_left_spine(vertex.right());
        Some(vertex.element())
    }
}
