//! The generic binary tree shell. Vertices live in an arena owned by the tree and point at each
//! other with [`VertexId`]s, so a parent link is just an index and never an owner.
//!
//! This layer knows nothing about ordering. It provides the queries every binary tree has
//! (breadth first search, height, structural equality, rendering) and the link surgery the
//! ordered and red-black layers are built from.
//!
//! # Examples
//!
//! ```
//! use redblack::OrderedTree;
//!
//! let tree: OrderedTree<_> = [5, 3, 8, 4].into_iter().collect();
//!
//! assert_eq!(tree.height(), 2);
//! assert_eq!(
//!     tree.to_string(),
//!     "5\n├─›3\n│  └─»4\n└─»8\n",
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::error::TreeError;
use crate::vertex::{Color, Link, Node, Side, Vertex, VertexId};

/// An arena of vertices plus the root they hang from.
#[derive(Clone, Debug)]
pub struct BinaryTree<T> {
    nodes: Vec<Node<T>>,
    /// Released slots waiting to be reused, most recently released last.
    free: Vec<VertexId>,
    pub(crate) root: Link,
    pub(crate) len: usize,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    /// Generates a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generates a new, empty tree with room for `capacity` vertices before the arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root vertex.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn root(&self) -> Result<Vertex<'_, T>, TreeError> {
        self.root
            .and_then(|id| Vertex::new(self, id))
            .ok_or(TreeError::EmptyStructure)
    }

    /// A view of the vertex named by `id`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `id` doesn't name a live vertex of this tree.
    pub fn vertex(&self, id: VertexId) -> Result<Vertex<'_, T>, TreeError> {
        Vertex::new(self, id).ok_or(TreeError::InvalidArgument)
    }

    /// The height of the tree: -1 when it's empty, otherwise the height of the root (a lone
    /// root has height 0).
    pub fn height(&self) -> isize {
        self.root().map_or(-1, |root| root.height() as isize)
    }

    /// Removes every element, leaving the tree empty.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Visits the vertices level by level, left to right.
    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst {
            queue: self.root().ok().into_iter().collect(),
        }
    }

    /// Finds the first vertex, in breadth first order, whose element equals `element`.
    ///
    /// This doesn't rely on any ordering so it may visit every vertex.
    pub fn search(&self, element: &T) -> Option<Vertex<'_, T>>
    where
        T: PartialEq,
    {
        self.breadth_first().find(|v| v.element() == element)
    }

    /// Whether some vertex holds an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.search(element).is_some()
    }

    /// Draws the tree one vertex per line, writing each vertex with `label`.
    pub(crate) fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &dyn Fn(Vertex<'_, T>, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        match self.root() {
            Ok(root) => Self::render_vertex(f, root, "", label),
            Err(_) => Ok(()),
        }
    }

    fn render_vertex(
        f: &mut fmt::Formatter<'_>,
        vertex: Vertex<'_, T>,
        prefix: &str,
        label: &dyn Fn(Vertex<'_, T>, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        label(vertex, f)?;
        writeln!(f)?;
        match (vertex.left(), vertex.right()) {
            (Some(left), Some(_)) => {
                write!(f, "{}├─›", prefix)?;
                Self::render_vertex(f, left, &format!("{}│  ", prefix), label)?;
            }
            (Some(left), None) => {
                write!(f, "{}└─›", prefix)?;
                Self::render_vertex(f, left, &format!("{}   ", prefix), label)?;
            }
            _ => {}
        }
        if let Some(right) = vertex.right() {
            write!(f, "{}└─»", prefix)?;
            Self::render_vertex(f, right, &format!("{}   ", prefix), label)?;
        }
        Ok(())
    }

    pub(crate) fn slot(&self, id: VertexId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Whether `id` names a vertex holding an element.
    pub(crate) fn is_live(&self, id: VertexId) -> bool {
        self.slot(id).map_or(false, |node| node.element.is_some())
    }

    pub(crate) fn node(&self, id: VertexId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: VertexId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    /// Puts a new, unlinked vertex in the arena. Doesn't touch `len`.
    pub(crate) fn allocate(&mut self, element: Option<T>, color: Option<Color>) -> VertexId {
        let node = Node::new(element, color);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                VertexId(self.nodes.len() - 1)
            }
        }
    }

    /// Returns a slot to the free list and hands back whatever element it held. The caller must
    /// already have unlinked it.
    pub(crate) fn release(&mut self, id: VertexId) -> Option<T> {
        let node = std::mem::replace(&mut self.nodes[id.0], Node::new(None, None));
        self.free.push(id);
        node.element
    }

    pub(crate) fn element(&self, id: VertexId) -> Option<&T> {
        self.node(id).element.as_ref()
    }

    /// Exchanges the elements held by two vertices, leaving every link in place.
    pub(crate) fn swap_elements(&mut self, a: VertexId, b: VertexId) {
        let first = self.node_mut(a).element.take();
        let second = std::mem::replace(&mut self.node_mut(b).element, first);
        self.node_mut(a).element = second;
    }

    pub(crate) fn parent(&self, id: VertexId) -> Link {
        self.node(id).parent
    }

    pub(crate) fn left(&self, id: VertexId) -> Link {
        self.node(id).left
    }

    pub(crate) fn right(&self, id: VertexId) -> Link {
        self.node(id).right
    }

    pub(crate) fn child(&self, id: VertexId, side: Side) -> Link {
        self.node(id).child(side)
    }

    /// Which child of its parent `id` is, or `None` for the root.
    pub(crate) fn side_of(&self, id: VertexId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.left(parent) == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The other child of `id`'s parent.
    pub(crate) fn sibling(&self, id: VertexId) -> Link {
        let side = self.side_of(id)?;
        self.child(self.parent(id)?, side.opposite())
    }

    /// Hangs `child` (which may be absent) on the given side of `parent`, fixing its parent link.
    pub(crate) fn set_child(&mut self, parent: VertexId, side: Side, child: Link) {
        self.node_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    /// Puts `new` where `old` currently hangs: in `old`'s parent's child slot, or at the root if
    /// `old` is the root. `old`'s own links are left alone.
    pub(crate) fn replace(&mut self, old: VertexId, new: Link) {
        let parent = self.parent(old);
        match (parent, self.side_of(old)) {
            (Some(parent), Some(side)) => self.set_child(parent, side, new),
            _ => {
                self.root = new;
                if let Some(new) = new {
                    self.node_mut(new).parent = None;
                }
            }
        }
    }

    /// Checks the parent/child links and the element count, panicking on any inconsistency.
    pub(crate) fn assert_links(&self) {
        let mut reachable = 0;
        if let Some(root) = self.root {
            assert_eq!(self.parent(root), None, "root has a parent");
        }
        let mut pending: Vec<VertexId> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            reachable += 1;
            assert!(self.is_live(id), "reachable vertex {:?} holds no element", id);
            for child in [self.left(id), self.right(id)].into_iter().flatten() {
                assert_eq!(self.parent(child), Some(id), "broken parent link");
                pending.push(child);
            }
        }
        assert_eq!(reachable, self.len, "len doesn't match the reachable vertices");
    }
}

/// Structural equality: same shape with equal elements in the same places. Colors aren't
/// compared.
impl<T: PartialEq> PartialEq for BinaryTree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.root().ok(), other.root().ok())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.element() != b.element() {
                        return false;
                    }
                    pending.push((a.left(), b.left()));
                    pending.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for BinaryTree<T> {}

impl<T: fmt::Display> fmt::Display for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &|vertex, f| write!(f, "{}", vertex))
    }
}

/// Level order cursor returned by [`BinaryTree::breadth_first`].
pub struct BreadthFirst<'a, T> {
    queue: VecDeque<Vertex<'a, T>>,
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = Vertex<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.queue.pop_front()?;
        self.queue.extend(vertex.left());
        self.queue.extend(vertex.right());
        Some(vertex)
    }
}
