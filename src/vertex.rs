//! The pieces a tree is built from: vertex handles, the arena slot each vertex lives in and a
//! borrowed, read-only view of a vertex handed out to callers.

use std::collections::VecDeque;
use std::fmt;

use crate::binary_tree::BinaryTree;

/// A handle to a vertex of a particular tree.
///
/// Handles are plain indices into the tree's arena. They are only meaningful for the tree that
/// produced them and only until that tree is next mutated: deletions free slots (which later
/// insertions reuse) and move elements between vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// The arena slot this handle points at.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The color tag carried by the vertices of a red-black tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red vertex. Never the root and never the parent of another red vertex.
    Red,
    /// A black vertex. Absent children count as black too.
    Black,
}

/// Which child of its parent a vertex is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A possibly absent link to another vertex in the same arena.
pub(crate) type Link = Option<VertexId>;

/// One arena slot.
///
/// `element` is `None` for slots sitting on the free list and for the phantom leaf the red-black
/// deletion briefly hangs under a childless vertex. `color` is `None` for vertices of a plain
/// ordered tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) element: Option<T>,
    pub(crate) color: Option<Color>,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<T> Node<T> {
    pub(crate) fn new(element: Option<T>, color: Option<Color>) -> Self {
        Self {
            element,
            color,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A read-only view of one live vertex, borrowed from its tree.
///
/// # Examples
///
/// ```
/// use redblack::OrderedTree;
///
/// let tree: OrderedTree<_> = [5, 3, 8].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.element(), &5);
/// assert_eq!(root.left().map(|v| *v.element()), Some(3));
/// assert_eq!(root.right().unwrap().depth(), 1);
/// assert_eq!(root.height(), 1);
/// ```
pub struct Vertex<'a, T> {
    tree: &'a BinaryTree<T>,
    id: VertexId,
    element: &'a T,
}

impl<'a, T> Clone for Vertex<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Vertex<'a, T> {}

impl<'a, T> Vertex<'a, T> {
    /// Builds a view if `id` names a live vertex (one holding an element) of `tree`.
    pub(crate) fn new(tree: &'a BinaryTree<T>, id: VertexId) -> Option<Self> {
        let element = tree.slot(id)?.element.as_ref()?;
        Some(Self { tree, id, element })
    }

    fn node(&self) -> &'a Node<T> {
        self.tree.node(self.id)
    }

    fn view(&self, link: Link) -> Option<Self> {
        link.and_then(|id| Self::new(self.tree, id))
    }

    /// The handle of this vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The element stored in this vertex.
    pub fn element(&self) -> &'a T {
        self.element
    }

    /// The color tag of this vertex. Only vertices of a red-black tree carry one.
    pub fn color(&self) -> Option<Color> {
        self.node().color
    }

    /// The parent of this vertex, absent for the root.
    pub fn parent(&self) -> Option<Self> {
        self.view(self.node().parent)
    }

    /// The left child of this vertex.
    pub fn left(&self) -> Option<Self> {
        self.view(self.node().left)
    }

    /// The right child of this vertex.
    pub fn right(&self) -> Option<Self> {
        self.view(self.node().right)
    }

    /// Whether this vertex has a parent, i.e. isn't the root.
    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// Whether this vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.left().is_some()
    }

    /// Whether this vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.right().is_some()
    }

    /// How many edges lie on the longest downward path from this vertex. A vertex without
    /// children has a height of 0.
    pub fn height(&self) -> usize {
        // Count the levels of the subtree breadth first, one full level at a time.
        let mut queue = VecDeque::from([*self]);
        let mut levels = 0;
        while !queue.is_empty() {
            levels += 1;
            for _ in 0..queue.len() {
                if let Some(vertex) = queue.pop_front() {
                    queue.extend(vertex.left());
                    queue.extend(vertex.right());
                }
            }
        }
        levels - 1
    }

    /// How many ancestors this vertex has. The root has a depth of 0.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |v| v.parent()).count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vertex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.id)
            .field("element", self.element)
            .field("color", &self.color())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.element, f)
    }
}
