//! This crate provides an ordered index over any totally ordered element type, built as a
//! layered family of binary trees.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored elements. Each vertex stores an element and has up to two children. The most important
//! invariant of a BST is that, for every vertex, everything in its left subtree is less than or
//! equal to its own element and everything in its right subtree is greater than or equal to it.
//! Equal elements are allowed. Insertion always sends a tie to the left, but a rotation can later
//! lift one tie above another and leave the lower one on the right.
//!
//! Searching takes `O(height)` and an in-order walk visits the elements in sorted order.
//! Inserting already sorted elements into a plain BST degrades it into a chain, though, so the
//! crate offers three layers:
//!
//! 1. [`BinaryTree`]: the linked shell. Navigation, height, breadth-first search and rendering.
//! 2. [`OrderedTree`]: a plain BST. Insert, search, delete, rotations and traversals.
//! 3. [`RedBlackTree`]: an `OrderedTree` that recolors and rotates after every mutation so its
//!    height stays within `2 * lg(N + 1)`.
//!
//! Each layer derefs to the one below it, so every read-only query of a lower layer is available
//! on the layers above. Mutations are not: a red-black tree can't be handed to the plain BST
//! insertion, which would skip the rebalancing.
//!
//! [`CompleteTree`] is a second tree on the same shell. It ignores ordering and keeps every level
//! full except the last, filling slots in level order.
//!
//! ## Red-Black Tree
//!
//! Every vertex of a red-black tree is tagged [`Color::Red`] or [`Color::Black`]. The root is
//! black, absent children count as black, a red vertex never has a red child, and every path from
//! a vertex down to an absent child passes the same number of black vertices.
//!
//! ```
//! use redblack::RedBlackTree;
//!
//! let tree: RedBlackTree<_> = (0..1000).collect();
//! assert!(tree.height() < 20);
//! assert_eq!(tree.search(&500).map(|v| *v.element()), Some(500));
//! ```
//!
//! ## Logging
//!
//! Mutations are logged through the [`log`] facade at `debug` level and every rebalancing step at
//! `trace` level. Both are compiled out of release builds.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod binary_tree;
mod complete;
mod error;
mod ordered;
mod red_black;
mod vertex;


pub use binary_tree::{BinaryTree, BreadthFirst};
pub use complete::{CompleteTree, LevelOrder};
pub use error::TreeError;
pub use ordered::{Iter, OrderedTree, Rotate};
pub use red_black::RedBlackTree;
pub use vertex::{Color, Vertex, VertexId};
