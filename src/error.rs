use thiserror::Error;

/// Everything that can go wrong when talking to a tree.
///
/// Looking up something that isn't there (`search`, `contains`, `delete`) is not an error and
/// is reported with `None`/`false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A [`VertexId`][crate::VertexId] was passed that doesn't name a live vertex of this tree.
    #[error("vertex handle does not refer to a live vertex of this tree")]
    InvalidArgument,
    /// The operation needs at least one element.
    #[error("the tree is empty")]
    EmptyStructure,
    /// The operation isn't allowed on this kind of tree.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}
