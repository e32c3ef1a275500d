use dpe_dom::Path;
use dpe_dom_path::ValidationError;
use thiserror::Error;

/// Document contract violations detected while building or patching.
///
/// These indicate a defect in the document source, not a recoverable user
/// error. The view tree is left unchanged by the failing operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DpeError {
    #[error("unknown node type {name:?} under a row")]
    UnknownNodeType { name: String },

    #[error("top-level element {index} is not a row")]
    TopLevelNotRow { index: usize },

    #[error("document contents must be an array of rows")]
    DocumentNotArray,

    #[error("patch index {index} is beyond the array bounds ({len}) at {path}")]
    IndexOutOfBounds { path: Path, index: usize, len: usize },

    #[error("path entry {depth} of {path} must address a row child by index")]
    InvalidPathEntry { path: Path, depth: usize },

    #[error("operation at {path} carries no value")]
    MissingValue { path: Path },

    #[error("no document node at {path}")]
    NodeNotFound { path: Path },

    #[error("no adapter set")]
    NoAdapter,

    #[error(transparent)]
    InvalidPath(#[from] ValidationError),
}
