//! Structural document patches.
//!
//! # Operations
//!
//! `add`, `remove` and `replace`, each addressed by a [`Path`]. Paths may end
//! in the end-of-array sentinel (`-`), which appends for `add` and targets
//! the last element for `remove`/`replace`.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{OperationKind, Patch, PatchError, PatchOperation, Path};
