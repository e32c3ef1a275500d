//! Document model for data-driven property editors.
//!
//! - [`node`]: node kinds and attribute conventions over `serde_json::Value`
//! - [`patch`]: add/remove/replace operations, their JSON codec, and
//!   application to a document value
//! - [`adapter`]: the document source contract and an in-memory source

pub mod adapter;
pub mod node;
pub mod patch;

pub use adapter::{AdapterEvent, DocumentAdapter, ValueAdapter};
pub use dpe_dom_path::{Path, PathEntry};
pub use node::NodeKind;
pub use patch::{OperationKind, Patch, PatchError, PatchOperation};
