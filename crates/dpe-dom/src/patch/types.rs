//! Core types for document patches.

use serde_json::Value;
use thiserror::Error;

pub use dpe_dom_path::Path;

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
        }
    }

    /// Whether the end-of-array sentinel means "one past the end".
    pub fn inserts(&self) -> bool {
        matches!(self, OperationKind::Add)
    }
}

/// A single structural patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
}

impl PatchOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            PatchOperation::Add { .. } => OperationKind::Add,
            PatchOperation::Remove { .. } => OperationKind::Remove,
            PatchOperation::Replace { .. } => OperationKind::Replace,
        }
    }

    pub fn destination_path(&self) -> &Path {
        match self {
            PatchOperation::Add { path, .. } => path,
            PatchOperation::Remove { path } => path,
            PatchOperation::Replace { path, .. } => path,
        }
    }

    /// The inserted value. `None` for removals.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => Some(value),
            PatchOperation::Remove { .. } => None,
        }
    }
}

/// An ordered batch of operations. Later operations see the indices left by
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Vec<PatchOperation>);

impl Patch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, op: PatchOperation) {
        self.0.push(op);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.0.iter()
    }
}

impl From<Vec<PatchOperation>> for Patch {
    fn from(ops: Vec<PatchOperation>) -> Self {
        Patch(ops)
    }
}

impl FromIterator<PatchOperation> for Patch {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Patch(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpe_dom_path::parse_path;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let add = PatchOperation::Add { path: parse_path("/1"), value: json!(1) };
        let remove = PatchOperation::Remove { path: parse_path("/0/0") };
        assert_eq!(add.kind(), OperationKind::Add);
        assert_eq!(add.value(), Some(&json!(1)));
        assert_eq!(remove.kind(), OperationKind::Remove);
        assert_eq!(remove.value(), None);
        assert_eq!(remove.destination_path().len(), 2);
        assert!(OperationKind::Add.inserts());
        assert!(!OperationKind::Replace.inserts());
    }
}
