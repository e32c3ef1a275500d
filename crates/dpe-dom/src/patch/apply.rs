//! Patch application against a document value.
//!
//! Index rules match the view side: inserts accept `idx <= len` and treat
//! the end-of-array sentinel as `len`; removals and replacements need
//! `idx < len` and treat the sentinel as the last element.

use dpe_dom_path::{get_mut, positional_children_mut, resolve_index, PathEntry, CHILDREN_KEY};
use serde_json::Value;

use super::types::{Patch, PatchError, PatchOperation, Path};

fn split_last(path: &Path) -> Option<(Path, &PathEntry)> {
    let last = path.last()?;
    Some((path.prefix(path.len() - 1), last))
}

/// The positional children of `parent`, creating an empty `children` array
/// on a node object that has none yet.
fn children_for_insert(parent: &mut Value) -> Result<&mut Vec<Value>, PatchError> {
    if let Value::Object(map) = parent {
        if !map.contains_key(CHILDREN_KEY) {
            map.insert(CHILDREN_KEY.to_string(), Value::Array(Vec::new()));
        }
    }
    positional_children_mut(parent).ok_or(PatchError::InvalidTarget)
}

fn apply_add(doc: &mut Value, path: &Path, value: Value) -> Result<Option<Value>, PatchError> {
    let Some((parent_path, entry)) = split_last(path) else {
        return Ok(Some(std::mem::replace(doc, value)));
    };
    let parent = get_mut(doc, &parent_path).ok_or(PatchError::NotFound)?;
    match entry {
        PathEntry::Key(key) => {
            let map = parent.as_object_mut().ok_or(PatchError::InvalidTarget)?;
            Ok(map.insert(key.clone(), value))
        }
        _ => {
            let arr = children_for_insert(parent)?;
            let idx = resolve_index(entry, arr.len(), true).ok_or(PatchError::InvalidIndex)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(None)
        }
    }
}

fn apply_remove(doc: &mut Value, path: &Path) -> Result<Option<Value>, PatchError> {
    let (parent_path, entry) = split_last(path).ok_or(PatchError::InvalidTarget)?;
    let parent = get_mut(doc, &parent_path).ok_or(PatchError::NotFound)?;
    match entry {
        PathEntry::Key(key) => {
            let map = parent.as_object_mut().ok_or(PatchError::InvalidTarget)?;
            map.shift_remove(key).ok_or(PatchError::NotFound).map(Some)
        }
        _ => {
            let arr = positional_children_mut(parent).ok_or(PatchError::InvalidTarget)?;
            let idx = resolve_index(entry, arr.len(), false).ok_or(PatchError::NotFound)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(Some(arr.remove(idx)))
        }
    }
}

fn apply_replace(doc: &mut Value, path: &Path, value: Value) -> Result<Option<Value>, PatchError> {
    let Some((parent_path, entry)) = split_last(path) else {
        return Ok(Some(std::mem::replace(doc, value)));
    };
    let parent = get_mut(doc, &parent_path).ok_or(PatchError::NotFound)?;
    match entry {
        PathEntry::Key(key) => {
            let map = parent.as_object_mut().ok_or(PatchError::InvalidTarget)?;
            let slot = map.get_mut(key).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
        _ => {
            let arr = positional_children_mut(parent).ok_or(PatchError::InvalidTarget)?;
            let idx = resolve_index(entry, arr.len(), false).ok_or(PatchError::NotFound)?;
            let slot = arr.get_mut(idx).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
    }
}

/// Apply a single operation to the document (in-place mutation).
///
/// Returns the value previously at the path, if any.
pub fn apply_op(doc: &mut Value, op: &PatchOperation) -> Result<Option<Value>, PatchError> {
    match op {
        PatchOperation::Add { path, value } => apply_add(doc, path, value.clone()),
        PatchOperation::Remove { path } => apply_remove(doc, path),
        PatchOperation::Replace { path, value } => apply_replace(doc, path, value.clone()),
    }
}

/// Apply every operation in order.
///
/// Stops at the first failing operation; operations before it stay applied.
pub fn apply_patch(doc: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    for op in patch {
        apply_op(doc, op)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{label, row};
    use dpe_dom_path::parse_path;
    use serde_json::json;

    fn doc() -> Value {
        json!([row([label("A"), label("B")]), row([label("C")])])
    }

    fn add(p: &str, value: Value) -> PatchOperation {
        PatchOperation::Add { path: parse_path(p), value }
    }

    #[test]
    fn test_add_top_level_row() {
        let mut d = doc();
        apply_op(&mut d, &add("/1", row([label("X")]))).unwrap();
        assert_eq!(d[1], row([label("X")]));
        assert_eq!(d.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_add_sentinel_appends() {
        let mut d = doc();
        apply_op(&mut d, &add("/0/-", label("Z"))).unwrap();
        assert_eq!(d[0]["children"][2], label("Z"));
    }

    #[test]
    fn test_add_past_end_fails() {
        let mut d = doc();
        assert_eq!(apply_op(&mut d, &add("/0/5", label("Z"))), Err(PatchError::InvalidIndex));
    }

    #[test]
    fn test_add_creates_missing_children() {
        let mut d = json!([{"type": "Row"}]);
        apply_op(&mut d, &add("/0/0", label("Z"))).unwrap();
        assert_eq!(d[0]["children"][0], label("Z"));
    }

    #[test]
    fn test_remove_sentinel_targets_last() {
        let mut d = doc();
        let old = apply_op(&mut d, &PatchOperation::Remove { path: parse_path("/0/-") }).unwrap();
        assert_eq!(old, Some(label("B")));
        assert_eq!(d[0]["children"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut d = doc();
        let op = PatchOperation::Remove { path: parse_path("/1/1") };
        assert_eq!(apply_op(&mut d, &op), Err(PatchError::NotFound));
        let op = PatchOperation::Remove { path: Path::new() };
        assert_eq!(apply_op(&mut d, &op), Err(PatchError::InvalidTarget));
    }

    #[test]
    fn test_replace_field() {
        let mut d = doc();
        let op = PatchOperation::Replace { path: parse_path("/0/1/Value"), value: json!("b") };
        assert_eq!(apply_op(&mut d, &op).unwrap(), Some(json!("B")));
        assert_eq!(d[0]["children"][1]["Value"], json!("b"));
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut d = doc();
        let op = PatchOperation::Replace { path: parse_path("/0/0"), value: label("Q") };
        apply_op(&mut d, &op).unwrap();
        assert_eq!(d[0]["children"], json!([label("Q"), label("B")]));
    }

    #[test]
    fn test_patch_is_sequential() {
        let mut d = doc();
        let patch: Patch = vec![
            add("/0", row([])),
            PatchOperation::Remove { path: parse_path("/1/0") },
        ]
        .into();
        apply_patch(&mut d, &patch).unwrap();
        assert_eq!(d[0], row([]));
        assert_eq!(d[1], row([label("B")]));
    }
}
