//! Document path utilities.
//!
//! A path locates a node within a property-editor document by descending
//! through row children positionally, optionally finishing with named field
//! keys. Paths use the JSON Pointer (RFC 6901) string syntax, with `-`
//! standing for the end-of-array sentinel.
//!
//! # Example
//!
//! ```
//! use dpe_dom_path::{format_path, get, parse_path, PathEntry};
//! use serde_json::json;
//!
//! let path = parse_path("/0/1/Value");
//! assert_eq!(path[0], PathEntry::Index(0));
//! assert_eq!(path[2], PathEntry::Key("Value".to_string()));
//! assert_eq!(format_path(&path), "/0/1/Value");
//!
//! let doc = json!([
//!     {"type": "Row", "children": [
//!         {"type": "Label", "Value": "A"},
//!         {"type": "Label", "Value": "B"}
//!     ]}
//! ]);
//! assert_eq!(get(&doc, &path), Some(&json!("B")));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Path, PathEntry};

pub mod validate;
pub use validate::{validate_path, validate_pointer, ValidationError};

/// Name of the field holding a node's ordered children.
pub const CHILDREN_KEY: &str = "children";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("NO_PARENT")]
    NoParent,
}

/// Unescapes a JSON Pointer path component.
///
/// `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use dpe_dom_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string represents a canonical non-negative integer index.
///
/// ```
/// use dpe_dom_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// assert!(!is_valid_index("1.5"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Classify one unescaped path component.
///
/// `-` is the end-of-array sentinel, canonical integers are indices, and
/// everything else is a field key. Integers too large for `usize` stay keys.
pub fn parse_entry(component: &str) -> PathEntry {
    if component == "-" {
        return PathEntry::EndOfArray;
    }
    if is_valid_index(component) {
        if let Ok(i) = component.parse() {
            return PathEntry::Index(i);
        }
    }
    PathEntry::Key(component.to_string())
}

/// Parse a pointer string into a path.
///
/// ```
/// use dpe_dom_path::{parse_path, PathEntry};
///
/// assert!(parse_path("").is_empty());
/// assert_eq!(parse_path("/2/-").entries(), &[PathEntry::Index(2), PathEntry::EndOfArray]);
/// ```
pub fn parse_path(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Path::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(|c| parse_entry(&unescape_component(c))).collect()
}

/// Format a path back into its pointer string. Inverse of [`parse_path`].
pub fn format_path(path: &Path) -> String {
    path.to_string()
}

/// Check if a path points to the document root.
pub fn is_root(path: &Path) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &Path, child: &Path) -> bool {
    parent.len() < child.len() && child.entries()[..parent.len()] == *parent.entries()
}

/// Check if two paths are equal.
pub fn is_path_equal(p1: &Path, p2: &Path) -> bool {
    p1 == p2
}

/// Get the parent path of a given path.
pub fn parent(path: &Path) -> Result<Path, PathError> {
    if path.is_empty() {
        return Err(PathError::NoParent);
    }
    Ok(path.prefix(path.len() - 1))
}

/// The ordered children addressed by a positional entry on `val`.
///
/// Node objects expose their `children` array; bare arrays (the document
/// root) are their own children.
pub fn positional_children(val: &Value) -> Option<&Vec<Value>> {
    match val {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => map.get(CHILDREN_KEY)?.as_array(),
        _ => None,
    }
}

/// Mutable counterpart of [`positional_children`].
pub fn positional_children_mut(val: &mut Value) -> Option<&mut Vec<Value>> {
    match val {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => map.get_mut(CHILDREN_KEY)?.as_array_mut(),
        _ => None,
    }
}

/// Get a value from a document by path.
///
/// Returns `None` if the path doesn't resolve. The end-of-array sentinel
/// never resolves to a value.
pub fn get<'a>(val: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = val;
    for entry in path {
        current = match entry {
            PathEntry::Index(i) => positional_children(current)?.get(*i)?,
            PathEntry::EndOfArray => return None,
            PathEntry::Key(k) => current.as_object()?.get(k)?,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    let mut current = val;
    for entry in path {
        current = match entry {
            PathEntry::Index(i) => positional_children_mut(current)?.get_mut(*i)?,
            PathEntry::EndOfArray => return None,
            PathEntry::Key(k) => current.as_object_mut()?.get_mut(k)?,
        };
    }
    Some(current)
}

/// Resolve a positional entry against a container length.
///
/// `for_insert` selects the sentinel meaning: one past the end for inserts,
/// the last element otherwise. Returns `None` for key entries and for a
/// sentinel on an empty container when not inserting.
pub fn resolve_index(entry: &PathEntry, len: usize, for_insert: bool) -> Option<usize> {
    match entry {
        PathEntry::Index(i) => Some(*i),
        PathEntry::EndOfArray if for_insert => Some(len),
        PathEntry::EndOfArray => len.checked_sub(1),
        PathEntry::Key(_) => None,
    }
}
