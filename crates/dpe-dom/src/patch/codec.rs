//! JSON codec for patch operations.
//!
//! Uses the RFC 6902 shape: `{"op": "add", "path": "/0/-", "value": ...}`.

use dpe_dom_path::{format_path, parse_path, validate_pointer};
use serde_json::{json, Value};

use super::types::{Patch, PatchError, PatchOperation, Path};

fn encode_path(path: &Path) -> Value {
    Value::String(format_path(path))
}

fn decode_path(v: Option<&Value>) -> Result<Path, PatchError> {
    let s = v
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    validate_pointer(s).map_err(|e| PatchError::InvalidOp(e.to_string()))?;
    Ok(parse_path(s))
}

fn decode_value(v: Option<&Value>, op: &str) -> Result<Value, PatchError> {
    v.cloned()
        .ok_or_else(|| PatchError::InvalidOp(format!("{op} requires a value")))
}

/// Serialize an operation to its JSON form.
pub fn to_json(op: &PatchOperation) -> Value {
    match op {
        PatchOperation::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        PatchOperation::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        PatchOperation::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
    }
}

/// Deserialize an operation from its JSON form.
pub fn from_json(v: &Value) -> Result<PatchOperation, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing op".into()))?;
    let path = decode_path(obj.get("path"))?;
    match op {
        "add" => Ok(PatchOperation::Add { path, value: decode_value(obj.get("value"), op)? }),
        "remove" => Ok(PatchOperation::Remove { path }),
        "replace" => Ok(PatchOperation::Replace { path, value: decode_value(obj.get("value"), op)? }),
        other => Err(PatchError::InvalidOp(format!("unsupported op: {other}"))),
    }
}

pub fn to_json_patch(patch: &Patch) -> Value {
    Value::Array(patch.iter().map(to_json).collect())
}

pub fn from_json_patch(v: &Value) -> Result<Patch, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}
