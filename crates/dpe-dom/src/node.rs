//! Property editor node conventions over `serde_json::Value`.
//!
//! A node is an object carrying its kind name under `"type"`, its ordered
//! children (rows only) under `"children"`, and any other named attributes
//! as plain fields:
//!
//! ```json
//! {"type": "Row", "children": [
//!     {"type": "Label", "Value": "Position"},
//!     {"type": "PropertyEditor", "Type": "float", "Value": 1.5}
//! ]}
//! ```

use serde_json::{Map, Value};

pub use dpe_dom_path::CHILDREN_KEY;

/// Field holding a node's kind name.
pub const TYPE_KEY: &str = "type";

pub mod names {
    pub const ROW: &str = "Row";
    pub const LABEL: &str = "Label";
    pub const PROPERTY_EDITOR: &str = "PropertyEditor";
}

pub mod attrs {
    /// Label text, or the edited value of a property editor.
    pub const VALUE: &str = "Value";
    /// Value type of a property editor, used to pick a handler.
    pub const TYPE: &str = "Type";
    /// Explicit handler name, overriding `Type`.
    pub const HANDLER: &str = "Handler";
}

/// The closed set of node kinds a row may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Row,
    Label,
    PropertyEditor,
    /// Anything else. Carries the name found, empty if the value is not a node.
    Unrecognized(String),
}

impl NodeKind {
    pub fn of(value: &Value) -> NodeKind {
        match node_name(value) {
            Some(names::ROW) => NodeKind::Row,
            Some(names::LABEL) => NodeKind::Label,
            Some(names::PROPERTY_EDITOR) => NodeKind::PropertyEditor,
            Some(other) => NodeKind::Unrecognized(other.to_string()),
            None => NodeKind::Unrecognized(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Row => names::ROW,
            NodeKind::Label => names::LABEL,
            NodeKind::PropertyEditor => names::PROPERTY_EDITOR,
            NodeKind::Unrecognized(name) => name,
        }
    }
}

/// The node's kind name, if `value` is a node object.
pub fn node_name(value: &Value) -> Option<&str> {
    value.as_object()?.get(TYPE_KEY)?.as_str()
}

pub fn is_row(value: &Value) -> bool {
    NodeKind::of(value) == NodeKind::Row
}

/// The node's ordered children. Missing `children` reads as an empty row.
pub fn children(value: &Value) -> &[Value] {
    match value.as_object().and_then(|m| m.get(CHILDREN_KEY)) {
        Some(Value::Array(arr)) => arr,
        _ => &[],
    }
}

/// Number of positional children. A bare array counts its own elements.
pub fn array_size(value: &Value) -> usize {
    match value {
        Value::Array(arr) => arr.len(),
        _ => children(value).len(),
    }
}

pub fn attribute<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value.as_object()?.get(name)
}

/// A label's display text. Non-string values are rendered as JSON.
pub fn label_text(value: &Value) -> String {
    match attribute(value, attrs::VALUE) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub fn row(children: impl IntoIterator<Item = Value>) -> Value {
    let mut map = Map::new();
    map.insert(CHILDREN_KEY.to_string(), Value::Array(children.into_iter().collect()));
    node(names::ROW, map)
}

pub fn label(text: &str) -> Value {
    let mut map = Map::new();
    map.insert(attrs::VALUE.to_string(), Value::String(text.to_string()));
    node(names::LABEL, map)
}

pub fn property_editor(value_type: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(attrs::TYPE.to_string(), Value::String(value_type.to_string()));
    map.insert(attrs::VALUE.to_string(), value);
    node(names::PROPERTY_EDITOR, map)
}

/// A node of an arbitrary kind with the given attributes.
pub fn node(name: &str, attributes: Map<String, Value>) -> Value {
    let mut map = Map::with_capacity(attributes.len() + 1);
    map.insert(TYPE_KEY.to_string(), Value::String(name.to_string()));
    map.extend(attributes);
    Value::Object(map)
}
