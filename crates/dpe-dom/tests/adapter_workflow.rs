use dpe_dom::node::{self, label, property_editor, row, NodeKind};
use dpe_dom::patch::{from_json_patch, to_json_patch};
use dpe_dom::{AdapterEvent, DocumentAdapter, PatchError, ValueAdapter};
use dpe_dom_path::parse_path;
use serde_json::json;

#[test]
fn test_wire_patch_through_adapter() {
    let mut adapter = ValueAdapter::from_rows([row([label("A"), property_editor("float", json!(1.5))])]);
    let wire = json!([
        {"op": "add", "path": "/-", "value": {"type": "Row", "children": []}},
        {"op": "add", "path": "/1/0", "value": {"type": "Label", "Value": "B"}},
        {"op": "replace", "path": "/0/1/Value", "value": 2.5},
        {"op": "remove", "path": "/0/0"}
    ]);
    let patch = from_json_patch(&wire).unwrap();
    assert_eq!(to_json_patch(&patch), wire);

    adapter.apply_patch(patch.clone()).unwrap();
    assert_eq!(adapter.drain_events(), vec![AdapterEvent::Changed(patch)]);

    let contents = adapter.contents();
    assert_eq!(node::array_size(contents), 2);
    assert_eq!(adapter.node_at(&parse_path("/0/0/Value")), Some(&json!(2.5)));
    assert_eq!(NodeKind::of(adapter.node_at(&parse_path("/1/0")).unwrap()), NodeKind::Label);
    assert_eq!(node::label_text(adapter.node_at(&parse_path("/1/0")).unwrap()), "B");
}

#[test]
fn test_add_creates_children_on_bare_row() {
    let mut adapter = ValueAdapter::new(json!([{"type": "Row"}]));
    let patch = from_json_patch(&json!([{"op": "add", "path": "/0/0", "value": {"type": "Label", "Value": "x"}}])).unwrap();
    adapter.apply_patch(patch).unwrap();
    assert_eq!(node::children(&adapter.contents()[0]).len(), 1);
}

#[test]
fn test_rejects_unsupported_wire_ops() {
    let err = from_json_patch(&json!([{"op": "move", "from": "/0", "path": "/1"}])).unwrap_err();
    assert_eq!(err, PatchError::InvalidOp("unsupported op: move".to_string()));
    assert!(from_json_patch(&json!([{"op": "add", "path": "/0"}])).is_err());
}

#[test]
fn test_out_of_range_patch_falls_back_to_reset() {
    let mut adapter = ValueAdapter::from_rows([row([])]);
    let patch = from_json_patch(&json!([{"op": "replace", "path": "/0/3", "value": {"type": "Row"}}])).unwrap();
    assert_eq!(adapter.apply_patch(patch), Err(PatchError::NotFound));
    assert_eq!(adapter.drain_events(), vec![AdapterEvent::Reset]);
}
