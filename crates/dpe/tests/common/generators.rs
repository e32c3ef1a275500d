#![allow(dead_code)]

use dpe_dom::node::{self, attrs, label, property_editor, row};
use dpe_dom::patch::apply_op;
use dpe_dom::{Path, PatchOperation};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Labels plus property editors, some of which no built-in handler serves.
pub fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,4}".prop_map(|text| label(&text)),
        any::<i16>().prop_map(|n| property_editor("int", json!(n))),
        any::<bool>().prop_map(|b| property_editor("bool", json!(b))),
        Just(property_editor("vector3", json!([0, 0, 0]))),
    ]
}

/// Anything a row may hold, nested rows included.
pub fn child_node() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| row(children))
    })
}

pub fn top_row() -> impl Strategy<Value = Value> {
    prop::collection::vec(child_node(), 0..4).prop_map(|children| row(children))
}

pub fn document() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(top_row(), 0..4)
}

/// Raw choices that [`pick_op`] turns into an operation valid for the
/// document at hand.
#[derive(Debug, Clone)]
pub struct Step {
    pub kind: u8,
    pub at: usize,
    pub descend: Vec<usize>,
    pub text: String,
    pub value: Value,
}

pub fn step() -> impl Strategy<Value = Step> {
    (0u8..6, any::<usize>(), prop::collection::vec(any::<usize>(), 0..3), "[a-z]{1,3}", child_node())
        .prop_map(|(kind, at, descend, text, value)| Step { kind, at, descend, text, value })
}

/// Kinds 0 to 3 edit inside a row: add, remove, replace a child, or set a
/// leaf's `Value`. Kinds 4 and 5 add or remove a top-level row.
pub fn pick_op(doc: &Value, step: &Step) -> PatchOperation {
    let rows = node::array_size(doc);
    if rows == 0 || step.kind == 4 {
        let value = if node::is_row(&step.value) { step.value.clone() } else { row([step.value.clone()]) };
        return PatchOperation::Add { path: Path::new().child(step.at % (rows + 1)), value };
    }
    if step.kind == 5 {
        return PatchOperation::Remove { path: Path::new().child(step.at % rows) };
    }

    let top = step.at % rows;
    let mut path = Path::new().child(top);
    let mut current = &doc[top];
    for &choice in &step.descend {
        let nested: Vec<usize> = node::children(current)
            .iter()
            .enumerate()
            .filter(|(_, child)| node::is_row(child))
            .map(|(i, _)| i)
            .collect();
        if nested.is_empty() || choice % 2 == 0 {
            break;
        }
        let i = nested[(choice / 2) % nested.len()];
        path.push(i);
        current = &node::children(current)[i];
    }

    let children = node::children(current);
    let len = children.len();
    let at = step.at / 7;
    let add = PatchOperation::Add { path: path.child(at % (len + 1)), value: step.value.clone() };
    match step.kind {
        1 if len > 0 => PatchOperation::Remove { path: path.child(at % len) },
        2 if len > 0 => PatchOperation::Replace { path: path.child(at % len), value: step.value.clone() },
        3 => {
            let leaves: Vec<usize> = children
                .iter()
                .enumerate()
                .filter(|(_, child)| !node::is_row(child))
                .map(|(i, _)| i)
                .collect();
            if leaves.is_empty() {
                return add;
            }
            let i = leaves[at % leaves.len()];
            PatchOperation::Replace { path: path.child(i).child(attrs::VALUE), value: json!(step.text) }
        }
        _ => add,
    }
}

/// Turn `steps` into one batch. Each operation is picked against the
/// document as left by the operations before it.
pub fn pick_batch(doc: &Value, steps: &[Step]) -> Vec<PatchOperation> {
    let mut scratch = doc.clone();
    steps
        .iter()
        .map(|step| {
            let op = pick_op(&scratch, step);
            apply_op(&mut scratch, &op).unwrap();
            op
        })
        .collect()
}
