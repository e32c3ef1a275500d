#![allow(dead_code)]

use dpe::{DocumentPropertyEditor, DpeError, RowChild, RowNode, ViewId, ViewTree};
use dpe_dom::node::{self, NodeKind};
use dpe_dom::{DocumentAdapter, Patch, PatchOperation, ValueAdapter};
use serde_json::Value;

pub type Editor = DocumentPropertyEditor<ValueAdapter, ViewTree>;

pub fn editor_for(rows: impl IntoIterator<Item = Value>) -> Editor {
    let mut editor = DocumentPropertyEditor::in_memory();
    editor.set_adapter(ValueAdapter::from_rows(rows)).unwrap();
    editor
}

pub fn outline(editor: &Editor) -> String {
    editor.toolkit().render_text(editor.root_view())
}

/// Apply `ops` to the document as one patch, then sync the view.
pub fn patch(editor: &mut Editor, ops: Vec<PatchOperation>) -> Result<(), DpeError> {
    editor.adapter_mut().unwrap().apply_patch(Patch::from(ops)).unwrap();
    editor.process_events().map(|_| ())
}

pub fn contents(editor: &Editor) -> Vec<Value> {
    editor.adapter().unwrap().contents().as_array().unwrap().clone()
}

/// A new editor built from `editor`'s current document.
pub fn fresh_render(editor: &Editor) -> Editor {
    editor_for(contents(editor))
}

pub fn view_texts(tree: &ViewTree, container: ViewId) -> Vec<String> {
    tree.children(container)
        .iter()
        .map(|&view| tree.text(view).unwrap_or_default().to_string())
        .collect()
}

pub fn column_texts(editor: &Editor, row: &RowNode) -> Vec<String> {
    view_texts(editor.toolkit(), row.columns_view())
}

/// The text of the first column view of every top-level row.
pub fn row_titles(editor: &Editor) -> Vec<String> {
    editor
        .rows()
        .iter()
        .map(|row| column_texts(editor, row).into_iter().next().unwrap_or_default())
        .collect()
}

/// Assert that `row` mirrors the `Row` node `value`: one slot per child in
/// document order, and each grouping holding exactly its slots' views in
/// the same order.
pub fn assert_mirrors(tree: &ViewTree, row: &RowNode, value: &Value) {
    let children = node::children(value);
    assert_eq!(row.child_count(), children.len(), "child count of {value}");
    for (slot, child) in row.children().iter().zip(children) {
        match (slot, NodeKind::of(child)) {
            (RowChild::Row(nested), NodeKind::Row) => assert_mirrors(tree, nested, child),
            (RowChild::Leaf(view), NodeKind::Label) => {
                assert!(row.binding(*view).is_none());
                assert_eq!(tree.text(*view), Some(node::label_text(child).as_str()));
            }
            (RowChild::Leaf(view), NodeKind::PropertyEditor) => assert!(row.binding(*view).is_some()),
            (RowChild::Placeholder, NodeKind::PropertyEditor) => {}
            (slot, kind) => panic!("{slot:?} does not mirror {kind:?}"),
        }
    }

    let leaves: Vec<ViewId> = row
        .children()
        .iter()
        .filter(|slot| matches!(slot, RowChild::Leaf(_)))
        .filter_map(RowChild::view)
        .collect();
    let nested: Vec<ViewId> = row.children().iter().filter_map(RowChild::as_row).map(RowNode::view).collect();
    assert_eq!(tree.children(row.columns_view()), leaves.as_slice());
    assert_eq!(tree.children(row.child_rows_view()), nested.as_slice());
    assert_eq!(row.binding_count(), leaves.iter().filter(|&&v| row.binding(v).is_some()).count());
}

pub fn assert_editor_mirrors(editor: &Editor) {
    let rows = contents(editor);
    assert_eq!(editor.row_count(), rows.len());
    let views: Vec<ViewId> = editor.rows().iter().map(RowNode::view).collect();
    assert_eq!(editor.toolkit().children(editor.root_view()), views.as_slice());
    for (row, value) in editor.rows().iter().zip(&rows) {
        assert_mirrors(editor.toolkit(), row, value);
    }
}
