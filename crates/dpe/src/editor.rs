//! The top-level editor view.

use dpe_dom::node;
use dpe_dom::patch::apply_op;
use dpe_dom::{AdapterEvent, DocumentAdapter, OperationKind, Patch, PatchOperation, Path, ValueAdapter};
use dpe_dom_path::{resolve_index, validate_path};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::DpeError;
use crate::handler::{HandlerRegistry, HandlerTable};
use crate::options::EditorOptions;
use crate::row::{validate_row, RowContext, RowNode};
use crate::view::{ContainerKind, ViewId, ViewToolkit};
use crate::view_tree::ViewTree;

/// Renders a document adapter's rows into a view tree and keeps them in
/// sync with the adapter's notifications.
pub struct DocumentPropertyEditor<A: DocumentAdapter = ValueAdapter, T: ViewToolkit = ViewTree> {
    toolkit: T,
    registry: Box<dyn HandlerRegistry>,
    options: EditorOptions,
    root: ViewId,
    rows: Vec<RowNode>,
    adapter: Option<A>,
    /// The document as of the last dispatched operation. Taken from the
    /// adapter on reset and stepped forward one operation at a time, so leaf
    /// lookups inside a batch never see later operations of that batch.
    snapshot: Value,
}

impl DocumentPropertyEditor<ValueAdapter, ViewTree> {
    /// An editor over an in-memory view tree with the built-in handlers.
    pub fn in_memory() -> Self {
        Self::new(ViewTree::new(), Box::new(HandlerTable::with_builtin_handlers()))
    }
}

impl<A: DocumentAdapter, T: ViewToolkit> DocumentPropertyEditor<A, T> {
    pub fn new(toolkit: T, registry: Box<dyn HandlerRegistry>) -> Self {
        Self::with_options(toolkit, registry, EditorOptions::default())
    }

    pub fn with_options(mut toolkit: T, registry: Box<dyn HandlerRegistry>, options: EditorOptions) -> Self {
        let root = toolkit.create_container(ContainerKind::Editor);
        Self {
            toolkit,
            registry,
            options,
            root,
            rows: Vec::new(),
            adapter: None,
            snapshot: Value::Array(Vec::new()),
        }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// The container holding one view per top-level row.
    pub fn root_view(&self) -> ViewId {
        self.root
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&RowNode> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[RowNode] {
        &self.rows
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Mutable access for editing the document. Call
    /// [`process_events`](Self::process_events) afterwards to sync the view.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Attach `adapter` and build the view from its current contents.
    ///
    /// Notifications queued before attaching are discarded, the full build
    /// already reflects them.
    pub fn set_adapter(&mut self, mut adapter: A) -> Result<(), DpeError> {
        adapter.drain_events();
        self.adapter = Some(adapter);
        self.handle_reset()
    }

    /// Detach the adapter, destroying all rows.
    pub fn take_adapter(&mut self) -> Option<A> {
        self.clear_rows();
        self.snapshot = Value::Array(Vec::new());
        self.adapter.take()
    }

    /// Dispatch all pending adapter notifications in order. Returns how many
    /// were handled.
    ///
    /// Stops at the first failing notification; the rest are dropped and the
    /// view may be out of sync until the next reset.
    pub fn process_events(&mut self) -> Result<usize, DpeError> {
        let events = match self.adapter.as_mut() {
            Some(adapter) => adapter.drain_events(),
            None => return Err(DpeError::NoAdapter),
        };
        let count = events.len();
        for event in events {
            match event {
                AdapterEvent::Reset => self.handle_reset()?,
                AdapterEvent::Changed(patch) => self.handle_dom_change(&patch)?,
            }
        }
        Ok(count)
    }

    fn clear_rows(&mut self) {
        for row in self.rows.drain(..) {
            row.destroy(&mut self.toolkit);
        }
    }

    /// Destroy every row and rebuild from the adapter's full contents.
    ///
    /// The contents are checked first; on error the existing rows stay.
    #[instrument(skip_all)]
    pub fn handle_reset(&mut self) -> Result<(), DpeError> {
        let Self {
            ref mut toolkit,
            ref registry,
            ref options,
            root,
            ref mut rows,
            ref adapter,
            ref mut snapshot,
        } = *self;
        let source: &dyn DocumentAdapter = adapter.as_ref().ok_or(DpeError::NoAdapter)?;
        let contents = source.contents().as_array().ok_or(DpeError::DocumentNotArray)?;
        for (index, row) in contents.iter().enumerate() {
            if !node::is_row(row) {
                return Err(DpeError::TopLevelNotRow { index });
            }
            validate_row(row)?;
        }

        for row in rows.drain(..) {
            row.destroy(&mut *toolkit);
        }
        *snapshot = source.contents().clone();
        let mut cx = RowContext {
            toolkit,
            registry: &**registry,
            document: &*snapshot,
            options,
        };
        for (index, value) in contents.iter().enumerate() {
            add_row_from_value(rows, root, value, index, &mut cx)?;
        }
        info!(rows = rows.len(), "view rebuilt");
        Ok(())
    }

    /// Apply each operation of `patch` in order.
    #[instrument(skip_all, fields(ops = patch.len()))]
    pub fn handle_dom_change(&mut self, patch: &Patch) -> Result<(), DpeError> {
        for op in patch {
            self.handle_operation(op)?;
        }
        Ok(())
    }

    fn handle_operation(&mut self, op: &PatchOperation) -> Result<(), DpeError> {
        let Self {
            ref mut toolkit,
            ref registry,
            ref options,
            root,
            ref mut rows,
            ref adapter,
            ref mut snapshot,
        } = *self;
        if adapter.is_none() {
            return Err(DpeError::NoAdapter);
        }
        let path = op.destination_path();
        validate_path(path, options.max_path_depth)?;
        debug!(op = op.kind().as_str(), %path, "handling operation");

        if let Err(e) = apply_op(snapshot, op) {
            warn!(error = %e, %path, "operation does not apply to the tracked document");
        }
        let mut cx = RowContext {
            toolkit,
            registry: &**registry,
            document: &*snapshot,
            options,
        };

        let Some(first) = path.first() else {
            return replace_all(rows, root, op, &mut cx);
        };
        if !first.is_positional() {
            return Err(DpeError::InvalidPathEntry { path: path.clone(), depth: 0 });
        }

        let kind = op.kind();
        let len = rows.len();
        let targets_row = path.len() == 1;
        let row_index = resolve_index(first, len, kind.inserts() && targets_row).unwrap_or(len);
        let in_bounds = if kind.inserts() && targets_row { row_index <= len } else { row_index < len };
        if !in_bounds {
            return Err(DpeError::IndexOutOfBounds { path: path.clone(), index: row_index, len });
        }

        if !targets_row {
            let resolved = Path::new().child(row_index);
            return rows[row_index].handle_operation_at_path(op, 1, &resolved, &mut cx);
        }

        match op {
            PatchOperation::Add { value, .. } => {
                check_top_level_row(value, row_index)?;
                add_row_from_value(rows, root, value, row_index, &mut cx)
            }
            PatchOperation::Replace { value, .. } => {
                check_top_level_row(value, row_index)?;
                rows[row_index].set_value_from_dom(value, &mut cx)
            }
            PatchOperation::Remove { .. } => {
                let row = rows.remove(row_index);
                row.destroy(cx.toolkit);
                Ok(())
            }
        }
    }
}

impl<A: DocumentAdapter, T: ViewToolkit> Drop for DocumentPropertyEditor<A, T> {
    fn drop(&mut self) {
        self.clear_rows();
        self.toolkit.destroy_view(self.root);
    }
}

fn check_top_level_row(value: &Value, index: usize) -> Result<(), DpeError> {
    if !node::is_row(value) {
        return Err(DpeError::TopLevelNotRow { index });
    }
    validate_row(value)
}

fn add_row_from_value(
    rows: &mut Vec<RowNode>,
    root: ViewId,
    value: &Value,
    index: usize,
    cx: &mut RowContext<'_>,
) -> Result<(), DpeError> {
    let row = RowNode::from_value(value, cx)?;
    cx.toolkit.insert_view(root, index, row.view());
    rows.insert(index, row);
    Ok(())
}

/// An operation on the empty path: the whole document is replaced.
fn replace_all(
    rows: &mut Vec<RowNode>,
    root: ViewId,
    op: &PatchOperation,
    cx: &mut RowContext<'_>,
) -> Result<(), DpeError> {
    let path = op.destination_path();
    if op.kind() == OperationKind::Remove {
        return Err(DpeError::InvalidPathEntry { path: path.clone(), depth: 0 });
    }
    let value = op.value().ok_or_else(|| DpeError::MissingValue { path: path.clone() })?;
    let contents = value.as_array().ok_or(DpeError::DocumentNotArray)?;
    for (index, row) in contents.iter().enumerate() {
        check_top_level_row(row, index)?;
    }
    for row in rows.drain(..) {
        row.destroy(cx.toolkit);
    }
    for (index, row) in contents.iter().enumerate() {
        add_row_from_value(rows, root, row, index, cx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpe_dom::node::{label, row};
    use dpe_dom_path::parse_path;
    use serde_json::json;

    fn editor_for(rows: impl IntoIterator<Item = Value>) -> DocumentPropertyEditor {
        let mut editor = DocumentPropertyEditor::in_memory();
        editor.set_adapter(ValueAdapter::from_rows(rows)).unwrap();
        editor
    }

    fn columns(editor: &DocumentPropertyEditor, index: usize) -> Vec<String> {
        let tree = editor.toolkit();
        tree.children(editor.rows[index].columns_view())
            .iter()
            .map(|&view| tree.text(view).unwrap_or_default().to_string())
            .collect()
    }

    fn titles(editor: &DocumentPropertyEditor) -> Vec<String> {
        (0..editor.row_count()).map(|i| columns(editor, i).join(",")).collect()
    }

    #[test]
    fn test_top_level_sentinel() {
        let mut editor = editor_for([row([label("A")]), row([label("B")])]);

        let add = PatchOperation::Add { path: parse_path("/-"), value: row([label("C")]) };
        editor.handle_operation(&add).unwrap();
        assert_eq!(titles(&editor), ["A", "B", "C"]);

        let replace = PatchOperation::Replace { path: parse_path("/-"), value: row([label("Z")]) };
        let last = editor.rows[2].view();
        editor.handle_operation(&replace).unwrap();
        assert_eq!(titles(&editor), ["A", "B", "Z"]);
        assert_eq!(editor.rows[2].view(), last);

        editor.handle_operation(&PatchOperation::Remove { path: parse_path("/-") }).unwrap();
        assert_eq!(titles(&editor), ["A", "B"]);
        assert_eq!(editor.snapshot, json!([row([label("A")]), row([label("B")])]));

        // nothing to resolve against
        let mut editor = editor_for([]);
        let err = editor.handle_operation(&PatchOperation::Remove { path: parse_path("/-") }).unwrap_err();
        assert!(matches!(err, DpeError::IndexOutOfBounds { len: 0, .. }));
    }

    #[test]
    fn test_snapshot_steps_through_batch() {
        let mut editor = editor_for([row([label("A"), label("B")])]);
        let patch = Patch::from(vec![
            PatchOperation::Replace { path: parse_path("/0/0/Value"), value: json!("X") },
            PatchOperation::Add { path: parse_path("/0/0"), value: label("new") },
            PatchOperation::Replace { path: parse_path("/0/2/Value"), value: json!("Y") },
        ]);
        editor.handle_dom_change(&patch).unwrap();
        assert_eq!(columns(&editor, 0), ["new", "X", "Y"]);
        assert_eq!(editor.snapshot, json!([row([label("new"), label("X"), label("Y")])]));
    }

    #[test]
    fn test_reset_replaces_snapshot() {
        let mut editor = editor_for([row([label("A")])]);
        editor.adapter_mut().unwrap().set_contents(json!([row([]), row([label("N")])]));
        assert_eq!(editor.process_events().unwrap(), 1);
        assert_eq!(editor.snapshot, json!([row([]), row([label("N")])]));

        editor.take_adapter();
        assert_eq!(editor.snapshot, json!([]));
    }
}
