//! Core logic behind the `dpe-render` binary.

use dpe_dom::patch::from_json_patch;
use dpe_dom::{PatchError, ValueAdapter};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::editor::DocumentPropertyEditor;
use crate::error::DpeError;
use crate::handler::HandlerTable;
use crate::options::EditorOptions;
use crate::view_tree::ViewTree;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("patch {index}: {source}")]
    Patch { index: usize, source: PatchError },
    #[error(transparent)]
    Editor(#[from] DpeError),
}

/// Render `document`, apply each of `patches` in order through the adapter,
/// and return the outline of the resulting view tree.
pub fn render(document: &str, patches: &[String], options: EditorOptions) -> Result<String, CliError> {
    let contents: Value = serde_json::from_str(document)?;
    let mut editor: DocumentPropertyEditor<ValueAdapter, ViewTree> = DocumentPropertyEditor::with_options(
        ViewTree::new(),
        Box::new(HandlerTable::with_builtin_handlers()),
        options,
    );
    editor.set_adapter(ValueAdapter::new(contents))?;

    for (index, text) in patches.iter().enumerate() {
        let value: Value = serde_json::from_str(text)?;
        let patch = from_json_patch(&value).map_err(|source| CliError::Patch { index, source })?;
        debug!(index, ops = patch.len(), "applying patch");
        let Some(adapter) = editor.adapter_mut() else {
            return Err(DpeError::NoAdapter.into());
        };
        let applied = adapter.apply_patch(patch);
        editor.process_events()?;
        applied.map_err(|source| CliError::Patch { index, source })?;
    }

    Ok(editor.toolkit().render_text(editor.root_view()))
}
