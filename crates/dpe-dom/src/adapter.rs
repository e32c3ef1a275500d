//! Document sources.
//!
//! An adapter owns the document a property editor displays. It reports
//! changes as an ordered stream of [`AdapterEvent`]s: a payload-free reset
//! when the whole document changed, or a patch describing a structural edit.
//! Consumers drain the stream and apply events strictly in order.

use dpe_dom_path::{get, Path};
use serde_json::Value;
use tracing::debug;

use crate::node;
use crate::patch::{apply_patch, Patch, PatchError};

#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    Reset,
    Changed(Patch),
}

pub trait DocumentAdapter {
    /// The full document: an array of top-level rows.
    fn contents(&self) -> &Value;

    /// Root-relative lookup.
    fn node_at(&self, path: &Path) -> Option<&Value> {
        get(self.contents(), path)
    }

    /// Take all pending notifications, oldest first.
    fn drain_events(&mut self) -> Vec<AdapterEvent>;
}

/// In-memory adapter over a plain document value.
#[derive(Debug, Clone)]
pub struct ValueAdapter {
    contents: Value,
    pending: Vec<AdapterEvent>,
}

impl ValueAdapter {
    /// A non-array document is stored as-is; consumers reject it on reset.
    pub fn new(contents: Value) -> Self {
        Self { contents, pending: Vec::new() }
    }

    pub fn from_rows(rows: impl IntoIterator<Item = Value>) -> Self {
        Self::new(Value::Array(rows.into_iter().collect()))
    }

    /// Swap the whole document and notify with a reset.
    pub fn set_contents(&mut self, contents: Value) {
        self.contents = contents;
        self.pending.push(AdapterEvent::Reset);
    }

    /// Apply `patch` to the document, then notify with it.
    ///
    /// A failing patch leaves the operations before the failure applied and
    /// falls back to a reset notification so listeners resynchronize.
    pub fn apply_patch(&mut self, patch: Patch) -> Result<(), PatchError> {
        match apply_patch(&mut self.contents, &patch) {
            Ok(()) => {
                debug!(ops = patch.len(), rows = node::array_size(&self.contents), "patch applied");
                self.pending.push(AdapterEvent::Changed(patch));
                Ok(())
            }
            Err(e) => {
                self.pending.push(AdapterEvent::Reset);
                Err(e)
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl DocumentAdapter for ValueAdapter {
    fn contents(&self) -> &Value {
        &self.contents
    }

    fn drain_events(&mut self) -> Vec<AdapterEvent> {
        std::mem::take(&mut self.pending)
    }
}
