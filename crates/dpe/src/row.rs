//! Row views.
//!
//! A [`RowNode`] mirrors one `Row` node of the document. Its children are
//! kept in a single document-ordered list, while their views are split
//! between two groupings: labels and property editors go to the column area,
//! nested rows to the child-row area. Each grouping's order is always a
//! subsequence of the document order.

use dpe_dom::node::{self, NodeKind};
use dpe_dom::{OperationKind, Path, PathEntry, PatchOperation};
use dpe_dom_path::{get, resolve_index};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::binding::LeafBinding;
use crate::error::DpeError;
use crate::handler::HandlerRegistry;
use crate::options::{DelegationPolicy, EditorOptions};
use crate::view::{ContainerKind, ViewId, ViewToolkit};

/// Everything a row needs from its surroundings while building or patching.
///
/// `document` is the full document as of the operation being dispatched,
/// not as of the end of its batch.
pub(crate) struct RowContext<'a> {
    pub(crate) toolkit: &'a mut dyn ViewToolkit,
    pub(crate) registry: &'a dyn HandlerRegistry,
    pub(crate) document: &'a Value,
    pub(crate) options: &'a EditorOptions,
}

/// One slot of a row's document-ordered child list.
#[derive(Debug)]
pub enum RowChild {
    Row(Box<RowNode>),
    /// A label, or the view of a bound property handler.
    Leaf(ViewId),
    /// A property editor no handler could serve. Keeps indices aligned.
    Placeholder,
}

impl RowChild {
    pub fn view(&self) -> Option<ViewId> {
        match self {
            RowChild::Row(row) => Some(row.view()),
            RowChild::Leaf(view) => Some(*view),
            RowChild::Placeholder => None,
        }
    }

    pub fn as_row(&self) -> Option<&RowNode> {
        match self {
            RowChild::Row(row) => Some(row),
            _ => None,
        }
    }
}

/// Check that every node under `row` is of a kind a row can hold.
pub(crate) fn validate_row(row: &Value) -> Result<(), DpeError> {
    for child in node::children(row) {
        match NodeKind::of(child) {
            NodeKind::Row => validate_row(child)?,
            NodeKind::Label | NodeKind::PropertyEditor => {}
            NodeKind::Unrecognized(name) => return Err(DpeError::UnknownNodeType { name }),
        }
    }
    Ok(())
}

/// Check a value about to be inserted directly under a row.
fn validate_child(value: &Value) -> Result<(), DpeError> {
    match NodeKind::of(value) {
        NodeKind::Row => validate_row(value),
        NodeKind::Label | NodeKind::PropertyEditor => Ok(()),
        NodeKind::Unrecognized(name) => Err(DpeError::UnknownNodeType { name }),
    }
}

/// Rows are created and destroyed by the editor. A row owns views in the
/// toolkit and has no `Drop`; it must be released with `destroy`.
#[derive(Debug)]
pub struct RowNode {
    view: ViewId,
    columns: ViewId,
    child_rows: ViewId,
    dom_ordered_children: Vec<RowChild>,
    bindings: IndexMap<ViewId, LeafBinding>,
}

impl RowNode {
    /// Create an empty row with its view and both groupings.
    pub(crate) fn new(toolkit: &mut dyn ViewToolkit) -> Self {
        let view = toolkit.create_container(ContainerKind::Row);
        let columns = toolkit.create_container(ContainerKind::Columns);
        let child_rows = toolkit.create_container(ContainerKind::ChildRows);
        toolkit.append_view(view, columns);
        toolkit.append_view(view, child_rows);
        Self {
            view,
            columns,
            child_rows,
            dom_ordered_children: Vec::new(),
            bindings: IndexMap::new(),
        }
    }

    /// Create a row and populate it from a `Row` node.
    pub(crate) fn from_value(value: &Value, cx: &mut RowContext<'_>) -> Result<Self, DpeError> {
        validate_row(value)?;
        Self::build(value, cx)
    }

    /// On failure, everything created so far is destroyed.
    fn build(value: &Value, cx: &mut RowContext<'_>) -> Result<Self, DpeError> {
        let mut row = Self::new(cx.toolkit);
        if let Err(e) = row.populate(value, cx) {
            row.destroy(cx.toolkit);
            return Err(e);
        }
        Ok(row)
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn columns_view(&self) -> ViewId {
        self.columns
    }

    pub fn child_rows_view(&self) -> ViewId {
        self.child_rows
    }

    pub fn children(&self) -> &[RowChild] {
        &self.dom_ordered_children
    }

    pub fn child_count(&self) -> usize {
        self.dom_ordered_children.len()
    }

    pub fn child_row(&self, index: usize) -> Option<&RowNode> {
        self.dom_ordered_children.get(index)?.as_row()
    }

    pub fn binding(&self, view: ViewId) -> Option<&LeafBinding> {
        self.bindings.get(&view)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Destroy every child and binding, leaving an empty row.
    pub(crate) fn clear(&mut self, toolkit: &mut dyn ViewToolkit) {
        for child in std::mem::take(&mut self.dom_ordered_children) {
            self.destroy_child(child, toolkit);
        }
        // every binding belongs to a leaf slot, so this is normally empty
        for (_, binding) in self.bindings.drain(..) {
            binding.destroy(toolkit);
        }
    }

    /// Destroy this row, its view, and everything it owns.
    pub(crate) fn destroy(mut self, toolkit: &mut dyn ViewToolkit) {
        self.clear(toolkit);
        toolkit.destroy_view(self.view);
    }

    fn destroy_child(&mut self, child: RowChild, toolkit: &mut dyn ViewToolkit) {
        match child {
            RowChild::Row(row) => row.destroy(toolkit),
            RowChild::Leaf(view) => match self.bindings.shift_remove(&view) {
                Some(binding) => binding.destroy(toolkit),
                None => toolkit.destroy_view(view),
            },
            RowChild::Placeholder => {}
        }
    }

    /// Rebuild all children from a `Row` node, in document order.
    ///
    /// The node is checked before anything is torn down, so an invalid node
    /// leaves the row untouched.
    pub(crate) fn set_value_from_dom(&mut self, value: &Value, cx: &mut RowContext<'_>) -> Result<(), DpeError> {
        validate_row(value)?;
        self.clear(cx.toolkit);
        self.populate(value, cx)
    }

    fn populate(&mut self, value: &Value, cx: &mut RowContext<'_>) -> Result<(), DpeError> {
        for (index, child) in node::children(value).iter().enumerate() {
            self.add_child_from_value(child, index, cx)?;
        }
        Ok(())
    }

    /// Create the view for `value` and insert it at document position `index`.
    pub(crate) fn add_child_from_value(
        &mut self,
        value: &Value,
        index: usize,
        cx: &mut RowContext<'_>,
    ) -> Result<(), DpeError> {
        let len = self.dom_ordered_children.len();
        if index > len {
            return Err(DpeError::IndexOutOfBounds { path: Path::new().child(index), index, len });
        }
        let (child, grouping) = match NodeKind::of(value) {
            NodeKind::Row => {
                let row = RowNode::build(value, cx)?;
                (RowChild::Row(Box::new(row)), Some(self.child_rows))
            }
            NodeKind::Label => {
                let view = cx.toolkit.create_label(&node::label_text(value));
                (RowChild::Leaf(view), Some(self.columns))
            }
            NodeKind::PropertyEditor => match self.bind_property(value, cx) {
                Some(view) => (RowChild::Leaf(view), Some(self.columns)),
                None => (RowChild::Placeholder, None),
            },
            NodeKind::Unrecognized(name) => return Err(DpeError::UnknownNodeType { name }),
        };

        let view = child.view();
        self.dom_ordered_children.insert(index, child);

        if let (Some(view), Some(grouping)) = (view, grouping) {
            self.place_in_grouping(view, grouping, index, cx.toolkit);
        }
        Ok(())
    }

    /// Resolve and instantiate a handler for a property editor node.
    fn bind_property(&mut self, value: &Value, cx: &mut RowContext<'_>) -> Option<ViewId> {
        let Some(id) = cx.registry.resolve_handler_id(value) else {
            debug!(node = %value, "no property handler, leaving placeholder");
            return None;
        };
        let Some(mut handler) = cx.registry.create_instance(id, cx.toolkit) else {
            warn!(?id, "registry failed to create a handler it resolved");
            return None;
        };
        handler.set_value_from_dom(value, cx.toolkit);
        let view = handler.view();
        self.bindings.insert(view, LeafBinding::new(handler));
        Some(view)
    }

    /// Insert `view` into `grouping` before the first later sibling already
    /// in that grouping, or at the end if there is none.
    fn place_in_grouping(&self, view: ViewId, grouping: ViewId, index: usize, toolkit: &mut dyn ViewToolkit) {
        let position = self.dom_ordered_children[index + 1..]
            .iter()
            .filter_map(RowChild::view)
            .find_map(|sibling| toolkit.index_of(grouping, sibling));
        match position {
            Some(at) => toolkit.insert_view(grouping, at, view),
            None => toolkit.append_view(grouping, view),
        }
    }

    /// Apply `op`, whose path entries before `path_index` have already been
    /// consumed by ancestors. `resolved` holds those entries as concrete
    /// indices.
    pub(crate) fn handle_operation_at_path(
        &mut self,
        op: &PatchOperation,
        path_index: usize,
        resolved: &Path,
        cx: &mut RowContext<'_>,
    ) -> Result<(), DpeError> {
        let full_path = op.destination_path();
        let entry = match full_path.get(path_index) {
            Some(entry) if entry.is_positional() => entry,
            _ => return Err(DpeError::InvalidPathEntry { path: full_path.clone(), depth: path_index }),
        };

        if path_index + 1 == full_path.len() {
            self.apply_terminal(op, entry, cx)
        } else {
            self.delegate(op, entry, path_index, resolved, cx)
        }
    }

    /// This row directly owns the target of `op`.
    fn apply_terminal(&mut self, op: &PatchOperation, entry: &PathEntry, cx: &mut RowContext<'_>) -> Result<(), DpeError> {
        let kind = op.kind();
        let len = self.dom_ordered_children.len();
        let out_of_bounds = |index| DpeError::IndexOutOfBounds {
            path: op.destination_path().clone(),
            index,
            len,
        };

        let child_index = resolve_index(entry, len, kind.inserts()).ok_or_else(|| out_of_bounds(len))?;
        let in_bounds = if kind.inserts() { child_index <= len } else { child_index < len };
        if !in_bounds {
            return Err(out_of_bounds(child_index));
        }

        let value = match op.value() {
            Some(value) => {
                validate_child(value)?;
                Some(value)
            }
            None if kind == OperationKind::Remove => None,
            None => return Err(DpeError::MissingValue { path: op.destination_path().clone() }),
        };

        debug!(op = kind.as_str(), index = child_index, len, "patching row child");

        if matches!(kind, OperationKind::Remove | OperationKind::Replace) {
            let child = self.dom_ordered_children.remove(child_index);
            self.destroy_child(child, cx.toolkit);
        }
        if let Some(value) = value {
            self.add_child_from_value(value, child_index, cx)?;
        }
        Ok(())
    }

    /// Some descendant owns the target of `op`; forward it.
    fn delegate(
        &mut self,
        op: &PatchOperation,
        entry: &PathEntry,
        path_index: usize,
        resolved: &Path,
        cx: &mut RowContext<'_>,
    ) -> Result<(), DpeError> {
        let len = self.dom_ordered_children.len();
        let child_index = match resolve_index(entry, len, false) {
            Some(i) if i < len => i,
            other => {
                let index = other.unwrap_or(len);
                return match cx.options.delegation_policy {
                    DelegationPolicy::Ignore => {
                        warn!(path = %op.destination_path(), index, len, "patch addresses a missing row child, ignoring");
                        Ok(())
                    }
                    DelegationPolicy::Error => Err(DpeError::IndexOutOfBounds {
                        path: op.destination_path().clone(),
                        index,
                        len,
                    }),
                };
            }
        };
        let child_path = resolved.child(child_index);

        match &mut self.dom_ordered_children[child_index] {
            RowChild::Row(row) => row.handle_operation_at_path(op, path_index + 1, &child_path, cx),
            RowChild::Leaf(view) => {
                let view = *view;
                let node = leaf_node(cx.document, &child_path)?;
                match self.bindings.get_mut(&view) {
                    Some(binding) => binding.set_value_from_dom(node, cx.toolkit),
                    None => cx.toolkit.set_text(view, &node::label_text(node)),
                }
                Ok(())
            }
            RowChild::Placeholder => {
                debug!(path = %child_path, "patch targets an unbound property, nothing to refresh");
                Ok(())
            }
        }
    }
}

/// Root-relative lookup of the node a leaf was built from. `leaf_path` is
/// the patch path cut down to the leaf's own position.
fn leaf_node<'d>(document: &'d Value, leaf_path: &Path) -> Result<&'d Value, DpeError> {
    get(document, leaf_path).ok_or_else(|| DpeError::NodeNotFound { path: leaf_path.clone() })
}
