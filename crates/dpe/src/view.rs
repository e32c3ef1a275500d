//! View toolkit contract.
//!
//! The editor never talks to a widget library directly. It creates views,
//! places them into ordered containers, and destroys them through this
//! trait, and only reads back the position of a view within a container.

use std::fmt;

/// Opaque handle to a view owned by a toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u32);

impl ViewId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Top-level stack of rows.
    Editor,
    /// One row: a column area above a child-row area.
    Row,
    /// Inline area holding labels and property editors.
    Columns,
    /// Stacked area holding nested rows.
    ChildRows,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Editor => "editor",
            ContainerKind::Row => "row",
            ContainerKind::Columns => "columns",
            ContainerKind::ChildRows => "child-rows",
        }
    }
}

pub trait ViewToolkit {
    fn create_container(&mut self, kind: ContainerKind) -> ViewId;

    /// A read-only text view.
    fn create_label(&mut self, text: &str) -> ViewId;

    /// An editable value view, as produced by property handlers.
    fn create_field(&mut self, text: &str) -> ViewId;

    /// Update the text of a label or field.
    fn set_text(&mut self, view: ViewId, text: &str);

    /// Insert `view` into `container` at `index`, detaching it from any
    /// previous container. Indices past the end append.
    fn insert_view(&mut self, container: ViewId, index: usize, view: ViewId);

    fn append_view(&mut self, container: ViewId, view: ViewId) {
        let end = self.count(container);
        self.insert_view(container, end, view);
    }

    /// Detach `view` from `container` without destroying it.
    fn remove_view(&mut self, container: ViewId, view: ViewId) -> bool;

    fn index_of(&self, container: ViewId, view: ViewId) -> Option<usize>;

    fn count(&self, container: ViewId) -> usize;

    /// Destroy `view` and everything inside it. Detaches it from its
    /// container first.
    fn destroy_view(&mut self, view: ViewId);
}
