//! In-memory view toolkit.
//!
//! Views live in a `Vec`-backed arena and refer to each other by index, the
//! parent link being an `Option<u32>` like the child links. Freed slots are
//! recycled through a free list, so a [`ViewId`] is only meaningful while
//! the view it names is alive.

use std::fmt::Write as _;

use crate::view::{ContainerKind, ViewId, ViewToolkit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Container(ContainerKind),
    Label(String),
    Field(String),
}

#[derive(Debug, Clone)]
struct ViewSlot {
    kind: ViewKind,
    parent: Option<u32>,
    children: Vec<ViewId>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    slots: Vec<Option<ViewSlot>>,
    free: Vec<u32>,
    live: usize,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, kind: ViewKind) -> ViewId {
        let slot = ViewSlot { kind, parent: None, children: Vec::new() };
        self.live += 1;
        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(slot);
                ViewId(i)
            }
            None => {
                self.slots.push(Some(slot));
                ViewId((self.slots.len() - 1) as u32)
            }
        }
    }

    fn slot(&self, view: ViewId) -> Option<&ViewSlot> {
        self.slots.get(view.0 as usize)?.as_ref()
    }

    fn slot_mut(&mut self, view: ViewId) -> Option<&mut ViewSlot> {
        self.slots.get_mut(view.0 as usize)?.as_mut()
    }

    fn detach(&mut self, view: ViewId) {
        let Some(parent) = self.slot_mut(view).and_then(|s| s.parent.take()) else {
            return;
        };
        if let Some(p) = self.slot_mut(ViewId(parent)) {
            p.children.retain(|&c| c != view);
        }
    }

    pub fn is_alive(&self, view: ViewId) -> bool {
        self.slot(view).is_some()
    }

    /// Number of views currently alive.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn kind(&self, view: ViewId) -> Option<&ViewKind> {
        self.slot(view).map(|s| &s.kind)
    }

    pub fn text(&self, view: ViewId) -> Option<&str> {
        match self.kind(view)? {
            ViewKind::Label(t) | ViewKind::Field(t) => Some(t),
            ViewKind::Container(_) => None,
        }
    }

    pub fn children(&self, container: ViewId) -> &[ViewId] {
        self.slot(container).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.slot(view)?.parent.map(ViewId)
    }

    /// Indented outline of `root` and everything below it.
    pub fn render_text(&self, root: ViewId) -> String {
        let mut out = String::new();
        self.render_into(root, 0, &mut out);
        out
    }

    fn render_into(&self, view: ViewId, depth: usize, out: &mut String) {
        let Some(slot) = self.slot(view) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = match &slot.kind {
            ViewKind::Container(kind) => writeln!(out, "{indent}{}", kind.as_str()),
            ViewKind::Label(text) => writeln!(out, "{indent}label {text:?}"),
            ViewKind::Field(text) => writeln!(out, "{indent}field {text:?}"),
        };
        for &child in &slot.children {
            self.render_into(child, depth + 1, out);
        }
    }
}

impl ViewToolkit for ViewTree {
    fn create_container(&mut self, kind: ContainerKind) -> ViewId {
        self.alloc(ViewKind::Container(kind))
    }

    fn create_label(&mut self, text: &str) -> ViewId {
        self.alloc(ViewKind::Label(text.to_string()))
    }

    fn create_field(&mut self, text: &str) -> ViewId {
        self.alloc(ViewKind::Field(text.to_string()))
    }

    fn set_text(&mut self, view: ViewId, text: &str) {
        if let Some(slot) = self.slot_mut(view) {
            match &mut slot.kind {
                ViewKind::Label(t) | ViewKind::Field(t) => *t = text.to_string(),
                ViewKind::Container(_) => {}
            }
        }
    }

    fn insert_view(&mut self, container: ViewId, index: usize, view: ViewId) {
        if container == view || !self.is_alive(view) || !self.is_alive(container) {
            return;
        }
        self.detach(view);
        if let Some(c) = self.slot_mut(container) {
            let index = index.min(c.children.len());
            c.children.insert(index, view);
        }
        if let Some(v) = self.slot_mut(view) {
            v.parent = Some(container.0);
        }
    }

    fn remove_view(&mut self, container: ViewId, view: ViewId) -> bool {
        if self.parent(view) != Some(container) {
            return false;
        }
        self.detach(view);
        true
    }

    fn index_of(&self, container: ViewId, view: ViewId) -> Option<usize> {
        self.children(container).iter().position(|&c| c == view)
    }

    fn count(&self, container: ViewId) -> usize {
        self.children(container).len()
    }

    fn destroy_view(&mut self, view: ViewId) {
        if !self.is_alive(view) {
            return;
        }
        self.detach(view);
        let mut stack = vec![view];
        while let Some(v) = stack.pop() {
            if let Some(slot) = self.slots[v.0 as usize].take() {
                stack.extend(slot.children);
                self.free.push(v.0);
                self.live -= 1;
            }
        }
    }
}
