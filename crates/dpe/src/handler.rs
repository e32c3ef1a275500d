//! Property handler contract and a table-backed registry.
//!
//! A handler renders one property editor node into a view it owns and keeps
//! that view in sync when handed a fresh copy of the node. Registries decide
//! which handler, if any, serves a given node.

use std::fmt;

use dpe_dom::node::{self, attrs};
use indexmap::IndexMap;
use serde_json::Value;

use crate::view::{ViewId, ViewToolkit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

pub trait PropertyHandler {
    /// Refresh the handler's view from `node`.
    fn set_value_from_dom(&mut self, node: &Value, toolkit: &mut dyn ViewToolkit);

    /// The view this handler created and owns.
    fn view(&self) -> ViewId;

    fn destroy(self: Box<Self>, toolkit: &mut dyn ViewToolkit) {
        toolkit.destroy_view(self.view());
    }
}

pub trait HandlerRegistry {
    fn resolve_handler_id(&self, node: &Value) -> Option<HandlerId>;

    /// `None` if `id` was not issued by this registry.
    fn create_instance(
        &self,
        id: HandlerId,
        toolkit: &mut dyn ViewToolkit,
    ) -> Option<Box<dyn PropertyHandler>>;
}

type HandlerFactory = Box<dyn Fn(&mut dyn ViewToolkit) -> Box<dyn PropertyHandler>>;

/// Registry keyed by handler name.
///
/// A node resolves by its `Handler` attribute when present, otherwise by its
/// `Type` attribute.
#[derive(Default)]
pub struct HandlerTable {
    factories: IndexMap<String, HandlerFactory>,
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text-display handlers for `string`, `bool`, `int` and `float`.
    pub fn with_builtin_handlers() -> Self {
        let mut table = Self::new();
        table.register("string", |tk| Box::new(TextHandler::new(tk, format_plain)));
        table.register("bool", |tk| Box::new(TextHandler::new(tk, format_checkbox)));
        table.register("int", |tk| Box::new(TextHandler::new(tk, format_plain)));
        table.register("float", |tk| Box::new(TextHandler::new(tk, format_plain)));
        table
    }

    /// Register `factory` under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: &str, factory: F) -> HandlerId
    where
        F: Fn(&mut dyn ViewToolkit) -> Box<dyn PropertyHandler> + 'static,
    {
        let (index, _) = self.factories.insert_full(name.to_string(), Box::new(factory));
        HandlerId(index)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn name_of(&self, id: HandlerId) -> Option<&str> {
        self.factories.get_index(id.0).map(|(name, _)| name.as_str())
    }
}

impl HandlerRegistry for HandlerTable {
    fn resolve_handler_id(&self, node: &Value) -> Option<HandlerId> {
        let name = node::attribute(node, attrs::HANDLER)
            .or_else(|| node::attribute(node, attrs::TYPE))?
            .as_str()?;
        self.factories.get_index_of(name).map(HandlerId)
    }

    fn create_instance(
        &self,
        id: HandlerId,
        toolkit: &mut dyn ViewToolkit,
    ) -> Option<Box<dyn PropertyHandler>> {
        let (_, factory) = self.factories.get_index(id.0)?;
        Some(factory(toolkit))
    }
}

/// Shows a property's `Value` attribute as text in a field view.
pub struct TextHandler {
    view: ViewId,
    format: fn(&Value) -> String,
}

impl TextHandler {
    pub fn new(toolkit: &mut dyn ViewToolkit, format: fn(&Value) -> String) -> Self {
        Self { view: toolkit.create_field(""), format }
    }
}

impl PropertyHandler for TextHandler {
    fn set_value_from_dom(&mut self, node: &Value, toolkit: &mut dyn ViewToolkit) {
        let value = node::attribute(node, attrs::VALUE).unwrap_or(&Value::Null);
        toolkit.set_text(self.view, &(self.format)(value));
    }

    fn view(&self) -> ViewId {
        self.view
    }
}

pub fn format_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn format_checkbox(value: &Value) -> String {
    let mark = if value.as_bool().unwrap_or(false) { "[x]" } else { "[ ]" };
    mark.to_string()
}
