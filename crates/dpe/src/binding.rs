use serde_json::Value;

use crate::handler::PropertyHandler;
use crate::view::{ViewId, ViewToolkit};

/// Ties one leaf view to the handler instance that created it.
///
/// The owning row keys its bindings by [`LeafBinding::view`]. Dropping the
/// binding without calling [`LeafBinding::destroy`] leaks the view.
pub struct LeafBinding {
    handler: Box<dyn PropertyHandler>,
}

impl LeafBinding {
    pub fn new(handler: Box<dyn PropertyHandler>) -> Self {
        Self { handler }
    }

    pub fn view(&self) -> ViewId {
        self.handler.view()
    }

    pub fn set_value_from_dom(&mut self, node: &Value, toolkit: &mut dyn ViewToolkit) {
        self.handler.set_value_from_dom(node, toolkit);
    }

    /// Release the handler, which destroys its view.
    pub fn destroy(self, toolkit: &mut dyn ViewToolkit) {
        self.handler.destroy(toolkit);
    }
}

impl std::fmt::Debug for LeafBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafBinding").field("view", &self.view()).finish()
    }
}
