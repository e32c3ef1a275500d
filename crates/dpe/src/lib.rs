//! Document property editor.
//!
//! Renders a document of nested `Row`, `Label` and `PropertyEditor` nodes
//! into a tree of views and keeps that tree in sync with the structural
//! patches reported by a [`DocumentAdapter`](dpe_dom::DocumentAdapter),
//! without rebuilding unaffected parts.
//!
//! ```
//! use dpe::DocumentPropertyEditor;
//! use dpe_dom::node::{label, property_editor, row};
//! use dpe_dom::ValueAdapter;
//! use serde_json::json;
//!
//! let mut editor = DocumentPropertyEditor::in_memory();
//! let adapter = ValueAdapter::from_rows([row([label("Speed"), property_editor("float", json!(1.5))])]);
//! editor.set_adapter(adapter).unwrap();
//!
//! let outline = editor.toolkit().render_text(editor.root_view());
//! assert!(outline.contains("label \"Speed\""));
//! assert!(outline.contains("field \"1.5\""));
//! ```

pub mod binding;
pub mod cli;
pub mod editor;
pub mod error;
pub mod handler;
pub mod options;
pub mod row;
pub mod view;
pub mod view_tree;

pub use binding::LeafBinding;
pub use editor::DocumentPropertyEditor;
pub use error::DpeError;
pub use handler::{HandlerId, HandlerRegistry, HandlerTable, PropertyHandler, TextHandler};
pub use options::{DelegationPolicy, EditorOptions};
pub use row::{RowChild, RowNode};
pub use view::{ContainerKind, ViewId, ViewToolkit};
pub use view_tree::{ViewKind, ViewTree};
