pub mod context;
pub mod node;
pub mod render_contract;
pub mod sentinel;
pub mod template;


pub use context::{Context, TemplateKind};
pub use node::{Children, Editable, Node, PropValue};
pub use render_contract::{is_handler_prop, is_void_kind, HandlerKind};
pub use template::{Template, TemplateMetadata};
