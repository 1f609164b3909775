//! Page context: the data a template is rendered against

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything expression evaluation can reach. `content` and `state` are
/// free-form JSON maps; `form_data` is flat string-to-string; `images` is
/// an ordered list of image URLs addressed by index.
///
/// The context is read-only while a tree is being processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub state: Map<String, Value>,
    #[serde(rename = "formData", default)]
    pub form_data: BTreeMap<String, String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, key: impl Into<String>, value: Value) -> Self {
        self.content.insert(key.into(), value);
        self
    }

    pub fn with_state(mut self, key: impl Into<String>, value: Value) -> Self {
        self.state.insert(key.into(), value);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_data.insert(key.into(), value.into());
        self
    }

    pub fn with_error(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(key.into(), message.into());
        self
    }
}

/// Visual family of a template. Decides the element shape generated for
/// named string arrays (specialties, achievements); unknown names fall back
/// to `Modern` so a stale template id never breaks rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Modern,
    Classic,
    Minimal,
    Bold,
}

impl TemplateKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => TemplateKind::Classic,
            "minimal" => TemplateKind::Minimal,
            "bold" => TemplateKind::Bold,
            _ => TemplateKind::Modern,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Modern => "modern",
            TemplateKind::Classic => "classic",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Bold => "bold",
        }
    }
}
