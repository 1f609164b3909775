/// Development mode validators for detecting unstable templates
use std::collections::HashSet;

use pagecraft_template::render_contract::{is_handler_prop, HandlerKind};
use pagecraft_template::sentinel::is_placeholder;
use pagecraft_template::{Node, PropValue, Template};

/// Validation warning level
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Warning that should be addressed
    Warning,
    /// Error that will cause issues
    Error,
}

/// Validation warning
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    pub node_id: Option<String>,
}

impl ValidationWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }
}

/// Validator for template documents
pub struct Validator {
    /// Whether dev mode is enabled
    dev_mode: bool,
    /// Collected warnings
    warnings: Vec<ValidationWarning>,
}

impl Validator {
    /// Create a new validator
    pub fn new(dev_mode: bool) -> Self {
        Self {
            dev_mode,
            warnings: Vec::new(),
        }
    }

    /// Validate a template document
    pub fn validate(&mut self, template: &Template) -> Vec<ValidationWarning> {
        self.warnings.clear();

        if !self.dev_mode {
            return vec![];
        }

        match &template.component {
            Some(root) => {
                let mut seen_ids = HashSet::new();
                self.validate_node(root, &mut seen_ids);
            }
            None => {
                self.warnings
                    .push(ValidationWarning::error("template has no component root"));
            }
        }

        self.warnings.clone()
    }

    fn validate_node(&mut self, node: &Node, seen_ids: &mut HashSet<String>) {
        self.check_id(node, seen_ids);
        self.check_props(node);
        self.check_editable(node);

        for child in node.child_nodes() {
            self.validate_node(child, seen_ids);
        }
    }

    /// Ids address every mutation, so a blank or repeated id makes edits
    /// land on the wrong node.
    fn check_id(&mut self, node: &Node, seen_ids: &mut HashSet<String>) {
        if node.id.trim().is_empty() {
            self.warnings
                .push(ValidationWarning::error("node has an empty id"));
            return;
        }
        if !seen_ids.insert(node.id.clone()) {
            self.warnings.push(
                ValidationWarning::error(format!("duplicate node id \"{}\"", node.id))
                    .with_node_id(&node.id),
            );
        }
    }

    fn check_props(&mut self, node: &Node) {
        for (name, value) in &node.props {
            let text = match value {
                PropValue::Text(text) => text,
                PropValue::Bool(_) => continue,
            };
            if is_placeholder(text) {
                self.warnings.push(
                    ValidationWarning::warning(format!(
                        "prop \"{}\" holds a sentinel marker; markers only expand in a children slot",
                        name
                    ))
                    .with_node_id(&node.id),
                );
            }
            if is_handler_prop(name) && HandlerKind::from_name(text).is_none() {
                self.warnings.push(
                    ValidationWarning::warning(format!(
                        "handler prop \"{}\" names unknown action \"{}\"",
                        name, text
                    ))
                    .with_node_id(&node.id),
                );
            }
        }
    }

    /// contentEditable only does something useful on a node whose children
    /// slot is a text run.
    fn check_editable(&mut self, node: &Node) {
        let editable = node
            .editable
            .as_ref()
            .is_some_and(|editable| editable.content_editable);
        if editable && node.text_content().is_none() {
            self.warnings.push(
                ValidationWarning::warning("contentEditable node has no text content")
                    .with_node_id(&node.id),
            );
        }
    }
}
