//! Runtime values produced by expression evaluation

use serde_json::Value as JsonValue;

/// Result of evaluating one expression against a page context.
///
/// Scalars pulled out of the context are normalized into the native
/// variants; only arrays and objects stay behind as `Json`. Truthiness
/// follows the conventions page authors expect from scripting: empty
/// strings and zero are falsy, while empty arrays and objects are truthy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Json(JsonValue),
}

impl Value {
    /// Converts a context JSON value, normalizing scalars into native
    /// variants. Arrays and objects are kept as JSON for later indexing.
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(flag) => Value::Bool(*flag),
            JsonValue::Number(number) => Value::Number(number.as_f64().unwrap_or(0.0)),
            JsonValue::String(text) => Value::Str(text.clone()),
            other => Value::Json(other.clone()),
        }
    }

    pub fn empty() -> Value {
        Value::Str(String::new())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => *number != 0.0 && !number.is_nan(),
            Value::Str(text) => !text.is_empty(),
            Value::Json(_) => true,
        }
    }

    /// Text form used when splicing a value into template output.
    /// `Undefined` and `Null` disappear; integral numbers print without a
    /// trailing `.0` so counts read naturally.
    pub fn to_display(&self) -> String {
        match self {
            Value::Undefined | Value::Null => String::new(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => format_number(*number),
            Value::Str(text) => text.clone(),
            Value::Json(json) => serde_json::to_string(json).unwrap_or_default(),
        }
    }

    /// Sequence length when the value is countable: array items or string
    /// characters. Everything else has no length.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Value::Json(JsonValue::Array(items)) => Some(items.len()),
            Value::Str(text) => Some(text.chars().count()),
            _ => None,
        }
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.is_finite() && number.abs() < 1e15 {
        (number as i64).to_string()
    } else {
        number.to_string()
    }
}
