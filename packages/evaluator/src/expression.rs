//! Expression evaluation
//!
//! Expressions are the `content.title`-style bodies found inside `{{ }}`
//! spans and visibility gates. There is no grammar here on purpose: the
//! language is a fixed rule ladder tried in order against the trimmed
//! text, and the first rule that recognizes a shape wins. The ladder
//! order is part of the page format contract; templates in storage rely
//! on it, so reordering rules is a breaking change even when it looks
//! like a cleanup.
//!
//! Every rule is total. A recognized shape that fails to resolve degrades
//! to its documented fallback (`Undefined`, empty string, `false`) and at
//! most a log line, never an error: a bad expression costs one blank span
//! in the page, not the render.

use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use pagecraft_template::Context;

use crate::value::Value;

/// Recursion ceiling for a single expression. Ternary branches, `(...)`
/// rewrites and logical operators re-enter the evaluator; past this depth
/// the result is an empty string.
pub const MAX_EVAL_DEPTH: u32 = 10;

/// Evaluates one expression body against the page context. `depth` is the
/// re-entry count and starts at 0; callers other than the evaluator itself
/// always pass 0.
pub fn evaluate(expr: &str, ctx: &Context, depth: u32) -> Value {
    if depth > MAX_EVAL_DEPTH {
        warn!(expr, depth, "expression recursion limit reached");
        return Value::empty();
    }
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Value::empty();
    }

    // 1. quoted literal
    if let Some(inner) = quoted_literal(trimmed) {
        return Value::Str(inner.to_string());
    }

    // 2. integer literal
    if let Ok(number) = trimmed.parse::<i64>() {
        return Value::Number(number as f64);
    }

    // 3. reserved words
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        "undefined" => return Value::Undefined,
        _ => {}
    }

    // 4. ternary, split on the first top-level `?` and the first
    // top-level `:` after it
    if let Some(question) = top_level_find(trimmed, '?') {
        let after = &trimmed[question + 1..];
        if let Some(colon) = top_level_find(after, ':') {
            let condition = evaluate(&trimmed[..question], ctx, depth + 1);
            let branch = if condition.is_truthy() {
                &after[..colon]
            } else {
                &after[colon + 1..]
            };
            return evaluate(branch, ctx, depth + 1);
        }
    }

    // 5. first-letter capitalization suffix; only strings have a first letter
    if let Some(base) = trimmed.strip_suffix(".charAt(0).toUpperCase()") {
        return match evaluate(base, ctx, depth + 1) {
            Value::Str(text) => match text.chars().next() {
                Some(first) => Value::Str(first.to_uppercase().collect()),
                None => Value::empty(),
            },
            _ => Value::empty(),
        };
    }

    // 6. `||` keeps the first truthy operand's value, not a boolean
    if !trimmed.contains("&&") {
        if let Some(split) = trimmed.find("||") {
            let left = evaluate(&trimmed[..split], ctx, depth + 1);
            if left.is_truthy() {
                return left;
            }
            return evaluate(&trimmed[split + 2..], ctx, depth + 1);
        }
    }

    // 7. innermost parens: evaluate the group, splice the result back in
    // quoted, re-evaluate the rewritten expression
    if let Some(open) = trimmed.rfind('(') {
        if let Some(offset) = trimmed[open + 1..].find(')') {
            let close = open + 1 + offset;
            let inner = evaluate(&trimmed[open + 1..close], ctx, depth + 1);
            let rewritten = format!(
                "{}'{}'{}",
                &trimmed[..open],
                inner.to_display(),
                &trimmed[close + 1..]
            );
            return evaluate(&rewritten, ctx, depth + 1);
        }
    }

    // 8. `&&` chain normalizes to a boolean
    if trimmed.contains("&&") {
        let satisfied = trimmed
            .split("&&")
            .all(|part| evaluate(part, ctx, depth + 1).is_truthy());
        return Value::Bool(satisfied);
    }

    // 9. `.length`, with optional `> 0` guard
    if let Some(result) = length_access(trimmed, ctx, depth) {
        return result;
    }

    // 10. `path[n]` with optional projection
    if let Some(result) = indexed_access(trimmed, ctx) {
        return result;
    }

    // 11. dotted context path
    if let Some(result) = context_path(trimmed, ctx) {
        return result;
    }

    // 12. nothing recognized the shape; the text is its own value
    Value::Str(trimmed.to_string())
}

/// A full-string quoted literal: same quote at both ends, no occurrence of
/// that quote inside.
fn quoted_literal(text: &str) -> Option<&str> {
    for quote in ['\'', '"'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            if !inner.contains(quote) {
                return Some(inner);
            }
        }
    }
    None
}

/// Finds `target` at paren depth zero and outside quotes, so `?` / `:`
/// inside string literals or call arguments do not split a ternary.
fn top_level_find(text: &str, target: char) -> Option<usize> {
    let mut in_quote: Option<char> = None;
    let mut parens = 0usize;
    for (index, ch) in text.char_indices() {
        match in_quote {
            Some(quote) => {
                if ch == quote {
                    in_quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => in_quote = Some(ch),
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                _ if ch == target && parens == 0 => return Some(index),
                _ => {}
            },
        }
    }
    None
}

fn length_access(trimmed: &str, ctx: &Context, depth: u32) -> Option<Value> {
    let (base, guard) = if let Some(base) = trimmed.strip_suffix(".length > 0") {
        (base, true)
    } else if let Some(base) = trimmed.strip_suffix(".length>0") {
        (base, true)
    } else if let Some(base) = trimmed.strip_suffix(".length") {
        (base, false)
    } else {
        return None;
    };
    // arrays and strings count; everything else has length 0
    let length = evaluate(base, ctx, depth + 1).sequence_len().unwrap_or(0);
    Some(if guard {
        Value::Bool(length > 0)
    } else {
        Value::Number(length as f64)
    })
}

/// `path[n]` or `path[n].field`. Once the shape matches, any resolution
/// failure (missing path, out-of-range index, non-array base) is an empty
/// string rather than a fall-through to later rules.
fn indexed_access(trimmed: &str, ctx: &Context) -> Option<Value> {
    let open = trimmed.find('[')?;
    let close = trimmed[open..].find(']').map(|offset| open + offset)?;
    let base = &trimmed[..open];
    if base.is_empty()
        || !base
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_')
    {
        return None;
    }
    let index: usize = trimmed[open + 1..close].trim().parse().ok()?;
    let projection = match &trimmed[close + 1..] {
        "" => None,
        rest => Some(rest.strip_prefix('.')?),
    };

    let item = match resolve_path(base, ctx) {
        Some(JsonValue::Array(items)) => items.into_iter().nth(index),
        _ => None,
    };
    let resolved = match (item, projection) {
        (Some(value), None) => Some(value),
        (Some(value), Some(path)) => walk_value(&value, path.split('.')),
        (None, _) => None,
    };
    Some(match resolved {
        Some(json) => Value::from_json(&json),
        None => Value::empty(),
    })
}

/// Dotted path rooted at one of the context sections. A recognized root
/// with a missing key is `Undefined` (so `||` fallbacks fire); an
/// unrecognized root falls through to the text rule.
fn context_path(trimmed: &str, ctx: &Context) -> Option<Value> {
    let root = trimmed.split('.').next()?;
    if !matches!(root, "content" | "state" | "formData" | "images") {
        return None;
    }
    Some(match resolve_path(trimmed, ctx) {
        Some(json) => Value::from_json(&json),
        None => Value::Undefined,
    })
}

/// Resolves a dotted path to the JSON value it names. `formData` is flat
/// string-to-string; `images` materializes as an array so indexing and
/// `.length` work on it like any other sequence.
pub(crate) fn resolve_path(path: &str, ctx: &Context) -> Option<JsonValue> {
    let mut segments = path.split('.');
    let root = segments.next()?;
    match root {
        "content" => walk_map(&ctx.content, segments),
        "state" => walk_map(&ctx.state, segments),
        "formData" => {
            let key = segments.next();
            let extra = segments.next();
            match (key, extra) {
                (Some(key), None) => ctx
                    .form_data
                    .get(key)
                    .map(|text| JsonValue::String(text.clone())),
                _ => None,
            }
        }
        "images" => {
            let images =
                JsonValue::Array(ctx.images.iter().cloned().map(JsonValue::String).collect());
            walk_value(&images, segments)
        }
        _ => None,
    }
}

fn walk_map(
    map: &Map<String, JsonValue>,
    mut segments: std::str::Split<'_, char>,
) -> Option<JsonValue> {
    match segments.next() {
        None => Some(JsonValue::Object(map.clone())),
        Some(first) => walk_value(map.get(first)?, segments),
    }
}

fn walk_value(start: &JsonValue, segments: std::str::Split<'_, char>) -> Option<JsonValue> {
    let mut current = start;
    for segment in segments {
        current = match current {
            JsonValue::Object(map) => map.get(segment)?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}
