//! `{{ ... }}` text interpolation
//!
//! One pass substitutes every non-overlapping `{{ expr }}` span with the
//! displayed evaluator result. If a substituted value itself contains
//! `{{`, the whole output is run again, up to a fixed number of passes;
//! context data that references itself therefore terminates instead of
//! looping.

use tracing::warn;

use pagecraft_template::Context;

use crate::expression::evaluate;

/// Ceiling on re-interpolation passes over one text.
pub const MAX_TEMPLATE_DEPTH: u32 = 5;

/// Interpolates every `{{ expr }}` span in `input` against the context.
/// Text without markers comes back unchanged; an unterminated `{{` is
/// copied through verbatim.
pub fn interpolate(input: &str, ctx: &Context) -> String {
    interpolate_at(input, ctx, 0)
}

fn interpolate_at(input: &str, ctx: &Context, depth: u32) -> String {
    if !input.contains("{{") {
        return input.to_string();
    }
    if depth >= MAX_TEMPLATE_DEPTH {
        warn!(depth, "template interpolation limit reached");
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                // each expression starts with a fresh evaluation budget
                let value = evaluate(&after[..end], ctx, 0);
                out.push_str(&value.to_display());
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    if out.contains("{{") {
        return interpolate_at(&out, ctx, depth + 1);
    }
    out
}
