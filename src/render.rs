use serde_json::{Number, Value};

use crate::error::{ParseError, ResolutionError, Result};
use crate::resolve::Context;

/// How rendered numbers are turned into text. Callers pick the canonical
/// form; [`default_number_format`] is plain `serde_json` display.
pub type NumberFormat = fn(&Number) -> String;

pub fn default_number_format(number: &Number) -> String {
    number.to_string()
}

/// Substitute every `{{ ... }}` placeholder in a winning block's body.
///
/// This step only resolves and inserts; comparators mean nothing here. A
/// placeholder that fails to resolve aborts the render with the same
/// `ResolutionError` the evaluator uses.
pub fn render_body(body: &str, context: &Context, number_format: NumberFormat) -> Result<String> {
    let mut out = String::with_capacity(body.len() + 16);
    let mut rest = body;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        let (before, after_start) = rest.split_at(start);
        out.push_str(before);

        let Some(end) = after_start.find("}}") else {
            return Err(ParseError::UnterminatedPlaceholder {
                offset: offset + start,
            }
            .into());
        };
        let (placeholder, after_end) = after_start.split_at(end + 2);
        let value = context.resolve(placeholder)?;
        out.push_str(&display(placeholder, &value, number_format)?);

        offset += start + placeholder.len();
        rest = after_end;
    }

    out.push_str(rest);
    Ok(out)
}

/// Text form of a resolved value. Strings go in verbatim; numbers use the
/// caller's format.
fn display(placeholder: &str, value: &Value, number_format: NumberFormat) -> Result<String> {
    let kind = match value {
        Value::String(s) => return Ok(s.clone()),
        Value::Number(n) => return Ok(number_format(n)),
        Value::Bool(b) => return Ok(b.to_string()),
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    let path = placeholder
        .trim_matches(|c| c == '{' || c == '}')
        .trim()
        .to_string();
    Err(ResolutionError::Unrenderable { path, kind }.into())
}
