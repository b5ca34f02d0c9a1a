use std::collections::HashMap;

use serde_json::Value;

use crate::error::ResolutionError;

/// The named domain objects available during one render, e.g. "usuario",
/// "cliente", "ticket". A plain name→value table: registering a new root
/// kind is an `insert`, never an engine change.
///
/// Read-only for the duration of a render; the engine only borrows it, so a
/// context may back any number of concurrent renders.
#[derive(Debug, Clone, Default)]
pub struct Context {
    roots: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.roots.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.roots.get(name)
    }

    /// Resolve one placeholder or operand token to a value.
    ///
    /// Surrounding `{{ }}` braces are optional. Rules, in order: a
    /// single-quoted token is a string literal; a numeric token is a number
    /// (integers stay integers, so `1` equals a context field holding 1);
    /// anything else is a dot-separated path where the first segment names a
    /// root object and each further segment is a field lookup.
    ///
    /// Every miss is an error. Nothing here ever falls back to a default or
    /// leaves placeholder text behind.
    pub fn resolve(&self, token: &str) -> Result<Value, ResolutionError> {
        let expr = token.trim();
        let expr = expr
            .strip_prefix("{{")
            .and_then(|s| s.strip_suffix("}}"))
            .map(str::trim)
            .unwrap_or(expr);

        if let Some(inner) = expr.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            return Ok(Value::String(inner.to_string()));
        }
        if let Ok(i) = expr.parse::<i64>() {
            return Ok(Value::from(i));
        }
        if let Ok(f) = expr.parse::<f64>() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Ok(Value::Number(n));
            }
        }

        let mut segments = expr.split('.');
        let root = segments.next().unwrap_or("");
        let mut current = self.roots.get(root).ok_or_else(|| ResolutionError::UnknownRoot {
            name: root.to_string(),
        })?;
        for segment in segments {
            current = current
                .get(segment)
                .ok_or_else(|| ResolutionError::UndefinedField {
                    path: expr.to_string(),
                    field: segment.to_string(),
                })?;
        }
        Ok(current.clone())
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}
