//! plantilla: minimal conditional template engine for message bodies.
//!
//! This crate exists to do one job well: take a message template made of
//! bracketed command blocks, evaluate the block conditions against a context
//! of named domain objects, and return the winning block's body with its
//! `{{ ... }}` placeholders filled in.
//!
//! The language:
//! - `[SI <condición>] cuerpo` opens the primary branch (at most one).
//! - `[SINO PERO <condición>] cuerpo` opens an else-if branch, evaluated in
//!   source order, first true wins (any number).
//! - `[SINO] cuerpo` opens the fallback branch (at most one).
//! - `[DEFAULT] cuerpo` is an authoring override that always wins, even over
//!   branches whose conditions would fail to resolve (at most one).
//! - `[FIN]` closes the open branch. A continuation header also closes the
//!   branch before it, so a chain may share one trailing `[FIN]`:
//!   `[SI c] a [SINO] b [FIN]` is two complete blocks.
//! - Conditions compare two operands with `ES IGUAL QUE` or
//!   `NO ES IGUAL QUE` and chain with `Y` / `O` in a strict left-to-right
//!   fold. There is no precedence and no parentheses: `A Y B O C` is
//!   `(A and B) or C`. This is a deliberate language limitation, not an
//!   oversight.
//! - Operands and body placeholders are `'literales'`, numbers, or dotted
//!   paths like `{{usuario.rol}}` into the context.
//!
//! Not supported:
//! - Nested blocks. A `[SI]` inside an open block is a parse error, never a
//!   mis-parse.
//! - Ordering comparators, arithmetic, or any expression beyond one
//!   comparison per section.
//! - The reserved comparators (`CONTIENE`, `EMPIEZA CON`, ...), which parse
//!   as errors instead of silently evaluating to false.
//!
//! Rendering is a pure function of `(template, context)`: no I/O, no shared
//! state, and every failure is a typed [`TemplateError`]. A missing field is
//! an error, never an empty or "undefined" substitution.

mod block;
mod condition;
mod error;
mod eval;
mod render;
mod resolve;

pub use block::{BlockKind, CommandBlock};
pub use condition::{Combinator, Comparator, Operation};
pub use error::{ParseError, ResolutionError, Result, TemplateError};
pub use eval::OperationResult;
pub use render::{default_number_format, NumberFormat};
pub use resolve::Context;

/// One (template, context) pair, ready to render.
///
/// The engine borrows both inputs; nothing is cached between calls, so
/// `render` may be called repeatedly and always returns the same outcome for
/// the same inputs.
pub struct Engine<'a> {
    template: &'a str,
    context: &'a Context,
    number_format: NumberFormat,
}

impl<'a> Engine<'a> {
    pub fn new(template: &'a str, context: &'a Context) -> Self {
        Self {
            template,
            context,
            number_format: default_number_format,
        }
    }

    /// Replace the canonical number formatting used for body placeholders.
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    /// Parse the template, pick the winning block, and render its body.
    ///
    /// Branch selection: a `[DEFAULT]` block short-circuits everything;
    /// otherwise the `[SI]` condition is tried, then each `[SINO PERO]` in
    /// source order, then `[SINO]`. If nothing wins the render fails with
    /// [`TemplateError::NoBranchMatched`]. A template with no blocks at all
    /// is rendered as a plain body, placeholders included.
    pub fn render(&self) -> Result<String> {
        let blocks = block::parse_blocks(self.template)?;
        if blocks.is_empty() {
            return render::render_body(self.template, self.context, self.number_format);
        }

        // Every condition parses up front, so authoring defects surface
        // even in branches that will not run.
        let mut parsed = Vec::with_capacity(blocks.len());
        for b in &blocks {
            let operations = match b.kind {
                BlockKind::If | BlockKind::ElseIf => condition::parse_condition(&b.condition)?,
                BlockKind::Else | BlockKind::ForceDefault => Vec::new(),
            };
            parsed.push((b, operations));
        }

        if let Some((b, _)) = parsed.iter().find(|(b, _)| b.kind == BlockKind::ForceDefault) {
            return render::render_body(&b.body, self.context, self.number_format);
        }
        if let Some((b, ops)) = parsed.iter().find(|(b, _)| b.kind == BlockKind::If) {
            if eval::evaluate(ops, self.context)? {
                return render::render_body(&b.body, self.context, self.number_format);
            }
        }
        for (b, ops) in parsed.iter().filter(|(b, _)| b.kind == BlockKind::ElseIf) {
            if eval::evaluate(ops, self.context)? {
                return render::render_body(&b.body, self.context, self.number_format);
            }
        }
        if let Some((b, _)) = parsed.iter().find(|(b, _)| b.kind == BlockKind::Else) {
            return render::render_body(&b.body, self.context, self.number_format);
        }
        Err(TemplateError::NoBranchMatched)
    }
}

/// Render a template against a context in one call.
pub fn render(template: &str, context: &Context) -> Result<String> {
    Engine::new(template, context).render()
}
