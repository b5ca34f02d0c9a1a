use crate::condition::{Combinator, Comparator, Operation};
use crate::error::ResolutionError;
use crate::resolve::Context;

/// The evaluated boolean for one operation, keeping its combinator so the
/// fold can consume the results in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub is_true: bool,
    pub combinator: Option<Combinator>,
}

/// Fold a block's operations into a single boolean.
///
/// Both operands resolve through the context, then compare with strict
/// `serde_json::Value` equality: type and value must both match, a number
/// never equals a string. The fold is strictly left to right using each
/// result's own combinator; there is no precedence and no grouping, so
/// `A Y B O C` means `(A and B) or C`. A stray combinator on the first
/// section is ignored since it has no left operand.
pub fn evaluate(operations: &[Operation], context: &Context) -> Result<bool, ResolutionError> {
    let mut results = Vec::with_capacity(operations.len());
    for op in operations {
        let left = context.resolve(&op.left)?;
        let right = context.resolve(&op.right)?;
        let equal = left == right;
        results.push(OperationResult {
            is_true: match op.comparator {
                Comparator::Equals => equal,
                Comparator::NotEquals => !equal,
            },
            combinator: op.combinator,
        });
    }

    let mut iter = results.into_iter();
    let Some(first) = iter.next() else {
        return Ok(false);
    };
    let mut running = first.is_true;
    for result in iter {
        running = match result.combinator {
            Some(Combinator::Or) => running || result.is_true,
            // The parser attaches a combinator to every section after the
            // first; And is the conservative reading if one is missing.
            Some(Combinator::And) | None => running && result.is_true,
        };
    }
    Ok(running)
}
