use crate::error::ParseError;

pub const CMP_EQUALS: &str = "ES IGUAL QUE";
pub const CMP_NOT_EQUALS: &str = "NO ES IGUAL QUE";

/// Comparator keywords the language reserves but the evaluator does not
/// implement. They are rejected at parse time instead of quietly evaluating
/// to false.
pub const RESERVED_COMPARATORS: [&str; 5] = [
    "HA CAMBIADO A",
    "CONTIENE",
    "EMPIEZA CON",
    "TERMINA CON",
    "ESTA EN BLANCO ES",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equals,
    NotEquals,
}

/// How an operation's result combines with the running value of the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And, // Y
    Or,  // O
}

/// One comparison, with raw (unresolved) operand tokens. `combinator` links
/// this operation to the previous one's result and is `None` for the first
/// section of a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub left: String,
    pub comparator: Comparator,
    pub right: String,
    pub combinator: Option<Combinator>,
}

/// Split one block's condition text (leading keyword already stripped) into
/// operations, in left-to-right section order.
///
/// Sections begin where `Y {{` or `O {{` follows the previous one; there is
/// no precedence and no grouping. Each section must hold exactly one
/// comparator with an operand on each side.
pub fn parse_condition(text: &str) -> Result<Vec<Operation>, ParseError> {
    let mut operations = Vec::new();
    let mut rest = text.trim();
    let mut pending: Option<Combinator> = None;

    loop {
        match next_boundary(rest) {
            Some((pos, combinator)) => {
                operations.push(parse_section(&rest[..pos], pending)?);
                pending = Some(combinator);
                // Skip " Y " / " O "; the "{{" stays with the next section.
                rest = &rest[pos + 3..];
            }
            None => {
                operations.push(parse_section(rest, pending)?);
                return Ok(operations);
            }
        }
    }
}

/// Position of the next section boundary, if any. The combinator letter must
/// be preceded by a space and followed by ` {{`, so text like `HOY {{...}}`
/// never splits.
fn next_boundary(rest: &str) -> Option<(usize, Combinator)> {
    let and = rest.find(" Y {{").map(|p| (p, Combinator::And));
    let or = rest.find(" O {{").map(|p| (p, Combinator::Or));
    match (and, or) {
        (Some(a), Some(o)) => Some(if a.0 <= o.0 { a } else { o }),
        (a, o) => a.or(o),
    }
}

fn parse_section(section: &str, combinator: Option<Combinator>) -> Result<Operation, ParseError> {
    let section = section.trim();

    // Leftmost keyword wins, which also makes NO ES IGUAL QUE take
    // precedence over the ES IGUAL QUE it embeds.
    let mut found: Option<(usize, &str, Option<Comparator>)> = None;
    let candidates = [
        (CMP_NOT_EQUALS, Some(Comparator::NotEquals)),
        (CMP_EQUALS, Some(Comparator::Equals)),
    ];
    for (keyword, comparator) in candidates
        .into_iter()
        .chain(RESERVED_COMPARATORS.into_iter().map(|k| (k, None)))
    {
        if let Some(pos) = section.find(keyword) {
            if found.map_or(true, |(best, _, _)| pos < best) {
                found = Some((pos, keyword, comparator));
            }
        }
    }

    let Some((pos, keyword, comparator)) = found else {
        return Err(ParseError::MissingComparator {
            section: section.to_string(),
        });
    };
    let Some(comparator) = comparator else {
        return Err(ParseError::UnsupportedComparator {
            keyword: keyword.to_string(),
        });
    };

    let left = section[..pos].trim();
    let right = section[pos + keyword.len()..].trim();
    if left.is_empty() {
        return Err(ParseError::MissingOperand {
            section: section.to_string(),
            side: "left",
        });
    }
    if right.is_empty() {
        return Err(ParseError::MissingOperand {
            section: section.to_string(),
            side: "right",
        });
    }

    Ok(Operation {
        left: left.to_string(),
        comparator,
        right: right.to_string(),
        combinator,
    })
}
