use crate::error::ParseError;

pub const KW_IF: &str = "SI";
pub const KW_ELSE_IF: &str = "SINO PERO";
pub const KW_ELSE: &str = "SINO";
pub const KW_FORCE_DEFAULT: &str = "DEFAULT";
pub const KW_FIN: &str = "FIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    ElseIf,
    Else,
    ForceDefault,
}

impl BlockKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => KW_IF,
            BlockKind::ElseIf => KW_ELSE_IF,
            BlockKind::Else => KW_ELSE,
            BlockKind::ForceDefault => KW_FORCE_DEFAULT,
        }
    }
}

/// One parsed clause of the template: a bracketed header, its condition text
/// (keyword already stripped), and the body before `[FIN]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBlock {
    pub kind: BlockKind,
    pub condition: String,
    pub body: String,
}

enum Marker {
    Header { kind: BlockKind, condition: String },
    Fin,
}

/// Decide whether bracketed text is a command marker. Longest keyword first,
/// and each keyword needs a word boundary, so `[SIGLO]` or `[SINOPSIS]` stay
/// literal text.
fn classify(inner: &str) -> Option<Marker> {
    let inner = inner.trim();
    if inner == KW_FIN {
        return Some(Marker::Fin);
    }
    if inner == KW_FORCE_DEFAULT {
        return Some(Marker::Header {
            kind: BlockKind::ForceDefault,
            condition: String::new(),
        });
    }
    if let Some(rest) = keyword_rest(inner, KW_ELSE_IF) {
        return Some(Marker::Header {
            kind: BlockKind::ElseIf,
            condition: rest.to_string(),
        });
    }
    if inner == KW_ELSE {
        return Some(Marker::Header {
            kind: BlockKind::Else,
            condition: String::new(),
        });
    }
    if let Some(rest) = keyword_rest(inner, KW_IF) {
        return Some(Marker::Header {
            kind: BlockKind::If,
            condition: rest.to_string(),
        });
    }
    None
}

/// If `inner` starts with `keyword` followed by whitespace (or nothing),
/// return the trimmed remainder.
fn keyword_rest<'a>(inner: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = inner.strip_prefix(keyword)?;
    if rest.is_empty() {
        return Some(rest);
    }
    if rest.starts_with(char::is_whitespace) {
        return Some(rest.trim_start());
    }
    None
}

/// Split a raw template into command blocks, in source order.
///
/// Text between blocks is ignored here; a template with no markers at all
/// yields an empty list and the orchestrator renders it as a plain body.
///
/// A continuation header (`[SINO PERO ...]`, `[SINO]`, `[DEFAULT]`) closes
/// the block that is open, so a chain may share one trailing `[FIN]`:
/// `[SI c] a [SINO] b [FIN]` is two blocks. Nesting stays flat by
/// construction: a `[SI ...]` inside an open block is a parse error, never a
/// silent mis-parse, and so is a dangling header or a stray `[FIN]`.
pub fn parse_blocks(template: &str) -> Result<Vec<CommandBlock>, ParseError> {
    let mut blocks = Vec::new();
    // (kind, condition, header '[' offset, body start offset)
    let mut open: Option<(BlockKind, String, usize, usize)> = None;
    let mut cursor = 0;

    while let Some(rel) = template[cursor..].find('[') {
        let bracket = cursor + rel;
        let after = &template[bracket + 1..];
        let Some(close_rel) = after.find(']') else {
            // No closing bracket anywhere ahead; the rest is literal.
            break;
        };
        let inner = &after[..close_rel];
        let marker_end = bracket + 1 + close_rel + 1;

        match classify(inner) {
            Some(Marker::Header { kind, condition }) => {
                if let Some((open_kind, open_condition, _, body_start)) = open.take() {
                    // Only a primary [SI] can nest; everything else starts
                    // the next sibling branch and ends the open body here.
                    if kind == BlockKind::If {
                        return Err(ParseError::NestedBlock {
                            marker: format!("[{}]", inner.trim()),
                            offset: bracket,
                        });
                    }
                    let body = template[body_start..bracket].trim().to_string();
                    blocks.push(CommandBlock {
                        kind: open_kind,
                        condition: open_condition,
                        body,
                    });
                }
                open = Some((kind, condition, bracket, marker_end));
            }
            Some(Marker::Fin) => match open.take() {
                Some((kind, condition, _, body_start)) => {
                    let body = template[body_start..bracket].trim().to_string();
                    blocks.push(CommandBlock {
                        kind,
                        condition,
                        body,
                    });
                }
                None => return Err(ParseError::StrayFin { offset: bracket }),
            },
            // Not a marker: step past this '[' so an overlapping marker
            // like "[x [SI ...]" is still found.
            None => {
                cursor = bracket + 1;
                continue;
            }
        }
        cursor = marker_end;
    }

    if let Some((kind, _, offset, _)) = open {
        return Err(ParseError::UnterminatedBlock {
            keyword: kind.keyword().to_string(),
            offset,
        });
    }

    for kind in [BlockKind::If, BlockKind::Else, BlockKind::ForceDefault] {
        if blocks.iter().filter(|b| b.kind == kind).count() > 1 {
            return Err(ParseError::DuplicateBlock {
                keyword: kind.keyword().to_string(),
            });
        }
    }

    Ok(blocks)
}
