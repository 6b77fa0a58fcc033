//! Brace matcher
//!
//! Locates a function body by counting `{`/`}` depth from a starting offset
//! and pulls the expression of the last `return` inside that body.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::codemap::CodeMap;

static RETURN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\b").expect("return keyword regex is valid"));

/// Extent of a block and its trailing return expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRange {
    /// Offset of the opening `{`
    pub open: usize,
    /// Offset of the matching `}`
    pub close: usize,
    /// Expression of the last `return` in the block, if any
    pub return_expr: Option<String>,
}

/// Find the block opened by the first code `{` at or after `start`.
///
/// Returns `None` when no `{` is found or the block never closes. A `}`
/// seen before the first `{` is ignored.
pub fn match_block(text: &str, code: &CodeMap, start: usize) -> Option<FunctionRange> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut open = None;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if !code.is_code(i) {
            continue;
        }
        match b {
            b'{' => {
                depth += 1;
                open.get_or_insert(i);
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let open = open?;
                    return Some(FunctionRange {
                        open,
                        close: i,
                        return_expr: last_return_expr(text, code, open, i),
                    });
                }
            }
            _ => {}
        }
    }

    None
}

/// Expression after the last `return` keyword within `[open, close]`.
///
/// The expression runs up to the first code `;` on the same line. A return
/// with no terminating `;` on its line (multi-line JSX, object literals) or
/// with nothing before the `;` yields `None`.
pub fn last_return_expr(text: &str, code: &CodeMap, open: usize, close: usize) -> Option<String> {
    let body = text.get(open..=close)?;
    let keyword = RETURN_RE
        .find_iter(body)
        .filter(|m| code.is_code(open + m.start()))
        .last()?;

    let expr_start = open + keyword.end();
    let rest = &text[expr_start..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let semi = rest[..line_end]
        .char_indices()
        .find(|&(i, c)| c == ';' && code.is_code(expr_start + i))
        .map(|(i, _)| i)?;

    let expr = rest[..semi].trim();
    if expr.is_empty() {
        None
    } else {
        Some(expr.to_string())
    }
}
