//! Lexical code map
//!
//! Classifies byte ranges of a JavaScript source as code or literal so the
//! brace matcher can ignore `{`, `}` and `return` that appear inside strings,
//! template text or comments. This is not a tokenizer in the full sense:
//!
//! - `'...'` and `"..."` end at the closing quote or at the end of the line
//! - template literals may span lines; `${ ... }` interpolations are code
//! - `// ...` runs to the end of the line, `/* ... */` to its terminator
//! - regex literals are not recognised and are treated as code
//!
//! A template or block comment that never closes runs to the end of the
//! text; its start is kept so callers can tell that apart from a real
//! literal.

use std::ops::Range;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How braces are counted when locating a function body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Skip string, template and comment content
    #[default]
    Lexical,
    /// Count every brace in the raw text
    Raw,
}

/// Sorted, non-overlapping byte ranges that are not code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMap {
    literals: Vec<Range<usize>>,
    /// Start of a template or block comment that reaches end of text
    unterminated: Option<usize>,
}

impl CodeMap {
    /// Build the map appropriate for `mode`
    pub fn build(text: &str, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Lexical => Self::scan(text),
            MatchMode::Raw => Self::raw(),
        }
    }

    /// A map where every byte is code
    pub fn raw() -> Self {
        Self::default()
    }

    /// Scan `text` and record every literal and comment range
    pub fn scan(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut literals = Vec::new();
        let mut unterminated = None;
        // Open-brace depth inside each active `${ ... }`, innermost last
        let mut interpolations: Vec<usize> = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let end = find_byte(bytes, i, b'\n').unwrap_or(bytes.len());
                    literals.push(i..end);
                    i = end;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let end = match find_seq(bytes, i + 2, b"*/") {
                        Some(e) => e + 2,
                        None => {
                            unterminated.get_or_insert(i);
                            bytes.len()
                        }
                    };
                    literals.push(i..end);
                    i = end;
                }
                b'\'' | b'"' => {
                    let end = skip_quoted(bytes, i);
                    literals.push(i..end);
                    i = end;
                }
                b'`' => {
                    let end = skip_template(bytes, i + 1, &mut interpolations).unwrap_or_else(|| {
                        unterminated.get_or_insert(i);
                        bytes.len()
                    });
                    literals.push(i..end);
                    i = end;
                }
                b'{' => {
                    if let Some(depth) = interpolations.last_mut() {
                        *depth += 1;
                    }
                    i += 1;
                }
                b'}' => match interpolations.last().copied() {
                    Some(0) => {
                        // closes `${`, back into template text
                        interpolations.pop();
                        let end = skip_template(bytes, i + 1, &mut interpolations)
                            .unwrap_or_else(|| {
                                unterminated.get_or_insert(i);
                                bytes.len()
                            });
                        literals.push(i..end);
                        i = end;
                    }
                    Some(_) => {
                        if let Some(depth) = interpolations.last_mut() {
                            *depth -= 1;
                        }
                        i += 1;
                    }
                    None => i += 1,
                },
                _ => i += 1,
            }
        }

        Self {
            literals,
            unterminated,
        }
    }

    /// Whether the byte at `offset` is code
    pub fn is_code(&self, offset: usize) -> bool {
        let idx = self.literals.partition_point(|r| r.start <= offset);
        idx == 0 || !self.literals[idx - 1].contains(&offset)
    }

    /// Offset where a template or block comment opens and never closes.
    ///
    /// Everything after it is classified as literal, which usually means a
    /// backtick or `/*` was misread (for example inside a regex literal).
    pub fn unterminated(&self) -> Option<usize> {
        self.unterminated
    }

    /// Literal and comment ranges in source order
    pub fn literals(&self) -> &[Range<usize>] {
        &self.literals
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == needle).map(|p| p + from)
}

fn find_seq(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// End (exclusive) of a quoted string starting at `start`
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// End (exclusive) of template text starting at `from`: after the closing
/// backtick, or after a `${` which pushes a new interpolation frame. `None`
/// when the text ends first.
fn skip_template(bytes: &[u8], from: usize, interpolations: &mut Vec<usize>) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'`' => return Some(j + 1),
            b'$' if bytes.get(j + 1) == Some(&b'{') => {
                interpolations.push(0);
                return Some(j + 2);
            }
            _ => j += 1,
        }
    }
    None
}
