//! Parameter extractor
//!
//! Turns a located signature into a [`FunctionDoc`]: parameter names from
//! the signature line, return expression from the brace matcher.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::braces::match_block;
use crate::codemap::CodeMap;
use crate::scanner::Signature;
use crate::schema::FunctionDoc;

static PARAMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w$]+\((.+)\)").expect("parameter list regex is valid"));

/// Describe the function behind `signature`.
///
/// Returns `None` when its body never closes.
pub fn describe(signature: &Signature, text: &str, code: &CodeMap) -> Option<FunctionDoc> {
    let range = match_block(text, code, signature.brace_offset)?;

    Some(FunctionDoc {
        name: signature.name.clone(),
        line: signature.line,
        params: extract_params(&signature.text),
        returns: range.return_expr,
    })
}

/// Parameter names from a signature line, in order.
///
/// `()` yields nothing. Names are split on top-level commas, trimmed, and
/// reduced to the binding: `page = {}` gives `page`, `id: string` gives `id`.
/// Destructured patterns are kept verbatim.
pub fn extract_params(signature: &str) -> Vec<String> {
    let Some(list) = PARAMS_RE
        .captures(signature)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };

    split_top_level(list, ',')
        .into_iter()
        .map(binding_name)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on `sep` where it is not nested in brackets or quotes.
fn split_top_level(list: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' if depth > 0 => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&list[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

/// Strip default values and type annotations from one parameter.
fn binding_name(param: &str) -> &str {
    let param = param.trim();
    let cut = top_level_position(param, |c| c == '=' || c == ':').unwrap_or(param.len());
    param[..cut].trim().trim_end_matches('?')
}

fn top_level_position(s: &str, pred: impl Fn(char) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            c if depth == 0 && pred(c) => return Some(i),
            _ => {}
        }
    }
    None
}
