//! Signature scanner
//!
//! Finds lines that look like function declarations with a regular
//! expression over the whole text. The match is purely lexical: it does not
//! know about nesting, strings or comments, and it will happily match
//! `} else if(x) {` (keywords are filtered out below). Every signature keeps
//! its byte offsets so later stages never have to re-locate it by text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::SkipReason;
use crate::utils::{leading_indent, line_number, line_start};

/// Leading blanks, identifier, parameter list, optional space, `{` then EOL
static SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+(?P<name>[\w$]+)\((?P<params>.*?)\) ?\{\r?\n")
        .expect("signature regex is valid")
});

/// Substrings that keep React lifecycle and render methods unannotated
pub const DEFAULT_EXCLUSIONS: &[&str] = &["constructor", "component", "shouldComponent", "render"];

/// Identifiers the regex picks up from control-flow headers
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "with", "function", "return",
];

/// Literal, case-sensitive substring filter applied to the matched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

impl ExclusionFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// A filter that excludes nothing
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// First pattern contained in `text`
    pub fn matching(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| text.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// A located function signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Function identifier
    pub name: String,
    /// Raw text between the parentheses
    pub params: String,
    /// Full matched text, leading blanks and trailing newline included
    pub text: String,
    /// Offset of the match
    pub offset: usize,
    /// Offset of the identifier
    pub name_offset: usize,
    /// Offset of the opening `{`
    pub brace_offset: usize,
    /// Offset of the start of the signature's line
    pub line_offset: usize,
    /// 1-based line number
    pub line: usize,
    /// Leading whitespace of the signature's line
    pub indent: String,
}

/// Scanner output: accepted signatures and filtered ones, both in source order
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub accepted: Vec<Signature>,
    pub rejected: Vec<(Signature, SkipReason)>,
}

/// Find every signature in `text`, applying keyword and exclusion filters.
pub fn scan_signatures(text: &str, filter: &ExclusionFilter) -> ScanResult {
    let mut result = ScanResult::default();

    for sig in find_signatures(text) {
        if CONTROL_KEYWORDS.contains(&sig.name.as_str()) {
            result.rejected.push((sig, SkipReason::Keyword));
        } else if let Some(pattern) = filter.matching(&sig.text) {
            let reason = SkipReason::Excluded {
                pattern: pattern.to_string(),
            };
            result.rejected.push((sig, reason));
        } else {
            result.accepted.push(sig);
        }
    }

    result
}

/// All regex matches, unfiltered.
pub fn find_signatures(text: &str) -> Vec<Signature> {
    SIGNATURE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.name("name")?;
            let params = caps.name("params")?;
            let brace = whole.as_str().rfind('{')?;

            let line_offset = line_start(text, name.start());
            let line_end = text[line_offset..]
                .find('\n')
                .map(|i| line_offset + i)
                .unwrap_or(text.len());

            Some(Signature {
                name: name.as_str().to_string(),
                params: params.as_str().to_string(),
                text: whole.as_str().to_string(),
                offset: whole.start(),
                name_offset: name.start(),
                brace_offset: whole.start() + brace,
                line_offset,
                line: line_number(text, name.start()),
                indent: leading_indent(&text[line_offset..line_end]).to_string(),
            })
        })
        .collect()
}
