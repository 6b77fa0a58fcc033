//! Result types produced by an annotation run

use serde::Serialize;

/// What was documented for one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDoc {
    /// Function name from the signature
    pub name: String,

    /// 1-based line of the signature in the input
    pub line: usize,

    /// Parameter names in declaration order
    pub params: Vec<String>,

    /// Trailing return expression, if one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

/// Why a signature did not receive an annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Signature text contains an exclusion pattern
    Excluded { pattern: String },
    /// Identifier is a control keyword (`if`, `for`, ...)
    Keyword,
    /// Signature sits inside a string or comment
    InsideLiteral,
    /// Signature follows a template or block comment that never closes
    UnterminatedLiteral { opened_line: usize },
    /// The body never closes
    UnbalancedBraces,
}

impl SkipReason {
    /// Whether this skip indicates malformed input rather than a filter
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedBraces | Self::UnterminatedLiteral { .. }
        )
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Excluded { pattern } => format!("excluded by `{}`", pattern),
            Self::Keyword => "control keyword".to_string(),
            Self::InsideLiteral => "inside string or comment".to_string(),
            Self::UnterminatedLiteral { opened_line } => {
                format!("after unclosed literal from line {}", opened_line)
            }
            Self::UnbalancedBraces => "body never closes".to_string(),
        }
    }
}

/// A signature that was found but not annotated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSignature {
    pub name: String,
    pub line: usize,
    pub reason: SkipReason,
}

/// Per-run record of annotated and skipped signatures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Annotated functions in source order
    pub annotated: Vec<FunctionDoc>,

    /// Skipped signatures in source order
    pub skipped: Vec<SkippedSignature>,
}

impl AnnotationReport {
    /// Skipped signatures that point at malformed input
    pub fn failures(&self) -> impl Iterator<Item = &SkippedSignature> {
        self.skipped.iter().filter(|s| s.reason.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

}
