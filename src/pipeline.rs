//! In-memory annotation pipeline
//!
//! scan signatures -> describe each function -> format blocks -> splice by
//! offset. No I/O happens here; see [`crate::driver`] for the file side.

use tracing::{debug, warn};

use crate::annotate::{format_annotation, insert_annotations, AnnotationStyle, Insertion};
use crate::codemap::{CodeMap, MatchMode};
use crate::error::{AnnotateError, Result};
use crate::params::describe;
use crate::scanner::{scan_signatures, ExclusionFilter, Signature};
use crate::schema::{AnnotationReport, SkipReason, SkippedSignature};
use crate::utils::{line_number, preview};

/// Knobs for one transformation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotateOptions {
    pub exclusions: ExclusionFilter,
    pub mode: MatchMode,
    /// Fail on a body that never closes instead of skipping it
    pub strict: bool,
    pub style: AnnotationStyle,
}

/// Annotated source plus what happened to each signature
#[derive(Debug, Clone)]
pub struct Annotated {
    pub text: String,
    pub report: AnnotationReport,
}

/// Insert annotation blocks above every eligible function in `source`.
///
/// The result is not idempotent: existing doc comments are not detected, so
/// running this on its own output adds a second block per function.
pub fn annotate_source(source: &str, options: &AnnotateOptions) -> Result<Annotated> {
    let code = CodeMap::build(source, options.mode);
    let scan = scan_signatures(source, &options.exclusions);
    let mut report = AnnotationReport::default();
    let mut insertions = Vec::with_capacity(scan.accepted.len());

    for (sig, reason) in scan.rejected {
        debug!(name = %sig.name, line = sig.line, reason = %reason.describe(), "skipping signature");
        report.skipped.push(skipped(&sig, reason));
    }

    for sig in scan.accepted {
        if !code.is_code(sig.name_offset) {
            let reason = match code.unterminated() {
                Some(start) if start < sig.name_offset => {
                    let opened_line = line_number(source, start);
                    warn!(
                        name = %sig.name,
                        line = sig.line,
                        opened_line,
                        "signature follows a literal that never closes, not annotated"
                    );
                    SkipReason::UnterminatedLiteral { opened_line }
                }
                _ => {
                    debug!(name = %sig.name, line = sig.line, "signature inside literal");
                    SkipReason::InsideLiteral
                }
            };
            report.skipped.push(skipped(&sig, reason));
            continue;
        }

        let Some(doc) = describe(&sig, source, &code) else {
            if options.strict {
                return Err(AnnotateError::UnbalancedBraces {
                    name: sig.name,
                    line: sig.line,
                });
            }
            warn!(
                name = %sig.name,
                line = sig.line,
                signature = %preview(&sig.text, 60),
                "function body never closes, not annotated"
            );
            report.skipped.push(skipped(&sig, SkipReason::UnbalancedBraces));
            continue;
        };

        debug!(
            name = %doc.name,
            line = doc.line,
            params = doc.params.len(),
            returns = doc.returns.is_some(),
            "annotating"
        );
        let block = format_annotation(&doc, &sig.indent, &options.style);
        insertions.push(placement(&sig, &code, block));
        report.annotated.push(doc);
    }

    report.skipped.sort_by_key(|s| s.line);

    Ok(Annotated {
        text: insert_annotations(source, &insertions),
        report,
    })
}

/// Where the block for `sig` goes.
///
/// Normally at the start of the signature's line. When that line opens
/// inside a literal (`*/ go(a) {` closing a block comment), the block moves
/// to just before the name on a line of its own so it stays out of the
/// comment.
fn placement(sig: &Signature, code: &CodeMap, block: String) -> Insertion {
    if code.is_code(sig.line_offset) {
        Insertion {
            offset: sig.line_offset,
            text: block,
        }
    } else {
        Insertion {
            offset: sig.name_offset,
            text: format!("\n{}{}", block, sig.indent),
        }
    }
}

fn skipped(sig: &Signature, reason: SkipReason) -> SkippedSignature {
    SkippedSignature {
        name: sig.name.clone(),
        line: sig.line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FunctionDoc;

    fn annotated(out: &Annotated, name: &str) -> Option<FunctionDoc> {
        out.report.annotated.iter().find(|d| d.name == name).cloned()
    }

    #[test]
    fn test_annotates_single_function() {
        let src = "function add(a, b) {\n  return a + b;\n}\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert_eq!(
            out.text,
            "/**\n *\n * @param {Object} a\n * @param {Object} b\n * @return {Object} a + b\n */\n\
             function add(a, b) {\n  return a + b;\n}\n"
        );
        assert_eq!(out.report.annotated.len(), 1);
        assert!(out.report.skipped.is_empty());
    }

    #[test]
    fn test_no_signatures_is_unchanged() {
        let src = "const a = 1;\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert_eq!(out.text, src);
        assert_eq!(out.report, AnnotationReport::default());
    }

    #[test]
    fn test_unbalanced_skipped_by_default() {
        let src = "class A {\n  ok() {\n  }\n  broken(x) {\n    if (x) {\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert!(annotated(&out, "ok").is_some());
        assert!(out.report.has_failures());
        assert_eq!(out.report.skipped[0].name, "broken");
        assert_eq!(out.report.skipped[0].line, 4);
        assert!(!out.text.contains("@param {Object} x"));
    }

    #[test]
    fn test_unbalanced_strict_errors() {
        let src = "  broken(x) {\n    if (x) {\n  }\n";
        let options = AnnotateOptions {
            strict: true,
            ..AnnotateOptions::default()
        };
        let err = annotate_source(src, &options).unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::UnbalancedBraces { ref name, line: 1 } if name == "broken"
        ));
    }

    #[test]
    fn test_signature_in_comment_skipped_lexically() {
        let src = "/*\n  example(a) {\n  }\n*/\nfunction real(b) {\n}\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert!(annotated(&out, "real").is_some());
        assert_eq!(out.report.skipped[0].reason, SkipReason::InsideLiteral);
    }

    #[test]
    fn test_signature_in_comment_annotated_raw() {
        let src = "/*\n  example(a) {\n  }\n*/\nfunction real(b) {\n}\n";
        let options = AnnotateOptions {
            mode: MatchMode::Raw,
            ..AnnotateOptions::default()
        };
        let out = annotate_source(src, &options).unwrap();
        assert!(annotated(&out, "example").is_some());
        assert!(annotated(&out, "real").is_some());
    }

    #[test]
    fn test_block_moves_past_closing_comment() {
        let src = "  /* note\n  */ go(a) {\n  }\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert_eq!(
            out.text,
            "  /* note\n  */ \n  /**\n   *\n   * @param {Object} a\n   */\n  go(a) {\n  }\n"
        );
    }

    #[test]
    fn test_signature_after_unclosed_template_is_failure() {
        let src = "  strip(s) {\n    return s.replace(/`/g, '');\n  }\n  go(a) {\n    return a;\n  }\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        assert!(out.report.annotated.is_empty());
        assert_eq!(out.report.failures().count(), 2);
        assert_eq!(out.report.skipped[1].name, "go");
        assert_eq!(
            out.report.skipped[1].reason,
            SkipReason::UnterminatedLiteral { opened_line: 2 }
        );
    }

    #[test]
    fn test_skipped_sorted_by_line() {
        let src = "class A {\n  render() {\n  }\n  broken() {\n    if (x) {\n  }\n  constructor() {\n";
        let out = annotate_source(src, &AnnotateOptions::default()).unwrap();
        let lines: Vec<_> = out.report.skipped.iter().map(|s| s.line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
    }
}
