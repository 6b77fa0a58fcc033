//! Run summary rendering (text and JSON)

use std::path::Path;

use clap::ValueEnum;
use serde_json::json;

use crate::error::Result;
use crate::schema::AnnotationReport;

/// Output format options for the run summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON - standard JSON output
    Json,
}

/// Render the summary of a run in `format`
pub fn render_report(
    report: &AnnotationReport,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, output)),
        OutputFormat::Json => render_json(report, output),
    }
}

fn render_text(report: &AnnotationReport, output: Option<&Path>) -> String {
    let mut out = format!(
        "annotated {} function(s), skipped {} ({} failure(s))\n",
        report.annotated.len(),
        report.skipped.len(),
        report.failures().count()
    );

    for doc in &report.annotated {
        let ret = doc
            .returns
            .as_deref()
            .map(|r| format!(" -> {}", r))
            .unwrap_or_default();
        out.push_str(&format!(
            "  + {}:{}({}){}\n",
            doc.line,
            doc.name,
            doc.params.join(", "),
            ret
        ));
    }

    for skip in &report.skipped {
        let marker = if skip.reason.is_failure() { '!' } else { '-' };
        out.push_str(&format!(
            "  {} {}:{} {}\n",
            marker,
            skip.line,
            skip.name,
            skip.reason.describe()
        ));
    }

    if let Some(path) = output {
        out.push_str(&format!("wrote {}\n", path.display()));
    }

    out
}

fn render_json(report: &AnnotationReport, output: Option<&Path>) -> Result<String> {
    let value = json!({
        "output": output.map(|p| p.display().to_string()),
        "annotated_count": report.annotated.len(),
        "skipped_count": report.skipped.len(),
        "failure_count": report.failures().count(),
        "annotated": report.annotated,
        "skipped": report.skipped,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FunctionDoc, SkipReason, SkippedSignature};

    fn sample() -> AnnotationReport {
        AnnotationReport {
            annotated: vec![FunctionDoc {
                name: "add".to_string(),
                line: 3,
                params: vec!["a".to_string(), "b".to_string()],
                returns: Some("a + b".to_string()),
            }],
            skipped: vec![
                SkippedSignature {
                    name: "render".to_string(),
                    line: 9,
                    reason: SkipReason::Excluded {
                        pattern: "render".to_string(),
                    },
                },
                SkippedSignature {
                    name: "broken".to_string(),
                    line: 12,
                    reason: SkipReason::UnbalancedBraces,
                },
            ],
        }
    }

    #[test]
    fn test_text_summary() {
        let text = render_report(&sample(), Some(Path::new("data/1.js")), OutputFormat::Text).unwrap();
        assert!(text.starts_with("annotated 1 function(s), skipped 2 (1 failure(s))\n"));
        assert!(text.contains("  + 3:add(a, b) -> a + b\n"));
        assert!(text.contains("  - 9:render excluded by `render`\n"));
        assert!(text.contains("  ! 12:broken body never closes\n"));
        assert!(text.ends_with("wrote data/1.js\n"));
    }

    #[test]
    fn test_json_summary() {
        let raw = render_report(&sample(), None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["annotated_count"], 1);
        assert_eq!(value["failure_count"], 1);
        assert!(value["output"].is_null());
        assert_eq!(value["annotated"][0]["params"][1], "b");
        assert_eq!(value["skipped"][1]["reason"]["kind"], "unbalanced_braces");
    }

    #[test]
    fn test_unterminated_literal_marked_as_failure() {
        let report = AnnotationReport {
            annotated: Vec::new(),
            skipped: vec![SkippedSignature {
                name: "go".to_string(),
                line: 5,
                reason: SkipReason::UnterminatedLiteral { opened_line: 3 },
            }],
        };
        let text = render_report(&report, None, OutputFormat::Text).unwrap();
        assert!(text.contains("(1 failure(s))"));
        assert!(text.contains("  ! 5:go after unclosed literal from line 3\n"));
    }

    #[test]
    fn test_empty_text_summary() {
        let text = render_report(&AnnotationReport::default(), None, OutputFormat::Text).unwrap();
        assert_eq!(text, "annotated 0 function(s), skipped 0 (0 failure(s))\n");
    }
}
