//! Run driver: read input, annotate, prepend header, write output
//!
//! Each stage reports its own error. Output directory creation is
//! best-effort: a failure is logged and the write that follows reports the
//! real problem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AnnotateError, Result};
use crate::header::prepend_header;
use crate::lang::Lang;
use crate::pipeline::annotate_source;
use crate::schema::AnnotationReport;

/// Bundled fixture annotated when no input is given
pub const DEFAULT_INPUT: &str = "fixtures/send_order.js";

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub config: Config,
    /// Produce the annotated text without writing a file
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            input: input.into(),
            config,
            dry_run: false,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Written file, `None` on a dry run
    pub output_path: Option<PathBuf>,
    /// Header plus annotated source
    pub content: String,
    pub report: AnnotationReport,
}

/// Run with today's local date and the current time for the file name
pub fn run(options: &RunOptions) -> Result<RunOutcome> {
    run_at(options, Local::now().date_naive(), Utc::now().timestamp_millis())
}

/// Run with an explicit header date and output timestamp
pub fn run_at(options: &RunOptions, date: NaiveDate, millis: i64) -> Result<RunOutcome> {
    let lang = Lang::from_path(&options.input)?;
    let source = read_source(&options.input)?;
    debug!(
        path = %options.input.display(),
        lang = lang.name(),
        bytes = source.len(),
        "read input"
    );

    let annotated = annotate_source(&source, &options.config.annotate_options())?;
    info!(
        annotated = annotated.report.annotated.len(),
        skipped = annotated.report.skipped.len(),
        "transformed {}",
        options.input.display()
    );

    let content = match options.config.header_info() {
        Some(info) => prepend_header(&info, date, &annotated.text),
        None => annotated.text,
    };

    let output_path = if options.dry_run {
        None
    } else {
        let output = &options.config.output;
        ensure_output_dir(&output.dir);
        let path = output.dir.join(output_file_name(millis, &output.extension));
        write_output(&path, &content)?;
        info!(path = %path.display(), "wrote annotated file");
        Some(path)
    };

    Ok(RunOutcome {
        output_path,
        content,
        report: annotated.report,
    })
}

/// Read the input as UTF-8 text
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AnnotateError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|e| AnnotateError::io(path, e))
}

/// Create `dir` if missing. Returns whether it exists afterwards.
pub fn ensure_output_dir(dir: &Path) -> bool {
    if dir.is_dir() {
        return true;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "created output directory");
            true
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "could not create output directory");
            false
        }
    }
}

/// `<millis>.<ext>`
pub fn output_file_name(millis: i64, extension: &str) -> String {
    format!("{}.{}", millis, extension)
}

pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| AnnotateError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(1541404800000, "js"), "1541404800000.js");
    }

    #[test]
    fn test_ensure_output_dir_creates_nested() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let target = dir.path().join("a").join("b");
        assert!(ensure_output_dir(&target));
        assert!(target.is_dir());
        assert!(ensure_output_dir(&target));
    }

    #[test]
    fn test_ensure_output_dir_failure_is_not_fatal() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();
        assert!(!ensure_output_dir(&file.join("sub")));
    }

    #[test]
    fn test_read_missing_source() {
        let err = read_source(Path::new("/nonexistent/input.js")).unwrap_err();
        assert!(matches!(err, AnnotateError::FileNotFound { .. }));
    }
}
