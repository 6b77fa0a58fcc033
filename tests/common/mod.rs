//! Shared helpers for jsdoc-annotate integration tests
//!
//! - `TestWorkspace` for writing inputs into a throwaway directory
//! - `fixture_path` for the bundled React component
//! - small assertions over annotated text

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use jsdoc_annotate::{AnnotationReport, FunctionDoc};
use tempfile::TempDir;

/// Path of a file under `fixtures/`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Temporary directory holding input files and the output directory
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write input");
        path
    }

    /// Output directory inside the workspace (not created)
    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Files currently in the output directory
    pub fn outputs(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.out_dir()) {
            Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Assert `block` appears directly above `line` in `text`
pub fn assert_block_above(text: &str, block: &str, line: &str) {
    let joined = format!("{}{}", block, line);
    assert!(
        text.contains(&joined),
        "expected block directly above `{}`\n--- text ---\n{}",
        line.trim_end(),
        text
    );
}

/// Number of annotation blocks opened with the given indent
pub fn count_blocks(text: &str, indent: &str) -> usize {
    let opener = format!("{}/**\n", indent);
    text.lines()
        .filter(|l| format!("{}\n", l) == opener)
        .count()
}

/// First annotated function called `name`
pub fn annotated_named<'a>(report: &'a AnnotationReport, name: &str) -> Option<&'a FunctionDoc> {
    report.annotated.iter().find(|d| d.name == name)
}

/// Whether `name` was skipped for any reason
pub fn was_skipped(report: &AnnotationReport, name: &str) -> bool {
    report.skipped.iter().any(|s| s.name == name)
}
