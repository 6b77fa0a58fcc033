//! jsdoc-annotate: JSDoc block generator for JavaScript sources
//!
//! Scans a JavaScript file for function declarations, inserts a comment
//! block above each one listing its parameters and trailing return
//! expression, and prepends an author/date header.
//!
//! Signatures are found with a regular expression, not a parser. Function
//! bodies are located by brace counting, optionally skipping string and
//! comment content (see [`codemap`]).
//!
//! # Example
//!
//! ```
//! use jsdoc_annotate::{annotate_source, AnnotateOptions};
//!
//! let source = "function add(a, b) {\n  return a + b;\n}\n";
//! let annotated = annotate_source(source, &AnnotateOptions::default()).unwrap();
//!
//! assert!(annotated.text.contains(" * @param {Object} a\n"));
//! assert!(annotated.text.contains(" * @return {Object} a + b\n"));
//! ```

pub mod annotate;
pub mod braces;
pub mod cli;
pub mod codemap;
pub mod config;
pub mod driver;
pub mod error;
pub mod header;
pub mod lang;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod schema;
pub mod utils;

// Re-export commonly used types
pub use annotate::{format_annotation, insert_annotations, AnnotationStyle, Insertion};
pub use braces::{match_block, FunctionRange};
pub use cli::Cli;
pub use codemap::{CodeMap, MatchMode};
pub use config::Config;
pub use driver::{run, run_at, RunOptions, RunOutcome};
pub use error::{AnnotateError, Result};
pub use header::{generate_header, HeaderInfo};
pub use lang::Lang;
pub use params::{describe, extract_params};
pub use pipeline::{annotate_source, AnnotateOptions, Annotated};
pub use report::{render_report, OutputFormat};
pub use scanner::{find_signatures, scan_signatures, ExclusionFilter, Signature};
pub use schema::{AnnotationReport, FunctionDoc, SkipReason, SkippedSignature};
