//! Configuration loading
//!
//! Settings come from an optional TOML file; every section and key may be
//! omitted. Command-line flags are applied on top by [`crate::cli`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::annotate::{AnnotationStyle, DEFAULT_TYPE_TAG};
use crate::codemap::MatchMode;
use crate::error::{AnnotateError, Result};
use crate::header::{is_valid_date_format, HeaderInfo, DEFAULT_DATE_FORMAT, DEFAULT_VERSION};
use crate::pipeline::AnnotateOptions;
use crate::scanner::{ExclusionFilter, DEFAULT_EXCLUSIONS};

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "js";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub annotation: AnnotationConfig,
    pub header: HeaderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Substrings that keep a signature from being annotated
    pub exclude: Vec<String>,
    pub matcher: MatchMode,
    /// Abort on the first function whose body never closes
    pub strict: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            matcher: MatchMode::default(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationConfig {
    pub type_tag: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            type_tag: DEFAULT_TYPE_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    pub enabled: bool,
    pub author: Option<String>,
    pub version: String,
    pub copyright: Option<String>,
    pub date_format: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            author: None,
            version: DEFAULT_VERSION.to_string(),
            copyright: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnnotateError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| AnnotateError::io(path, e))?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            AnnotateError::Config { message } => AnnotateError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| AnnotateError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would fail later in the run
    pub fn validate(&self) -> Result<()> {
        if !is_valid_date_format(&self.header.date_format) {
            return Err(AnnotateError::Config {
                message: format!("invalid header.date_format `{}`", self.header.date_format),
            });
        }
        let ext = &self.output.extension;
        if ext.is_empty() || ext.contains(['/', '\\', '.']) {
            return Err(AnnotateError::Config {
                message: format!("invalid output.extension `{}`", ext),
            });
        }
        if self.annotation.type_tag.trim().is_empty() {
            return Err(AnnotateError::Config {
                message: "annotation.type_tag must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Options for the in-memory transformation
    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            exclusions: ExclusionFilter::new(self.scan.exclude.iter().cloned()),
            mode: self.scan.matcher,
            strict: self.scan.strict,
            style: AnnotationStyle {
                type_tag: self.annotation.type_tag.clone(),
            },
        }
    }

    /// Header fields, or `None` when the header is disabled
    pub fn header_info(&self) -> Option<HeaderInfo> {
        if !self.header.enabled {
            return None;
        }
        Some(HeaderInfo {
            author: self.header.author.clone(),
            version: self.header.version.clone(),
            copyright: self.header.copyright.clone(),
            date_format: self.header.date_format.clone(),
        })
    }
}
