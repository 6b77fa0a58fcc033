//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::codemap::MatchMode;
use crate::config::Config;
use crate::driver::{RunOptions, DEFAULT_INPUT};
use crate::error::Result;
use crate::report::OutputFormat;

/// Insert JSDoc blocks above JavaScript function declarations
#[derive(Parser, Debug)]
#[command(name = "jsdoc-annotate")]
#[command(
    about = "Inserts @param/@return annotation blocks above JavaScript function declarations",
    long_about = "Inserts @param/@return annotation blocks above JavaScript function declarations.\n\n\
                  Signatures are found with a regular expression, not a parser: arrow functions, \
                  one-line bodies and signatures split across lines are not recognised, regex \
                  literals are not understood by the lexical matcher, and existing doc comments are \
                  not detected, so running twice adds a second block."
)]
#[command(version)]
pub struct Cli {
    /// JavaScript file to annotate
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    /// TOML config file
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the timestamp-named output file
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// How braces are counted when locating function bodies
    #[arg(long, value_enum)]
    pub matcher: Option<MatchMode>,

    /// Fail when a function body never closes
    #[arg(long)]
    pub strict: bool,

    /// Add an exclusion substring (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Do not use the default exclusions (constructor, component, ...)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Author written into the header
    #[arg(long)]
    pub author: Option<String>,

    /// Skip the header block
    #[arg(long)]
    pub no_header: bool,

    /// Print the annotated source to stdout instead of writing a file
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load the config file (if any) and apply flag overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.out_dir {
            config.output.dir = dir.clone();
        }
        if let Some(mode) = self.matcher {
            config.scan.matcher = mode;
        }
        if self.strict {
            config.scan.strict = true;
        }
        if self.no_default_excludes {
            config.scan.exclude.clear();
        }
        config.scan.exclude.extend(self.exclude.iter().cloned());
        if let Some(author) = &self.author {
            config.header.author = Some(author.clone());
        }
        if self.no_header {
            config.header.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Build run options from the parsed arguments
    pub fn run_options(&self) -> Result<RunOptions> {
        Ok(RunOptions {
            input: self.file.clone(),
            config: self.resolve_config()?,
            dry_run: self.dry_run,
        })
    }

    /// Log level used when no filter is set in the environment
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
