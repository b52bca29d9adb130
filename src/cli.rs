use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Print a JSON summary of the generated artifacts
    Json,
    /// Write one Rust source file per artifact
    Rust,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Rust => "rust",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "accessorgen")]
#[command(about = "Generate template value resolvers from type metadata", long_about = None)]
pub struct Args {
    /// Type index file or directory of index files (JSON or YAML)
    #[arg(long, value_name = "FILE|DIR")]
    pub index: PathBuf,

    /// Generator settings file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Type to generate accessors for. Can be specified multiple times.
    #[arg(long = "type", value_name = "NAME")]
    pub types: Vec<String>,

    /// Output directory for generated sources (required with --format rust)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Output format (json, rust)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_path(&self.index)?;
        if let Some(ref settings) = self.settings {
            if !settings.is_file() {
                anyhow::bail!("Settings file does not exist: {}", settings.display());
            }
        }
        if self.format == OutputFormat::Rust && self.out.is_none() {
            anyhow::bail!("--out is required with --format rust");
        }
        Ok(())
    }
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    std::fs::metadata(path).with_context(|| format!("Cannot read: {}", path.display()))?;
    if !path.is_file() && !path.is_dir() {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }
    Ok(())
}
