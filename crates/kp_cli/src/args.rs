// crates/kp_cli/src/args.rs
//
// CLI argument surface (types + validation helpers).
//
// Rules:
// - --input_dir / --output_dir are required; existence of the input
//   directory is checked by the pipeline (exit code 1)
// - --ext / --sol-ext accept one or more extensions, with or without the dot
// - --suffix must not contain a path separator (outputs stay under --output_dir)

use clap::Parser;
use std::path::PathBuf;

use kp_core::ItemOrder;
use kp_pipeline::{discover::normalize_exts, ConvertOptions};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kp-convert",
    version,
    disable_help_subcommand = true,
    about = "Convert Jooken/Pisinger knapsack instances to the classic format, optionally validating paired solutions"
)]
pub struct Args {
    // --- Inputs & outputs ---
    /// Root directory scanned recursively for instance files.
    #[arg(short = 'i', long = "input_dir")]
    pub input_dir: PathBuf,
    /// Root directory for converted files (subdirectories are mirrored).
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: PathBuf,
    /// Instance extensions to consider (e.g. .in .dat .txt).
    #[arg(long, num_args = 1.., default_value = ".in")]
    pub ext: Vec<String>,
    /// Inserted before the extension of each output file name.
    #[arg(long, default_value = "_clean", allow_hyphen_values = true)]
    pub suffix: String,

    // --- Conversion control ---
    /// Emit items sorted by the index read from the first column.
    #[arg(long = "sort_by_index")]
    pub sort_by_index: bool,
    /// Parse and report, but write no files.
    #[arg(long = "dry_run")]
    pub dry_run: bool,

    // --- Solution validation ---
    /// Validate the solution file paired with each instance.
    #[arg(long)]
    pub validate: bool,
    /// Directory searched (recursively) for solutions before the instance's own directory.
    #[arg(long = "solutions-dir")]
    pub solutions_dir: Option<PathBuf>,
    /// Solution file extensions (e.g. .sol .txt).
    #[arg(long = "sol-ext", num_args = 1.., default_value = ".txt")]
    pub sol_ext: Vec<String>,

    // --- Execution & output ---
    /// Worker threads (0 = one per core, 1 = sequential).
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
    /// Write every per-file record as canonical JSON to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Suppress the final summary line.
    #[arg(long)]
    pub quiet: bool,
    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    EmptyExt(&'static str),
    BadSuffix(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            EmptyExt(flag) => write!(f, "{flag}: extensions must not be empty"),
            BadSuffix(s) => write!(f, "--suffix must not contain a path separator: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Normalize extension lists and check the remaining invariants.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    args.ext = normalize_checked(&args.ext, "--ext")?;
    args.sol_ext = normalize_checked(&args.sol_ext, "--sol-ext")?;
    if args.suffix.contains('/') || args.suffix.contains('\\') {
        return Err(CliError::BadSuffix(args.suffix.clone()));
    }
    Ok(args)
}

fn normalize_checked(exts: &[String], flag: &'static str) -> Result<Vec<String>, CliError> {
    let out = normalize_exts(exts);
    if out.is_empty() || out.iter().any(|e| e == ".") {
        return Err(CliError::EmptyExt(flag));
    }
    Ok(out)
}

impl Args {
    /// Typed pipeline configuration.
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            exts: self.ext.clone(),
            suffix: self.suffix.clone(),
            order: if self.sort_by_index { ItemOrder::ByOriginalIndex } else { ItemOrder::AsRead },
            dry_run: self.dry_run,
            validate: self.validate,
            solutions_dir: self.solutions_dir.clone(),
            sol_exts: self.sol_ext.clone(),
            jobs: self.jobs,
        }
    }
}
