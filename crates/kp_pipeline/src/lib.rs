//! kp_pipeline: batch conversion surface
//! (discover → read → write classic → pair solution → re-read → validate → report).
//!
//! Each file runs as an independent job and yields a `FileOutcome` (a
//! per-file `Result`), so one malformed input never stops the batch. Only
//! `PipelineError` is batch-fatal.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use kp_core::{ErrorKind, ItemOrder, ValidationResult};
use kp_io::IoError;
use thiserror::Error;

pub mod batch;
pub mod discover;
pub mod job;
pub mod pairing;
pub mod report;

pub use batch::{run_batch, BatchOutcome, BatchSummary};
pub use job::{process_file, validate_solution_files};
pub use report::{ConsoleReporter, Reporter};

/// Typed configuration of one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Instance extensions, normalized (`.in`).
    pub exts: Vec<String>,
    /// Inserted between stem and extension of each output file.
    pub suffix: String,
    pub order: ItemOrder,
    /// Parse and render but write nothing.
    pub dry_run: bool,
    pub validate: bool,
    pub solutions_dir: Option<PathBuf>,
    /// Solution extensions, normalized (`.txt`).
    pub sol_exts: Vec<String>,
    /// Worker threads; 0 = one per core, 1 = sequential.
    pub jobs: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            exts: vec![".in".to_string()],
            suffix: "_clean".to_string(),
            order: ItemOrder::AsRead,
            dry_run: false,
            validate: false,
            solutions_dir: None,
            sol_exts: vec![".txt".to_string()],
            jobs: 0,
        }
    }
}

/// Batch-fatal errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input directory does not exist: {0}")]
    InputMissing(String),

    #[error("no instance files matching {exts:?} under {root}")]
    NoInstances { root: String, exts: Vec<String> },

    #[error("thread pool: {0}")]
    ThreadPool(String),

    #[error("report: {0}")]
    Report(#[from] IoError),
}

/// Conversion failure of one file (the file produces no classic output).
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Read(#[source] IoError),

    #[error("{0}")]
    Write(#[source] IoError),

    #[error("path error: {0}")]
    Path(String),
}

impl FileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileError::Read(e) | FileError::Write(e) => e.kind(),
            FileError::Path(_) => ErrorKind::Io,
        }
    }
}

/// Validation failure of one file (its conversion still succeeded).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Reconcile(#[from] kp_algo::ReconcileError),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Io(e) => e.kind(),
            ValidationError::Reconcile(e) => e.kind(),
        }
    }
}

/// What happened to the optional validation step of one file.
#[derive(Debug)]
pub enum ValidationStatus {
    NotRequested,
    /// No paired solution file; a normal outcome.
    NoSolution,
    Checked { solution: PathBuf, result: ValidationResult },
    Failed { solution: PathBuf, error: ValidationError },
}

/// Successful conversion of one file.
#[derive(Debug)]
pub struct FileReport {
    pub output: PathBuf,
    pub n: usize,
    pub capacity: i64,
    pub items: usize,
    /// False in dry-run mode.
    pub written: bool,
    pub validation: ValidationStatus,
}

/// Per-file result; never escapes as a batch error.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<FileReport, FileError>,
}
