//! Per-file report lines and the JSON record export.
//!
//! Line shapes (stdout unless noted):
//! - `[OK ] <in> -> <out> | n=.., capacity=.., items=..` (`[DRY]` in dry-run)
//! - `      [VAL] <solution> | value_decl=.. recomp=.. | weight=../.. | feas=OK|OVER | value_match=OK|DIFF | items=..`
//! - `      [VAL] no matching solution file found`
//! - `      [VAL-ERR] <solution>: <error>` (stderr)
//! - `[ERR] failed to process <in>: <error>` (stderr)

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use kp_core::ValidationResult;
use kp_io::canonical_json;
use serde::Serialize;

use crate::{FileOutcome, PipelineError, ValidationStatus};

/// Receives each finished file. Called from worker threads.
pub trait Reporter: Sync {
    fn report(&self, outcome: &FileOutcome);
}

/// Rendered report text for one file, split by destination stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderedLines {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Build the human-readable lines for one outcome.
pub fn render_lines(outcome: &FileOutcome) -> RenderedLines {
    let mut out = RenderedLines::default();
    let input = outcome.input.display();

    let report = match &outcome.result {
        Ok(r) => r,
        Err(e) => {
            out.stderr.push(format!("[ERR] failed to process {input}: {e}"));
            return out;
        }
    };

    let tag = if report.written { "[OK ]" } else { "[DRY]" };
    out.stdout.push(format!(
        "{tag} {input} -> {} | n={}, capacity={}, items={}",
        report.output.display(),
        report.n,
        report.capacity,
        report.items
    ));

    match &report.validation {
        ValidationStatus::NotRequested => {}
        ValidationStatus::NoSolution => {
            out.stdout.push("      [VAL] no matching solution file found".to_string());
        }
        ValidationStatus::Checked { solution, result } => {
            out.stdout.push(format!("      [VAL] {} | {}", file_name(solution), metrics(result)));
        }
        ValidationStatus::Failed { solution, error } => {
            out.stderr.push(format!("      [VAL-ERR] {}: {error}", file_name(solution)));
        }
    }
    out
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

fn metrics(r: &ValidationResult) -> String {
    format!(
        "value_decl={} recomp={} | weight={}/{} | feas={} | value_match={} | items={}",
        r.declared_value,
        r.recomputed_value,
        r.total_weight,
        r.capacity,
        if r.feasible { "OK" } else { "OVER" },
        if r.value_match { "OK" } else { "DIFF" },
        r.num_items_selected
    )
}

/// Prints each file's lines as one block; blocks from different workers
/// never interleave.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    lock: Mutex<()>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, outcome: &FileOutcome) {
        let lines = render_lines(outcome);
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        // Write errors (closed pipe) must not abort a worker.
        if !lines.stdout.is_empty() {
            let mut so = std::io::stdout().lock();
            for l in &lines.stdout {
                let _ = writeln!(so, "{l}");
            }
            let _ = so.flush();
        }
        if !lines.stderr.is_empty() {
            let mut se = std::io::stderr().lock();
            for l in &lines.stderr {
                let _ = writeln!(se, "{l}");
            }
        }
    }
}

/// One entry of the JSON export consumed by downstream reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRecord {
    pub instance: String,
    pub output: Option<String>,
    pub solution: Option<String>,
    /// `converted` | `validated` | `no_solution` | `validation_error` | `conversion_error`
    pub status: &'static str,
    pub error_kind: Option<String>,
    pub error: Option<String>,
    pub result: Option<ValidationResult>,
}

impl ValidationRecord {
    pub fn from_outcome(outcome: &FileOutcome) -> Self {
        let mut rec = ValidationRecord {
            instance: outcome.input.display().to_string(),
            output: None,
            solution: None,
            status: "converted",
            error_kind: None,
            error: None,
            result: None,
        };
        match &outcome.result {
            Err(e) => {
                rec.status = "conversion_error";
                rec.error_kind = Some(e.kind().to_string());
                rec.error = Some(e.to_string());
            }
            Ok(r) => {
                rec.output = Some(r.output.display().to_string());
                match &r.validation {
                    ValidationStatus::NotRequested => {}
                    ValidationStatus::NoSolution => rec.status = "no_solution",
                    ValidationStatus::Checked { solution, result } => {
                        rec.status = "validated";
                        rec.solution = Some(solution.display().to_string());
                        rec.result = Some(*result);
                    }
                    ValidationStatus::Failed { solution, error } => {
                        rec.status = "validation_error";
                        rec.solution = Some(solution.display().to_string());
                        rec.error_kind = Some(error.kind().to_string());
                        rec.error = Some(error.to_string());
                    }
                }
            }
        }
        rec
    }
}

/// Write all outcomes (in the given order) as a canonical JSON array.
pub fn write_json_report(path: &Path, outcomes: &[FileOutcome]) -> Result<(), PipelineError> {
    let records: Vec<ValidationRecord> = outcomes.iter().map(ValidationRecord::from_outcome).collect();
    canonical_json::write_canonical_file(path, &records)?;
    Ok(())
}
