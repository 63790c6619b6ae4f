//! Batch runner: discovery, (parallel) per-file jobs, summary.

use std::path::PathBuf;

use crate::discover::discover_instances;
use crate::job::process_file;
use crate::report::Reporter;
use crate::{ConvertOptions, FileOutcome, PipelineError, ValidationStatus};

/// Counters over a finished batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub discovered: usize,
    pub converted: usize,
    pub failed: usize,
    pub validated: usize,
    pub no_solution: usize,
    pub validation_failed: usize,
    pub infeasible: usize,
    pub value_mismatch: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut s = BatchSummary { discovered: outcomes.len(), ..Default::default() };
        for o in outcomes {
            let Ok(r) = &o.result else {
                s.failed += 1;
                continue;
            };
            s.converted += 1;
            match &r.validation {
                ValidationStatus::NotRequested => {}
                ValidationStatus::NoSolution => s.no_solution += 1,
                ValidationStatus::Checked { result, .. } => {
                    s.validated += 1;
                    if !result.feasible {
                        s.infeasible += 1;
                    }
                    if !result.value_match {
                        s.value_mismatch += 1;
                    }
                }
                ValidationStatus::Failed { .. } => s.validation_failed += 1,
            }
        }
        s
    }
}

/// Outcomes in discovery order plus their summary.
#[derive(Debug)]
pub struct BatchOutcome {
    pub outcomes: Vec<FileOutcome>,
    pub summary: BatchSummary,
}

/// Run the converter over `opts.input_dir`.
///
/// Fails only when the input directory is missing or holds no matching
/// instance; every per-file problem ends up inside `BatchOutcome::outcomes`.
/// `reporter` sees each file as soon as it finishes (completion order).
pub fn run_batch(opts: &ConvertOptions, reporter: &dyn Reporter) -> Result<BatchOutcome, PipelineError> {
    if !opts.input_dir.is_dir() {
        return Err(PipelineError::InputMissing(opts.input_dir.display().to_string()));
    }

    let files = discover_instances(&opts.input_dir, &opts.exts);
    if files.is_empty() {
        return Err(PipelineError::NoInstances {
            root: opts.input_dir.display().to_string(),
            exts: opts.exts.clone(),
        });
    }
    tracing::info!("{} instance file(s) under {}", files.len(), opts.input_dir.display());

    let run = |p: &PathBuf| {
        let outcome = process_file(p, opts);
        reporter.report(&outcome);
        outcome
    };

    let outcomes = execute(&files, opts.jobs, run)?;
    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        converted = summary.converted,
        failed = summary.failed,
        validated = summary.validated,
        "batch finished"
    );
    Ok(BatchOutcome { outcomes, summary })
}

#[cfg(feature = "parallel")]
fn execute<F>(files: &[PathBuf], jobs: usize, run: F) -> Result<Vec<FileOutcome>, PipelineError>
where
    F: Fn(&PathBuf) -> FileOutcome + Sync + Send,
{
    use rayon::prelude::*;

    if jobs == 1 {
        return Ok(files.iter().map(run).collect());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
    // `collect` on an indexed parallel iterator keeps input order.
    Ok(pool.install(|| files.par_iter().map(run).collect()))
}

#[cfg(not(feature = "parallel"))]
fn execute<F>(files: &[PathBuf], _jobs: usize, run: F) -> Result<Vec<FileOutcome>, PipelineError>
where
    F: Fn(&PathBuf) -> FileOutcome,
{
    Ok(files.iter().map(run).collect())
}
