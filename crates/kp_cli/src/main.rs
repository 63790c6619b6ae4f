// crates/kp_cli/src/main.rs
//
// Exit codes, logging init, and the run path
// (args → options → batch → optional JSON report → summary).

mod args; // sibling module in this crate

mod exitcodes {
    /// Batch ran; per-file failures do not change this.
    pub const OK: u8 = 0;
    /// Input directory missing.
    pub const INPUT_MISSING: u8 = 1;
    /// No matching instance file, or invalid arguments.
    pub const NO_INSTANCES: u8 = 2;
    pub const USAGE: u8 = 2;
    /// Run-level I/O (JSON report, thread pool).
    pub const IO: u8 = 4;
}

use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use kp_pipeline::{report, run_batch, BatchSummary, ConsoleReporter, PipelineError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("kp-convert: error: {e}");
            return ExitCode::from(exitcodes::USAGE);
        }
    };

    init_tracing(&args.log_level);

    match run_once(&args) {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("kp-convert: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

/// RUST_LOG wins; otherwise `--log-level`. Logs go to stderr.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_once(args: &Args) -> Result<(), PipelineError> {
    let opts = args.to_options();
    let reporter = ConsoleReporter::new();
    let batch = run_batch(&opts, &reporter)?;

    if let Some(path) = &args.report {
        report::write_json_report(path, &batch.outcomes)?;
        tracing::info!("report written to {}", path.display());
    }

    if !args.quiet {
        eprintln!("{}", summary_line(&batch.summary, args.validate));
    }
    Ok(())
}

fn summary_line(s: &BatchSummary, validate: bool) -> String {
    let mut line = format!(
        "done: {} file(s), {} converted, {} failed",
        s.discovered, s.converted, s.failed
    );
    if validate {
        line.push_str(&format!(
            " | validated={} no_solution={} val_errors={} infeasible={} value_diff={}",
            s.validated, s.no_solution, s.validation_failed, s.infeasible, s.value_mismatch
        ));
    }
    line
}

/// Map batch-fatal errors to the exit-code table.
fn map_error(e: &PipelineError) -> u8 {
    use exitcodes::*;
    match e {
        PipelineError::InputMissing(_) => INPUT_MISSING,
        PipelineError::NoInstances { .. } => NO_INSTANCES,
        PipelineError::ThreadPool(_) | PipelineError::Report(_) => IO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_table() {
        assert_eq!(map_error(&PipelineError::InputMissing("x".into())), 1);
        assert_eq!(
            map_error(&PipelineError::NoInstances { root: "x".into(), exts: vec![".in".into()] }),
            2
        );
        assert_eq!(map_error(&PipelineError::ThreadPool("x".into())), 4);
    }

    #[test]
    fn summary_mentions_validation_only_when_enabled() {
        let s = BatchSummary { discovered: 3, converted: 2, failed: 1, ..Default::default() };
        assert_eq!(summary_line(&s, false), "done: 3 file(s), 2 converted, 1 failed");
        assert!(summary_line(&s, true).contains("validated=0"));
    }
}
