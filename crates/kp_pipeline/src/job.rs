//! One file's pipeline: read → render/write classic → (pair → re-read → validate).

use std::path::Path;

use kp_core::{ClassicInstance, ValidationResult};
use kp_io::{atomic, classic, jooken, solution, IoError};

use crate::discover::output_path_for;
use crate::pairing::find_solution;
use crate::{
    ConvertOptions, FileError, FileOutcome, FileReport, ValidationError, ValidationStatus,
};

/// Run the whole per-file pipeline. Never panics on bad input; every failure
/// is captured in the returned outcome.
pub fn process_file(path: &Path, opts: &ConvertOptions) -> FileOutcome {
    let result = convert_one(path, opts);
    match &result {
        Ok(r) => tracing::debug!(input = %path.display(), output = %r.output.display(), "converted"),
        Err(e) => tracing::debug!(input = %path.display(), kind = %e.kind(), "conversion failed: {e}"),
    }
    FileOutcome { input: path.to_path_buf(), result }
}

fn convert_one(path: &Path, opts: &ConvertOptions) -> Result<FileReport, FileError> {
    let inst = jooken::read_jooken(path).map_err(FileError::Read)?;
    let output = output_path_for(&opts.input_dir, &opts.output_dir, path, &opts.suffix)?;

    let text = classic::render_classic(&inst, opts.order);
    if !opts.dry_run {
        atomic::write_atomic(&output, text.as_bytes()).map_err(FileError::Write)?;
    }

    let validation = if opts.validate {
        validate_paired(path, &output, &text, opts)
    } else {
        ValidationStatus::NotRequested
    };

    Ok(FileReport {
        n: inst.n,
        capacity: inst.capacity,
        items: inst.items.len(),
        written: !opts.dry_run,
        output,
        validation,
    })
}

fn validate_paired(
    instance: &Path,
    output: &Path,
    rendered: &str,
    opts: &ConvertOptions,
) -> ValidationStatus {
    let Some(sol_path) = find_solution(instance, opts.solutions_dir.as_deref(), &opts.sol_exts)
    else {
        return ValidationStatus::NoSolution;
    };

    // Dry runs never touch disk, so the classic text is re-parsed from memory.
    let classic_inst = if opts.dry_run {
        classic::parse_classic(rendered).map_err(|source| {
            ValidationError::Io(IoError::Format { path: output.display().to_string(), source })
        })
    } else {
        classic::read_classic(output).map_err(ValidationError::from)
    };

    match classic_inst.and_then(|ci| check_against(&ci, &sol_path)) {
        Ok(result) => ValidationStatus::Checked { solution: sol_path, result },
        Err(error) => {
            tracing::debug!(solution = %sol_path.display(), kind = %error.kind(), "validation failed: {error}");
            ValidationStatus::Failed { solution: sol_path, error }
        }
    }
}

fn check_against(inst: &ClassicInstance, sol_path: &Path) -> Result<ValidationResult, ValidationError> {
    let sol = solution::read_solution(sol_path)?;
    Ok(kp_algo::validate_solution(inst, &sol)?)
}

/// Validate `solution_path` against the classic instance at `classic_path`.
pub fn validate_solution_files(
    classic_path: &Path,
    solution_path: &Path,
) -> Result<ValidationResult, ValidationError> {
    let inst = classic::read_classic(classic_path)?;
    check_against(&inst, solution_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_core::ItemOrder;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        _td: tempfile::TempDir,
        input: PathBuf,
        output: PathBuf,
    }

    fn fixture() -> Fixture {
        let td = tempfile::tempdir().unwrap();
        let input = td.path().join("in");
        let output = td.path().join("out");
        fs::create_dir_all(input.join("set")).unwrap();
        Fixture { _td: td, input, output }
    }

    fn opts(f: &Fixture) -> ConvertOptions {
        ConvertOptions {
            input_dir: f.input.clone(),
            output_dir: f.output.clone(),
            jobs: 1,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn converts_and_writes_classic_file() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "3\n2 3 2\n0 6 5\n1 10 4\n10\n").unwrap();

        let mut o = opts(&f);
        o.order = ItemOrder::ByOriginalIndex;
        let out = process_file(&src, &o);
        let report = out.result.unwrap();
        assert_eq!(report.output, f.output.join("set/p_clean.in"));
        assert!(report.written);
        assert_eq!((report.n, report.capacity, report.items), (3, 10, 3));
        assert!(matches!(report.validation, ValidationStatus::NotRequested));
        assert_eq!(fs::read_to_string(&report.output).unwrap(), "3 10\n6 5\n10 4\n3 2\n");
    }

    #[test]
    fn dry_run_writes_nothing() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "1\n0 1 1\n5\n").unwrap();
        let mut o = opts(&f);
        o.dry_run = true;
        let report = process_file(&src, &o).result.unwrap();
        assert!(!report.written);
        assert!(!report.output.exists());
        assert!(!f.output.exists());
    }

    #[test]
    fn malformed_instance_is_a_per_file_error() {
        let f = fixture();
        let src = f.input.join("set/bad.in");
        fs::write(&src, "5\n0 1 1\n1 1 1\n2 1 1\n10\n").unwrap();
        let out = process_file(&src, &opts(&f));
        let err = out.result.unwrap_err();
        assert_eq!(err.kind(), kp_core::ErrorKind::Format);
        assert!(err.to_string().contains("count mismatch"));
    }

    #[test]
    fn validates_paired_solution() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "3\n0 6 5\n1 10 4\n2 3 2\n10\n").unwrap();
        fs::write(f.input.join("set/p.txt"), "13\n2\n1\n2\n").unwrap();
        let mut o = opts(&f);
        o.validate = true;
        let report = process_file(&src, &o).result.unwrap();
        match report.validation {
            ValidationStatus::Checked { solution, result } => {
                assert_eq!(solution, f.input.join("set/p.txt"));
                assert_eq!(result.recomputed_value, 13);
                assert_eq!(result.total_weight, 6);
                assert!(result.feasible && result.value_match);
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn dry_run_validation_uses_rendered_text() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "3\n0 6 5\n1 10 4\n2 3 2\n10\n").unwrap();
        fs::write(f.input.join("set/p.txt"), "19\n3\n0\n1\n2\n").unwrap();
        let mut o = opts(&f);
        o.validate = true;
        o.dry_run = true;
        let report = process_file(&src, &o).result.unwrap();
        match report.validation {
            ValidationStatus::Checked { result, .. } => {
                assert_eq!(result.total_weight, 11);
                assert!(!result.feasible);
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn bad_solution_fails_validation_but_not_conversion() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "3\n0 6 5\n1 10 4\n2 3 2\n10\n").unwrap();
        fs::write(f.input.join("set/p.txt"), "7\n1\n7 4000\n").unwrap();
        let mut o = opts(&f);
        o.validate = true;
        let report = process_file(&src, &o).result.unwrap();
        assert!(report.output.exists());
        match report.validation {
            ValidationStatus::Failed { error, .. } => {
                assert_eq!(error.kind(), kp_core::ErrorKind::Lookup)
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn missing_solution_is_reported_as_such() {
        let f = fixture();
        let src = f.input.join("set/p.in");
        fs::write(&src, "1\n0 1 1\n5\n").unwrap();
        let mut o = opts(&f);
        o.validate = true;
        let report = process_file(&src, &o).result.unwrap();
        assert!(matches!(report.validation, ValidationStatus::NoSolution));
    }

    #[test]
    fn standalone_file_validation() {
        let td = tempfile::tempdir().unwrap();
        let c = td.path().join("c.in");
        let s = td.path().join("s.txt");
        fs::write(&c, "2 5\n10 4\n10 4\n").unwrap();
        fs::write(&s, "20\n2\n10 4000\n10 4000\n").unwrap();
        // "10 4000": second value >= 1000, so these are profit/weight lines
        // that do not exist in the instance.
        let err = validate_solution_files(&c, &s).unwrap_err();
        assert_eq!(err.kind(), kp_core::ErrorKind::Lookup);

        fs::write(&s, "20\n2\n0\n1\n").unwrap();
        let r = validate_solution_files(&c, &s).unwrap();
        assert_eq!(r.recomputed_value, 20);
        assert_eq!(r.total_weight, 8);
        assert!(!r.feasible);
    }

    #[test]
    fn small_two_value_line_resolves_as_index_not_pair() {
        let td = tempfile::tempdir().unwrap();
        let c = td.path().join("c.in");
        let s = td.path().join("s.txt");
        fs::write(&c, "3 10\n6 5\n10 4\n3 2\n").unwrap();
        // "7 4" is read as index 7 with multiplicity 4, never as a
        // (profit, weight) pair.
        fs::write(&s, "7\n1\n7 4\n").unwrap();
        let err = validate_solution_files(&c, &s).unwrap_err();
        assert_eq!(err.kind(), kp_core::ErrorKind::Index);
        assert!(err.to_string().contains("index out of range: 7 (n=3)"));
    }
}
