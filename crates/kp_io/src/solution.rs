//! Flexible solution files.
//!
//! ```text
//! declared_value
//! k
//! <line> x k      one of: "idx" | "idx mult" | "profit weight"
//! ```
//! Blank lines are ignored. Formats may be mixed line by line.
//!
//! A two-integer line is ambiguous. It is read as `idx mult` when both values
//! are non-negative, `idx < INDEX_LIMIT` and `mult < MULTIPLICITY_LIMIT`, and as
//! `profit weight` otherwise. Existing solution files depend on these exact
//! thresholds.

use std::path::Path;

use kp_core::tokens::{split_ints, to_count, to_int};
use kp_core::{FormatError, Solution, SolutionEntry};

use crate::{non_blank_lines, read_text_lossy, IoError, IoResult};

/// Upper bound (exclusive) for the first value of an `idx mult` line.
pub const INDEX_LIMIT: i64 = 10_000_000;
/// Upper bound (exclusive) for the second value of an `idx mult` line.
pub const MULTIPLICITY_LIMIT: i64 = 1_000;

/// Classify the integers of one item line. `None` for an empty line.
pub fn classify_parts(parts: &[i64]) -> Option<SolutionEntry> {
    match *parts {
        [] => None,
        [idx] => Some(SolutionEntry::IndexOnly(idx)),
        [a, b, ..] => {
            if a >= 0 && b >= 0 && a < INDEX_LIMIT && b < MULTIPLICITY_LIMIT {
                Some(SolutionEntry::IndexWithMultiplicity(a, b))
            } else {
                Some(SolutionEntry::ProfitWeight(a, b))
            }
        }
    }
}

/// Parse solution text into the declared value and its entries.
pub fn parse_solution(text: &str) -> Result<Solution, FormatError> {
    let lines = non_blank_lines(text);
    if lines.len() < 2 {
        return Err(FormatError::TooShort { found: lines.len() });
    }

    let declared_value = to_int(lines[0]).map_err(|e| e.at_line(1))?;
    let k = to_count(lines[1]).map_err(|e| e.at_line(2))?;
    if lines.len() < k.saturating_add(2) {
        return Err(FormatError::CountMismatch { declared: k as i64, found: lines.len() });
    }

    let mut entries = Vec::with_capacity(k);
    for (offset, line) in lines[2..2 + k].iter().enumerate() {
        let parts = split_ints(line).map_err(|e| e.at_line(offset + 3))?;
        let entry = classify_parts(&parts).ok_or_else(|| FormatError::BadItemLine {
            line: offset + 3,
            content: (*line).to_string(),
        })?;
        entries.push(entry);
    }

    Ok(Solution { declared_value, entries })
}

/// Read and parse a solution file.
pub fn read_solution(path: &Path) -> IoResult<Solution> {
    let text = read_text_lossy(path)?;
    parse_solution(&text).map_err(|e| IoError::format(path, e))
}
