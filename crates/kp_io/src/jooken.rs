//! Jooken/Pisinger source instances.
//!
//! Layout (blank lines ignored; line numbers below are positions in the
//! non-blank sequence):
//! ```text
//! n
//! idx_0 profit_0 weight_0
//! ...
//! idx_{n-1} profit_{n-1} weight_{n-1}
//! capacity
//! ```
//! Item lines need at least three tokens. Extra tokens are ignored but must
//! still be integers.

use std::path::Path;

use kp_core::tokens::{split_ints, to_count, to_int};
use kp_core::{FormatError, Instance, Item};

use crate::{non_blank_lines, read_text_lossy, IoError, IoResult};

/// Parse source-instance text.
pub fn parse_jooken(text: &str) -> Result<Instance, FormatError> {
    let lines = non_blank_lines(text);
    if lines.len() < 2 {
        return Err(FormatError::TooShort { found: lines.len() });
    }

    let n = to_count(lines[0]).map_err(|e| e.at_line(1))?;
    if lines.len() < n.saturating_add(2) {
        return Err(FormatError::CountMismatch { declared: n as i64, found: lines.len() });
    }

    let mut items = Vec::with_capacity(n);
    for (offset, line) in lines[1..=n].iter().enumerate() {
        let parts = split_ints(line).map_err(|e| e.at_line(offset + 2))?;
        if parts.len() < 3 {
            return Err(FormatError::BadItemLine { line: offset + 2, content: (*line).to_string() });
        }
        items.push(Item { original_index: parts[0], profit: parts[1], weight: parts[2] });
    }

    let capacity = to_int(lines[n + 1]).map_err(|e| e.at_line(n + 2))?;
    Ok(Instance { n, capacity, items })
}

/// Read and parse a source-instance file.
pub fn read_jooken(path: &Path) -> IoResult<Instance> {
    let text = read_text_lossy(path)?;
    parse_jooken(&text).map_err(|e| IoError::format(path, e))
}
