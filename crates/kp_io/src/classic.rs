//! Classic instances: `n capacity` header, then one `profit weight` line per
//! item. Item index is the line's position.

use std::fmt::Write as _;
use std::path::Path;

use kp_core::tokens::split_ints;
use kp_core::{ClassicInstance, ClassicItem, FormatError, Instance, ItemOrder};

use crate::{atomic, read_text_lossy, IoError, IoResult};

/// Render `inst` in classic form (trusts the `Instance` invariant).
pub fn render_classic(inst: &Instance, order: ItemOrder) -> String {
    let mut out = String::with_capacity(16 + inst.items.len() * 12);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", inst.n, inst.capacity);
    for it in inst.ordered_items(order) {
        let _ = writeln!(out, "{} {}", it.profit, it.weight);
    }
    out
}

/// Render and write atomically, creating parent directories as needed.
pub fn write_classic(path: &Path, inst: &Instance, order: ItemOrder) -> IoResult<()> {
    atomic::write_atomic(path, render_classic(inst, order).as_bytes())
}

/// Parse classic-instance text.
///
/// Lines are read in sequence without skipping blanks: a blank or missing
/// line where an item is expected is a bad item line. Lines after the n-th
/// item are ignored.
pub fn parse_classic(text: &str) -> Result<ClassicInstance, FormatError> {
    let mut lines = text.lines();

    let header = split_ints(lines.next().unwrap_or("")).map_err(|e| e.at_line(1))?;
    if header.len() < 2 {
        return Err(FormatError::BadHeader);
    }
    let n = usize::try_from(header[0]).map_err(|_| FormatError::NegativeCount(header[0]))?;
    let capacity = header[1];

    let mut items = Vec::new();
    for item in 1..=n {
        let parts = split_ints(lines.next().unwrap_or("")).map_err(|e| e.at_line(item + 1))?;
        if parts.len() < 2 {
            return Err(FormatError::BadClassicItem { item });
        }
        items.push(ClassicItem { profit: parts[0], weight: parts[1] });
    }

    Ok(ClassicInstance { n, capacity, items })
}

/// Read and parse a classic-instance file.
pub fn read_classic(path: &Path) -> IoResult<ClassicInstance> {
    let text = read_text_lossy(path)?;
    parse_classic(&text).map_err(|e| IoError::format(path, e))
}
