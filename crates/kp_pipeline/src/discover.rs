//! File discovery and output-path mapping.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::FileError;

/// Normalize an extension to lowercase with a leading dot (`IN` → `.in`).
pub fn normalize_ext(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Normalize and dedupe a list of extensions, keeping first-seen order.
pub fn normalize_exts<S: AsRef<str>>(exts: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(exts.len());
    for e in exts {
        let n = normalize_ext(e.as_ref());
        if !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// True iff `path`'s extension (case-insensitive) is in `exts` (normalized).
pub fn has_ext(path: &Path, exts: &[String]) -> bool {
    match path.extension() {
        Some(e) => {
            let dotted = format!(".{}", e.to_string_lossy().to_lowercase());
            exts.iter().any(|x| *x == dotted)
        }
        None => false,
    }
}

/// Recursively list regular files under `root` whose extension is in `exts`,
/// in sorted path order. Unreadable entries are skipped with a warning.
pub fn discover_instances(root: &Path, exts: &[String]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && has_ext(path, exts) {
            tracing::debug!(path = %path.display(), "discovered instance");
            out.push(path.to_path_buf());
        }
    }
    out
}

/// `<output_root>/<relative dir>/<stem><suffix><ext>` for an input under `input_root`.
pub fn output_path_for(
    input_root: &Path,
    output_root: &Path,
    input: &Path,
    suffix: &str,
) -> Result<PathBuf, FileError> {
    let rel = input.strip_prefix(input_root).map_err(|_| {
        FileError::Path(format!("{} is not under {}", input.display(), input_root.display()))
    })?;
    let stem = rel
        .file_stem()
        .ok_or_else(|| FileError::Path(format!("{} has no file name", input.display())))?
        .to_string_lossy();
    let name = match rel.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    Ok(output_root.join(rel.with_file_name(name)))
}
