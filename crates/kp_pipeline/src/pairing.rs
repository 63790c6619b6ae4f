//! Locate the solution file paired with an instance.
//!
//! A candidate is a regular file whose name starts with the instance's stem
//! and whose extension is one of the solution extensions. The explicit
//! solutions directory is searched first (recursively), then the instance's
//! own directory (non-recursive). Sorted order breaks ties; the instance
//! file itself never pairs with itself.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::discover::has_ext;

/// Find a solution for `instance`, or `None` (a normal outcome).
pub fn find_solution(
    instance: &Path,
    solutions_dir: Option<&Path>,
    sol_exts: &[String],
) -> Option<PathBuf> {
    let stem = instance.file_stem()?.to_string_lossy().into_owned();
    let is_candidate = |p: &Path| -> bool {
        p.is_file()
            && has_ext(p, sol_exts)
            && p.file_name().map_or(false, |n| n.to_string_lossy().starts_with(stem.as_str()))
            && !same_file(p, instance)
    };

    if let Some(dir) = solutions_dir.filter(|d| d.is_dir()) {
        let hit = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(|e| e.into_path())
            .find(|p| is_candidate(p.as_path()));
        if hit.is_some() {
            return hit;
        }
    }

    let parent = match instance.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut local: Vec<PathBuf> = fs::read_dir(parent)
        .ok()?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .collect();
    local.sort();
    local.into_iter().find(|p| is_candidate(p.as_path()))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
