//! Atomic file output.
//! - Parent directories are created on demand; a concurrent creator winning
//!   the race ("already exists") is not an error.
//! - Write: temp file in the target directory + fsync(temp) + rename;
//!   fsync(dir) on Unix.
//! - Fallback: if rename fails (e.g., cross-device), write directly to the
//!   target, fsync(target), then remove the temp file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{IoError, IoResult};

/// Create `dir` and its ancestors; tolerate concurrent creation.
pub fn ensure_dir(dir: &Path) -> IoResult<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(IoError::Write { path: dir.display().to_string(), msg: e.to_string() }),
    }
}

/// Write `bytes` to `path` atomically (with cross-device fallback).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => return Err(IoError::Path(format!("{} has no parent", path.display()))),
    };
    ensure_dir(parent)?;

    let werr = |e: io::Error| IoError::Write { path: path.display().to_string(), msg: e.to_string() };

    let tmp = make_unique_tmp_path(path);
    let res: io::Result<()> = (|| {
        let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
        tf.write_all(bytes)?;
        tf.sync_all()
    })();
    if let Err(e) = res {
        let _ = fs::remove_file(&tmp);
        return Err(werr(e));
    }

    match fs::rename(&tmp, path) {
        Ok(()) => {
            let _ = fsync_dir(parent);
            Ok(())
        }
        Err(_) => {
            let res: io::Result<()> = (|| {
                let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
                f.write_all(bytes)?;
                f.sync_all()
            })();
            let _ = fs::remove_file(&tmp);
            res.map_err(werr)?;
            let _ = fsync_dir(parent);
            Ok(())
        }
    }
}

/// Unique temp path next to `target`: "<filename>.<pid>.<counter>.tmp"
fn make_unique_tmp_path(target: &Path) -> PathBuf {
    use std::ffi::OsString;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);

    let fname = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let tmp_name: OsString = OsString::from(format!(".{fname}.{pid}.{n}.tmp"));

    match target.parent() {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let df = OpenOptions::new().read(true).open(dir)?;
    df.sync_all()
}

#[cfg(not(unix))]
#[inline]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
