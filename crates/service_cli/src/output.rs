//! Timestamped output directories.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Creates a fresh `YYYYMMDD_HHMMSS` directory under `root`.
///
/// `root` is created if missing. If a directory for the current second
/// already exists, a `_1`, `_2`, ... suffix is appended.
pub fn create_timestamped_dir(root: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(root)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut candidate = root.join(&stamp);
    let mut suffix = 0;
    loop {
        match std::fs::create_dir(&candidate) {
            Ok(()) => break,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                suffix += 1;
                candidate = root.join(format!("{}_{}", stamp, suffix));
            }
            Err(e) => return Err(e),
        }
    }

    info!(path = %candidate.display(), "Output directory created");
    Ok(candidate)
}
