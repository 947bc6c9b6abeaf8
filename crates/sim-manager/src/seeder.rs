//! Stats folder seeding from the shipped CSV templates.

use std::fs::{self, File, FileTimes};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StoreError};

/// Copies every `.csv` file in `template_dir` into `stats_dir`.
///
/// Matching is ASCII case-insensitive on the file name; non-files and other
/// extensions are skipped. Access and modification times are carried over
/// from the template. A missing `template_dir` is not an error: the stats
/// folder is simply left empty.
///
/// Returns the number of files copied.
pub fn seed_stats(template_dir: &Path, stats_dir: &Path) -> Result<usize> {
    if !template_dir.is_dir() {
        debug!(
            "No stats templates at {}, skipping seed",
            template_dir.display()
        );
        return Ok(0);
    }

    let entries = fs::read_dir(template_dir).map_err(|e| StoreError::io(template_dir, e))?;

    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(template_dir, e))?;
        let file_name = entry.file_name();
        if !is_csv(&file_name.to_string_lossy()) {
            continue;
        }

        let src = entry.path();
        if !src.is_file() {
            continue;
        }

        let dst = stats_dir.join(&file_name);
        copy_preserving_times(&src, &dst)?;
        copied += 1;
    }

    debug!("Seeded {copied} stats file(s) into {}", stats_dir.display());
    Ok(copied)
}

fn is_csv(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".csv")
}

fn copy_preserving_times(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).map_err(|e| StoreError::io(dst, e))?;

    let meta = fs::metadata(src).map_err(|e| StoreError::io(src, e))?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }

    File::options()
        .write(true)
        .open(dst)
        .and_then(|file| file.set_times(times))
        .map_err(|e| StoreError::io(dst, e))
}
