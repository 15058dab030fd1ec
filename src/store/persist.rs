//! Atomic snapshot writes.
//!
//! Temp file + rename, so a crash mid-write never leaves a truncated
//! snapshot behind.

use std::fs;
use std::io;
use std::path::Path;

/// Write `content` to `target` atomically.
///
/// The bytes land in a `.tmp` sibling first and are renamed over the
/// target. Parent directories are created as needed.
pub fn atomic_write(target: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = target.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, target)?;
    Ok(())
}
