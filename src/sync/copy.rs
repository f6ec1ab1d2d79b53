//! Atomic file copy
//!
//! Copies go through a `.part` sibling and an atomic rename so a crash or
//! failed write never leaves a half-written destination file in place.

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Copy a file using the write-then-rename strategy.
///
/// 1. Stream source bytes into a temporary `.part` file
/// 2. Flush and sync to disk
/// 3. Carry over source permissions and mtime
/// 4. Atomic rename onto the final destination
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO failure at any step
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let part_path = dest.with_extension("part");

    let mut src_file = File::open(src)?;
    let mut part_file = File::create(&part_path)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;

        if bytes_read == 0 {
            break; // EOF
        }

        part_file.write_all(&buffer[0..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;

    // Drop the handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src)?;
    fs::set_permissions(&part_path, src_metadata.permissions())?;

    let mtime = src_metadata.modified()?;
    filetime::set_file_mtime(&part_path, filetime::FileTime::from_system_time(mtime))?;

    // Atomic on POSIX systems (single syscall)
    fs::rename(&part_path, dest)?;

    Ok(total_bytes)
}
