//! Content hashing and comparison
//!
//! Differential sync decides "copy or skip" by content digest, not by
//! size or mtime, so two files are only ever treated as equal when their
//! BLAKE3 digests match.

use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the BLAKE3 hash of a file.
///
/// The file is streamed in 64KB chunks for memory efficiency.
///
/// # Arguments
/// * `file_path` - Path to the file to hash
///
/// # Returns
/// * `Ok([u8; 32])` - 32-byte BLAKE3 hash
/// * `Err(SyncError)` - IO error if file cannot be read
pub fn compute_hash(file_path: &Path) -> Result<[u8; 32], SyncError> {
    let mut file = File::open(file_path).map_err(SyncError::Io)?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(SyncError::Io)?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(*hash.as_bytes())
}

/// Compute a file's digest as a fixed-length (64 character) lowercase hex
/// string.
pub fn hash_hex(file_path: &Path) -> Result<String, SyncError> {
    let digest = compute_hash(file_path)?;
    Ok(blake3::Hash::from_bytes(digest).to_hex().to_string())
}

/// Compare two files for byte-identical content by digest.
///
/// A read failure on either side is returned as an error; the caller must
/// treat the comparison as indeterminate rather than assuming equality or
/// difference.
pub fn files_identical(path_a: &Path, path_b: &Path) -> Result<bool, SyncError> {
    let hex_a = hash_hex(path_a)?;
    let hex_b = hash_hex(path_b)?;
    Ok(hex_a == hex_b)
}
