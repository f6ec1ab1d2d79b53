//! Error types for treesync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for treesync operations
///
/// Only [`SyncError::NotFound`] and [`SyncError::Pattern`] ever reach the
/// caller of a sync run; every other kind is absorbed into the message
/// stream as an `Error`-level message and the run continues with the next
/// sibling entry.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Source path is neither an existing file nor an existing directory
    #[error("source path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Exclusion pattern could not be compiled
    #[error("invalid exclusion pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Delete refused because the path is under a protected system location
    #[error("path is protected: {}", path.display())]
    Protected { path: PathBuf },
}

impl SyncError {
    /// Check if this error aborts a sync run instead of being absorbed
    /// into the message stream.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::NotFound { .. } | SyncError::Pattern { .. })
    }

    /// Check if this error is a SafetyGuard refusal
    pub fn is_protected_path(&self) -> bool {
        matches!(self, SyncError::Protected { .. })
    }
}
