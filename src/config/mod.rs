//! Sync run options

use crate::types::{MessageLevel, SyncPolicy};

/// Options bound to a single sync invocation.
///
/// Nothing here survives between runs; each call to
/// [`crate::Synchronizer::sync`] re-derives all state from the filesystem
/// and these options.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Overwrite policy for existing destination files
    pub policy: SyncPolicy,

    /// Minimum level a message must have to be emitted
    pub verbosity: MessageLevel,

    /// Raw exclusion patterns (`*` matches any substring, case-insensitive,
    /// tested against the full path)
    pub exclude: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            policy: SyncPolicy::Differential,
            verbosity: MessageLevel::FileIo,
            exclude: Vec::new(),
        }
    }
}
