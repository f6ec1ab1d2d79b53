//! SyncPolicy - How existing destination files are treated

use serde::{Deserialize, Serialize};

/// Overwrite policy for files that already exist in the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncPolicy {
    /// Always overwrite destination files, identical or not
    Full,

    /// Overwrite only when source and destination content differ
    #[default]
    Differential,
}
