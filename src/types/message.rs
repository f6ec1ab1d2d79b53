//! Message - Leveled, timestamped sync events

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a sync message.
///
/// The same enum doubles as the verbosity threshold for a sync run: a
/// message is emitted only if its level is `>=` the configured verbosity,
/// so the derived ordering is load-bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum MessageLevel {
    /// Trace-level detail (recursion entry, exclusion hits on directories)
    Debug,

    /// Notable non-IO outcomes (skipped identical or excluded files)
    Information,

    /// A filesystem mutation happened (create, copy, delete)
    #[default]
    FileIo,

    /// Something was skipped that the caller may want to know about
    Warning,

    /// An operation failed; the run continued with the next sibling
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageLevel::Debug => "Debug",
            MessageLevel::Information => "Information",
            MessageLevel::FileIo => "FileIO",
            MessageLevel::Warning => "Warning",
            MessageLevel::Error => "Error",
        };
        f.write_str(name)
    }
}

/// A single sync event: timestamp, severity, and formatted text.
///
/// Messages are produced by the engine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Local wall-clock time at emission
    pub timestamp: DateTime<Local>,

    /// Severity of the event
    pub level: MessageLevel,

    /// Human-readable description of the action taken
    pub text: String,
}

impl Message {
    /// Create a message stamped with the current local time.
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    /// Renders as `[HH:MM:SS AM/PM] LEVEL: text` on a 12-hour clock.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%I:%M:%S %p"),
            self.level,
            self.text
        )
    }
}
