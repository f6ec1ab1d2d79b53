//! # treesync - One-Way Directory Tree Synchronizer
//!
//! Makes a destination tree match a source tree: creates missing
//! directories, copies new or changed files, and deletes destination
//! entries that have no source counterpart. Paths matching exclusion
//! patterns are skipped by both the copy and the delete logic, and a
//! safety guard refuses deletes under protected system locations.
//!
//! Every action is reported through a leveled message stream, either
//! collected and returned after the run or delivered synchronously to a
//! caller-supplied callback as each message is produced.

// Module declarations
pub mod config;
pub mod guard;
pub mod hash;
pub mod pattern;
pub mod sink;
pub mod sync;
pub mod types;

// Re-export commonly used types
pub use config::SyncOptions;
pub use sink::{MessageCallback, MessageSink};
pub use sync::{sync, Synchronizer};
pub use types::{Message, MessageLevel, SyncError, SyncPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
