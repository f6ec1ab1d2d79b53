//! Core types for treesync

pub mod error;
pub mod message;
pub mod policy;

pub use error::SyncError;
pub use message::{Message, MessageLevel};
pub use policy::SyncPolicy;
