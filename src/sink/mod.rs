//! Leveled message delivery
//!
//! One sink serves both delivery shapes: messages are appended to an
//! ordered buffer returned when the run completes (batch mode), and, when
//! a callback is supplied, each message is also delivered synchronously
//! at the moment it is produced (streaming mode). Emission order is
//! identical in both.

use crate::types::{Message, MessageLevel};

/// Optional callback used to receive messages as they are produced.
pub type MessageCallback = dyn Fn(&Message) + Send + Sync;

/// Collects and delivers the messages of one sync run, filtered by
/// verbosity.
pub struct MessageSink<'a> {
    verbosity: MessageLevel,
    messages: Vec<Message>,
    on_message: Option<&'a MessageCallback>,
}

impl<'a> MessageSink<'a> {
    /// Create a sink with the given verbosity threshold and optional
    /// streaming callback.
    pub fn new(verbosity: MessageLevel, on_message: Option<&'a MessageCallback>) -> Self {
        Self {
            verbosity,
            messages: Vec::new(),
            on_message,
        }
    }

    /// Emit a message. Dropped entirely if `level` is below the configured
    /// verbosity; otherwise stamped with the current local time, delivered
    /// to the callback, and buffered.
    pub fn emit(&mut self, level: MessageLevel, text: impl Into<String>) {
        if level < self.verbosity {
            return;
        }

        let message = Message::new(level, text);
        if let Some(callback) = self.on_message {
            callback(&message);
        }
        self.messages.push(message);
    }

    /// Messages emitted so far, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the sink, yielding the ordered message buffer.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
