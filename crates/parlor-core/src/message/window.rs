//! Bounded message history with a pinned first entry.

use super::model::Message;

/// Maximum number of messages kept per conversation or session.
pub const MAX_MESSAGES: usize = 100;

/// Capacity rule for message histories.
///
/// When a push makes the history exceed `capacity`, index 0 is kept (it may
/// carry the framing of the whole exchange) together with the most recent
/// `capacity - 1` messages. Everything in between is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageWindow {
    capacity: usize,
}

impl Default for MessageWindow {
    fn default() -> Self {
        Self::new(MAX_MESSAGES)
    }
}

impl MessageWindow {
    /// Creates a window. A capacity below 1 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index range `[start, len)` of the tail kept after the pinned head,
    /// or `None` when a history of `len` messages fits as is.
    pub fn tail_start(&self, len: usize) -> Option<usize> {
        if len <= self.capacity {
            None
        } else {
            Some(len - (self.capacity - 1))
        }
    }

    /// Appends `message` and enforces the capacity.
    pub fn push(&self, messages: &mut Vec<Message>, message: Message) {
        messages.push(message);
        self.enforce(messages);
    }

    /// Drops the middle of an over-capacity history in place.
    pub fn enforce(&self, messages: &mut Vec<Message>) {
        if let Some(start) = self.tail_start(messages.len()) {
            messages.drain(1..start);
        }
    }
}
