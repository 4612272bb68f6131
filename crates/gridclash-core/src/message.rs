//! Game message log.
//!
//! Turn starts, stipends, attacks landing, and deaths all flow through the
//! [`MessageLog`]. The log keeps the current message plus a bounded history
//! (most recent first) for the message panel to render.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of history entries kept.
pub const DEFAULT_HISTORY: usize = 5;

/// Bounded log of game messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    current: String,
    history: VecDeque<String>,
    max_history: usize,
}

impl MessageLog {
    /// Creates a log keeping at most `max_history` entries.
    #[must_use]
    pub fn new(max_history: usize) -> Self {
        Self {
            current: String::new(),
            history: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Records a message, making it current and pushing it onto the history.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, "game message");
        self.history.push_front(message.clone());
        self.history.truncate(self.max_history);
        self.current = message;
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn latest(&self) -> &str {
        &self.current
    }

    /// Iterates the history, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Returns the number of history entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` when nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}
