//! The parsed chat log.
//!
//! [`ChatLog`] is the table every report reads: one [`Message`] per row, in
//! the order the export lists them.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::Message;

/// All messages of one chat export, in file order.
///
/// # Example
///
/// ```
/// use chatviz::parser::WhatsAppParser;
///
/// let log = WhatsAppParser::new().parse_str(
///     "15/01/24, 10:30 am - Alice: Hi\n15/01/24, 10:31 am - Bob: Hello",
/// )?;
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.contacts(), vec!["Alice", "Bob"]);
/// # Ok::<(), chatviz::ChatvizError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<Message>,
}

impl ChatLog {
    /// Wraps a list of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages as a slice.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Consumes the log and returns the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Distinct contacts in order of first appearance.
    pub fn contacts(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for msg in &self.messages {
            if !seen.contains(&msg.contact.as_str()) {
                seen.push(&msg.contact);
            }
        }
        seen
    }

    /// Number of distinct contacts.
    pub fn contact_count(&self) -> usize {
        self.contacts().len()
    }

    /// Earliest timestamp in the log.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.iter().map(|m| m.timestamp).min()
    }

    /// Latest timestamp in the log.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.iter().map(|m| m.timestamp).max()
    }

    /// Headline numbers for the loaded log.
    pub fn summary(&self) -> LogSummary {
        LogSummary {
            messages: self.len(),
            contacts: self.contact_count(),
            first: self.first_timestamp(),
            last: self.last_timestamp(),
        }
    }
}

impl From<Vec<Message>> for ChatLog {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

impl<'a> IntoIterator for &'a ChatLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Headline numbers of a [`ChatLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    /// Number of messages
    pub messages: usize,
    /// Number of distinct contacts
    pub contacts: usize,
    /// Earliest message
    pub first: Option<NaiveDateTime>,
    /// Latest message
    pub last: Option<NaiveDateTime>,
}

impl std::fmt::Display for LogSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} messages from {} contacts", self.messages, self.contacts)?;
        if let (Some(first), Some(last)) = (self.first, self.last) {
            write!(
                f,
                " ({} to {})",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            )?;
        }
        Ok(())
    }
}
