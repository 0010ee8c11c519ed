//! A single row of a parsed chat log.
//!
//! Every WhatsApp message header becomes one [`Message`]: when it was sent,
//! who sent it and what it said. Continuation lines of multiline messages
//! are already folded into `content` by the parser.
//!
//! # Examples
//!
//! ```
//! use chatviz::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "Hello, world!");
//!
//! assert_eq!(msg.contact(), "Alice");
//! assert_eq!(msg.content(), "Hello, world!");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholders WhatsApp writes instead of attachments.
const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "<attached:",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
];

/// One message from a chat export.
///
/// Timestamps carry no timezone: exports are written in the phone's local
/// time and every report works on local calendar fields.
///
/// # Serialization
///
/// ```
/// use chatviz::Message;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let msg = Message::new(ts, "Alice", "Hello!");
/// let json = serde_json::to_string(&msg)?;
///
/// assert!(json.contains("2024-06-15T12:00:00"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent.
    pub timestamp: NaiveDateTime,

    /// Display name or phone number of the sender.
    pub contact: String,

    /// Text content; may contain newlines for multiline messages.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        timestamp: NaiveDateTime,
        contact: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            contact: contact.into(),
            content: content.into(),
        }
    }

    /// Returns the send time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Returns `true` if the content is an attachment placeholder.
    ///
    /// ```
    /// use chatviz::Message;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let msg = Message::new(ts, "Bob", "<Media omitted>");
    /// assert!(msg.is_media_placeholder());
    /// ```
    pub fn is_media_placeholder(&self) -> bool {
        let content = self.content.trim().trim_start_matches('\u{200e}');
        MEDIA_PLACEHOLDERS
            .iter()
            .any(|placeholder| content.starts_with(placeholder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(ts(12, 0), "Alice", "Hello");
        assert_eq!(msg.contact(), "Alice");
        assert_eq!(msg.content(), "Hello");
        assert_eq!(msg.timestamp(), ts(12, 0));
    }

    #[test]
    fn test_message_is_empty() {
        assert!(Message::new(ts(1, 0), "Alice", "").is_empty());
        assert!(Message::new(ts(1, 0), "Alice", "   ").is_empty());
        assert!(!Message::new(ts(1, 0), "Alice", "Hello").is_empty());
    }

    #[test]
    fn test_media_placeholder() {
        assert!(Message::new(ts(1, 0), "Bob", "<Media omitted>").is_media_placeholder());
        assert!(Message::new(ts(1, 0), "Bob", "image omitted").is_media_placeholder());
        assert!(
            Message::new(ts(1, 0), "Bob", "<attached: 00000012-PHOTO.jpg>").is_media_placeholder()
        );
        assert!(!Message::new(ts(1, 0), "Bob", "I omitted that part").is_media_placeholder());
    }

    #[test]
    fn test_message_serde_round_trip() {
        let msg = Message::new(ts(8, 5), "Иван", "Привет\nмир");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"contact\":\"Иван\""));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
