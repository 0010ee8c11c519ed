//! WhatsApp TXT export parser.
//!
//! WhatsApp exports vary by platform and locale. This parser auto-detects
//! the header layout from the first lines of the file, works out whether
//! slash dates are day-first or month-first, and folds continuation lines
//! into the message they belong to.
//!
//! Supported formats:
//! - Android: `15/01/24, 10:30 am - Sender: Message`
//! - Android (24h, dotted): `26.10.2025, 20:40 - Sender: Message`
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - iOS (EU): `[15.01.24, 10:30:45] Sender: Message`

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::chatlog::ChatLog;
use crate::config::WhatsAppConfig;
use crate::error::{ChatvizError, ParseErrorKind, Result};
use crate::parsing::whatsapp::{
    Layout, detect_layout, is_system_message, match_header, normalize_line, parse_timestamp,
    resolve_date_order, split_sender,
};
use crate::Message;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatviz::parser::WhatsAppParser;
///
/// let parser = WhatsAppParser::new();
/// let log = parser.parse("whatsapp_chat.txt".as_ref())?;
/// println!("{}", log.summary());
/// # Ok::<(), chatviz::ChatvizError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    config: WhatsAppConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// - [`ChatvizError::Io`] if the file cannot be read
    /// - [`ChatvizError::InvalidFormat`] if no line looks like a message header
    /// - [`ChatvizError::Parse`] for an impossible timestamp when
    ///   `skip_invalid` is off
    pub fn parse(&self, path: &Path) -> Result<ChatLog> {
        let start = Instant::now();
        let content = fs::read_to_string(path)?;
        let log = self.parse_content(&content, Some(path))?;
        info!(
            path = %path.display(),
            messages = log.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "parsed WhatsApp export"
        );
        Ok(log)
    }

    /// Parses export content held in memory.
    pub fn parse_str(&self, content: &str) -> Result<ChatLog> {
        self.parse_content(content, None)
    }

    fn parse_content(&self, content: &str, path: Option<&Path>) -> Result<ChatLog> {
        let lines: Vec<Cow<'_, str>> = content.lines().map(normalize_line).collect();
        let non_empty: Vec<&str> = lines
            .iter()
            .map(|line| &**line)
            .filter(|line| !line.trim().is_empty())
            .collect();

        if non_empty.is_empty() {
            return Ok(ChatLog::default());
        }

        // Step 1: detect the layout from a sample, then from the whole file
        let sample_size = self.config.sample_lines.min(non_empty.len());
        let layout = detect_layout(&non_empty[..sample_size])
            .or_else(|| detect_layout(&non_empty))
            .ok_or_else(|| {
                ChatvizError::invalid_format(
                    "WhatsApp",
                    "Could not find any message header. \
                     Make sure the file is a valid WhatsApp chat export.",
                )
            })?;

        // Step 2: settle day/month order for slash dates
        let order = resolve_date_order(
            non_empty
                .iter()
                .filter_map(|line| match_header(line, layout))
                .map(|header| header.date),
            layout,
            self.config.date_order,
        );
        debug!(%layout, %order, "detected WhatsApp export format");

        // Step 3: parse all lines
        let mut messages: Vec<Message> = Vec::new();
        let mut attach_continuation = false;
        let mut dropped = 0usize;

        for (idx, line) in lines.iter().enumerate() {
            let Some(header) = match_header(line, layout) else {
                // Continuation of previous message (multiline)
                if attach_continuation {
                    if let Some(last) = messages.last_mut() {
                        last.content.push('\n');
                        last.content.push_str(line);
                    }
                }
                continue;
            };

            attach_continuation = false;

            let Some(timestamp) = parse_timestamp(header.date, header.time, order) else {
                if !self.config.skip_invalid {
                    return Err(ChatvizError::whatsapp_parse(
                        ParseErrorKind::Timestamp {
                            line: idx + 1,
                            value: format!("{}, {}", header.date, header.time),
                        },
                        path.map(Path::to_path_buf),
                    ));
                }
                warn!(
                    line = idx + 1,
                    date = header.date,
                    time = header.time,
                    "skipping header with invalid timestamp"
                );
                dropped += 1;
                continue;
            };

            // Headers without a sender are group notices
            let Some((contact, text)) = split_sender(header.rest) else {
                dropped += 1;
                continue;
            };

            if self.config.skip_system_messages && is_system_message(contact, text) {
                dropped += 1;
                continue;
            }

            if self.config.excluded_contacts.iter().any(|c| c == contact) {
                dropped += 1;
                continue;
            }

            messages.push(Message::new(timestamp, contact, text));
            attach_continuation = true;
        }

        for msg in &mut messages {
            let trimmed_len = msg.content.trim_end().len();
            msg.content.truncate(trimmed_len);
        }

        debug!(kept = messages.len(), dropped, "finished WhatsApp parse");
        Ok(ChatLog::new(messages))
    }

    /// Returns the layout this parser would use for `content`, if any.
    pub fn detect(&self, content: &str) -> Option<Layout> {
        let lines: Vec<Cow<'_, str>> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(self.config.sample_lines)
            .map(normalize_line)
            .collect();
        let refs: Vec<&str> = lines.iter().map(|line| &**line).collect();
        detect_layout(&refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateOrder;
    use chrono::{Datelike, Timelike};

    const ANDROID: &str = "\
15/01/24, 10:30 am - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.
15/01/24, 10:30 am - You created group \"Friends\"
15/01/24, 10:31 am - Alice: Hello everyone!
15/01/24, 10:32 am - Bob: Hi Alice!
second line
15/01/24, 10:33 am - Charlie joined using this group's invite link
15/01/24, 10:34 pm - Alice: <Media omitted>
16/01/24, 9:00 am - Bob: Good morning";

    #[test]
    fn test_parse_android_export() {
        let log = WhatsAppParser::new().parse_str(ANDROID).unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log.contacts(), vec!["Alice", "Bob"]);

        let second = &log.messages()[1];
        assert_eq!(second.content, "Hi Alice!\nsecond line");

        let third = &log.messages()[2];
        assert_eq!(third.timestamp.hour(), 22);
        assert_eq!(third.content, "<Media omitted>");

        assert_eq!(log.messages()[3].timestamp.day(), 16);
    }

    #[test]
    fn test_parse_ios_export() {
        let content = "\u{200e}[1/15/24, 10:30:45\u{202f}AM] Alice: Hello\n\
                       [1/15/24, 10:31:00 AM] Bob: Hi\n\
                       [1/16/24, 8:02:10 PM] Alice: Bye";
        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.len(), 3);
        let first = &log.messages()[0];
        assert_eq!(first.timestamp.to_string(), "2024-01-15 10:30:45");
        assert_eq!(log.messages()[2].timestamp.hour(), 20);
    }

    #[test]
    fn test_month_first_detected_from_dates() {
        let content = "1/5/24, 10:30 am - Alice: a\n1/25/24, 10:30 am - Bob: b";
        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.messages()[0].timestamp.month(), 1);
        assert_eq!(log.messages()[0].timestamp.day(), 5);
    }

    #[test]
    fn test_explicit_date_order() {
        let content = "1/5/24, 10:30 am - Alice: a";
        let parser =
            WhatsAppParser::with_config(WhatsAppConfig::new().with_date_order(DateOrder::MonthFirst));
        let log = parser.parse_str(content).unwrap();
        assert_eq!(log.messages()[0].timestamp.month(), 1);

        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.messages()[0].timestamp.month(), 5);
    }

    #[test]
    fn test_invalid_file() {
        let err = WhatsAppParser::new()
            .parse_str("this is not\na chat export")
            .unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_empty_input() {
        assert!(WhatsAppParser::new().parse_str("").unwrap().is_empty());
        assert!(WhatsAppParser::new().parse_str("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_timestamp_skipped_or_reported() {
        let content = "31/02/24, 10:30 am - Alice: impossible\n01/03/24, 10:30 am - Bob: fine";
        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.len(), 1);

        let strict = WhatsAppParser::with_config(WhatsAppConfig::new().with_skip_invalid(false));
        let err = strict.parse_str(content).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_continuation_of_dropped_row_is_dropped() {
        let content = "15/01/24, 10:30 am - Alice: hi\n\
                       15/01/24, 10:31 am - Alice changed the subject from \"a\" to \"b: c\"\n\
                       stray continuation";
        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].content, "hi");
    }

    #[test]
    fn test_you_is_excluded_by_default() {
        let content = "15/01/24, 10:30 am - You: note to self\n15/01/24, 10:31 am - Bob: hi";
        let log = WhatsAppParser::new().parse_str(content).unwrap();
        assert_eq!(log.contacts(), vec!["Bob"]);
    }

    #[test]
    fn test_keep_system_messages() {
        let content = "15/01/24, 10:30 am - Charlie: Messages and calls are end-to-end encrypted.";
        let parser =
            WhatsAppParser::with_config(WhatsAppConfig::new().with_skip_system_messages(false));
        assert_eq!(parser.parse_str(content).unwrap().len(), 1);
        assert!(WhatsAppParser::new().parse_str(content).unwrap().is_empty());
    }

    #[test]
    fn test_detect() {
        let parser = WhatsAppParser::new();
        assert_eq!(parser.detect(ANDROID), Some(Layout::Dashed));
        assert_eq!(parser.detect("nothing"), None);
    }
}
