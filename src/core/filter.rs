//! Filter chat logs by date range and contact.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for narrowing a [`ChatLog`] before reports run.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Contact | [`with_contact`](FilterConfig::with_contact) | Messages from one contact |
//!
//! # Example
//!
//! ```
//! use chatviz::core::filter::{FilterConfig, apply_filters};
//! use chatviz::parser::WhatsAppParser;
//!
//! # fn main() -> chatviz::Result<()> {
//! let log = WhatsAppParser::new().parse_str(
//!     "01/01/24, 9:00 am - Alice: Old\n15/06/24, 9:00 am - Alice: New",
//! )?;
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(log, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered.messages()[0].content, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Contact matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::chatlog::ChatLog;
use crate::error::{ChatvizError, Result};

/// Configuration for filtering messages by date and contact.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this contact (case-insensitive).
    pub contact: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatvizError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// The whole day is included.
    ///
    /// # Errors
    ///
    /// Returns [`ChatvizError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatvizError::invalid_date(date_str))?;
        self.before = Some(date.and_time(end_of_day));
        Ok(self)
    }

    /// Sets the contact filter.
    ///
    /// ```
    /// use chatviz::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_contact("Alice");
    /// assert!(config.is_active());
    /// ```
    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, ts: NaiveDateTime) -> Self {
        self.after = Some(ts);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, ts: NaiveDateTime) -> Self {
        self.before = Some(ts);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.contact.is_some()
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatvizError::invalid_date(date_str))
}

/// Narrows a chat log to the messages matching every active filter.
///
/// If no filters are active, returns the log unchanged.
pub fn apply_filters(log: ChatLog, config: &FilterConfig) -> ChatLog {
    if !config.is_active() {
        return log;
    }

    log.into_messages()
        .into_iter()
        .filter(|msg| {
            if let Some(ref contact) = config.contact {
                if !msg.contact.eq_ignore_ascii_case(contact) {
                    return false;
                }
            }
            if config.after.is_some_and(|after| msg.timestamp < after) {
                return false;
            }
            if config.before.is_some_and(|before| msg.timestamp > before) {
                return false;
            }
            true
        })
        .collect::<Vec<_>>()
        .into()
}
