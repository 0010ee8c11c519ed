//! Configuration types for parsing, reports and output.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`WhatsAppConfig`] - how a WhatsApp TXT export is read
//! - [`ReportConfig`] - knobs for the word cloud and reply-time reports
//! - [`OutputConfig`] - how charts are rendered
//! - [`AppConfig`] - all of the above, loadable from a JSON file
//!
//! # Example
//!
//! ```rust
//! use chatviz::config::{DateOrder, WhatsAppConfig};
//! use chatviz::parser::WhatsAppParser;
//!
//! let config = WhatsAppConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_skip_system_messages(true);
//!
//! let parser = WhatsAppParser::with_config(config);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatvizError, Result};

/// Which date field comes first in slash-separated dates.
///
/// `15/01/24` is unambiguous, `05/01/24` is not: exports carry no marker,
/// so [`Auto`](DateOrder::Auto) looks for a field greater than 12 and
/// otherwise falls back to the usual order for the line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Decide from the file contents
    #[default]
    Auto,
    /// `DD/MM/YY`
    DayFirst,
    /// `MM/DD/YY`
    MonthFirst,
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrder::Auto => write!(f, "auto"),
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl std::str::FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DateOrder::Auto),
            "day-first" | "dmy" | "eu" => Ok(DateOrder::DayFirst),
            "month-first" | "mdy" | "us" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: auto, day-first, month-first",
                s
            )),
        }
    }
}

/// Configuration for WhatsApp export parsing.
///
/// WhatsApp exports are TXT files with locale-specific date formats.
/// The parser auto-detects the line layout by analyzing the first
/// `sample_lines` non-empty lines.
///
/// # Example
///
/// ```rust
/// use chatviz::config::WhatsAppConfig;
///
/// let config = WhatsAppConfig::new()
///     .with_skip_invalid(false)
///     .with_excluded_contact("Me");
/// assert!(config.excluded_contacts.contains(&"You".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    /// Day/month order for slash-separated dates (default: auto)
    pub date_order: DateOrder,

    /// Skip system messages (user added/removed, etc.) (default: true)
    pub skip_system_messages: bool,

    /// Skip headers with impossible timestamps instead of failing (default: true)
    pub skip_invalid: bool,

    /// Contacts whose rows are dropped (default: `["You"]`)
    pub excluded_contacts: Vec<String>,

    /// Number of non-empty lines used for layout detection (default: 20)
    pub sample_lines: usize,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::Auto,
            skip_system_messages: true,
            skip_invalid: true,
            excluded_contacts: vec!["You".to_string()],
            sample_lines: 20,
        }
    }
}

impl WhatsAppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date order for slash-separated dates.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets whether to skip headers with unparseable timestamps.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Adds a contact whose messages are dropped.
    #[must_use]
    pub fn with_excluded_contact(mut self, contact: impl Into<String>) -> Self {
        self.excluded_contacts.push(contact.into());
        self
    }

    /// Sets the number of lines sampled for layout detection.
    #[must_use]
    pub fn with_sample_lines(mut self, lines: usize) -> Self {
        self.sample_lines = lines.max(1);
        self
    }
}

/// Configuration for report generation.
///
/// # Example
///
/// ```rust
/// use chatviz::config::ReportConfig;
///
/// let config = ReportConfig::new()
///     .with_max_words(100)
///     .with_stopword("lol")
///     .with_trim_proportion(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum number of words kept by the word cloud (default: 2000)
    pub max_words: usize,

    /// Stopwords on top of the built-in list (default: none)
    pub extra_stopwords: Vec<String>,

    /// Keep purely numeric tokens in the word cloud (default: false)
    pub include_numbers: bool,

    /// Proportion cut from each end before averaging reply times (default: 0.1)
    pub trim_proportion: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_words: 2000,
            extra_stopwords: Vec::new(),
            include_numbers: false,
            trim_proportion: 0.1,
        }
    }
}

impl ReportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of words in the word cloud.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Adds a stopword.
    #[must_use]
    pub fn with_stopword(mut self, word: impl Into<String>) -> Self {
        self.extra_stopwords.push(word.into());
        self
    }

    /// Sets whether numeric tokens are counted.
    #[must_use]
    pub fn with_include_numbers(mut self, include: bool) -> Self {
        self.include_numbers = include;
        self
    }

    /// Sets the trimmed-mean proportion.
    #[must_use]
    pub fn with_trim_proportion(mut self, proportion: f64) -> Self {
        self.trim_proportion = proportion;
        self
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ChatvizError::InvalidConfig`] when `trim_proportion` is not
    /// in `[0, 0.5)` or `max_words` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..0.5).contains(&self.trim_proportion) {
            return Err(ChatvizError::invalid_config(
                "trim_proportion",
                format!("{} is outside [0, 0.5)", self.trim_proportion),
            ));
        }
        if self.max_words == 0 {
            return Err(ChatvizError::invalid_config(
                "max_words",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Configuration for rendering charts.
///
/// # Example
///
/// ```rust
/// use chatviz::config::OutputConfig;
///
/// let config = OutputConfig::new().with_bar_width(20).with_max_rows(10);
/// assert_eq!(config.max_rows, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Width in characters of the longest bar in text charts (default: 40)
    pub bar_width: usize,

    /// Only render the first N points (default: all)
    pub max_rows: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bar_width: 40,
            max_rows: None,
        }
    }
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width of the longest bar.
    #[must_use]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Limits the number of rendered points.
    #[must_use]
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }
}

/// Every configuration section in one place.
///
/// Missing sections and fields fall back to their defaults, so a config
/// file only needs the values it changes:
///
/// ```rust
/// use chatviz::config::AppConfig;
///
/// let config = AppConfig::from_json_str(r#"{"report": {"max_words": 50}}"#)?;
/// assert_eq!(config.report.max_words, 50);
/// assert_eq!(config.output.bar_width, 40);
/// # Ok::<(), chatviz::ChatvizError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Parser settings
    pub parser: WhatsAppConfig,
    /// Report settings
    pub report: ReportConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Parses a JSON config document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.report.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_config_defaults() {
        let config = WhatsAppConfig::default();
        assert_eq!(config.date_order, DateOrder::Auto);
        assert!(config.skip_system_messages);
        assert!(config.skip_invalid);
        assert_eq!(config.excluded_contacts, vec!["You".to_string()]);
        assert_eq!(config.sample_lines, 20);
    }

    #[test]
    fn test_whatsapp_config_builder() {
        let config = WhatsAppConfig::new()
            .with_date_order(DateOrder::DayFirst)
            .with_skip_system_messages(false)
            .with_sample_lines(0);
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert!(!config.skip_system_messages);
        assert_eq!(config.sample_lines, 1);
    }

    #[test]
    fn test_date_order_from_str() {
        assert_eq!("auto".parse::<DateOrder>().unwrap(), DateOrder::Auto);
        assert_eq!("DMY".parse::<DateOrder>().unwrap(), DateOrder::DayFirst);
        assert_eq!(
            "month-first".parse::<DateOrder>().unwrap(),
            DateOrder::MonthFirst
        );
        assert!("sideways".parse::<DateOrder>().is_err());
    }

    #[test]
    fn test_report_config_validate() {
        assert!(ReportConfig::default().validate().is_ok());
        assert!(ReportConfig::new().with_trim_proportion(0.0).validate().is_ok());

        let err = ReportConfig::new()
            .with_trim_proportion(0.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("trim_proportion"));

        assert!(ReportConfig::new().with_trim_proportion(-0.1).validate().is_err());
        assert!(ReportConfig::new().with_max_words(0).validate().is_err());
    }

    #[test]
    fn test_app_config_partial_json() {
        let config =
            AppConfig::from_json_str(r#"{"parser": {"date_order": "month-first"}}"#).unwrap();
        assert_eq!(config.parser.date_order, DateOrder::MonthFirst);
        assert!(config.parser.skip_system_messages);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_app_config_rejects_bad_trim() {
        let err = AppConfig::from_json_str(r#"{"report": {"trim_proportion": 0.9}}"#).unwrap_err();
        assert!(matches!(err, ChatvizError::InvalidConfig { .. }));
    }

    #[test]
    fn test_app_config_malformed_json() {
        let err = AppConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ChatvizError::Json(_)));
    }
}
