//! Report generators.
//!
//! Every report is a stateless function from a [`ChatLog`] to a [`Chart`]:
//! a titled, labelled series of data points. Rendering the chart (terminal
//! bars, CSV, JSON) is the job of [`crate::format`].
//!
//! | Report | Function | Points |
//! |--------|----------|--------|
//! | [`Year`](ReportKind::Year) | [`year_counts`] | messages per year |
//! | [`Month`](ReportKind::Month) | [`month_counts`] | messages per calendar month |
//! | [`Day`](ReportKind::Day) | [`weekday_counts`] | messages per weekday |
//! | [`Hour`](ReportKind::Hour) | [`hour_counts`] | messages per hour of day |
//! | [`Timeline`](ReportKind::Timeline) | [`timeline`] | messages per date |
//! | [`WordCloud`](ReportKind::WordCloud) | [`word_cloud`] | word frequencies |
//! | [`Contacts`](ReportKind::Contacts) | [`contact_totals`] | messages per contact |
//! | [`ReplyTime`](ReportKind::ReplyTime) | [`reply_time_chart`] | average reply time per contact |
//!
//! # Example
//!
//! ```
//! use chatviz::config::ReportConfig;
//! use chatviz::parser::WhatsAppParser;
//! use chatviz::report::{ReportKind, generate};
//!
//! let log = WhatsAppParser::new().parse_str(
//!     "15/01/24, 10:30 am - Alice: Hi\n15/01/24, 10:35 am - Bob: Hello",
//! )?;
//! let chart = generate(ReportKind::Hour, &log, &ReportConfig::default())?;
//! assert_eq!(chart.points[0].label, "10");
//! assert_eq!(chart.points[0].value, Some(2.0));
//! # Ok::<(), chatviz::ChatvizError>(())
//! ```

pub mod counts;
pub mod reply;
pub mod words;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chatlog::ChatLog;
use crate::config::ReportConfig;
use crate::error::Result;

pub use counts::{contact_totals, hour_counts, month_counts, timeline, weekday_counts, year_counts};
pub use reply::{ReplyTime, format_duration, reply_time_chart, reply_times, trimmed_mean};
pub use words::{STOPWORDS, WordFrequency, word_cloud, word_frequencies};

/// The reports chatviz can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Messages per year
    Year,
    /// Messages per month
    Month,
    /// Messages per weekday
    Day,
    /// Messages per hour of day
    Hour,
    /// Messages per calendar date
    Timeline,
    /// Word frequencies
    WordCloud,
    /// Messages per contact
    Contacts,
    /// Average reply time per contact
    ReplyTime,
}

impl ReportKind {
    /// Canonical name, also used for output file names.
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Year => "year",
            ReportKind::Month => "month",
            ReportKind::Day => "day",
            ReportKind::Hour => "hour",
            ReportKind::Timeline => "timeline",
            ReportKind::WordCloud => "word-cloud",
            ReportKind::Contacts => "contacts",
            ReportKind::ReplyTime => "reply-time",
        }
    }

    /// All reports in menu order.
    pub fn all() -> &'static [ReportKind] {
        &[
            ReportKind::Year,
            ReportKind::Month,
            ReportKind::Day,
            ReportKind::Hour,
            ReportKind::Timeline,
            ReportKind::WordCloud,
            ReportKind::Contacts,
            ReportKind::ReplyTime,
        ]
    }

    /// Returns all accepted names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &[
            "year",
            "month",
            "day",
            "weekday",
            "hour",
            "timeline",
            "word-cloud",
            "words",
            "wc",
            "contacts",
            "people",
            "reply-time",
            "reply",
        ]
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "years" => Ok(ReportKind::Year),
            "month" | "months" => Ok(ReportKind::Month),
            "day" | "days" | "weekday" => Ok(ReportKind::Day),
            "hour" | "hours" => Ok(ReportKind::Hour),
            "timeline" => Ok(ReportKind::Timeline),
            "word-cloud" | "wordcloud" | "words" | "wc" => Ok(ReportKind::WordCloud),
            "contacts" | "contact" | "people" | "totals" => Ok(ReportKind::Contacts),
            "reply-time" | "reply" | "replies" => Ok(ReportKind::ReplyTime),
            _ => Err(format!(
                "Unknown report: '{}'. Expected one of: {}",
                s,
                ReportKind::all_names().join(", ")
            )),
        }
    }
}

/// What the values of a chart measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    /// Plain counts
    #[default]
    Count,
    /// Durations in seconds
    Seconds,
}

/// One labelled value of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label (year, month name, date, contact, word...)
    pub label: String,
    /// The value, or `None` when it cannot be computed
    pub value: Option<f64>,
}

impl DataPoint {
    /// Creates a point with a known value.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
        }
    }

    /// Creates a point from a count.
    pub fn count(label: impl Into<String>, count: usize) -> Self {
        Self::new(label, count as f64)
    }

    /// Creates a point without a value.
    pub fn missing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

/// A report result: a titled series ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Which report produced this chart
    pub report: ReportKind,
    /// Chart title
    pub title: String,
    /// Label of the category axis
    pub x_label: String,
    /// Label of the value axis
    pub y_label: String,
    /// Unit of the values
    pub unit: ValueUnit,
    /// Data points in display order
    pub points: Vec<DataPoint>,
    /// Caveat printed with the chart
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub note: Option<String>,
}

impl Chart {
    /// Creates an empty chart.
    pub fn new(
        report: ReportKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            report,
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            unit: ValueUnit::Count,
            points: Vec::new(),
            note: None,
        }
    }

    /// Builder method to set the unit.
    #[must_use]
    pub fn with_unit(mut self, unit: ValueUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Builder method to set the points.
    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self
    }

    /// Builder method to attach a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the chart has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest known value.
    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .max_by(f64::total_cmp)
    }

    /// Sum of known values.
    pub fn total(&self) -> f64 {
        self.points.iter().filter_map(|p| p.value).sum()
    }

    /// Value for a label, if present.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.label == label)
            .and_then(|p| p.value)
    }
}

/// Runs one report, logging how long it took.
///
/// # Errors
///
/// - [`ChatvizError::InvalidConfig`](crate::ChatvizError::InvalidConfig) if
///   `config` fails validation
/// - [`ChatvizError::ContactCount`](crate::ChatvizError::ContactCount) for
///   reply times on a chat without exactly two contacts
pub fn generate(kind: ReportKind, log: &ChatLog, config: &ReportConfig) -> Result<Chart> {
    config.validate()?;

    let start = Instant::now();
    let chart = match kind {
        ReportKind::Year => year_counts(log),
        ReportKind::Month => month_counts(log),
        ReportKind::Day => weekday_counts(log),
        ReportKind::Hour => hour_counts(log),
        ReportKind::Timeline => timeline(log),
        ReportKind::WordCloud => word_cloud(log, config),
        ReportKind::Contacts => contact_totals(log),
        ReportKind::ReplyTime => reply_time_chart(log, config)?,
    };

    info!(
        report = kind.name(),
        points = chart.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "report generated"
    );
    Ok(chart)
}
