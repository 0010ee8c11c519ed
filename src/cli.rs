//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Report`] - Report names accepted on the command line
//! - [`Format`] - Output format options
//!
//! Both enums convert into their library counterparts
//! ([`ReportKind`], [`OutputFormat`](crate::format::OutputFormat)):
//!
//! ```rust
//! use chatviz::cli::Report;
//! use chatviz::report::ReportKind;
//!
//! let kind: ReportKind = Report::WordCloud.into();
//! assert_eq!(kind.name(), "word-cloud");
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, DateOrder};
use crate::core::filter::FilterConfig;
use crate::error::{ChatvizError, Result};
use crate::report::ReportKind;

/// Charts and statistics for WhatsApp chat exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatviz")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatviz chat.txt
    chatviz chat.txt year month hour
    chatviz chat.txt words --max-words 30 --stopword lol
    chatviz chat.txt reply --trim 0.2
    chatviz chat.txt -f csv -o charts/
    chatviz -i")]
pub struct Args {
    /// Path to a WhatsApp chat export (.txt)
    pub input: Option<PathBuf>,

    /// Reports to produce (default: all)
    #[arg(value_enum)]
    pub reports: Vec<Report>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Write one file per report into this directory instead of printing
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only count messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only count messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only count messages from this contact
    #[arg(long, value_name = "NAME")]
    pub contact: Option<String>,

    /// How to read ambiguous dates like 05/04/24 (auto, day-first, month-first)
    #[arg(long, value_name = "ORDER")]
    pub date_order: Option<DateOrder>,

    /// Keep system notices (encryption banner, joins, subject changes)
    #[arg(long)]
    pub keep_system: bool,

    /// Maximum number of words in the word cloud
    #[arg(long, value_name = "N")]
    pub max_words: Option<usize>,

    /// Extra word to leave out of the word cloud (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    pub stopwords: Vec<String>,

    /// Count numbers as words in the word cloud
    #[arg(long)]
    pub numbers: bool,

    /// Proportion cut from each end before averaging reply times
    #[arg(long, value_name = "P")]
    pub trim: Option<f64>,

    /// Width of the longest bar in text charts
    #[arg(long, value_name = "N")]
    pub bar_width: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Configuration from `--config` (or defaults) with flags applied on top.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_json_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(order) = self.date_order {
            config.parser.date_order = order;
        }
        if self.keep_system {
            config.parser.skip_system_messages = false;
        }
        if let Some(max_words) = self.max_words {
            config.report.max_words = max_words;
        }
        config
            .report
            .extra_stopwords
            .extend(self.stopwords.iter().cloned());
        if self.numbers {
            config.report.include_numbers = true;
        }
        if let Some(trim) = self.trim {
            config.report.trim_proportion = trim;
        }
        if let Some(width) = self.bar_width {
            config.output.bar_width = width;
        }

        config.report.validate()?;
        Ok(config)
    }

    /// Date and contact filters from the flags.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref contact) = self.contact {
            filter = filter.with_contact(contact.clone());
        }
        Ok(filter)
    }

    /// Requested reports, or every report when none were named.
    pub fn report_kinds(&self) -> Vec<ReportKind> {
        if self.reports.is_empty() {
            ReportKind::all().to_vec()
        } else {
            self.reports.iter().map(|r| (*r).into()).collect()
        }
    }

    /// The input path, required outside interactive mode.
    pub fn require_input(&self) -> Result<&PathBuf> {
        self.input.as_ref().ok_or_else(|| {
            ChatvizError::invalid_config(
                "input",
                "a chat export is required unless --interactive is set",
            )
        })
    }
}

/// Report names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Report {
    /// Message count per year
    #[value(alias = "years")]
    Year,

    /// Message count per month
    #[value(alias = "months")]
    Month,

    /// Message count per weekday
    #[value(alias = "weekday")]
    Day,

    /// Message count per hour of day
    #[value(alias = "hours")]
    Hour,

    /// Message count per date
    Timeline,

    /// Most used words
    #[value(alias = "words", alias = "wc")]
    WordCloud,

    /// Messages per contact
    #[value(alias = "people")]
    Contacts,

    /// Average reply time of both participants
    #[value(alias = "reply")]
    ReplyTime,
}

impl From<Report> for ReportKind {
    fn from(report: Report) -> ReportKind {
        match report {
            Report::Year => ReportKind::Year,
            Report::Month => ReportKind::Month,
            Report::Day => ReportKind::Day,
            Report::Hour => ReportKind::Hour,
            Report::Timeline => ReportKind::Timeline,
            Report::WordCloud => ReportKind::WordCloud,
            Report::Contacts => ReportKind::Contacts,
            Report::ReplyTime => ReportKind::ReplyTime,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Bar chart for the terminal (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Two-column CSV table
    Csv,

    /// Full chart as JSON
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<Format> for crate::format::OutputFormat {
    fn from(format: Format) -> crate::format::OutputFormat {
        match format {
            Format::Text => crate::format::OutputFormat::Text,
            Format::Csv => crate::format::OutputFormat::Csv,
            Format::Json => crate::format::OutputFormat::Json,
        }
    }
}
