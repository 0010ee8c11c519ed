//! # Chatviz
//!
//! A Rust library for turning WhatsApp chat exports into descriptive
//! statistics: when people write, how much, which words they use and how
//! quickly they answer each other.
//!
//! ## Overview
//!
//! Chatviz reads the plain-text export WhatsApp produces on Android and iOS,
//! in any of the common locale date formats, and builds a [`ChatLog`] of
//! timestamped messages. Reports turn that log into [`Chart`]s which can be
//! rendered as terminal bar charts, CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatviz::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let log = WhatsAppParser::new().parse("whatsapp_chat.txt".as_ref())?;
//!
//!     // Messages per hour of the day
//!     let chart = generate(ReportKind::Hour, &log, &ReportConfig::default())?;
//!     println!("{}", to_text(&chart, &OutputConfig::new()));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Interactive Use
//!
//! [`Session`](session::Session) keeps a loaded chat around and dispatches
//! typed commands, refusing to run reports until a chat is loaded:
//!
//! ```rust
//! use chatviz::session::Session;
//!
//! let mut session = Session::new();
//! assert!(session.execute("timeline").unwrap_err().is_not_loaded());
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`WhatsAppParser`](parser::WhatsAppParser), file and string parsing
//! - [`parsing`] - header patterns, date order detection, system notices
//! - [`chatlog`] - [`ChatLog`] and its summary
//! - [`report`] - the report generators, [`Chart`] and [`ReportKind`](report::ReportKind)
//! - [`core`] - filters and chart writers
//!   - [`core::filter`] - [`FilterConfig`](core::FilterConfig), [`apply_filters`](core::apply_filters)
//!   - [`core::output`] - text, CSV and JSON writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`session`] - interactive command loop state
//! - [`config`] - configuration types
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - unified error types ([`ChatvizError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod chatlog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod report;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use chatlog::ChatLog;
pub use error::{ChatvizError, Result};
pub use message::Message;
pub use report::Chart;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::chatlog::{ChatLog, LogSummary};

    // Error types
    pub use crate::error::{ChatvizError, Result};

    // Parsing
    pub use crate::config::{DateOrder, WhatsAppConfig};
    pub use crate::parser::WhatsAppParser;

    // Reports
    pub use crate::config::ReportConfig;
    pub use crate::report::{Chart, DataPoint, ReportKind, ValueUnit, generate};

    // Filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Output
    pub use crate::config::OutputConfig;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    pub use crate::core::output::{to_json, to_text, write_json, write_text};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    // Session
    pub use crate::session::{Outcome, Session};
}
