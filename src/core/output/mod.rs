//! Chart writers.
//!
//! - [`write_text`] / [`to_text`] - bar chart for the terminal
//! - [`write_csv`] / [`to_csv`] - two-column table, requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole [`Chart`] as pretty JSON
//!
//! # Example
//!
//! ```rust
//! use chatviz::config::OutputConfig;
//! use chatviz::core::output::to_text;
//! use chatviz::report::{Chart, DataPoint, ReportKind};
//!
//! let chart = Chart::new(ReportKind::Year, "Message count per Year", "Year", "Message count")
//!     .with_points(vec![DataPoint::count("2023", 5), DataPoint::count("2024", 10)]);
//!
//! let text = to_text(&chart, &OutputConfig::new().with_bar_width(10));
//! assert!(text.contains("2024 │ ██████████ 10"));
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use text_writer::{format_value, to_text, write_text};

use crate::config::OutputConfig;
use crate::report::{Chart, DataPoint};

/// Points to render after applying `max_rows`.
fn visible_points<'a>(chart: &'a Chart, config: &OutputConfig) -> &'a [DataPoint] {
    let limit = config.max_rows.unwrap_or(usize::MAX).min(chart.points.len());
    &chart.points[..limit]
}
