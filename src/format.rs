//! Output format types for chatviz.
//!
//! This module keeps format selection free of CLI dependencies so library
//! users can render charts the same way the binary does.
//!
//! # Example
//!
//! ```rust
//! # fn example() -> chatviz::Result<()> {
//! use chatviz::config::OutputConfig;
//! use chatviz::format::{OutputFormat, to_format_string};
//! use chatviz::report::{Chart, DataPoint, ReportKind};
//!
//! let chart = Chart::new(ReportKind::Year, "Message count per Year", "Year", "Message count")
//!     .with_points(vec![DataPoint::count("2024", 12)]);
//!
//! let json = to_format_string(&chart, OutputFormat::Json, &OutputConfig::new())?;
//! assert!(json.contains("\"2024\""));
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("year.csv".as_ref())?;
//! assert_eq!(format, OutputFormat::Csv);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::error::{ChatvizError, Result};
use crate::report::Chart;

/// Output format for charts.
///
/// - [`Text`](OutputFormat::Text) - bar chart for reading in a terminal
/// - [`Csv`](OutputFormat::Csv) - two-column table for spreadsheets
/// - [`Json`](OutputFormat::Json) - the full chart structure
///
/// # Example
///
/// ```rust
/// use chatviz::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("txt").unwrap();
/// assert_eq!(format, OutputFormat::Text);
/// assert_eq!(format.extension(), "txt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Horizontal bar chart (default)
    #[default]
    Text,

    /// CSV with comma delimiter
    Csv,

    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "csv", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatviz::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("hour.json".as_ref()).unwrap();
    /// assert_eq!(format, OutputFormat::Json);
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ChatvizError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, csv, json"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes a chart to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - CSV is requested without the `csv-output` feature
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    chart: &Chart,
    path: &Path,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        OutputFormat::Text => crate::core::output::write_text(chart, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(chart, path, config),
        OutputFormat::Json => crate::core::output::write_json(chart, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts a chart to a string in the specified format.
///
/// # Errors
///
/// Same as [`write_to_format`], minus file errors.
#[allow(unused_variables)]
pub fn to_format_string(chart: &Chart, format: OutputFormat, config: &OutputConfig) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(crate::core::output::to_text(chart, config)),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(chart, config),
        OutputFormat::Json => crate::core::output::to_json(chart, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[allow(dead_code)]
fn missing_feature(format: OutputFormat) -> ChatvizError {
    ChatvizError::invalid_format(
        "output",
        format!("Output format {format} requires the 'csv-output' feature to be enabled"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DataPoint, ReportKind};
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("png").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "Text");
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/year.csv")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("/tmp/hour.JSON")).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("day.txt")).unwrap(),
            OutputFormat::Text
        );
        assert!(OutputFormat::from_path(Path::new("chart.png")).is_err());
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_format_default_and_all() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::all().len(), 3);
        for format in OutputFormat::all() {
            let name = format.extension();
            assert_eq!(OutputFormat::from_str(name).unwrap(), *format);
        }
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Text).unwrap();
        assert_eq!(json, "\"text\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_write_to_format_each_kind() {
        let chart = Chart::new(ReportKind::Year, "Years", "Year", "Message count")
            .with_points(vec![DataPoint::count("2024", 2)]);
        let dir = tempfile::tempdir().unwrap();

        for format in OutputFormat::all() {
            let path = dir.path().join(format!("year.{}", format.extension()));
            write_to_format(&chart, &path, *format, &OutputConfig::new()).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("2024"), "{format} output missing label");
        }
    }
}
