//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::report::Chart;

use super::visible_points;

/// Writes a chart to a JSON file.
///
/// # Format
/// ```json
/// {
///   "report": "year",
///   "title": "Message count per Year",
///   "x_label": "Year",
///   "y_label": "Message count",
///   "unit": "count",
///   "points": [{"label": "2024", "value": 12.0}]
/// }
/// ```
pub fn write_json(chart: &Chart, output_path: &Path, config: &OutputConfig) -> Result<()> {
    let json = to_json(chart, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a chart to a pretty-printed JSON string.
pub fn to_json(chart: &Chart, config: &OutputConfig) -> Result<String> {
    let points = visible_points(chart, config);
    if points.len() == chart.len() {
        return Ok(serde_json::to_string_pretty(chart)?);
    }

    let mut limited = chart.clone();
    limited.points.truncate(points.len());
    Ok(serde_json::to_string_pretty(&limited)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DataPoint, ReportKind};
    use tempfile::NamedTempFile;

    fn chart() -> Chart {
        Chart::new(ReportKind::Year, "Message count per Year", "Year", "Message count")
            .with_points(vec![DataPoint::count("2023", 3), DataPoint::missing("2024")])
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&chart(), &OutputConfig::new()).unwrap();
        assert!(json.contains(r#""report": "year""#));
        assert!(json.contains(r#""label": "2023""#));
        assert!(json.contains(r#""value": null"#));
        assert!(!json.contains("note"));

        let back: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart());
    }

    #[test]
    fn test_to_json_max_rows() {
        let json = to_json(&chart(), &OutputConfig::new().with_max_rows(1)).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_write_json_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&chart(), temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["points"][0]["value"], 3.0);
    }
}
