//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::visible_points;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::report::Chart;

/// Writes the chart as CSV to any writer.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `<x label>`, `<y label>`
/// - Values: plain numbers (seconds for durations), empty when missing
fn write_records<W: Write>(chart: &Chart, writer: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(writer);

    writer.write_record([chart.x_label.as_str(), chart.y_label.as_str()])?;
    for point in visible_points(chart, config) {
        let value = point.value.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([point.label.as_str(), value.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a chart to a CSV file.
pub fn write_csv(chart: &Chart, output_path: &Path, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(chart, file, config)
}

/// Converts a chart to a CSV string.
pub fn to_csv(chart: &Chart, config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(chart, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DataPoint, ReportKind, ValueUnit};
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_csv_basic() {
        let chart = Chart::new(ReportKind::Year, "t", "Year", "Message count")
            .with_points(vec![DataPoint::count("2023", 3), DataPoint::count("2024", 12)]);

        let csv = to_csv(&chart, &OutputConfig::new()).unwrap();
        assert_eq!(csv, "Year,Message count\n2023,3\n2024,12\n");
    }

    #[test]
    fn test_missing_values_and_quoting() {
        let chart = Chart::new(ReportKind::ReplyTime, "t", "contact", "reply time")
            .with_unit(ValueUnit::Seconds)
            .with_points(vec![
                DataPoint::new("Smith, John", 90.5),
                DataPoint::missing("Bob"),
            ]);

        let csv = to_csv(&chart, &OutputConfig::new()).unwrap();
        assert!(csv.contains("\"Smith, John\",90.5\n"));
        assert!(csv.contains("Bob,\n"));
    }

    #[test]
    fn test_write_csv_file() {
        let chart = Chart::new(ReportKind::Hour, "t", "Hours", "Message count")
            .with_points(vec![DataPoint::count("9", 4)]);

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&chart, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("Hours,Message count"));
        assert!(content.contains("9,4"));
    }
}
