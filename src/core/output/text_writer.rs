//! Terminal bar chart writer.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::visible_points;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::report::{Chart, ValueUnit, format_duration};

const BAR: char = '█';

/// Formats one value for display.
///
/// Counts print as whole numbers, durations as `D days HH:MM:SS` and
/// missing values as `n/a`.
pub fn format_value(value: Option<f64>, unit: ValueUnit) -> String {
    match (value, unit) {
        (None, _) => "n/a".to_string(),
        (Some(v), ValueUnit::Count) => format!("{v:.0}"),
        (Some(v), ValueUnit::Seconds) => format_duration(v),
    }
}

/// Renders a chart as horizontal bars.
///
/// # Format
/// ```text
/// Message count per Year
/// ======================
/// Year │ Message count
/// 2023 │ ████ 5
/// 2024 │ ████████ 10
/// ```
pub fn to_text(chart: &Chart, config: &OutputConfig) -> String {
    let mut out = String::new();

    if let Some(note) = &chart.note {
        let _ = writeln!(out, "Note: {note}");
        out.push('\n');
    }

    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "{}", "=".repeat(chart.title.chars().count()));

    if chart.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let points = visible_points(chart, config);
    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .chain(std::iter::once(chart.x_label.chars().count()))
        .max()
        .unwrap_or(0);
    let max = chart.max_value().filter(|m| *m > 0.0).unwrap_or(1.0);

    let _ = writeln!(out, "{:<label_width$} │ {}", chart.x_label, chart.y_label);
    for point in points {
        let bar_len = point
            .value
            .map_or(0, |v| ((v.max(0.0) / max) * config.bar_width as f64).round() as usize);
        let mut line = format!("{:<label_width$} │ ", point.label);
        if bar_len > 0 {
            line.extend(std::iter::repeat_n(BAR, bar_len));
            line.push(' ');
        }
        line.push_str(&format_value(point.value, chart.unit));
        let _ = writeln!(out, "{line}");
    }

    let hidden = chart.len() - points.len();
    if hidden > 0 {
        let _ = writeln!(out, "... {hidden} more");
    }
    out
}

/// Writes a text chart to a file.
pub fn write_text(chart: &Chart, output_path: &Path, config: &OutputConfig) -> Result<()> {
    fs::write(output_path, to_text(chart, config))?;
    Ok(())
}
