//! Average reply time for two-person chats.
//!
//! Every time the sender changes, the gap since the previous message counts
//! as one reply sample for the new sender. Averages use a trimmed mean so a
//! few overnight gaps don't dominate.

use serde::{Deserialize, Serialize};

use super::{Chart, DataPoint, ReportKind, ValueUnit};
use crate::chatlog::ChatLog;
use crate::config::ReportConfig;
use crate::error::{ChatvizError, Result};

/// Caveat attached to every reply time chart.
pub const REPLY_TIME_NOTE: &str =
    "This is just a rough estimate for fun. Don't make any decision based on it.";

/// Reply statistics of one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTime {
    /// The contact replying
    pub contact: String,
    /// Number of replies observed
    pub samples: usize,
    /// Trimmed mean of the reply gaps, `None` without samples
    pub average_seconds: Option<f64>,
}

/// Mean of `values` after cutting `proportion` of the sorted values from
/// each end.
///
/// The number cut per end is `floor(proportion * n)`. Returns `None` for an
/// empty slice or a proportion outside `[0, 0.5)`.
///
/// ```
/// use chatviz::report::trimmed_mean;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 1000.0];
/// assert_eq!(trimmed_mean(&values, 0.2), Some(3.0));
/// assert_eq!(trimmed_mean(&[], 0.1), None);
/// ```
pub fn trimmed_mean(values: &[f64], proportion: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..0.5).contains(&proportion) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let cut = (proportion * sorted.len() as f64).floor() as usize;
    let kept = &sorted[cut..sorted.len() - cut];
    if kept.is_empty() {
        return None;
    }
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}

/// Reply gaps in seconds per contact, contacts in first-appearance order.
fn reply_samples(log: &ChatLog) -> Vec<(&str, Vec<f64>)> {
    let mut samples: Vec<(&str, Vec<f64>)> = log
        .contacts()
        .into_iter()
        .map(|contact| (contact, Vec::new()))
        .collect();

    for pair in log.messages().windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if prev.contact == cur.contact {
            continue;
        }
        let gap = (cur.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
        if let Some((_, gaps)) = samples.iter_mut().find(|(c, _)| *c == cur.contact) {
            gaps.push(gap);
        }
    }
    samples
}

/// Average reply time of both participants.
///
/// # Errors
///
/// Returns [`ChatvizError::ContactCount`] unless the log has exactly two
/// contacts.
pub fn reply_times(log: &ChatLog, config: &ReportConfig) -> Result<Vec<ReplyTime>> {
    let found = log.contact_count();
    if found != 2 {
        return Err(ChatvizError::contact_count(2, found));
    }

    Ok(reply_samples(log)
        .into_iter()
        .map(|(contact, gaps)| ReplyTime {
            contact: contact.to_string(),
            samples: gaps.len(),
            average_seconds: trimmed_mean(&gaps, config.trim_proportion),
        })
        .collect())
}

/// Reply times as a chart, values in seconds.
///
/// # Errors
///
/// Same as [`reply_times`].
pub fn reply_time_chart(log: &ChatLog, config: &ReportConfig) -> Result<Chart> {
    let points = reply_times(log, config)?
        .into_iter()
        .map(|rt| match rt.average_seconds {
            Some(secs) => DataPoint::new(rt.contact, secs),
            None => DataPoint::missing(rt.contact),
        })
        .collect();

    Ok(
        Chart::new(ReportKind::ReplyTime, "Average reply time", "contact", "reply time")
            .with_unit(ValueUnit::Seconds)
            .with_points(points)
            .with_note(REPLY_TIME_NOTE),
    )
}

/// Formats seconds as `D days HH:MM:SS`, with microseconds when present.
///
/// Negative durations use floored days and a positive clock, so `-60`
/// seconds is `-1 days +23:59:00`.
///
/// ```
/// use chatviz::report::format_duration;
///
/// assert_eq!(format_duration(330.0), "0 days 00:05:30");
/// assert_eq!(format_duration(90_061.5), "1 days 01:01:01.500000");
/// assert_eq!(format_duration(-60.0), "-1 days +23:59:00");
/// ```
pub fn format_duration(seconds: f64) -> String {
    const DAY: i64 = 86_400_000_000;
    let micros = (seconds * 1_000_000.0).round() as i64;

    let days = micros.div_euclid(DAY);
    let rem = micros.rem_euclid(DAY);
    let hours = rem / 3_600_000_000;
    let minutes = rem % 3_600_000_000 / 60_000_000;
    let secs = rem % 60_000_000 / 1_000_000;
    let frac = rem % 1_000_000;

    let clock_sign = if micros < 0 { "+" } else { "" };
    let mut out = format!("{days} days {clock_sign}{hours:02}:{minutes:02}:{secs:02}");
    if frac != 0 {
        out.push_str(&format!(".{frac:06}"));
    }
    out
}
