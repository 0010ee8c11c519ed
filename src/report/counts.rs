//! Message counts grouped by time fields and by contact.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike};

use super::{Chart, DataPoint, ReportKind};
use crate::chatlog::ChatLog;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thurs", "Fri", "Sat", "Sun"];

/// Counts messages per key, keys ascending.
fn count_by<K: Ord>(log: &ChatLog, key: impl Fn(&crate::Message) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for msg in log {
        *counts.entry(key(msg)).or_insert(0) += 1;
    }
    counts
}

/// Messages per year, one point per year present.
pub fn year_counts(log: &ChatLog) -> Chart {
    let points = count_by(log, |m| m.timestamp.year())
        .into_iter()
        .map(|(year, n)| DataPoint::count(year.to_string(), n))
        .collect();

    Chart::new(
        ReportKind::Year,
        "Message count per Year",
        "Year",
        "Message count",
    )
    .with_points(points)
}

/// Messages per calendar month, months present only, January first.
///
/// Months of different years fall into the same bucket.
pub fn month_counts(log: &ChatLog) -> Chart {
    let points = count_by(log, |m| m.timestamp.month0())
        .into_iter()
        .map(|(month0, n)| DataPoint::count(MONTH_NAMES[month0 as usize], n))
        .collect();

    Chart::new(ReportKind::Month, "Message in Months", "Month", "message count")
        .with_points(points)
}

/// Messages per weekday; always seven points, Monday first.
pub fn weekday_counts(log: &ChatLog) -> Chart {
    let mut counts = [0usize; 7];
    for msg in log {
        counts[msg.timestamp.weekday().num_days_from_monday() as usize] += 1;
    }

    let points = WEEKDAY_LABELS
        .iter()
        .zip(counts)
        .map(|(label, n)| DataPoint::count(*label, n))
        .collect();

    Chart::new(
        ReportKind::Day,
        "Message count every Day",
        "Day of Weeks",
        "Message count",
    )
    .with_points(points)
}

/// Messages per hour of day (0-23), hours present only.
pub fn hour_counts(log: &ChatLog) -> Chart {
    let points = count_by(log, |m| m.timestamp.hour())
        .into_iter()
        .map(|(hour, n)| DataPoint::count(hour.to_string(), n))
        .collect();

    Chart::new(
        ReportKind::Hour,
        "Message count every Hour in a day",
        "Hours",
        "Message count",
    )
    .with_points(points)
}

/// Messages per calendar date, dates with messages only, oldest first.
pub fn timeline(log: &ChatLog) -> Chart {
    let points = count_by(log, |m| m.timestamp.date())
        .into_iter()
        .map(|(date, n): (NaiveDate, usize)| {
            DataPoint::count(date.format("%Y-%m-%d").to_string(), n)
        })
        .collect();

    Chart::new(
        ReportKind::Timeline,
        "Your full chat timeline",
        "Date",
        "Message Count",
    )
    .with_points(points)
}

/// Messages per contact, most active first.
///
/// Ties keep the order in which contacts first appear.
pub fn contact_totals(log: &ChatLog) -> Chart {
    let mut totals: Vec<(&str, usize)> = Vec::new();
    for msg in log {
        match totals.iter_mut().find(|(c, _)| *c == msg.contact) {
            Some((_, n)) => *n += 1,
            None => totals.push((&msg.contact, 1)),
        }
    }
    // Stable sort keeps first-appearance order for ties
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let points = totals
        .into_iter()
        .map(|(contact, n)| DataPoint::count(contact, n))
        .collect();

    Chart::new(
        ReportKind::Contacts,
        "Total messages by person",
        "contact",
        "No of messages",
    )
    .with_points(points)
}
