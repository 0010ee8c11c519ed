//! WhatsApp TXT line grammar.
//!
//! WhatsApp exports vary by platform and locale. Every message starts with a
//! header line carrying date, time and sender; lines without a header
//! continue the previous message.
//!
//! Supported layouts:
//! - Dashed (Android): `15/01/24, 10:30 am - Sender: Message`
//! - Bracketed (iOS): `[1/15/24, 10:30:45 AM] Sender: Message`
//!
//! Both accept `/` or `.` date separators, two- or four-digit years,
//! optional seconds and an optional 12-hour marker.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::config::DateOrder;

const DATE: &str = r"(\d{1,2}[./]\d{1,2}[./]\d{2,4})";
const TIME: &str = r"(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AaPp]\.?\s?[Mm]\.?)?)";

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\[{DATE},?\s{TIME}\]\s?(.*)$")).expect("valid bracketed header")
});

static DASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DATE},?\s{TIME}\s[-–]\s(.*)$")).expect("valid dashed header")
});

/// Time formats tried in order once the 12-hour marker is normalised.
const TIME_FORMATS: &[&str] = &["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Header line layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Android: `15/01/24, 10:30 am - Sender: Message`
    Dashed,
    /// iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
    Bracketed,
}

impl Layout {
    /// Returns all layouts in detection priority order.
    pub fn all() -> &'static [Layout] {
        &[Layout::Dashed, Layout::Bracketed]
    }

    /// Returns the compiled header regex for this layout.
    ///
    /// Captures: 1 = date, 2 = time, 3 = everything after the header.
    pub fn regex(self) -> &'static Regex {
        match self {
            Layout::Dashed => &*DASHED,
            Layout::Bracketed => &*BRACKETED,
        }
    }

    /// Day/month order assumed when the dates never disambiguate it.
    ///
    /// Android exports are most often day-first; iOS exports with slashes
    /// come from US locales.
    pub fn default_order(self) -> DateOrder {
        match self {
            Layout::Dashed => DateOrder::DayFirst,
            Layout::Bracketed => DateOrder::MonthFirst,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Dashed => write!(f, "dashed"),
            Layout::Bracketed => write!(f, "bracketed"),
        }
    }
}

/// The three parts of a message header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Raw date text, e.g. `15/01/24`
    pub date: &'a str,
    /// Raw time text, e.g. `10:30 am`
    pub time: &'a str,
    /// Everything after the header: `Sender: Message` or a system notice
    pub rest: &'a str,
}

/// Matches a (normalised) line against a layout's header.
pub fn match_header(line: &str, layout: Layout) -> Option<Header<'_>> {
    let caps = layout.regex().captures(line)?;
    Some(Header {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        rest: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Strips direction marks and byte-order marks and turns exotic spaces into
/// plain ones.
///
/// iOS exports prefix lines with U+200E and newer Android exports put a
/// narrow no-break space (U+202F) before `am`/`pm`.
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim_start_matches(['\u{feff}', '\u{200e}', '\u{200f}']);
    if trimmed.contains(['\u{202f}', '\u{a0}']) {
        Cow::Owned(trimmed.replace(['\u{202f}', '\u{a0}'], " "))
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Auto-detect the header layout by analyzing sample lines.
///
/// Returns the layout matching the most lines, or `None` if no line looks
/// like a WhatsApp header.
pub fn detect_layout(lines: &[&str]) -> Option<Layout> {
    let layouts = Layout::all();
    let mut scores = vec![0usize; layouts.len()];

    for line in lines {
        for (i, layout) in layouts.iter().enumerate() {
            if layout.regex().is_match(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(layouts[winner_idx])
}

/// Decides day-first vs month-first for slash-separated dates.
///
/// An explicit preference wins. Otherwise the first date with a field
/// greater than 12 decides, falling back to [`Layout::default_order`].
pub fn resolve_date_order<'a>(
    dates: impl IntoIterator<Item = &'a str>,
    layout: Layout,
    preference: DateOrder,
) -> DateOrder {
    if preference != DateOrder::Auto {
        return preference;
    }

    for date in dates {
        if date.contains('.') {
            continue;
        }
        let mut fields = date.split('/').map(|f| f.parse::<u32>().unwrap_or(0));
        let (first, second) = (fields.next().unwrap_or(0), fields.next().unwrap_or(0));
        if first > 12 {
            return DateOrder::DayFirst;
        }
        if second > 12 {
            return DateOrder::MonthFirst;
        }
    }

    layout.default_order()
}

/// Parses a header date. Dotted dates are always day-first.
pub fn parse_date(date: &str, order: DateOrder) -> Option<NaiveDate> {
    let separator = if date.contains('.') { '.' } else { '/' };
    let fields: Vec<&str> = date.split(separator).collect();
    let [a, b, y] = fields.as_slice() else {
        return None;
    };

    let a: u32 = a.parse().ok()?;
    let b: u32 = b.parse().ok()?;
    let (day, month) = if separator == '/' && order == DateOrder::MonthFirst {
        (b, a)
    } else {
        (a, b)
    };

    let year: i32 = y.parse().ok()?;
    // Same pivot as chrono's `%y`
    let year = match (y.len(), year) {
        (1..=2, 0..=68) => 2000 + year,
        (1..=2, _) => 1900 + year,
        _ => year,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a header time in 12- or 24-hour form.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    // "10:30 a. m." and "10:30am" both become "10:30 am"
    let mut normalized: String = time
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect();
    if normalized.ends_with("am") || normalized.ends_with("pm") {
        let marker_at = normalized.len() - 2;
        let clock = normalized[..marker_at].to_string();
        normalized = format!("{clock} {}", &normalized[marker_at..]);
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

/// Parse timestamp from date and time strings.
pub fn parse_timestamp(date: &str, time: &str, order: DateOrder) -> Option<NaiveDateTime> {
    Some(NaiveDateTime::new(parse_date(date, order)?, parse_time(time)?))
}

/// Splits `Sender: Message` at the first colon.
///
/// Returns `None` for header remainders without a colon; those are group
/// notices such as "Alice joined using this group's invite link".
pub fn split_sender(rest: &str) -> Option<(&str, &str)> {
    let (contact, content) = rest.split_once(':')?;
    let content = content.strip_prefix(' ').unwrap_or(content);
    Some((contact.trim(), content))
}

/// Phrases that mark a "sender" as the start of a group notice.
///
/// A notice can contain a colon, e.g. a new subject with a time in it,
/// which makes the text before the colon look like a contact.
const NOTICE_PHRASES: &[&str] = &[
    "changed the subject",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "changed their phone number",
    "changed the group settings",
    "created group",
    "created this group",
    " added ",
    " removed ",
    "joined using",
    "security code",
    "end-to-end encrypted",
    "is now an admin",
    "now an admin",
    "disappearing messages",
    "pinned a message",
];

/// Encryption notices as they appear in message content.
const ENCRYPTION_NOTICES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "messages to this group are now secured",
    "сообщения и звонки защищены сквозным шифрованием",
];

/// Check if a row is a system message rather than something a person wrote.
pub fn is_system_message(contact: &str, content: &str) -> bool {
    let contact_lower = contact.trim().to_lowercase();
    if contact_lower.is_empty() || contact_lower == "whatsapp" || contact_lower == "system" {
        return true;
    }

    if contact_lower.ends_with(" left")
        || NOTICE_PHRASES
            .iter()
            .any(|phrase| contact_lower.contains(phrase))
    {
        return true;
    }

    let content_lower = content.trim_start().to_lowercase();
    ENCRYPTION_NOTICES
        .iter()
        .any(|notice| content_lower.starts_with(notice))
}
