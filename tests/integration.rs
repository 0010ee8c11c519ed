//! Integration tests: parse real export files and run every report on them.

use chatviz::prelude::*;
use chatviz::report::{format_duration, reply_times, word_frequencies};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Android, 12-hour clock, day-first dates, two people
        let android = "\
12/03/23, 9:15 pm - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them. Tap to learn more.
12/03/23, 9:15 pm - Alice: Hey Bob! Are we still on for pizza tomorrow?
12/03/23, 9:20 pm - Bob: Yes! Pizza at 7
12/03/23, 9:21 pm - Bob: I'll bring the cat photos
multiline second line
13/03/23, 8:05 am - Alice: <Media omitted>
13/03/23, 8:35 am - Bob: Good morning
01/01/24, 12:00 am - Alice: Happy new year!
01/01/24, 12:10 am - Bob: Happy new year Alice
";
        fs::write(format!("{dir}/whatsapp_android.txt"), android).unwrap();

        // iOS, bracketed, month-first, seconds, direction marks
        let ios = "\u{200e}[1/15/24, 10:30:45\u{202f}AM] Alice: Hello
[1/15/24, 10:31:00 AM] Bob: Hi
[1/16/24, 8:02:10 PM] Alice: Bye
";
        fs::write(format!("{dir}/whatsapp_ios.txt"), ios).unwrap();

        // Group chat with notices, 24-hour dotted dates
        let group = "\
26.10.2025, 20:40 - Alice created group \"Trip\"
26.10.2025, 20:41 - Alice added Bob
26.10.2025, 20:42 - Alice: Welcome!
26.10.2025, 20:43 - Bob: Thanks
26.10.2025, 20:44 - Carol joined using this group's invite link
26.10.2025, 20:45 - Carol: Hi all
27.10.2025, 07:00 - Alice: Morning
";
        fs::write(format!("{dir}/whatsapp_group.txt"), group).unwrap();

        fs::write(format!("{dir}/not_a_chat.txt"), "just some notes\nnothing else\n").unwrap();
    });
}

fn fixture(name: &str) -> PathBuf {
    ensure_fixtures();
    Path::new(fixtures_dir()).join(name)
}

fn parse(name: &str) -> ChatLog {
    WhatsAppParser::new().parse(&fixture(name)).unwrap()
}

fn labels(chart: &Chart) -> Vec<&str> {
    chart.points.iter().map(|p| p.label.as_str()).collect()
}

fn run(kind: ReportKind, log: &ChatLog) -> Chart {
    generate(kind, log, &ReportConfig::default()).unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_android_fixture_parses() {
    let log = parse("whatsapp_android.txt");
    assert_eq!(log.len(), 7);
    assert_eq!(log.contacts(), vec!["Alice", "Bob"]);

    let photos = &log.messages()[3];
    assert_eq!(photos.content, "I'll bring the cat photos\nmultiline second line");
    assert!(log.messages()[4].is_media_placeholder());

    let summary = log.summary();
    assert_eq!(
        summary.to_string(),
        "7 messages from 2 contacts (2023-03-12 to 2024-01-01)"
    );
}

#[test]
fn test_ios_fixture_parses() {
    let log = parse("whatsapp_ios.txt");
    assert_eq!(log.len(), 3);
    assert_eq!(
        log.messages()[0].timestamp.to_string(),
        "2024-01-15 10:30:45"
    );
    assert_eq!(
        log.messages()[2].timestamp.to_string(),
        "2024-01-16 20:02:10"
    );
}

#[test]
fn test_group_fixture_drops_notices() {
    let log = parse("whatsapp_group.txt");
    assert_eq!(log.len(), 4);
    assert_eq!(log.contacts(), vec!["Alice", "Bob", "Carol"]);
    assert_eq!(log.messages()[3].timestamp.to_string(), "2025-10-27 07:00:00");
}

#[test]
fn test_not_a_chat_is_invalid_format() {
    let err = WhatsAppParser::new()
        .parse(&fixture("not_a_chat.txt"))
        .unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = WhatsAppParser::new()
        .parse(Path::new("tests/fixtures/does_not_exist.txt"))
        .unwrap_err();
    assert!(err.is_io());
}

// =========================================================================
// Reports
// =========================================================================

#[test]
fn test_year_report() {
    let chart = run(ReportKind::Year, &parse("whatsapp_android.txt"));
    assert_eq!(labels(&chart), vec!["2023", "2024"]);
    assert_eq!(chart.value_of("2023"), Some(5.0));
    assert_eq!(chart.value_of("2024"), Some(2.0));
    assert_eq!(chart.x_label, "Year");
}

#[test]
fn test_month_report() {
    let chart = run(ReportKind::Month, &parse("whatsapp_android.txt"));
    assert_eq!(labels(&chart), vec!["January", "March"]);
    assert_eq!(chart.value_of("March"), Some(5.0));
}

#[test]
fn test_weekday_report() {
    // 2023-03-12 was a Sunday, 2023-03-13 and 2024-01-01 Mondays
    let chart = run(ReportKind::Day, &parse("whatsapp_android.txt"));
    assert_eq!(
        labels(&chart),
        vec!["Mon", "Tue", "Wed", "Thurs", "Fri", "Sat", "Sun"]
    );
    assert_eq!(chart.value_of("Mon"), Some(4.0));
    assert_eq!(chart.value_of("Sun"), Some(3.0));
    assert_eq!(chart.value_of("Fri"), Some(0.0));
}

#[test]
fn test_hour_report() {
    let chart = run(ReportKind::Hour, &parse("whatsapp_android.txt"));
    assert_eq!(labels(&chart), vec!["0", "8", "21"]);
    assert_eq!(chart.value_of("21"), Some(3.0));
}

#[test]
fn test_timeline_report() {
    let chart = run(ReportKind::Timeline, &parse("whatsapp_android.txt"));
    assert_eq!(labels(&chart), vec!["2023-03-12", "2023-03-13", "2024-01-01"]);
    assert!((chart.total() - 7.0).abs() < f64::EPSILON);
}

#[test]
fn test_contacts_report() {
    let chart = run(ReportKind::Contacts, &parse("whatsapp_android.txt"));
    assert_eq!(labels(&chart), vec!["Bob", "Alice"]);
    assert_eq!(chart.value_of("Bob"), Some(4.0));
}

#[test]
fn test_word_cloud_report() {
    let log = parse("whatsapp_android.txt");
    let words = word_frequencies(&log, &ReportConfig::default());

    assert!(words.iter().all(|w| w.word != "Media" && w.word != "omitted"));
    assert!(words.iter().all(|w| w.word.to_lowercase() != "the"));

    let pizza = words
        .iter()
        .find(|w| w.word.eq_ignore_ascii_case("pizza"))
        .unwrap();
    assert_eq!(pizza.count, 2);
    assert_eq!(words[0].count, 2);
    assert!((words[0].weight - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_reply_time_report() {
    let log = parse("whatsapp_android.txt");
    let times = reply_times(&log, &ReportConfig::default()).unwrap();

    let bob = times.iter().find(|t| t.contact == "Bob").unwrap();
    assert_eq!(bob.samples, 3);
    // 5 min, 30 min and 10 min replies
    assert_eq!(bob.average_seconds, Some(900.0));
    assert_eq!(format_duration(900.0), "0 days 00:15:00");

    let chart = run(ReportKind::ReplyTime, &log);
    assert_eq!(chart.unit, ValueUnit::Seconds);
    assert!(chart.note.is_some());
}

#[test]
fn test_reply_time_rejects_group() {
    let log = parse("whatsapp_group.txt");
    let err = generate(ReportKind::ReplyTime, &log, &ReportConfig::default()).unwrap_err();
    assert!(err.is_contact_count());
    assert_eq!(
        err.to_string(),
        "Can't use when number of people not equal to 2 (found 3)"
    );
}

// =========================================================================
// Filters, session and output
// =========================================================================

#[test]
fn test_filters_before_reports() {
    let log = parse("whatsapp_android.txt");
    let filter = FilterConfig::new().with_date_from("2024-01-01").unwrap();
    let chart = run(ReportKind::Year, &apply_filters(log, &filter));
    assert_eq!(labels(&chart), vec!["2024"]);
}

#[test]
fn test_session_end_to_end() {
    let mut session = Session::new();
    assert!(session.run(ReportKind::Year).unwrap_err().is_not_loaded());

    let line = format!("load {}", fixture("whatsapp_android.txt").display());
    match session.execute(&line).unwrap() {
        Outcome::Loaded(summary) => assert_eq!(summary.messages, 7),
        other => panic!("unexpected outcome: {other:?}"),
    }

    match session.execute("all").unwrap() {
        Outcome::Charts(charts) => assert_eq!(charts.len(), ReportKind::all().len()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_every_report_in_every_format() {
    let log = parse("whatsapp_android.txt");
    let dir = tempfile::tempdir().unwrap();

    for kind in ReportKind::all() {
        let chart = run(*kind, &log);
        for format in OutputFormat::all() {
            let path = dir
                .path()
                .join(format!("{}.{}", kind.name(), format.extension()));
            write_to_format(&chart, &path, *format, &OutputConfig::new()).unwrap();
            assert!(fs::metadata(&path).unwrap().len() > 0);
        }
    }

    let csv = fs::read_to_string(dir.path().join("contacts.csv")).unwrap();
    assert!(csv.starts_with("contact,No of messages\n"));
    assert!(csv.contains("Bob,4\n"));

    let json = fs::read_to_string(dir.path().join("year.json")).unwrap();
    let chart: Chart = serde_json::from_str(&json).unwrap();
    assert_eq!(chart.report, ReportKind::Year);
}
