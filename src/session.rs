//! Interactive session state.
//!
//! A [`Session`] remembers the loaded chat and the active configuration, so
//! reports can be requested one after another without re-reading the file.
//! Every report refuses to run until a chat has been loaded.
//!
//! # Example
//!
//! ```rust
//! use chatviz::session::{Outcome, Session};
//!
//! let mut session = Session::new();
//! assert!(session.execute("year").unwrap_err().is_not_loaded());
//! assert!(matches!(session.execute("quit")?, Outcome::Quit));
//! # Ok::<(), chatviz::ChatvizError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::chatlog::{ChatLog, LogSummary};
use crate::config::{AppConfig, OutputConfig, ReportConfig};
use crate::core::filter::{FilterConfig, apply_filters};
use crate::error::{ChatvizError, Result};
use crate::parser::WhatsAppParser;
use crate::report::{Chart, ReportKind, generate};

/// Help text for the interactive prompt.
pub const HELP: &str = "\
Commands:
  load <path>    load a WhatsApp chat export (.txt)
  year           message count per year
  month          message count per month
  day            message count per weekday
  hour           message count per hour of day
  timeline       message count per date
  words          most used words
  contacts       messages per contact
  reply          average reply time (two-person chats only)
  all            every report
  summary        show what is loaded
  help           show this help
  quit           leave (also: exit, cancel)";

/// Result of one interactive command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A chat was loaded
    Loaded(LogSummary),
    /// One or more reports ran
    Charts(Vec<Chart>),
    /// Headline numbers of the loaded chat
    Summary(LogSummary),
    /// The user asked for help
    Help,
    /// Blank input
    Nothing,
    /// The user wants to leave
    Quit,
}

/// Loaded chat plus the configuration reports run with.
#[derive(Debug, Clone, Default)]
pub struct Session {
    log: Option<ChatLog>,
    source: Option<PathBuf>,
    parser: WhatsAppParser,
    report_config: ReportConfig,
    filter: FilterConfig,
    output_config: OutputConfig,
}

impl Session {
    /// Creates an empty session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session from a full configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            parser: WhatsAppParser::with_config(config.parser),
            report_config: config.report,
            output_config: config.output,
            ..Self::default()
        }
    }

    /// Builder method to set the filter applied to every loaded chat.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Returns `true` once a chat has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.log.is_some()
    }

    /// The loaded chat, if any.
    pub fn log(&self) -> Option<&ChatLog> {
        self.log.as_ref()
    }

    /// Path of the loaded chat, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Output settings for rendering charts.
    pub fn output_config(&self) -> &OutputConfig {
        &self.output_config
    }

    /// Report settings.
    pub fn report_config(&self) -> &ReportConfig {
        &self.report_config
    }

    /// Parses a chat export and makes it the active chat.
    ///
    /// Any previously loaded chat is dropped first, so a failed load leaves
    /// the session unloaded.
    pub fn load(&mut self, path: &Path) -> Result<LogSummary> {
        self.log = None;
        self.source = None;

        let log = apply_filters(self.parser.parse(path)?, &self.filter);
        let summary = log.summary();
        info!(path = %path.display(), %summary, "chat loaded");

        self.log = Some(log);
        self.source = Some(path.to_path_buf());
        Ok(summary)
    }

    /// Makes an already parsed chat the active chat.
    pub fn set_log(&mut self, log: ChatLog) {
        self.log = Some(apply_filters(log, &self.filter));
        self.source = None;
    }

    fn loaded(&self) -> Result<&ChatLog> {
        self.log.as_ref().ok_or(ChatvizError::NotLoaded)
    }

    /// Runs one report on the loaded chat.
    ///
    /// # Errors
    ///
    /// [`ChatvizError::NotLoaded`] before a chat is loaded, otherwise
    /// whatever [`generate`] returns.
    pub fn run(&self, kind: ReportKind) -> Result<Chart> {
        generate(kind, self.loaded()?, &self.report_config)
    }

    /// Runs every report, skipping reply time when the chat is not a
    /// two-person chat.
    pub fn run_all(&self) -> Result<Vec<Chart>> {
        let log = self.loaded()?;
        let mut charts = Vec::with_capacity(ReportKind::all().len());
        for &kind in ReportKind::all() {
            match generate(kind, log, &self.report_config) {
                Ok(chart) => charts.push(chart),
                Err(err) if err.is_contact_count() => {
                    warn!(report = kind.name(), %err, "report skipped");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(charts)
    }

    /// Headline numbers of the loaded chat.
    pub fn summary(&self) -> Result<LogSummary> {
        Ok(self.loaded()?.summary())
    }

    /// Executes one line typed at the interactive prompt.
    ///
    /// # Errors
    ///
    /// [`ChatvizError::UnknownCommand`] for unrecognised input, plus the
    /// errors of [`load`](Self::load) and [`run`](Self::run).
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => Ok(Outcome::Nothing),
            "quit" | "exit" | "cancel" => Ok(Outcome::Quit),
            "help" | "?" => Ok(Outcome::Help),
            "summary" | "info" => Ok(Outcome::Summary(self.summary()?)),
            "all" => Ok(Outcome::Charts(self.run_all()?)),
            "load" | "open" => {
                let path = arg.trim_matches(|c| c == '"' || c == '\'');
                if path.is_empty() {
                    return Err(ChatvizError::UnknownCommand(
                        "load needs a file path".to_string(),
                    ));
                }
                Ok(Outcome::Loaded(self.load(Path::new(path))?))
            }
            other => {
                let kind: ReportKind = other
                    .parse()
                    .map_err(|_| ChatvizError::UnknownCommand(line.to_string()))?;
                Ok(Outcome::Charts(vec![self.run(kind)?]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHAT: &str = "\
15/01/24, 10:30 am - Alice: Hello there
15/01/24, 10:35 am - Bob: Hi Alice
16/01/24, 9:00 am - Alice: Morning";

    fn chat_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reports_need_a_loaded_chat() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(session.run(ReportKind::Year).unwrap_err().is_not_loaded());
        assert!(session.run_all().unwrap_err().is_not_loaded());
        assert!(session.summary().unwrap_err().is_not_loaded());
    }

    #[test]
    fn test_load_and_run() {
        let file = chat_file(CHAT);
        let mut session = Session::new();
        let summary = session.load(file.path()).unwrap();
        assert_eq!(summary.messages, 3);
        assert_eq!(session.source(), Some(file.path()));

        let chart = session.run(ReportKind::Contacts).unwrap();
        assert_eq!(chart.value_of("Alice"), Some(2.0));
    }

    #[test]
    fn test_failed_load_unloads_previous_chat() {
        let good = chat_file(CHAT);
        let bad = chat_file("not a chat export");
        let mut session = Session::new();
        session.load(good.path()).unwrap();

        assert!(session.load(bad.path()).unwrap_err().is_invalid_format());
        assert!(!session.is_loaded());
        assert_eq!(session.source(), None);
        assert!(session.run(ReportKind::Year).unwrap_err().is_not_loaded());

        session.load(good.path()).unwrap();
        assert!(session.load(Path::new("/no/such/file.txt")).unwrap_err().is_io());
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_failed_load_command_closes_gate() {
        let good = chat_file(CHAT);
        let mut session = Session::new();
        session
            .execute(&format!("load {}", good.path().display()))
            .unwrap();

        assert!(session.execute("load /no/such/file.txt").is_err());
        assert!(session.execute("year").unwrap_err().is_not_loaded());
    }

    #[test]
    fn test_execute_commands() {
        let file = chat_file(CHAT);
        let mut session = Session::new();

        assert_eq!(session.execute("   ").unwrap(), Outcome::Nothing);
        assert_eq!(session.execute("help").unwrap(), Outcome::Help);
        assert!(matches!(
            session.execute("dance"),
            Err(ChatvizError::UnknownCommand(_))
        ));
        assert!(session.execute("load").is_err());

        let load = format!("load \"{}\"", file.path().display());
        assert!(matches!(session.execute(&load).unwrap(), Outcome::Loaded(_)));

        match session.execute("Hours").unwrap() {
            Outcome::Charts(charts) => assert_eq!(charts[0].report, ReportKind::Hour),
            other => panic!("unexpected outcome: {other:?}"),
        }

        match session.execute("all").unwrap() {
            Outcome::Charts(charts) => assert_eq!(charts.len(), ReportKind::all().len()),
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(session.execute("EXIT").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_all_skips_reply_time_for_groups() {
        let mut session = Session::new();
        let log = WhatsAppParser::new()
            .parse_str(&format!("{CHAT}\n16/01/24, 9:05 am - Carol: Hey"))
            .unwrap();
        session.set_log(log);

        let charts = session.run_all().unwrap();
        assert_eq!(charts.len(), ReportKind::all().len() - 1);
        assert!(charts.iter().all(|c| c.report != ReportKind::ReplyTime));
        assert!(session.run(ReportKind::ReplyTime).unwrap_err().is_contact_count());
    }

    #[test]
    fn test_filter_applies_on_load() {
        let file = chat_file(CHAT);
        let filter = FilterConfig::new().with_contact("bob");
        let mut session = Session::new().with_filter(filter);
        assert_eq!(session.load(file.path()).unwrap().messages, 1);
    }
}
