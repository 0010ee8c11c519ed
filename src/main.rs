//! # chatviz CLI
//!
//! Command-line interface for the chatviz library.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatviz::ChatvizError;
use chatviz::chatlog::LogSummary;
use chatviz::cli::Args;
use chatviz::config::OutputConfig;
use chatviz::format::{OutputFormat, to_format_string, write_to_format};
use chatviz::logging::init_logging;
use chatviz::report::Chart;
use chatviz::session::{HELP, Outcome, Session};

fn main() {
    let args = <Args as ClapParser>::parse();

    let result = init_logging(args.verbose, args.log_file.as_deref()).and_then(|()| run(&args));
    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatvizError> {
    let config = args.app_config()?;
    let filter = args.filter_config()?;
    let format: OutputFormat = args.format.into();
    let mut session = Session::with_config(config).with_filter(filter);

    if args.interactive {
        if let Some(input) = &args.input {
            let summary = session.load(input)?;
            print_loaded(input, &summary);
        }
        return interactive(&mut session, format);
    }

    let total_start = Instant::now();
    let input = args.require_input()?;

    // Status lines go to stderr when charts are printed to stdout
    let to_files = args.output_dir.is_some();
    let status = |line: String| {
        if to_files {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    };

    status(format!("📊 chatviz v{}", env!("CARGO_PKG_VERSION")));
    status("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".to_string());
    status(format!("📂 Input:   {}", input.display()));
    status(format!("📄 Format:  {}", format));
    if let Some(dir) = &args.output_dir {
        status(format!("💾 Output:  {}", dir.display()));
    }
    if let Some(after) = &args.after {
        status(format!("📅 After:   {}", after));
    }
    if let Some(before) = &args.before {
        status(format!("📅 Before:  {}", before));
    }
    if let Some(contact) = &args.contact {
        status(format!("👤 Contact: {}", contact));
    }

    let parse_start = Instant::now();
    let summary = session.load(input)?;
    status(format!(
        "⏳ Parsed {} ({:.2}s)",
        summary,
        parse_start.elapsed().as_secs_f64()
    ));
    status(String::new());

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let explicit = !args.reports.is_empty();
    let mut produced = 0usize;
    for kind in args.report_kinds() {
        let chart = match session.run(kind) {
            Ok(chart) => chart,
            Err(e) if !explicit && e.is_contact_count() => {
                status(format!("⏭️  Skipping {}: {}", kind, e));
                continue;
            }
            Err(e) => return Err(e),
        };

        match &args.output_dir {
            Some(dir) => {
                let path = dir.join(format!("{}.{}", kind.name(), format.extension()));
                write_to_format(&chart, &path, format, session.output_config())?;
                status(format!("💾 {} → {}", kind, path.display()));
            }
            None => print_chart(&chart, format, session.output_config())?,
        }
        produced += 1;
    }

    status(String::new());
    status(format!(
        "✅ Done! {} report(s) in {:.2}s",
        produced,
        total_start.elapsed().as_secs_f64()
    ));
    Ok(())
}

fn print_chart(chart: &Chart, format: OutputFormat, config: &OutputConfig) -> Result<(), ChatvizError> {
    let rendered = to_format_string(chart, format, config)?;
    println!("{}", rendered.trim_end());
    println!();
    Ok(())
}

fn print_loaded(path: &Path, summary: &LogSummary) {
    println!("✅ Loaded {}: {}", path.display(), summary);
}

/// Reads commands from stdin until `quit` or end of input.
fn interactive(session: &mut Session, format: OutputFormat) -> Result<(), ChatvizError> {
    println!("📊 chatviz v{} - type 'help' for commands", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("chatviz> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        match session.execute(&line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Nothing) => {}
            Ok(Outcome::Help) => println!("{}", HELP),
            Ok(Outcome::Summary(summary)) => println!("📊 {}", summary),
            Ok(Outcome::Loaded(summary)) => {
                let path = session.source().unwrap_or(Path::new(line.trim()));
                print_loaded(path, &summary);
            }
            Ok(Outcome::Charts(charts)) => {
                for chart in &charts {
                    print_chart(chart, format, session.output_config())?;
                }
            }
            // Command errors are reported and the session continues
            Err(e) => println!("❌ Error: {}", e),
        }
    }

    println!("👋 Bye");
    Ok(())
}
