mod app;
mod calendar;
mod details;
mod help;
mod options;
mod style;
use crate::app::{App, LogClicks};
use crate::calendar::{describe, CalendarView, ParsedDate, WeekStart};
use crate::options::{DataSource, Options};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Box<Options>),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut data = None;
        let mut starts_on_sunday = true;
        let mut opts = Options::new(DataSource::Stdin);
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("start") => {
                    opts.start = Some(parser.value()?.parse::<ParsedDate>()?.to_string());
                }
                Arg::Short('e') | Arg::Long("end") => {
                    opts.end = Some(parser.value()?.parse::<ParsedDate>()?.to_string());
                }
                Arg::Short('m') | Arg::Long("monday") => starts_on_sunday = false,
                Arg::Short('b') | Arg::Long("boundary") => opts.include_boundary = true,
                Arg::Short('t') | Arg::Long("theme") => {
                    opts.theme = parser.value()?.parse()?;
                }
                Arg::Short('T') | Arg::Long("theme-file") => {
                    opts.theme_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("text-color") => opts.text_color = Some(parser.value()?.parse()?),
                Arg::Long("cell-width") => opts.cell_width = parser.value()?.parse()?,
                Arg::Long("cell-height") => opts.cell_height = parser.value()?.parse()?,
                Arg::Long("dump") => opts.dump = true,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if data.is_none() => {
                    data = Some(if value == "-" {
                        DataSource::Stdin
                    } else {
                        DataSource::File(PathBuf::from(value))
                    });
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let Some(data) = data else {
            return Err(lexopt::Error::from("missing DATAFILE argument"));
        };
        opts.data = data;
        opts.week_start = WeekStart::from_starts_on_sunday(starts_on_sunday);
        Ok(Command::Run(Box::new(opts)))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                init_logging(opts.log_file.as_deref(), opts.dump)?;
                let grid = opts.grid(local_today)?;
                let theme = opts.theme()?;
                let index = opts.activity()?;
                if opts.dump {
                    let cells = describe(&grid, &index, &theme);
                    let stdout = io::stdout().lock();
                    serde_json::to_writer_pretty(stdout, &cells)
                        .context("failed to write cell descriptors")?;
                    println!();
                    return Ok(());
                }
                let view = CalendarView::new(grid, &index, theme);
                let app = App::new(view, opts.calendar(), LogClicks);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: contribcal [options] <DATAFILE | ->");
                println!();
                println!("Terminal contribution calendar showing per-day activity levels");
                println!();
                println!("DATAFILE holds a JSON array of day objects such as");
                println!("{{\"date\": \"2023-06-15\", \"level\": 4, \"data\": ...}}.");
                println!("Pass - to read it from standard input.");
                println!();
                println!("Options:");
                println!("  -s, --start <DATE>      First day shown [default: Jan 1 this year]");
                println!("  -e, --end <DATE>        Last day shown [default: Dec 31 this year]");
                println!("  -m, --monday            Start weeks on Monday instead of Sunday");
                println!("  -b, --boundary          Draw placeholders for days outside the range");
                println!("  -t, --theme <NAME>      grass, halloween, winter, emoji_positive,");
                println!("                          or emoji_negative [default: grass]");
                println!("  -T, --theme-file <PATH> Read a custom theme from a JSON file");
                println!("      --text-color <COLOR>");
                println!("                          Color of the weekday, month, and legend text");
                println!("      --cell-width <N>    Terminal columns per day [default: 2]");
                println!("      --cell-height <N>   Terminal lines per day [default: 1]");
                println!("      --dump              Print the cell descriptors as JSON and exit");
                println!("      --log-file <PATH>   Write log messages to PATH");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// Install a subscriber only where its output cannot land on the UI: a
/// requested log file, or stderr when no UI is drawn
fn init_logging(log_file: Option<&Path>, dump: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = log_file {
        let fp = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(fp))
            .init();
    } else if dump {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn local_today() -> anyhow::Result<Date> {
    let now = OffsetDateTime::now_local().context("failed to determine local date")?;
    Ok(now.date())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Theme;
    use ratatui::style::Color;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cmd = parse(&["data.json"]).expect("valid arguments");
        assert_eq!(
            cmd,
            Command::Run(Box::new(Options::new(DataSource::File(PathBuf::from(
                "data.json"
            )))))
        );
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "-s",
            "2023-06-15",
            "--end=2023-12-31",
            "-m",
            "-b",
            "--theme",
            "winter",
            "--text-color",
            "yellow",
            "--cell-width",
            "3",
            "--cell-height",
            "2",
            "--dump",
            "-",
        ])
        .expect("valid arguments");
        let opts = match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Command::Run, got {other:?}"),
        };
        assert_eq!(opts.data, DataSource::Stdin);
        assert_eq!(opts.start.as_deref(), Some("2023-06-15"));
        assert_eq!(opts.end.as_deref(), Some("2023-12-31"));
        assert_eq!(opts.week_start, WeekStart::Monday);
        assert!(opts.include_boundary);
        assert_eq!(opts.theme, "winter".parse::<Theme>().expect("preset"));
        assert_eq!(opts.text_color, Some(Color::Yellow));
        assert_eq!((opts.cell_width, opts.cell_height), (3, 2));
        assert!(opts.dump);
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["data.json", "--help"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["-s", "2023-6-15", "data.json"]).is_err());
        assert!(parse(&["-t", "autumn", "data.json"]).is_err());
        assert!(parse(&["--cell-width", "wide", "data.json"]).is_err());
        assert!(parse(&["one.json", "two.json"]).is_err());
    }
}
