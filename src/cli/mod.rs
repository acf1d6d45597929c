pub mod command;
pub mod output;
pub mod shell;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use command::{dispatch, Command, DEFAULT_TOP_COUNT};
use output::{render_json, render_text};
use shell::Shell;
use tracing::{error, level_filters::LevelFilter};

use crate::{
    analysis::log::UsageLog,
    storage::{log_file::JsonLogFile, LoadError, LogSource},
    utils::{
        dir::state_dir,
        logging::{enable_logging, LogSettings},
    },
};

pub const DEFAULT_LOG_FILE: &str = "screen_time_log.json";

#[derive(Parser, Debug)]
#[command(name = "Screentime", version)]
#[command(about = "Application for analyzing per-day screen time logs", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(
        long,
        short,
        env = "SCREENTIME_FILE",
        default_value = DEFAULT_LOG_FILE,
        help = "JSON file mapping dates to seconds of usage per application"
    )]
    file: PathBuf,
    #[arg(long, help = "Print results as JSON instead of tables")]
    json: bool,
    #[arg(long, help = "Mirror logs to stderr")]
    log: bool,
    #[arg(long = "log-filter", help = "Log level. Falls back to RUST_LOG, then info")]
    log_filter: Option<LevelFilter>,
    #[arg(
        long,
        help = "Directory for the analyzer's own log files. By default $XDG_STATE_HOME/screentime or $HOME/.local/state/screentime"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    #[command(about = "Start the interactive menu. Used when no command is given")]
    Interactive,
    #[command(about = "Sum the seconds of an exact (case-sensitive) key across all days")]
    Sum { key: String },
    #[command(about = "Search for keys containing a term (case-insensitive)")]
    Search { term: String },
    #[command(about = "Show keys with the largest total time")]
    Top {
        #[arg(default_value_t = DEFAULT_TOP_COUNT, allow_negative_numbers = true)]
        count: i64,
    },
    #[command(about = "Show all unique keys")]
    Keys,
    #[command(about = "Show usage of an exact key for every day it appears")]
    ByDate { key: String },
}

impl Commands {
    /// `None` means the interactive menu was requested.
    fn into_command(self) -> Result<Option<Command>> {
        let command = match self {
            Commands::Interactive => return Ok(None),
            Commands::Sum { key } => Command::SumKey(non_empty(key, "Key name cannot be empty.")?),
            Commands::Search { term } => {
                Command::Search(non_empty(term, "Search term cannot be empty.")?)
            }
            Commands::Top { count } => Command::Top(count),
            Commands::Keys => Command::ListKeys,
            Commands::ByDate { key } => {
                Command::UsageByDate(non_empty(key, "Key name cannot be empty.")?)
            }
        };
        Ok(Some(command))
    }
}

fn non_empty(value: String, message: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Args::command()
            .error(clap::error::ErrorKind::ValueValidation, message)
            .into());
    }
    Ok(value.to_string())
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let log_dir = state_dir(args.dir.clone())?;
    enable_logging(
        &log_dir,
        &LogSettings {
            level: args.log_filter,
            mirror_to_stderr: args.log,
        },
    )?;

    let command = args
        .commands
        .unwrap_or(Commands::Interactive)
        .into_command()?;

    // Status lines must not end up inside JSON output.
    let mut status: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let log = load_log(&args.file, &mut status).await?;

    match command {
        None => {
            let stdin = io::stdin();
            Shell::new(&log, stdin.lock(), io::stdout().lock()).run()
        }
        Some(command) => {
            let output = dispatch(&log, command);
            let mut stdout = io::stdout().lock();
            if args.json {
                render_json(&output, &mut stdout)
            } else {
                render_text(&output, &mut stdout)?;
                Ok(())
            }
        }
    }
}

/// Loads the log, substituting an empty one when it can't be read. The failure is reported but
/// never aborts the run.
async fn load_log(path: &Path, status: &mut impl Write) -> Result<UsageLog> {
    match JsonLogFile::new(path).load().await {
        Ok(log) => {
            writeln!(status, "Successfully loaded data from {}", path.display())?;
            writeln!(status, "Found {} days of data", log.day_count())?;
            Ok(log)
        }
        Err(e) => {
            error!("Failed to load {path:?}: {e:?}");
            writeln!(status, "{}", load_failure_message(&e))?;
            Ok(UsageLog::default())
        }
    }
}

fn load_failure_message(error: &LoadError) -> String {
    match error {
        LoadError::NotFound { path } => format!("Error: File '{}' not found.", path.display()),
        LoadError::Parse(e) => format!("Error: Invalid JSON format - {e}"),
        LoadError::Io { source, .. } => format!("Error loading file: {source}"),
    }
}
