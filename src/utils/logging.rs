use std::{io, path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log files are named `screentime.<date>` inside [LOG_DIR_NAME].
pub const LOG_FILE_PREFIX: &str = "screentime";
pub const LOG_DIR_NAME: &str = "logs";
const KEPT_LOG_FILES: usize = 5;

/// How the analyzer reports what it is doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Explicit level. Falls back to `RUST_LOG`, then `info`.
    pub level: Option<LevelFilter>,
    /// Copy every record to stderr as well. Stdout stays reserved for results.
    pub mirror_to_stderr: bool,
}

impl LogSettings {
    /// Directive limiting output to this crate, e.g. `screentime=debug`.
    fn directive(&self, env_level: Option<String>) -> String {
        let level = self
            .level
            .map(|v| v.to_string())
            .or(env_level)
            .unwrap_or_else(|| "info".into());
        format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
    }
}

/// Daily rolling file under `<state_dir>/logs`, keeping the last few days.
fn file_appender(state_dir: &Path) -> Result<RollingFileAppender> {
    Ok(tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(state_dir.join(LOG_DIR_NAME))?)
}

/// Installs the global subscriber. The log file is always written, so a log that failed to load
/// leaves a trace there even when nothing is mirrored to the terminal.
pub fn enable_logging(state_dir: &Path, settings: &LogSettings) -> Result<()> {
    let file = fmt::layer()
        .with_writer(file_appender(state_dir)?)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false);
    let stderr = settings
        .mirror_to_stderr
        .then(|| fmt::layer().with_writer(io::stderr).with_ansi(false));

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            settings.directive(std::env::var("RUST_LOG").ok()),
        ))
        .with(file)
        .with(stderr)
        .try_init()?;
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
