//! File-based tracing setup.
//!
//! Logs go to `${TASKDECK_HOME}/logs/taskdeck.log` (rotated daily) so they
//! never interleave with terminal output.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "TASKDECK_LOG";

const LOG_FILE_PREFIX: &str = "taskdeck.log";
const OWN_CRATES: [&str; 3] = ["taskdeck", "taskdeck_core", "taskdeck_tui"];

/// Keeps the background log writer alive. Drop flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Installs the global subscriber.
///
/// Returns None if the log directory cannot be created or a subscriber is
/// already installed; the program keeps running without logs in that case.
pub fn init(config: &Config) -> Option<LoggingGuard> {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env_directive.as_deref(), &config.log_level);

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "tracing initialized"
    );

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

/// Env directive wins; otherwise a bare level from config applies to our own
/// crates and dependencies stay at `warn`.
fn build_filter(env_directive: Option<&str>, config_level: &str) -> EnvFilter {
    if let Some(directive) = env_directive.map(str::trim).filter(|d| !d.is_empty())
        && let Ok(filter) = EnvFilter::try_new(directive)
    {
        return filter;
    }

    let level = config_level.trim();
    if let Ok(level) = level.parse::<LevelFilter>() {
        let directives = OWN_CRATES
            .iter()
            .map(|name| format!("{name}={level}"))
            .chain(std::iter::once("warn".to_string()))
            .collect::<Vec<_>>()
            .join(",");
        return EnvFilter::new(directives);
    }

    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("taskdeck=info,warn"))
}
