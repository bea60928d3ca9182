use std::{
    env,
    fmt::Write as _,
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Local, TimeZone};
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::{DEFAULT_LOG_FILTER, LOG_FILE_ENV, LOG_TIMESTAMP_FORMAT};

#[derive(Debug, Clone, Copy, Default)]
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", format_timestamp(&Local::now()))
    }
}

fn format_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format(LOG_TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn resolve_log_file_path() -> Option<PathBuf> {
    env::var(LOG_FILE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber: stderr always, plus the optional log file.
pub(crate) fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTimestamp)
        .with_target(false)
        .with_writer(io::stderr);

    let mut file_error = None;
    let file_layer = resolve_log_file_path().and_then(|path| match open_log_file(&path) {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimestamp)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(error) => {
            file_error = Some(format!(
                "failed to open log file {}: {}",
                path.display(),
                error
            ));
            None
        }
    });

    if let Err(error) = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("failed to initialize logging: {error}");
        return;
    }

    if let Some(message) = file_error {
        tracing::warn!("{message}");
    }
}
