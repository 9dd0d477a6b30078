use anyhow::{anyhow, Result};
use confluence_config::LogConfig;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log files larger than this are removed on startup.
const MAX_LOG_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Picks the log file: `--log`, then `MD2CONFLUENCE_LOG_PATH`, then `log.log-file`.
pub(crate) fn log_file_path(cli_log: Option<PathBuf>, config: &LogConfig) -> Option<PathBuf> {
    cli_log
        .or_else(|| {
            std::env::var("MD2CONFLUENCE_LOG_PATH")
                .ok()
                .map(PathBuf::from)
        })
        .or_else(|| config.log_file.as_ref().map(PathBuf::from))
}

/// Installs the global subscriber.
///
/// With a log file the returned guard must be kept alive until exit so that
/// buffered lines get flushed. Without one, logs go to stderr.
pub(crate) fn init(maybe_log: Option<PathBuf>, config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let max_level = config.max_level.parse().unwrap_or(tracing::Level::INFO);

    let Some(log_path) = maybe_log else {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(max_level.as_str().to_lowercase()));

        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        return Ok(None);
    };

    if let Ok(metadata) = std::fs::metadata(&log_path) {
        if log_path.is_file() && metadata.len() > MAX_LOG_FILE_SIZE {
            std::fs::remove_file(&log_path)?;
        }
    }

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {log_path:?}"))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("{log_path:?} has no parent"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}
