mod app;
pub mod command;
mod logging;

/// Re-exports.
pub use app::{Args, RunCmd};

use anyhow::{Context, Result};
use confluence_config::Config;
use confluence_core::{
    CommandCopy, DirectoryDownloader, MarkdownRenderer, NotificationSink, Notifier, RenderOptions,
    Session, SystemClipboard,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Builds the renderer described by the `[render]` section.
pub fn renderer_from_config(config: &Config) -> MarkdownRenderer {
    MarkdownRenderer::new(RenderOptions {
        line_breaks: config.render.line_breaks,
        enable_tables: config.render.tables,
        ..RenderOptions::confluence()
    })
}

/// Builds the legacy copy command, preferring the configured one.
pub fn fallback_copy_from_config(config: &Config) -> CommandCopy {
    config
        .clipboard
        .fallback_command
        .clone()
        .and_then(CommandCopy::new)
        .unwrap_or_else(CommandCopy::platform_default)
}

/// Assembles a session wired to the system clipboard.
pub fn new_session(
    config: &Config,
    downloader: Arc<DirectoryDownloader>,
    sink: Arc<dyn NotificationSink>,
) -> Session {
    Session::new(
        Box::new(renderer_from_config(config)),
        Box::new(SystemClipboard),
        Box::new(fallback_copy_from_config(config)),
        downloader,
        Notifier::new(sink, Duration::from_millis(config.notification.duration_ms)),
    )
}

/// Reads the markdown source from `input`, or stdin when it is `None` or `-`.
pub fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

/// Where exported files go, the explicit directory first.
pub fn output_dir(explicit: Option<PathBuf>, config: &Config) -> PathBuf {
    explicit.unwrap_or_else(|| config.export.resolved_output_dir())
}
