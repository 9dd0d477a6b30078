//! Standalone HTML export.

use crate::assets::Assets;
use crate::render::RenderedMarkup;
use chrono::{DateTime, TimeZone};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;

/// Suffix of every exported file name.
pub const EXPORT_FILE_SUFFIX: &str = "_confluence-content.html";

/// File name of an export made at `now`: `YYYYMMDD_HHMMSS_confluence-content.html`.
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{EXPORT_FILE_SUFFIX}", now.format("%Y%m%d_%H%M%S"))
}

/// A complete document ready to be handed to a [`Downloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content: String,
}

impl ExportedDocument {
    /// Wraps the rendered markup into the standalone template.
    pub fn new<Tz: TimeZone>(rendered: &RenderedMarkup, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            file_name: export_file_name(now),
            content: Assets::build_export_document(rendered.html()),
        }
    }
}

/// Offers a file to the user. Fire-and-forget: the outcome is not reported back.
pub trait Downloader: Send + Sync {
    fn download(&self, file_name: String, bytes: Vec<u8>);
}

/// Name of the `n`-th duplicate of `file_name`, e.g. `out (1).html`.
fn numbered_file_name(file_name: &str, n: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{file_name} ({n})"),
    }
}

/// Creates `file_name` in `dir`, or the first free numbered variant of it.
async fn create_unique(dir: &Path, file_name: &str) -> std::io::Result<(PathBuf, tokio::fs::File)> {
    let mut path = dir.join(file_name);
    let mut n = 0;
    loop {
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                n += 1;
                path = dir.join(numbered_file_name(file_name, n));
            }
            Err(err) => return Err(err),
        }
    }
}

async fn save(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let (path, mut file) = create_unique(dir, file_name).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(path)
}

/// Saves downloads into a directory on background tasks.
///
/// An existing file is never overwritten, a colliding name gets a ` (n)` suffix.
#[derive(Debug)]
pub struct DirectoryDownloader {
    output_dir: PathBuf,
    pending: Mutex<Vec<JoinHandle<()>>>,
    saved: Arc<Mutex<Vec<PathBuf>>>,
}

impl DirectoryDownloader {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pending: Mutex::new(Vec::new()),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Waits for every write started so far, returning the files saved since the last flush.
    pub async fn flush(&self) -> Vec<PathBuf> {
        let pending = std::mem::take(&mut *self.pending.lock());
        for task in pending {
            if let Err(err) = task.await {
                tracing::error!(?err, "Download task panicked");
            }
        }
        std::mem::take(&mut *self.saved.lock())
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&self, file_name: String, bytes: Vec<u8>) {
        let dir = self.output_dir.clone();
        let saved = self.saved.clone();
        let task = tokio::spawn(async move {
            match save(&dir, &file_name, &bytes).await {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "Saved download");
                    saved.lock().push(path);
                }
                Err(err) => {
                    tracing::error!(?err, dir = %dir.display(), %file_name, "Failed to save download");
                }
            }
        });

        let mut pending = self.pending.lock();
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }
}
