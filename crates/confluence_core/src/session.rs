//! The editing session and its event handlers.
//!
//! [`AppState`] holds the source and the rendered surface. [`Session`] owns the
//! state together with the collaborators (renderer, clipboards, downloader,
//! notifier) and reacts to one [`Event`] at a time. Every user action ends in
//! exactly one [`Notice`].

use crate::clipboard::{Clipboard, ClipboardItem, SelectionCopy};
use crate::export::{Downloader, ExportedDocument};
use crate::notifier::Notifier;
use crate::render::{RenderError, RenderedMarkup, TextRenderer};
use crate::source::{Selection, SourceBuffer};
use chrono::Local;
use std::sync::Arc;

/// Source text and its rendered surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub source: SourceBuffer,
    pub rendered: RenderedMarkup,
}

/// User-visible outcome of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingToCopy,
    Copied,
    CopiedFallback,
    CopyFailed,
    Pasted,
    ClipboardEmpty,
    PasteFailed,
    NothingToDownload,
    DownloadStarted,
    Cleared,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NothingToCopy => "Nothing to copy!",
            Self::Copied => "Copied HTML to clipboard!",
            Self::CopiedFallback => "Copied HTML to clipboard (fallback)!",
            Self::CopyFailed => "Failed to copy. See console.",
            Self::Pasted => "Pasted from clipboard!",
            Self::ClipboardEmpty => "Clipboard is empty!",
            Self::PasteFailed => "Failed to paste. unexpected error.",
            Self::NothingToDownload => "Nothing to download!",
            Self::DownloadStarted => "Download started!",
            Self::Cleared => "Cleared!",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::CopyFailed | Self::PasteFailed)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Discrete UI events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The whole source was replaced by the user.
    Input(String),
    /// Text typed at the end of the source.
    Append(String),
    /// The caret selection moved.
    Select(Selection),
    Copy,
    Paste,
    Download,
    Clear,
}

/// Owns the state and the collaborators of one editing session.
pub struct Session {
    state: AppState,
    renderer: Box<dyn TextRenderer>,
    clipboard: Box<dyn Clipboard>,
    fallback: Box<dyn SelectionCopy>,
    downloader: Arc<dyn Downloader>,
    notifier: Notifier,
}

impl Session {
    pub fn new(
        renderer: Box<dyn TextRenderer>,
        clipboard: Box<dyn Clipboard>,
        fallback: Box<dyn SelectionCopy>,
        downloader: Arc<dyn Downloader>,
        notifier: Notifier,
    ) -> Self {
        Self {
            state: AppState::default(),
            renderer,
            clipboard,
            fallback,
            downloader,
            notifier,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn rendered(&self) -> &RenderedMarkup {
        &self.state.rendered
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Handles one event.
    ///
    /// Edits return `Ok(None)`; user actions return the notice they showed.
    pub async fn dispatch(&mut self, event: Event) -> Result<Option<Notice>, RenderError> {
        let notice = match event {
            Event::Input(text) => {
                self.set_source(text)?;
                None
            }
            Event::Append(text) => {
                let mut source = self.state.source.clone();
                source.append(&text);
                self.commit(source)?;
                None
            }
            Event::Select(selection) => {
                self.state.source.select(selection);
                None
            }
            Event::Copy => Some(self.copy().await),
            Event::Paste => Some(self.paste().await?),
            Event::Download => Some(self.download()),
            Event::Clear => Some(self.clear()?),
        };
        Ok(notice)
    }

    /// Replaces the source and re-renders.
    pub fn set_source(&mut self, text: impl Into<String>) -> Result<(), RenderError> {
        self.commit(SourceBuffer::new(text))
    }

    /// Renders `source` and only then makes it current, so a render failure
    /// leaves the previous source and surface untouched.
    fn commit(&mut self, source: SourceBuffer) -> Result<(), RenderError> {
        let rendered = self.renderer.render(source.text())?;
        self.state = AppState { source, rendered };
        Ok(())
    }

    /// Copies the rendered surface as HTML plus plain text.
    pub async fn copy(&mut self) -> Notice {
        if self.state.rendered.is_blank() {
            return self.notify(Notice::NothingToCopy);
        }

        let item = ClipboardItem::from_rendered(&self.state.rendered);

        match self.clipboard.write(&item).await {
            Ok(()) => self.notify(Notice::Copied),
            Err(err) => {
                tracing::error!(?err, "Failed to copy via clipboard API");
                let notice = match self.fallback_copy() {
                    Ok(()) => Notice::CopiedFallback,
                    Err(fallback_err) => {
                        tracing::error!(?fallback_err, "Fallback copy failed");
                        Notice::CopyFailed
                    }
                };
                self.notify(notice)
            }
        }
    }

    fn fallback_copy(&mut self) -> Result<(), crate::clipboard::ClipboardError> {
        self.fallback.select(&self.state.rendered)?;
        let copied = self.fallback.exec_copy();
        self.fallback.clear_selection();
        copied
    }

    /// Inserts the clipboard text at the caret, replacing the selection.
    pub async fn paste(&mut self) -> Result<Notice, RenderError> {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(?err, "Failed to read clipboard");
                return Ok(self.notify(Notice::PasteFailed));
            }
        };

        if text.is_empty() {
            return Ok(self.notify(Notice::ClipboardEmpty));
        }

        let mut source = self.state.source.clone();
        source.splice(&text);
        self.commit(source)?;

        Ok(self.notify(Notice::Pasted))
    }

    /// Exports the rendered surface as a standalone HTML file.
    pub fn download(&mut self) -> Notice {
        if self.state.rendered.is_blank() {
            return self.notify(Notice::NothingToDownload);
        }

        let ExportedDocument { file_name, content } =
            ExportedDocument::new(&self.state.rendered, &Local::now());

        tracing::debug!(%file_name, size = content.len(), "Starting download");
        self.downloader.download(file_name, content.into_bytes());

        self.notify(Notice::DownloadStarted)
    }

    /// Empties the source.
    pub fn clear(&mut self) -> Result<Notice, RenderError> {
        self.set_source(String::new())?;
        Ok(self.notify(Notice::Cleared))
    }

    fn notify(&mut self, notice: Notice) -> Notice {
        self.notifier.show(notice.message());
        notice
    }
}
