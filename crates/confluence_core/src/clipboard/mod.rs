//! Clipboard access.
//!
//! Two seams are defined here:
//! - [`Clipboard`]: the structured clipboard, able to take several MIME
//!   representations of one copy in a single write and to read plain text.
//! - [`SelectionCopy`]: the legacy path, which selects the rendered surface
//!   and issues a synchronous copy command against that selection.

mod command;
#[cfg(feature = "system-clipboard")]
mod system;

use crate::render::RenderedMarkup;
use std::collections::BTreeMap;

pub use command::{CommandCopy, CopyPayload};
#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

pub const MIME_TEXT_HTML: &str = "text/html";
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// Error type for clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The platform refused access, e.g. no permission or no display.
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// No clipboard is available on this platform.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The item lacks a representation the backend requires.
    #[error("missing {0} representation")]
    MissingRepresentation(&'static str),

    /// Nothing is selected for the legacy copy command.
    #[error("nothing selected")]
    NothingSelected,

    /// The copy command ran but reported failure.
    #[error("copy command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One logical copy, carrying alternate representations keyed by MIME type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardItem {
    representations: BTreeMap<&'static str, String>,
}

impl ClipboardItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a representation, replacing any previous one of the same type.
    pub fn with(mut self, mime_type: &'static str, payload: impl Into<String>) -> Self {
        self.representations.insert(mime_type, payload.into());
        self
    }

    /// HTML and plain-text representations of the rendered surface.
    pub fn from_rendered(rendered: &RenderedMarkup) -> Self {
        Self::new()
            .with(MIME_TEXT_HTML, rendered.html())
            .with(MIME_TEXT_PLAIN, rendered.text())
    }

    pub fn get(&self, mime_type: &str) -> Option<&str> {
        self.representations.get(mime_type).map(String::as_str)
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.representations.keys().copied()
    }

    pub fn html(&self) -> Option<&str> {
        self.get(MIME_TEXT_HTML)
    }

    pub fn plain_text(&self) -> Option<&str> {
        self.get(MIME_TEXT_PLAIN)
    }
}

/// The structured, asynchronous clipboard.
#[async_trait::async_trait]
pub trait Clipboard: Send {
    /// Writes all representations of `item` as one clipboard entry.
    async fn write(&mut self, item: &ClipboardItem) -> Result<(), ClipboardError>;

    /// Reads the plain-text content of the clipboard.
    async fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// The legacy selection-based copy.
pub trait SelectionCopy: Send {
    /// Selects the whole rendered surface.
    fn select(&mut self, surface: &RenderedMarkup) -> Result<(), ClipboardError>;

    /// Copies the current selection.
    fn exec_copy(&mut self) -> Result<(), ClipboardError>;

    /// Drops the current selection.
    fn clear_selection(&mut self);
}
