//! Core library for turning markdown into Confluence-ready HTML.
//!
//! This crate provides the pieces behind the md2confluence front ends:
//! rendering markdown, copying the result as rich text, pasting into the
//! source and exporting a standalone HTML file.
//!
//! # Features
//!
//! - `system-clipboard` (default) - Enables [`clipboard::SystemClipboard`] backed by arboard
//!
//! # Modules
//!
//! - [`render`] - Markdown to HTML conversion with line breaks and GFM tables
//! - [`source`] - The editable source and its caret selection
//! - [`clipboard`] - Structured clipboard and the legacy selection copy
//! - [`export`] - Standalone document export and downloaders
//! - [`notifier`] - Transient notifications with auto-dismiss
//! - [`session`] - Application state and event handlers
//! - [`assets`] - Embedded export template, style sheet and welcome document

pub mod assets;
pub mod clipboard;
pub mod export;
pub mod notifier;
pub mod render;
pub mod session;
pub mod source;

// Re-export commonly used types at crate root
pub use assets::Assets;
pub use clipboard::{
    Clipboard, ClipboardError, ClipboardItem, CommandCopy, CopyPayload, SelectionCopy,
};
pub use export::{export_file_name, DirectoryDownloader, Downloader, ExportedDocument};
pub use notifier::{NotificationSink, Notifier, StderrSink, DEFAULT_NOTIFICATION_DURATION};
pub use render::{to_html, MarkdownRenderer, RenderError, RenderOptions, RenderedMarkup, TextRenderer};
pub use session::{AppState, Event, Notice, Session};
pub use source::{Selection, SourceBuffer};

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
