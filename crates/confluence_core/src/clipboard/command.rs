//! Legacy copy through a platform clipboard command.

use super::{ClipboardError, SelectionCopy};
use crate::render::RenderedMarkup;
use std::io::Write;
use std::process::{Command, Stdio};

/// Which representation of the surface is written to the command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyPayload {
    /// The rendered markup, for commands that register it as `text/html`.
    #[default]
    Html,
    /// The visible text, for commands that only know plain text.
    Text,
}

/// Copies the selected surface by piping it into an external command.
///
/// The selection is a staged copy of the surface; it lives only between
/// [`SelectionCopy::select`] and [`SelectionCopy::clear_selection`].
#[derive(Debug, Clone)]
pub struct CommandCopy {
    program: String,
    args: Vec<String>,
    payload: CopyPayload,
    selection: Option<String>,
}

impl CommandCopy {
    /// Creates a copier running `argv[0]` with the remaining items as arguments.
    ///
    /// Returns `None` for an empty argv.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self {
            program,
            args: iter.collect(),
            payload: CopyPayload::Html,
            selection: None,
        })
    }

    /// The copy command of the current platform.
    ///
    /// `wl-copy` and `xclip` register the markup as `text/html`. `pbcopy` and
    /// `clip` only take plain text, so they get the visible text and the
    /// formatting is lost.
    pub fn platform_default() -> Self {
        let (argv, payload): (&[&str], _) = if cfg!(target_os = "macos") {
            (&["pbcopy"], CopyPayload::Text)
        } else if cfg!(target_os = "windows") {
            (&["clip"], CopyPayload::Text)
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            (&["wl-copy", "--type", "text/html"], CopyPayload::Html)
        } else {
            (
                &["xclip", "-selection", "clipboard", "-t", "text/html"],
                CopyPayload::Html,
            )
        };

        Self {
            program: argv[0].to_string(),
            args: argv[1..].iter().map(|s| s.to_string()).collect(),
            payload,
            selection: None,
        }
    }

    pub fn with_payload(mut self, payload: CopyPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn payload(&self) -> CopyPayload {
        self.payload
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// The staged content, if anything is selected.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }
}

impl SelectionCopy for CommandCopy {
    fn select(&mut self, surface: &RenderedMarkup) -> Result<(), ClipboardError> {
        let staged = match self.payload {
            CopyPayload::Html => surface.html(),
            CopyPayload::Text => surface.text(),
        };
        self.selection = Some(staged.to_string());
        Ok(())
    }

    fn exec_copy(&mut self) -> Result<(), ClipboardError> {
        let selected = self
            .selection
            .as_deref()
            .ok_or(ClipboardError::NothingSelected)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    ClipboardError::Unavailable(format!("{} not found", self.program))
                }
                _ => ClipboardError::Io(err),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that exits early is judged by its exit status below.
            if let Err(err) = stdin.write_all(selected.as_bytes()) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(err.into());
                }
            }
        }

        let output = child.wait_with_output()?;

        if output.status.success() {
            tracing::debug!(program = %self.program, "Copied selection via command");
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    fn clear_selection(&mut self) {
        self.selection.take();
    }
}
