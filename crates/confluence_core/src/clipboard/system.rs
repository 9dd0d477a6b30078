//! Native clipboard backed by arboard.

use super::{Clipboard, ClipboardError, ClipboardItem, MIME_TEXT_HTML};

/// The operating system clipboard.
///
/// A fresh `arboard::Clipboard` is opened for every request on the blocking
/// pool, so the async caller never holds a platform handle across awaits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ClipboardNotSupported => Self::Unavailable(err.to_string()),
            arboard::Error::ClipboardOccupied => Self::Denied(err.to_string()),
            other => Self::Denied(other.to_string()),
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ClipboardError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ClipboardError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?
}

#[async_trait::async_trait]
impl Clipboard for SystemClipboard {
    async fn write(&mut self, item: &ClipboardItem) -> Result<(), ClipboardError> {
        let html = item
            .html()
            .ok_or(ClipboardError::MissingRepresentation(MIME_TEXT_HTML))?
            .to_string();
        let alt_text = item.plain_text().map(ToString::to_string);

        run_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_html(html, alt_text)?;
            Ok(())
        })
        .await?;

        tracing::debug!("Wrote html and plain text to the system clipboard");

        Ok(())
    }

    async fn read_text(&mut self) -> Result<String, ClipboardError> {
        run_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()?;
            match clipboard.get_text() {
                Ok(text) => Ok(text),
                // Nothing textual on the clipboard reads as empty.
                Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
                Err(err) => Err(err.into()),
            }
        })
        .await
    }
}
