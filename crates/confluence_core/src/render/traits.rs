//! Renderer trait.
//!
//! The markdown grammar is owned by an external library; [`TextRenderer`] is
//! the seam that lets a session be driven by any renderer, including fakes in
//! tests.

use crate::render::output::RenderedMarkup;

/// Error type for rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Invalid UTF-8 encoding in content.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// General rendering error.
    #[error("Render error: {0}")]
    Other(String),
}

/// Trait for markdown renderers.
///
/// Rendering is pure: identical input yields identical output.
pub trait TextRenderer: Send + Sync {
    /// Render markdown text into the rendered surface.
    fn render(&self, content: &str) -> Result<RenderedMarkup, RenderError>;

    /// Render raw bytes, rejecting content that is not valid UTF-8.
    fn render_bytes(&self, content: &[u8]) -> Result<RenderedMarkup, RenderError> {
        let content = std::str::from_utf8(content)?;
        self.render(content)
    }
}
