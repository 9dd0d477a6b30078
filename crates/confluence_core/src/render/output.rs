//! The rendered surface.
//!
//! [`RenderedMarkup`] holds what the preview shows: the HTML produced by the
//! renderer together with the text a reader would see, which is what goes
//! into the `text/plain` slot of a rich clipboard write.

use serde::{Deserialize, Serialize};

/// Output of a single render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMarkup {
    /// The rendered HTML content.
    html: String,
    /// Visible text of the rendered content.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
}

impl RenderedMarkup {
    /// Create rendered output from its HTML and text projection.
    ///
    /// # Example
    ///
    /// ```
    /// use confluence_core::RenderedMarkup;
    ///
    /// let rendered = RenderedMarkup::new("<p>Hello</p>".to_string(), "Hello".to_string());
    /// assert_eq!(rendered.html(), "<p>Hello</p>");
    /// ```
    pub fn new(html: String, text: String) -> Self {
        Self { html, text }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the HTML is empty once surrounding whitespace is trimmed.
    pub fn is_blank(&self) -> bool {
        self.html.trim().is_empty()
    }
}
