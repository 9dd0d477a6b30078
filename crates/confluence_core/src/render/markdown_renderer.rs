//! Markdown document renderer implementation.
//!
//! This module provides the [`MarkdownRenderer`] which implements the
//! [`TextRenderer`] trait on top of pulldown-cmark.

use super::output::RenderedMarkup;
use super::traits::{RenderError, TextRenderer};
use super::{to_html, RenderOptions};

/// Markdown document renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Create a renderer with line breaks and GFM tables enabled.
    pub fn confluence() -> Self {
        Self::new(RenderOptions::confluence())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl TextRenderer for MarkdownRenderer {
    fn render(&self, content: &str) -> Result<RenderedMarkup, RenderError> {
        Ok(to_html(content, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confluence_renderer() {
        let renderer = MarkdownRenderer::confluence();
        let output = renderer.render("# Hello\n\nWorld").unwrap();

        assert!(output.html().contains("<h1>"));
        assert!(output.html().contains("Hello"));
        assert_eq!(output.text(), "Hello\nWorld");
    }

    #[test]
    fn test_custom_options() {
        let renderer = MarkdownRenderer::new(RenderOptions {
            enable_tables: false,
            ..RenderOptions::confluence()
        });
        assert!(!renderer.options().enable_tables);
        assert!(renderer.options().line_breaks);

        let output = renderer.render("| a |\n| - |\n| 1 |").unwrap();
        assert!(!output.html().contains("<table>"));
    }
}
