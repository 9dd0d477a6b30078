//! Markdown to HTML rendering with GitHub-style features.
//!
//! This module provides markdown-to-HTML conversion with support for:
//! - GitHub Flavored Markdown (tables, strikethrough, task lists)
//! - Single newlines rendered as line breaks, the way Confluence pastes expect
//! - A plain-text projection of the rendered surface, used as the
//!   `text/plain` clipboard representation

mod markdown_renderer;
mod output;
mod traits;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

pub use markdown_renderer::MarkdownRenderer;
pub use output::RenderedMarkup;
pub use traits::{RenderError, TextRenderer};

/// Options for rendering markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render single newlines inside a paragraph as `<br />`
    pub line_breaks: bool,
    /// Enable GitHub Flavored Markdown tables
    pub enable_tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub enable_strikethrough: bool,
    /// Enable task list items ([x] and [ ])
    pub enable_tasklists: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::confluence()
    }
}

impl RenderOptions {
    /// Line breaks plus the GFM extensions, matching what Confluence accepts on paste.
    pub fn confluence() -> Self {
        Self {
            line_breaks: true,
            enable_tables: true,
            enable_strikethrough: true,
            enable_tasklists: true,
        }
    }

    /// Plain CommonMark, no extensions.
    pub fn commonmark() -> Self {
        Self {
            line_breaks: false,
            enable_tables: false,
            enable_strikethrough: false,
            enable_tasklists: false,
        }
    }

    fn to_pulldown_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }
}

/// Separates two blocks in the text projection, dropping a dangling cell separator.
fn push_block_break(text: &mut String) {
    while text.ends_with('\t') {
        text.pop();
    }
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Visible text of raw HTML, i.e. everything outside of tags.
fn strip_tags(html: &str) -> String {
    let mut in_tag = false;
    html.chars()
        .filter(|&c| match c {
            '<' => {
                in_tag = true;
                false
            }
            '>' if in_tag => {
                in_tag = false;
                false
            }
            _ => !in_tag,
        })
        .collect()
}

/// Render markdown content to HTML and its plain-text projection.
///
/// # Example
///
/// ```
/// use confluence_core::render::{to_html, RenderOptions};
///
/// let rendered = to_html("# Hello\n\nWorld", &RenderOptions::confluence());
/// assert!(rendered.html().contains("<h1>"));
/// assert_eq!(rendered.text(), "Hello\nWorld");
/// ```
pub fn to_html(markdown_content: &str, options: &RenderOptions) -> RenderedMarkup {
    let parser = Parser::new_ext(markdown_content, options.to_pulldown_options());

    let mut text = String::new();
    let mut processed_events = Vec::new();

    for event in parser {
        match &event {
            Event::Text(content) | Event::Code(content) => text.push_str(content),
            Event::Html(html) => {
                for line in strip_tags(html).lines().map(str::trim) {
                    if !line.is_empty() {
                        push_block_break(&mut text);
                        text.push_str(line);
                    }
                }
            }
            Event::InlineHtml(html) => text.push_str(&strip_tags(html)),
            Event::Start(
                Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::BlockQuote
                | Tag::CodeBlock(_)
                | Tag::HtmlBlock
                | Tag::List(_)
                | Tag::Item
                | Tag::Table(_),
            ) => push_block_break(&mut text),
            Event::SoftBreak => {
                if options.line_breaks {
                    text.push('\n');
                    processed_events.push(Event::HardBreak);
                    continue;
                }
                text.push(' ');
            }
            Event::HardBreak => text.push('\n'),
            Event::Rule => push_block_break(&mut text),
            Event::End(TagEnd::TableCell) => text.push('\t'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::BlockQuote
                | TagEnd::CodeBlock
                | TagEnd::HtmlBlock
                | TagEnd::Item
                | TagEnd::List(_)
                | TagEnd::TableHead
                | TagEnd::TableRow
                | TagEnd::Table,
            ) => push_block_break(&mut text),
            _ => {}
        }
        processed_events.push(event);
    }

    let mut html_output = String::with_capacity(markdown_content.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html_output, processed_events.into_iter());

    let text = text.trim_end().to_string();

    tracing::trace!(
        source_len = markdown_content.len(),
        html_len = html_output.len(),
        text_len = text.len(),
        "Rendered markdown"
    );

    RenderedMarkup::new(html_output, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rendering() {
        let result = to_html("# Hello\n\nWorld", &RenderOptions::confluence());
        assert!(result.html().contains("<h1>Hello</h1>"));
        assert!(result.html().contains("<p>World</p>"));
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let result = to_html("first\nsecond", &RenderOptions::confluence());
        assert_eq!(result.html(), "<p>first<br />\nsecond</p>\n");
        assert_eq!(result.text(), "first\nsecond");
    }

    #[test]
    fn test_single_newline_without_line_breaks() {
        let result = to_html("first\nsecond", &RenderOptions::commonmark());
        assert_eq!(result.html(), "<p>first\nsecond</p>\n");
        assert_eq!(result.text(), "first second");
    }

    #[test]
    fn test_gfm_table() {
        let markdown = "| Feature | Support |\n| :------ | :-----: |\n| Tables | yes |\n";
        let result = to_html(markdown, &RenderOptions::confluence());
        assert!(result.html().contains("<table>"));
        assert!(result.html().contains("<th style=\"text-align: center\">Support</th>"));
        assert!(result.html().contains("<td>Tables</td>"));
        assert_eq!(result.text(), "Feature\tSupport\nTables\tyes");
    }

    #[test]
    fn test_table_disabled() {
        let markdown = "| a | b |\n| - | - |\n| 1 | 2 |\n";
        let result = to_html(markdown, &RenderOptions::commonmark());
        assert!(!result.html().contains("<table>"));
    }

    #[test]
    fn test_text_projection_of_blocks() {
        let markdown = "## Features\n- Preserves headers\n- Handles lists\n\n> **Note:** paste it\n";
        let result = to_html(markdown, &RenderOptions::confluence());
        assert_eq!(
            result.text(),
            "Features\nPreserves headers\nHandles lists\nNote: paste it"
        );
    }

    #[test]
    fn test_nested_list_text() {
        let result = to_html("- a\n  - b\n- c\n", &RenderOptions::confluence());
        assert_eq!(result.text(), "a\nb\nc");

        let result = to_html("1. one\n   - two\n     - three\n", &RenderOptions::confluence());
        assert_eq!(result.text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_loose_list_with_code_block_text() {
        let markdown = "- a\n\n  ```\n  code\n  ```\n- b\n";
        let result = to_html(markdown, &RenderOptions::confluence());
        assert!(result.html().contains("<pre><code>code\n</code></pre>"));
        assert_eq!(result.text(), "a\ncode\nb");
    }

    #[test]
    fn test_raw_html_text() {
        let result = to_html("<div>hi</div>\n", &RenderOptions::confluence());
        assert!(!result.is_blank());
        assert_eq!(result.text(), "hi");

        let markdown = "a <b>bold</b> word\n\n<div>\nblock\n</div>\n";
        let result = to_html(markdown, &RenderOptions::confluence());
        assert_eq!(result.text(), "a bold word\nblock");
    }

    #[test]
    fn test_code_block_text() {
        let result = to_html("```rust\nfn main() {}\n```\n", &RenderOptions::confluence());
        assert!(result.html().contains("<pre><code class=\"language-rust\">"));
        assert_eq!(result.text(), "fn main() {}");
    }

    #[test]
    fn test_empty_input() {
        let result = to_html("", &RenderOptions::confluence());
        assert!(result.is_blank());
        assert_eq!(result.text(), "");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let markdown = "# Title\n\nSome *text*\nnext line\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let first = to_html(markdown, &RenderOptions::confluence());
        let second = to_html(markdown, &RenderOptions::confluence());
        assert_eq!(first, second);
    }
}
