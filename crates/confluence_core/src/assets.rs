//! Embedded assets for the exported document.
//!
//! The standalone export carries its own style sheet so that the file looks
//! the same regardless of where it is opened.

/// HTML template with placeholders for the style sheet and the body.
pub const EXPORT_TEMPLATE: &str = include_str!("../assets/export.html");

/// Confluence-like styles inlined into the exported document.
pub const EXPORT_STYLES_CSS: &str = include_str!("../assets/export.css");

/// Placeholder markdown shown when a session starts without any input.
pub const WELCOME_MARKDOWN: &str = include_str!("../assets/welcome.md");

const STYLES_PLACEHOLDER: &str = "/*__EXPORT_CSS__*/";
const BODY_PLACEHOLDER: &str = "<!--__BODY__-->";

/// Provides access to embedded assets.
pub struct Assets;

impl Assets {
    /// Get the raw export template.
    pub fn export_template() -> &'static str {
        EXPORT_TEMPLATE
    }

    /// Get the export style sheet.
    pub fn export_styles_css() -> &'static str {
        EXPORT_STYLES_CSS
    }

    /// Get the welcome document.
    pub fn welcome_markdown() -> &'static str {
        WELCOME_MARKDOWN
    }

    /// Build the complete standalone document around the rendered markup.
    ///
    /// The style sheet is inlined first and the body last, so placeholder-like
    /// text inside `body` is never substituted.
    pub fn build_export_document(body: &str) -> String {
        EXPORT_TEMPLATE
            .trim_end()
            .replacen(STYLES_PLACEHOLDER, EXPORT_STYLES_CSS.trim_end(), 1)
            .replacen(BODY_PLACEHOLDER, body, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_template_exists() {
        assert!(EXPORT_TEMPLATE.contains("<!DOCTYPE html>"));
        assert!(EXPORT_TEMPLATE.contains("<title>Confluence Export</title>"));
        assert!(EXPORT_TEMPLATE.contains(STYLES_PLACEHOLDER));
        assert!(EXPORT_TEMPLATE.contains(BODY_PLACEHOLDER));
    }

    #[test]
    fn test_styles_cover_required_selectors() {
        for selector in ["body {", "table {", "th, td {", "th {", "a {", "pre {", "blockquote {"] {
            assert!(
                EXPORT_STYLES_CSS.contains(selector),
                "missing selector {selector}"
            );
        }
    }

    #[test]
    fn test_build_export_document() {
        let html = Assets::build_export_document("<p>Hello</p>\n");

        assert!(!html.contains(STYLES_PLACEHOLDER));
        assert!(!html.contains(BODY_PLACEHOLDER));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<body>\n<p>Hello</p>\n\n</body>"));
        assert!(html.contains(
            "<style>\n/* Inline basic confluence styles for the standalone file */\nbody {"
        ));
    }

    #[test]
    fn test_placeholder_in_body_is_kept() {
        let html = Assets::build_export_document("<p>/*__EXPORT_CSS__*/</p>");
        assert!(html.contains("<p>/*__EXPORT_CSS__*/</p>"));
    }

    #[test]
    fn test_welcome_markdown_has_table() {
        assert!(WELCOME_MARKDOWN.starts_with("# Welcome to MD2Confluence"));
        assert!(WELCOME_MARKDOWN.contains("| Feature | Support | Notes |"));
    }
}
