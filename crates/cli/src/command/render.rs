use anyhow::Result;
use clap::Parser;
use confluence_config::Config;
use confluence_core::TextRenderer;
use std::io::Write;
use std::path::PathBuf;

/// Render markdown to HTML.
#[derive(Parser, Debug, Clone)]
pub struct Render {
    /// Markdown file to render, stdin is read when omitted or `-`.
    #[clap(index = 1)]
    input: Option<PathBuf>,

    /// Print the visible text instead of the HTML.
    #[clap(long, conflicts_with = "json")]
    text: bool,

    /// Print both the HTML and the visible text as JSON.
    #[clap(long)]
    json: bool,
}

impl Render {
    pub fn run(self, config: &Config) -> Result<()> {
        let source = crate::read_source(self.input.as_deref())?;
        let rendered = crate::renderer_from_config(config).render(&source)?;

        let stdout = std::io::stdout();
        let mut lock = stdout.lock();

        if self.json {
            writeln!(lock, "{}", serde_json::to_string(&rendered)?)?;
        } else if self.text {
            writeln!(lock, "{}", rendered.text())?;
        } else {
            write!(lock, "{}", rendered.html())?;
        }

        Ok(())
    }
}
