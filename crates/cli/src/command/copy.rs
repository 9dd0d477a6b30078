use anyhow::{bail, Result};
use clap::Parser;
use confluence_config::Config;
use confluence_core::{DirectoryDownloader, StderrSink};
use std::path::PathBuf;
use std::sync::Arc;

/// Copy the rendered markdown to the clipboard as HTML with a plain-text alternative.
#[derive(Parser, Debug, Clone)]
pub struct CopyHtml {
    /// Markdown file to copy, stdin is read when omitted or `-`.
    #[clap(index = 1)]
    input: Option<PathBuf>,
}

impl CopyHtml {
    pub async fn run(self, config: &Config) -> Result<()> {
        let source = crate::read_source(self.input.as_deref())?;

        let downloader = Arc::new(DirectoryDownloader::new(config.export.resolved_output_dir()));
        let mut session = crate::new_session(config, downloader, Arc::new(StderrSink));
        session.set_source(source)?;

        let notice = session.copy().await;
        if notice.is_failure() {
            bail!("{notice}");
        }

        Ok(())
    }
}
