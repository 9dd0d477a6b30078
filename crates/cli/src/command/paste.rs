use anyhow::{bail, Result};
use clap::Parser;
use confluence_config::Config;
use confluence_core::{DirectoryDownloader, StderrSink};
use std::sync::Arc;

/// Render the markdown currently on the clipboard and print the HTML.
#[derive(Parser, Debug, Clone)]
pub struct Paste {
    /// Copy the rendered HTML back to the clipboard.
    #[clap(long)]
    copy: bool,
}

impl Paste {
    pub async fn run(self, config: &Config) -> Result<()> {
        let downloader = Arc::new(DirectoryDownloader::new(config.export.resolved_output_dir()));
        let mut session = crate::new_session(config, downloader, Arc::new(StderrSink));

        let notice = session.paste().await?;
        if notice.is_failure() {
            bail!("{notice}");
        }

        if self.copy {
            let notice = session.copy().await;
            if notice.is_failure() {
                bail!("{notice}");
            }
        } else {
            print!("{}", session.rendered().html());
        }

        Ok(())
    }
}
