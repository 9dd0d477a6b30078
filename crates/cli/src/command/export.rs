use anyhow::{bail, Result};
use clap::Parser;
use confluence_config::Config;
use confluence_core::{DirectoryDownloader, Notice, StderrSink};
use std::path::PathBuf;
use std::sync::Arc;

/// Export the rendered markdown as a standalone HTML file.
///
/// The file is named `YYYYMMDD_HHMMSS_confluence-content.html` after the local time.
#[derive(Parser, Debug, Clone)]
pub struct Export {
    /// Markdown file to export, stdin is read when omitted or `-`.
    #[clap(index = 1)]
    input: Option<PathBuf>,

    /// Directory to write the file into, overrides `export.output-dir`.
    #[clap(long)]
    output_dir: Option<PathBuf>,
}

impl Export {
    pub async fn run(self, config: &Config) -> Result<()> {
        let source = crate::read_source(self.input.as_deref())?;

        let downloader = Arc::new(DirectoryDownloader::new(crate::output_dir(
            self.output_dir,
            config,
        )));
        let mut session = crate::new_session(config, downloader.clone(), Arc::new(StderrSink));
        session.set_source(source)?;

        if session.download() == Notice::NothingToDownload {
            return Ok(());
        }

        let saved = downloader.flush().await;
        if saved.is_empty() {
            bail!(
                "failed to write into {}, see the log for details",
                downloader.output_dir().display()
            );
        }

        for path in saved {
            println!("{}", path.display());
        }

        Ok(())
    }
}
