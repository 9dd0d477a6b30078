use crate::{command, logging};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub enum RunCmd {
    /// Render markdown and print the Confluence-ready HTML.
    #[clap(name = "render")]
    Render(command::render::Render),
    /// Render markdown and copy it to the clipboard as rich text.
    #[clap(name = "copy")]
    Copy(command::copy::CopyHtml),
    /// Render the markdown found on the clipboard.
    #[clap(name = "paste")]
    Paste(command::paste::Paste),
    /// Export the rendered markdown as a standalone HTML file.
    #[clap(name = "export")]
    Export(command::export::Export),
    /// Start an interactive editing session on stdin.
    #[clap(name = "session")]
    Session(command::session::Interactive),
}

/// md2confluence CLI arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Enable the logging system.
    #[clap(long)]
    pub log: Option<PathBuf>,

    /// Specify the path of the config file.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

impl RunCmd {
    pub async fn run(self, args: Args) -> Result<()> {
        let (config, config_err) =
            confluence_config::load_config_on_startup(args.config_file.clone());

        let maybe_log = logging::log_file_path(args.log, &config.log).or_else(|| {
            // Keep the interactive terminal free of log lines.
            matches!(self, Self::Session(_))
                .then(|| dirs::Dirs::default_log_file().ok())
                .flatten()
        });

        let _guard = logging::init(maybe_log, &config.log)?;

        if let Some(err) = config_err {
            tracing::warn!(
                %err,
                path = ?confluence_config::config_file(),
                "Invalid config file, using the defaults"
            );
        }

        match self {
            Self::Render(render) => render.run(config),
            Self::Copy(copy) => copy.run(config).await,
            Self::Paste(paste) => paste.run(config).await,
            Self::Export(export) => export.run(config).await,
            Self::Session(session) => session.run(config).await,
        }
    }
}
