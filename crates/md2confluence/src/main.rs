use clap::Parser;
use cli::{Args, RunCmd};

#[derive(Parser, Debug)]
pub enum Cmd {
    /// Display the current version.
    #[clap(name = "version")]
    Version,

    /// Run md2confluence.
    #[clap(flatten)]
    Run(Box<RunCmd>),
}

#[derive(Parser, Debug)]
#[clap(name = "md2confluence", disable_version_flag = true)]
pub struct Md2Confluence {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[tokio::main]
async fn main() {
    let app = Md2Confluence::parse();

    match app.cmd {
        Cmd::Version => {
            println!(
                "version {}, built for {}.",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::ARCH
            );
        }
        Cmd::Run(run_cmd) => {
            if let Err(e) = run_cmd.run(app.args).await {
                eprintln!("error: {e:?}");
                std::process::exit(1);
            }
        }
    }
}
