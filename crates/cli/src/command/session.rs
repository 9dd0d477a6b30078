use anyhow::{Context, Result};
use clap::Parser;
use confluence_config::Config;
use confluence_core::{Assets, DirectoryDownloader, Event, Selection, StderrSink};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Lines are appended to the markdown source, commands start with ':'
  :copy              copy the rendered HTML to the clipboard
  :paste             insert the clipboard text at the caret
  :download          export a standalone HTML file
  :clear             empty the source
  :select START [END] move the caret or select a range, in characters
  :print             print the rendered HTML
  :text              print the rendered text
  :source            print the markdown source
  :quit              leave the session
  ::...              append a line starting with ':'";

/// Edit markdown interactively, the preview is re-rendered on every line.
#[derive(Parser, Debug, Clone)]
pub struct Interactive {
    /// Markdown file to start from, the welcome document is used when omitted.
    #[clap(index = 1)]
    input: Option<PathBuf>,

    /// Directory for `:download`, overrides `export.output-dir`.
    #[clap(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Event(Event),
    Print,
    Text,
    Source,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Line, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Line::Event(Event::Append(format!("{line}\n"))));
    };

    if command.starts_with(':') {
        return Ok(Line::Event(Event::Append(format!("{command}\n"))));
    }

    let mut parts = command.split_whitespace();
    let parsed = match parts.next().unwrap_or_default() {
        "copy" => Line::Event(Event::Copy),
        "paste" => Line::Event(Event::Paste),
        "download" => Line::Event(Event::Download),
        "clear" => Line::Event(Event::Clear),
        "print" => Line::Print,
        "text" => Line::Text,
        "source" => Line::Source,
        "help" => Line::Help,
        "q" | "quit" => Line::Quit,
        "select" => {
            let mut position = || {
                parts
                    .next()
                    .map(|n| n.parse::<usize>().map_err(|e| format!("invalid position {n:?}: {e}")))
                    .transpose()
            };
            let start = position()?.ok_or_else(|| "usage: :select START [END]".to_string())?;
            let end = position()?.unwrap_or(start);
            Line::Event(Event::Select(Selection::new(start, end)))
        }
        unknown => return Err(format!("unknown command :{unknown}, try :help")),
    };

    Ok(parsed)
}

impl Interactive {
    pub async fn run(self, config: &Config) -> Result<()> {
        let mut source = match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => Assets::welcome_markdown().to_string(),
        };
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }

        let downloader = Arc::new(DirectoryDownloader::new(crate::output_dir(
            self.output_dir,
            config,
        )));
        let mut session = crate::new_session(config, downloader.clone(), Arc::new(StderrSink));
        session.set_source(source)?;

        eprintln!("{HELP}");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            match parse_line(&line) {
                Ok(Line::Event(event)) => {
                    tracing::debug!(?event, "Dispatching");
                    session.dispatch(event).await?;
                }
                Ok(Line::Print) => print!("{}", session.rendered().html()),
                Ok(Line::Text) => println!("{}", session.rendered().text()),
                Ok(Line::Source) => print!("{}", session.state().source.text()),
                Ok(Line::Help) => eprintln!("{HELP}"),
                Ok(Line::Quit) => break,
                Err(msg) => eprintln!("{msg}"),
            }
        }

        for path in downloader.flush().await {
            eprintln!("Saved {}", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_appended() {
        assert_eq!(
            parse_line("| a | b |"),
            Ok(Line::Event(Event::Append("| a | b |\n".into())))
        );
        assert_eq!(parse_line(""), Ok(Line::Event(Event::Append("\n".into()))));
    }

    #[test]
    fn test_escaped_colon() {
        assert_eq!(
            parse_line("::not a command"),
            Ok(Line::Event(Event::Append(":not a command\n".into())))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":copy"), Ok(Line::Event(Event::Copy)));
        assert_eq!(parse_line(":paste"), Ok(Line::Event(Event::Paste)));
        assert_eq!(parse_line(":download"), Ok(Line::Event(Event::Download)));
        assert_eq!(parse_line(":clear"), Ok(Line::Event(Event::Clear)));
        assert_eq!(parse_line(":print"), Ok(Line::Print));
        assert_eq!(parse_line(":q"), Ok(Line::Quit));
        assert!(parse_line(":bogus").unwrap_err().contains(":bogus"));
    }

    #[test]
    fn test_select() {
        assert_eq!(
            parse_line(":select 3"),
            Ok(Line::Event(Event::Select(Selection::caret(3))))
        );
        assert_eq!(
            parse_line(":select 4 3"),
            Ok(Line::Event(Event::Select(Selection::new(3, 4))))
        );
        assert!(parse_line(":select").is_err());
        assert!(parse_line(":select x").is_err());
    }
}
