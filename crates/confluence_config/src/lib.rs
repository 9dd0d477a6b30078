use dirs::Dirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<ConfigInner> = OnceLock::new();

#[derive(Debug)]
struct ConfigInner {
    config: Config,
    file_path: PathBuf,
}

pub struct LoadedConfig {
    pub config: Config,
    pub file_path: PathBuf,
    pub maybe_error: Option<toml::de::Error>,
}

/// Default location of the config file.
///
/// Linux: ~/.config/md2confluence/config.toml
/// macOS: ~/Library/Application\ Support/com.md2confluence.md2confluence/config.toml
/// Windows: ~\AppData\Roaming\md2confluence\md2confluence\config\config.toml
pub fn default_config_file() -> PathBuf {
    Dirs::project().config_dir().join("config.toml")
}

/// Reads the config file, falling back to the defaults when it is missing or invalid.
pub fn load_config(specified_config_file: Option<PathBuf>) -> LoadedConfig {
    let config_file = specified_config_file.unwrap_or_else(default_config_file);

    let mut maybe_config_err = None;
    let config = std::fs::read_to_string(&config_file)
        .map_err(|err| {
            tracing::debug!(?err, path = %config_file.display(), "No config file loaded");
        })
        .and_then(|contents| {
            toml::from_str(&contents).map_err(|err| {
                tracing::warn!(path = %config_file.display(), "Error occurred in config.toml");
                maybe_config_err.replace(err);
            })
        })
        .unwrap_or_default();

    LoadedConfig {
        config,
        file_path: config_file,
        maybe_error: maybe_config_err,
    }
}

/// Loads the global [`Config`] once, later calls return the first result.
pub fn load_config_on_startup(
    specified_config_file: Option<PathBuf>,
) -> (&'static Config, Option<toml::de::Error>) {
    let mut maybe_error = None;

    let inner = CONFIG.get_or_init(|| {
        let LoadedConfig {
            config,
            file_path,
            maybe_error: err,
        } = load_config(specified_config_file);
        maybe_error = err;
        ConfigInner { config, file_path }
    });

    (&inner.config, maybe_error)
}

/// [`Config`] is a global singleton, which is explicitly initialized using
/// [`load_config_on_startup`] when the program is started from CLI.
pub fn config_checked() -> Option<&'static Config> {
    CONFIG.get().map(|c| &c.config)
}

pub fn config_file() -> Option<&'static PathBuf> {
    CONFIG.get().map(|c| &c.file_path)
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Specify the log file path.
    ///
    /// Logs go to stderr when unset.
    pub log_file: Option<String>,

    /// Specify the max log level.
    pub max_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            max_level: "info".into(),
        }
    }
}

/// Markdown rendering.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Render single newlines as line breaks.
    pub line_breaks: bool,

    /// Whether to enable GitHub Flavored Markdown tables.
    pub tables: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_breaks: true,
            tables: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// How long a notification stays visible, in milliseconds.
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory the exported files are written to.
    ///
    /// Defaults to the download directory of the user, or the current
    /// directory when there is none.
    pub output_dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(Dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ClipboardConfig {
    /// Command used by the fallback copy, the rendered HTML is written to its stdin.
    ///
    /// ```toml
    /// [clipboard]
    /// fallback-command = ["xclip", "-selection", "clipboard", "-t", "text/html"]
    /// ```
    pub fallback_command: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Log configuration.
    pub log: LogConfig,

    /// Render configuration.
    pub render: RenderConfig,

    /// Notification configuration.
    pub notification: NotificationConfig,

    /// Export configuration.
    pub export: ExportConfig,

    /// Clipboard configuration.
    pub clipboard: ClipboardConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config() {
        let toml_content = r#"
          [log]
          max-level = "trace"
          log-file = "/tmp/md2confluence.log"

          [render]
          line-breaks = false

          [notification]
          duration-ms = 1500

          [export]
          output-dir = "/tmp/exports"

          [clipboard]
          fallback-command = ["wl-copy", "--type", "text/html"]
"#;
        let user_config: Config =
            toml::from_str(toml_content).expect("Failed to deserialize config");

        assert_eq!(
            user_config,
            Config {
                log: LogConfig {
                    log_file: Some("/tmp/md2confluence.log".to_string()),
                    max_level: "trace".to_string(),
                },
                render: RenderConfig {
                    line_breaks: false,
                    tables: true,
                },
                notification: NotificationConfig { duration_ms: 1500 },
                export: ExportConfig {
                    output_dir: Some(PathBuf::from("/tmp/exports")),
                },
                clipboard: ClipboardConfig {
                    fallback_command: Some(vec![
                        "wl-copy".to_string(),
                        "--type".to_string(),
                        "text/html".to_string()
                    ]),
                },
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.render.line_breaks);
        assert!(config.render.tables);
        assert_eq!(config.notification.duration_ms, 3000);
        assert_eq!(config.log.max_level, "info");
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let export = ExportConfig {
            output_dir: Some(PathBuf::from("/srv/out")),
        };
        assert_eq!(export.resolved_output_dir(), PathBuf::from("/srv/out"));
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nsmart-quotes = true").unwrap();

        let loaded = load_config(Some(file.path().to_path_buf()));
        assert!(loaded.maybe_error.is_some());
        assert_eq!(loaded.config, Config::default());
        assert_eq!(loaded.file_path, file.path());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(dir.path().join("config.toml")));
        assert!(loaded.maybe_error.is_none());
        assert_eq!(loaded.config, Config::default());
    }
}
