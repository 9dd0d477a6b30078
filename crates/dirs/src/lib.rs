use directories::{ProjectDirs, UserDirs};
use std::path::PathBuf;
use std::sync::OnceLock;

pub struct Dirs;

impl Dirs {
    /// Project directory specifically for md2confluence.
    ///
    /// The config file and the logs live there.
    pub fn project() -> &'static ProjectDirs {
        static CELL: OnceLock<ProjectDirs> = OnceLock::new();

        CELL.get_or_init(|| {
            ProjectDirs::from("com", "md2confluence", "md2confluence")
                .expect("Couldn't create project directory for md2confluence")
        })
    }

    /// The download directory of the user, if the platform defines one.
    pub fn download_dir() -> Option<PathBuf> {
        UserDirs::new().and_then(|dirs| dirs.download_dir().map(|p| p.to_path_buf()))
    }

    /// Default log file for md2confluence.
    pub fn default_log_file() -> std::io::Result<PathBuf> {
        let data_dir = Self::project().data_local_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("md2confluence.log"))
    }
}
