use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::{file::DEFAULT_DATA_FILE, sheet::DEFAULT_WORKSHEET};

pub const DEFAULT_SHEET_DB: &str = "sheet.sqlite";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Local JSON document.
    File,
    /// Two-column worksheet behind a sheet client.
    Sheet,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Sheet => write!(f, "sheet"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Context {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub data_file: PathBuf,
    pub sheet_db: PathBuf,
    pub worksheet: String,
    pub cache_ttl: Duration,
    pub log_file: Option<PathBuf>,
    pub api_listen: SocketAddr,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let data_dir = PathBuf::from(&cli.data_dir);
        let data_file = cli
            .data_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DEFAULT_DATA_FILE));
        let sheet_db = cli
            .sheet_db
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DEFAULT_SHEET_DB));

        Self {
            backend: cli.backend,
            data_dir,
            data_file,
            sheet_db,
            worksheet: cli.worksheet.clone(),
            cache_ttl: Duration::from_secs(cli.cache_ttl_secs),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            api_listen: cli.api_listen,
        }
    }

    /// A context for tests rooted at `data_dir`.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>, backend: Backend) -> Self {
        let data_dir = data_dir.into();
        Self {
            backend,
            data_file: data_dir.join(DEFAULT_DATA_FILE),
            sheet_db: data_dir.join(DEFAULT_SHEET_DB),
            data_dir,
            worksheet: DEFAULT_WORKSHEET.to_string(),
            cache_ttl: Duration::from_secs(60),
            log_file: None,
            api_listen: SocketAddr::from(([127, 0, 0, 1], 8084)),
        }
    }
}
