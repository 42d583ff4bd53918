use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::context::Backend;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Keep named word collections in a JSON file or a two-column sheet",
    long_about = "Create collections, add and remove words and list them, persisted either to a local JSON file or to a spreadsheet-style worksheet.\n\nWithout a subcommand the REST API is served until Ctrl-C.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "WORDSTASH_DATA_DIR",
        default_value = ".wordstash/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "WORDSTASH_BACKEND",
        value_enum,
        default_value_t = Backend::File,
        help = "Persistence backend"
    )]
    pub backend: Backend,

    #[arg(
        long = "data-file",
        env = "WORDSTASH_DATA_FILE",
        value_name = "PATH",
        help = "JSON data file for the file backend (default: <DATA_DIR>/skribbl_data.json)"
    )]
    pub data_file: Option<String>,

    #[arg(
        long = "sheet-db",
        env = "WORDSTASH_SHEET_DB",
        value_name = "PATH",
        help = "SQLite sheet database for the sheet backend (default: <DATA_DIR>/sheet.sqlite)"
    )]
    pub sheet_db: Option<String>,

    #[arg(
        long,
        env = "WORDSTASH_WORKSHEET",
        default_value = "collections",
        value_name = "NAME",
        help = "Worksheet holding the collection_name/word rows"
    )]
    pub worksheet: String,

    #[arg(
        long = "cache-ttl-secs",
        env = "WORDSTASH_CACHE_TTL_SECS",
        default_value_t = 60u64,
        value_name = "SECS",
        help = "How long sheet reads may be served from cache (0 disables)"
    )]
    pub cache_ttl_secs: u64,

    #[arg(
        long = "log-file",
        env = "WORDSTASH_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "WORDSTASH_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8084",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    if dotenvy::from_filename(&dotenv_path).is_ok() {
        log::debug!("Loaded env from {}", dotenv_path);
    }
    Cli::parse()
}
