use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Command-line arguments. Each one falls back to an environment variable,
/// so the server can be driven entirely from `.env`.
#[derive(Parser, Debug)]
#[command(author, version, about = "Review and edit spaced-repetition cases", long_about = None)]
pub struct Cli {
    /// SQLite database file, or a `sqlite:` URL
    #[arg(value_name = "DATABASE", env = "DATABASE_URL")]
    pub database: String,

    #[arg(long, env = "HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    pub debug: bool,
}

/// Application configuration resolved from the CLI and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: String,
    pub image_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub page_size: usize,
    /// Request body cap for image uploads, in bytes.
    pub max_upload_size: usize,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` (if present) and parses the command line.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let image_folder = match std::env::var("IMAGE_FOLDER") {
            Ok(folder) => PathBuf::from(folder),
            Err(_) => default_image_folder(&cli.database),
        };

        let page_size = match std::env::var("PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .with_context(|| format!("PAGE_SIZE must be a positive integer, got '{raw}'"))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let max_upload_size = match std::env::var("MAX_UPLOAD_SIZE") {
            Ok(raw) => raw.parse::<usize>().with_context(|| {
                format!("MAX_UPLOAD_SIZE must be a byte count, got '{raw}'")
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_SIZE,
        };

        let default_level = if cli.debug { "debug" } else { "info" };

        Ok(Config {
            database: cli.database,
            image_folder,
            host: cli.host,
            port: cli.port,
            page_size,
            max_upload_size,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        })
    }
}

/// Images live in an `images` folder next to the database file.
fn default_image_folder(database: &str) -> PathBuf {
    if database.starts_with("sqlite:") {
        return PathBuf::from("images");
    }
    Path::new(database)
        .parent()
        .map(|dir| dir.join("images"))
        .unwrap_or_else(|| PathBuf::from("images"))
}
