use crate::library::query::SortKey;
use clap::{Args, FromArgMatches, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Personal book library: JSON REST service and terminal client.
#[derive(Parser, Debug, Clone)]
#[command(name = "book-library")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "BOOK_LIBRARY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve(ServeArgs),

    /// Initialize database and create default config.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },

    /// Talk to a running server.
    Client {
        /// Base URL of the API (defaults to the platform URL).
        #[arg(long)]
        api_url: Option<String>,

        /// Client action.
        #[command(subcommand)]
        action: ClientCommand,
    },
}

/// Server overrides taken from the command line or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Database connection string.
    #[arg(short, long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// Parse overrides from the given `serve` arguments, falling back to
    /// `PORT` / `DATABASE_URL` with the same validation as `serve`.
    pub fn try_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::augment_args(clap::Command::new("serve")).try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Overrides from the environment alone.
    pub fn from_env() -> std::result::Result<Self, clap::Error> {
        Self::try_from_args(["serve"])
    }
}

/// Client subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ClientCommand {
    /// Show the library.
    List {
        /// Only books by this author.
        #[arg(long)]
        author: Option<String>,
        /// Only books in this language.
        #[arg(long)]
        language: Option<String>,
        /// Sort order.
        #[arg(long, value_enum, default_value = "none")]
        sort: SortKey,
    },

    /// Add a book.
    Add {
        /// Title.
        #[arg(short, long, default_value = "")]
        title: String,
        /// Author.
        #[arg(short, long, default_value = "")]
        author: String,
        /// Free-text notes.
        #[arg(short, long, default_value = "")]
        info: String,
        /// Language.
        #[arg(short, long, default_value = "")]
        language: String,
    },

    /// Change fields of a book.
    Update {
        /// Book identifier.
        id: String,
        /// New title.
        #[arg(short, long)]
        title: Option<String>,
        /// New author.
        #[arg(short, long)]
        author: Option<String>,
        /// New notes.
        #[arg(short, long)]
        info: Option<String>,
        /// New language.
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Delete a book.
    Delete {
        /// Book identifier.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// List the language suggestions.
    Languages,
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Book route behavior.
    #[serde(default)]
    pub books: BooksConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        5000,
    )
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string: `sqlite::memory:`, `sqlite://<path>` or a file path.
    #[serde(default = "default_db_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

fn default_db_url() -> String {
    "data/books.db".to_string()
}

/// Book route configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksConfig {
    /// Answer 404 when an update matched a book but changed nothing.
    #[serde(default = "default_report_unchanged")]
    pub report_unchanged_as_missing: bool,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            report_unchanged_as_missing: default_report_unchanged(),
        }
    }
}

fn default_report_unchanged() -> bool {
    true
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        toml::from_str(content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Apply `PORT` / `DATABASE_URL` style overrides.
    pub fn apply_overrides(&mut self, args: &ServeArgs) {
        if let Some(port) = args.port {
            self.server.bind.set_port(port);
        }
        if let Some(url) = args.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            self.database.url = url.clone();
        }
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("book-library.toml"),
            dirs::config_dir()
                .map(|p| p.join("book-library").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/book-library/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# book-library configuration

[server]
bind = "0.0.0.0:5000"

[database]
# Overridden by DATABASE_URL
url = "data/books.db"

[books]
# Answer 404 when an update matches a book but changes nothing
report_unchanged_as_missing = true
"#
        .to_string()
    }
}
