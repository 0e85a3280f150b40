//! dbmessages - database-backed message source
//!
//! Main entry point for the `dbmsg` CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dbmessages::config::MessageSourceConfig;
use dbmessages::{metrics, MessageSource, MessageTable, StoreStats};
use std::path::{Path, PathBuf};
use std::process;

/// dbmsg - Look up and manage messages stored in a SQLite table
#[derive(Parser, Debug)]
#[command(name = "dbmsg")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/dbmessages/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database holding the messages
    #[arg(short, long, env = "DBMESSAGES_DATABASE")]
    database: Option<PathBuf>,

    /// Table with `id` and `item` columns
    #[arg(short, long, env = "DBMESSAGES_TABLE")]
    table: Option<String>,

    /// Seconds to cache the table (-1 forever, 0 reload on every lookup)
    #[arg(long, env = "DBMESSAGES_CACHE_SECONDS", allow_hyphen_values = true)]
    cache_seconds: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default config (if missing) and create the message table
    Init,

    /// Print the message stored under a code
    Get {
        /// Message code
        code: String,

        /// Positional arguments for {0}, {1}, ...
        args: Vec<String>,

        /// Accepted for compatibility; there is one table per source
        #[arg(short, long)]
        locale: Option<String>,

        /// Print the code itself when no message is stored for it
        #[arg(long)]
        use_code_as_default: bool,
    },

    /// Store a message under a code
    Put {
        /// Message code
        code: String,

        /// Raw message, may contain {0}, {1}, ...
        message: String,
    },

    /// Delete the message stored under a code
    Remove {
        /// Message code
        code: String,
    },

    /// Print every stored message
    List,

    /// Show cache statistics and metrics
    Stats,
}

fn main() {
    if let Err(e) = dbmessages::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(MessageSourceConfig::default_path);

    let creating = matches!(cli.command, Commands::Init);
    let config = load_config(&cli, &config_path, creating)?;
    let table = MessageTable::new(&config.database, &config.table_name)?;

    match cli.command {
        Commands::Init => {
            if config_path.exists() {
                println!("Using existing config at {}", config_path.display());
            } else {
                config.save(&config_path)?;
                println!("Wrote config to {}", config_path.display());
            }
            table.create_if_missing()?;
            println!(
                "Table '{}' ready in {}",
                table.table(),
                table.path().display()
            );
        }
        Commands::Put { code, message } => {
            table.put(&code, &message)?;
            println!("Stored '{}'", code);
        }
        Commands::Remove { code } => {
            if table.remove(&code)? {
                println!("Removed '{}'", code);
            } else {
                println!("No message stored under '{}'", code);
            }
        }
        Commands::Get {
            code,
            args,
            locale,
            use_code_as_default,
        } => {
            let source = open_source(&config)?;
            if use_code_as_default {
                source.set_use_code_as_default_message(true);
            }
            let message = source.get_message(&code, args.as_slice(), locale.as_deref())?;
            println!("{}", message);
        }
        Commands::List => {
            let source = open_source(&config)?;
            print!("{}", source.store());
        }
        Commands::Stats => {
            let source = open_source(&config)?;
            print_stats(&config, &source.store().stats());
            println!();
            print!("{}", metrics::render()?);
        }
    }

    Ok(())
}

fn open_source(config: &MessageSourceConfig) -> anyhow::Result<MessageSource> {
    MessageSource::open(config).with_context(|| {
        format!(
            "Failed to load messages from table '{}' in {}",
            config.table_name,
            config.database.display()
        )
    })
}

/// Load the config file if present; command-line overrides always win
///
/// An explicitly named config file must exist unless it is about to be created.
fn load_config(
    cli: &Cli,
    config_path: &Path,
    creating: bool,
) -> anyhow::Result<MessageSourceConfig> {
    let config = if config_path.exists() {
        MessageSourceConfig::load(config_path)?
    } else if cli.config.is_some() && !creating {
        anyhow::bail!("Config file not found: {}", config_path.display());
    } else {
        tracing::debug!("No config file, using defaults");
        MessageSourceConfig::new()
    };
    Ok(apply_overrides(config, cli))
}

fn apply_overrides(mut config: MessageSourceConfig, cli: &Cli) -> MessageSourceConfig {
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(table) = &cli.table {
        config.table_name = table.clone();
    }
    if let Some(cache_seconds) = cli.cache_seconds {
        config.cache_seconds = cache_seconds;
    }
    config
}

fn print_stats(config: &MessageSourceConfig, stats: &StoreStats) {
    let last_refresh = chrono::DateTime::from_timestamp_millis(stats.last_refresh_ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| stats.last_refresh_ms.to_string());
    let cache = match stats.cache_millis {
        ms if ms < 0 => "forever".to_string(),
        0 => "reload on every lookup".to_string(),
        ms => format!("{} ms", ms),
    };

    println!("Database:     {}", config.database.display());
    println!("Table:        {}", config.table_name);
    println!("Entries:      {}", stats.entries);
    println!("Last refresh: {}", last_refresh);
    println!("Age:          {} ms", stats.age_ms);
    println!("Cache:        {}", cache);
    println!("Stale:        {}", stats.is_stale);
}
