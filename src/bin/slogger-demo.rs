use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slogger::config::{load_config, LoggerConfig};
use slogger::{Attr, Context, Format, Level, Logger};

#[derive(Parser)]
#[command(name = "slogger-demo")]
#[command(about = "Emit log records through the slogger facade", long_about = None)]
struct Cli {
    /// TOML configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Threshold name (debug, info, warn, error).
    #[arg(short, long)]
    level: Option<String>,

    /// Terminate console lines with a newline.
    #[arg(long)]
    newline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Emit {
        /// debug, info, warn or error
        level: String,
        message: String,
        /// Attributes as key=value
        attrs: Vec<String>,
    },
    /// Log an error and exit with a failure status
    Fatal { message: String, error: String },
    /// Log an error under the panic key and exit with a failure status
    Panic { message: String, error: String },
}

fn parse_attr(pair: &str) -> Attr {
    match pair.split_once('=') {
        Some((key, value)) => match value.parse::<i64>() {
            Ok(n) => Attr::new(key, n),
            Err(_) => Attr::new(key, value),
        },
        None => Attr::new("!BADKEY", pair),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if cli.newline {
        config.console.newline = true;
    }

    let log = config.build(Context::background());

    match cli.command {
        Commands::Emit {
            level,
            message,
            attrs,
        } => {
            let attrs = attrs.iter().map(|pair| parse_attr(pair)).collect();
            match Level::from_name(&level) {
                Level::DEBUG => log.debug(&message, attrs),
                Level::WARN => log.warn(&message, attrs),
                Level::ERROR => log.error(&message, attrs),
                _ => log.info(&message, attrs),
            }
        }
        Commands::Fatal { message, error } => log.fatal(&message, &error),
        Commands::Panic { message, error } => log.panic(&message, &error),
    }

    Ok(())
}
