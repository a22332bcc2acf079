//! Configuration schema definitions.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::handler::ConsoleOptions;
use crate::logger::{Logger, Slogger};
use crate::sink::{LineMode, Sink};

/// Root logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output encoding.
    pub format: Format,

    /// Initial threshold name (debug, info, warn, error).
    pub level: String,

    /// Destination stream.
    pub output: Output,

    /// Console encoding switches.
    pub console: ConsoleConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            level: "info".to_string(),
            output: Output::default(),
            console: ConsoleConfig::default(),
        }
    }
}

/// Output encoding of a logger.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Text,
    #[default]
    Console,
}

/// Standard stream a logger writes to.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
}

/// Console encoding switches.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Render `[HH:SS:SS.mmm]` like older releases.
    pub legacy_timestamp: bool,

    /// Terminate each line with a newline.
    pub newline: bool,
}

impl ConsoleConfig {
    pub fn options(&self) -> ConsoleOptions {
        ConsoleOptions {
            legacy_timestamp: self.legacy_timestamp,
            line_mode: if self.newline {
                LineMode::WithNewline
            } else {
                LineMode::WithoutNewline
            },
        }
    }
}

impl Output {
    pub fn sink(self) -> Sink {
        match self {
            Output::Stdout => Sink::stdout(),
            Output::Stderr => Sink::stderr(),
        }
    }
}

impl LoggerConfig {
    /// Build a logger writing to the configured standard stream.
    pub fn build(&self, ctx: Context) -> Slogger {
        self.build_with_sink(ctx, self.output.sink())
    }

    /// Build a logger writing to `sink`, ignoring `output`.
    pub fn build_with_sink(&self, ctx: Context, sink: Sink) -> Slogger {
        let logger = Slogger::with_console_options(ctx, self.format, sink, self.console.options());
        logger.set_level(&self.level);
        logger
    }
}
