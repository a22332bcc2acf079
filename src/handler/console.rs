//! Colorized single-line console handler.
//!
//! # Line Layout
//! ```text
//! [HH:MM:SS.mmm] LEVEL: message key1=v1 key2=v2
//! ```
//! The level token and the message are wrapped in ANSI color escapes. Every
//! segment, attributes included, is followed by one space. No newline is
//! appended unless the handler is configured with [`LineMode::WithNewline`].
//!
//! # Design Decisions
//! - Attributes render in call order; a repeated key keeps its first
//!   position and takes the last value
//! - Bound attributes (`with_attrs`) render before record attributes
//! - `legacy_timestamp` reproduces the older `[HH:SS:SS.mmm]` layout whose
//!   middle field repeated the seconds instead of showing minutes

use std::sync::Arc;

use chrono::{DateTime, Local};

use super::{Handler, HandlerOptions, Scope};
use crate::color::{self, colorize};
use crate::context::Context;
use crate::error::Result;
use crate::level::Level;
use crate::record::{Attr, Record, Value};
use crate::sink::{LineMode, Sink};

const TIME_LAYOUT: &str = "[%H:%M:%S%.3f]";
const LEGACY_TIME_LAYOUT: &str = "[%H:%S:%S%.3f]";

/// Console-specific rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    pub legacy_timestamp: bool,
    pub line_mode: LineMode,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            legacy_timestamp: false,
            line_mode: LineMode::WithoutNewline,
        }
    }
}

/// Handler producing colorized human-readable lines.
#[derive(Debug, Clone)]
pub struct ConsoleHandler {
    sink: Sink,
    options: HandlerOptions,
    console: ConsoleOptions,
    scope: Scope,
}

impl ConsoleHandler {
    pub fn new(sink: Sink, options: HandlerOptions) -> Self {
        Self::with_console_options(sink, options, ConsoleOptions::default())
    }

    pub fn with_console_options(
        sink: Sink,
        options: HandlerOptions,
        console: ConsoleOptions,
    ) -> Self {
        Self {
            sink,
            options,
            console,
            scope: Scope::default(),
        }
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Render `record` to the exact bytes [`handle`](Handler::handle) writes.
    pub fn render(&self, record: &Record) -> String {
        let mut out = String::new();

        let timestamp = record
            .time
            .as_ref()
            .map(|time| self.format_time(time))
            .unwrap_or_default();
        let level = level_token(record.level);
        let message = colorize(color::MESSAGE, &record.message);

        for segment in [&timestamp, &level, &message] {
            if !segment.is_empty() {
                out.push_str(segment);
                out.push(' ');
            }
        }

        for (key, value) in self.fields(&record.attrs) {
            out.push_str(&key);
            out.push('=');
            out.push_str(&value.to_string());
            out.push(' ');
        }

        if self.console.line_mode.append_newline() {
            out.push('\n');
        }
        out
    }

    fn format_time(&self, time: &DateTime<Local>) -> String {
        let layout = if self.console.legacy_timestamp {
            LEGACY_TIME_LAYOUT
        } else {
            TIME_LAYOUT
        };
        time.format(layout).to_string()
    }

    fn fields<'a>(&'a self, attrs: &'a [Attr]) -> Vec<(String, &'a Value)> {
        let mut fields: Vec<(String, &Value)> = Vec::new();
        for (key, value) in self.scope.flatten(attrs) {
            match fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => fields.push((key, value)),
            }
        }
        fields
    }

    fn derive(&self, scope: Scope) -> Arc<dyn Handler> {
        Arc::new(Self {
            sink: self.sink.clone(),
            options: self.options.clone(),
            console: self.console,
            scope,
        })
    }
}

fn level_token(level: Level) -> String {
    let token = format!("{}:", level);
    match color::level_color(level) {
        Some(code) => colorize(code, &token),
        None => token,
    }
}

impl Handler for ConsoleHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.options.level.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        let line = self.render(record);
        self.sink.write_line(line.as_bytes())?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.derive(self.scope.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.scope.with_group(name))
    }
}
