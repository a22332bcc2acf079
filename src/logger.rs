//! Logging facade and level controller.
//!
//! # Responsibilities
//! - Expose the seven-method [`Logger`] interface
//! - Route calls to one of the JSON, text or console handlers
//! - Own the per-instance severity threshold
//!
//! # Design Decisions
//! - Emission never fails from the caller's point of view; sink errors are
//!   reported on the `slogger::sink` tracing target and dropped
//! - `fatal` and `panic` both exit the process; neither unwinds
//! - Each constructor creates a fresh threshold at INFO; loggers derived via
//!   `with_attrs`/`with_group` share it with their origin

use std::fmt;
use std::process;
use std::sync::Arc;

use crate::bridge::SloggerLayer;
use crate::config::Format;
use crate::context::Context;
use crate::handler::{ConsoleHandler, ConsoleOptions, Handler, HandlerOptions, JsonHandler, TextHandler};
use crate::level::{Level, LevelVar};
use crate::record::{Attr, Record};
use crate::sink::Sink;

/// Exit status used by [`Logger::fatal`] and [`Logger::panic`].
pub const EXIT_STATUS: i32 = -1;

/// Attribute key carrying the error passed to [`Logger::fatal`].
pub const FATAL_KEY: &str = "error";

/// Attribute key carrying the error passed to [`Logger::panic`].
pub const PANIC_KEY: &str = "panic";

/// Uniform logging interface over every encoding.
pub trait Logger: Send + Sync {
    fn error(&self, msg: &str, attrs: Vec<Attr>);
    fn warn(&self, msg: &str, attrs: Vec<Attr>);
    fn info(&self, msg: &str, attrs: Vec<Attr>);
    fn debug(&self, msg: &str, attrs: Vec<Attr>);

    /// Log `err` at ERROR under the `error` key, then exit the process.
    fn fatal(&self, msg: &str, err: &dyn fmt::Display) -> !;

    /// Log `err` at ERROR under the `panic` key, then exit the process.
    ///
    /// Despite the name this does not unwind.
    fn panic(&self, msg: &str, err: &dyn fmt::Display) -> !;

    /// Change the threshold by name: `debug`, `warn`, `error`; anything
    /// else selects `info`.
    fn set_level(&self, name: &str);
}

/// Logger backed by a [`Handler`].
#[derive(Clone)]
pub struct Slogger {
    handler: Arc<dyn Handler>,
    level: LevelVar,
    ctx: Context,
}

/// JSON lines on stdout.
pub fn new_json(ctx: Context) -> Slogger {
    Slogger::new(ctx, Format::Json, Sink::stdout())
}

/// `key=value` lines on stdout.
pub fn new_text(ctx: Context) -> Slogger {
    Slogger::new(ctx, Format::Text, Sink::stdout())
}

/// Colorized lines on stdout.
pub fn new_console(ctx: Context) -> Slogger {
    Slogger::new(ctx, Format::Console, Sink::stdout())
}

impl Slogger {
    /// A logger writing `format` to `sink` with a fresh INFO threshold.
    pub fn new(ctx: Context, format: Format, sink: Sink) -> Self {
        Self::with_console_options(ctx, format, sink, ConsoleOptions::default())
    }

    /// Like [`Slogger::new`], with console rendering switches. They are
    /// ignored by the JSON and text encodings.
    pub fn with_console_options(
        ctx: Context,
        format: Format,
        sink: Sink,
        console: ConsoleOptions,
    ) -> Self {
        let level = LevelVar::default();
        let options = HandlerOptions {
            level: level.clone(),
        };
        let handler: Arc<dyn Handler> = match format {
            Format::Json => Arc::new(JsonHandler::new(sink, options)),
            Format::Text => Arc::new(TextHandler::new(sink, options)),
            Format::Console => Arc::new(ConsoleHandler::with_console_options(sink, options, console)),
        };
        Self::from_handler(ctx, handler, level)
    }

    /// Wrap a custom handler. `level` must be the cell the handler consults
    /// for `set_level` to take effect.
    pub fn from_handler(ctx: Context, handler: Arc<dyn Handler>, level: LevelVar) -> Self {
        Self {
            handler,
            level,
            ctx,
        }
    }

    /// A logger adding `attrs` to every record. Shares the threshold.
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            level: self.level.clone(),
            ctx: self.ctx.clone(),
        }
    }

    /// A logger nesting future attributes under `name`. Shares the threshold.
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            level: self.level.clone(),
            ctx: self.ctx.clone(),
        }
    }

    pub fn level(&self) -> Level {
        self.level.load()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// A `tracing` layer that renders events through this logger's handler.
    pub fn layer(&self) -> SloggerLayer {
        SloggerLayer::new(self.handler.clone(), self.ctx.clone())
    }

    /// Emit `msg` at `level` if the threshold allows it.
    pub fn log(&self, level: Level, msg: &str, attrs: Vec<Attr>) {
        if !self.handler.enabled(&self.ctx, level) {
            return;
        }
        let record = Record::new(level, msg).with_attrs(attrs);
        if let Err(err) = self.handler.handle(&self.ctx, &record) {
            tracing::debug!(target: "slogger::sink", error = %err, level = %level, "dropped log record");
        }
    }

    fn exit_with(&self, msg: &str, key: &str, err: &dyn fmt::Display) -> ! {
        self.log(Level::ERROR, msg, vec![Attr::new(key, err.to_string())]);
        process::exit(EXIT_STATUS)
    }
}

impl fmt::Debug for Slogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slogger")
            .field("level", &self.level.load())
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl Logger for Slogger {
    fn error(&self, msg: &str, attrs: Vec<Attr>) {
        self.log(Level::ERROR, msg, attrs);
    }

    fn warn(&self, msg: &str, attrs: Vec<Attr>) {
        self.log(Level::WARN, msg, attrs);
    }

    fn info(&self, msg: &str, attrs: Vec<Attr>) {
        self.log(Level::INFO, msg, attrs);
    }

    fn debug(&self, msg: &str, attrs: Vec<Attr>) {
        self.log(Level::DEBUG, msg, attrs);
    }

    fn fatal(&self, msg: &str, err: &dyn fmt::Display) -> ! {
        self.exit_with(msg, FATAL_KEY, err)
    }

    fn panic(&self, msg: &str, err: &dyn fmt::Display) -> ! {
        self.exit_with(msg, PANIC_KEY, err)
    }

    fn set_level(&self, name: &str) {
        self.level.set_name(name);
    }
}
