//! Structured logging facade with a colorized console renderer.
//!
//! # Architecture
//!
//! ```text
//!   caller ──▶ Logger (Slogger) ──▶ LevelVar check ──▶ Handler ──▶ Sink
//!                                                       │
//!                                  ┌────────────────────┼───────────────────┐
//!                                  ▼                    ▼                   ▼
//!                             JsonHandler          TextHandler        ConsoleHandler
//!                             (JSON lines)         (key=value)        (ANSI colors)
//! ```
//!
//! `tracing` events can be routed into the same handlers through
//! [`SloggerLayer`].

pub mod bridge;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;

pub use bridge::{init_tracing, SloggerLayer};
pub use config::{Format, LoggerConfig};
pub use context::Context;
pub use error::{Error, Result};
pub use handler::{ConsoleHandler, ConsoleOptions, Handler, HandlerOptions, JsonHandler, TextHandler};
pub use level::{Level, LevelVar};
pub use logger::{new_console, new_json, new_text, Logger, Slogger};
pub use record::{Attr, Record, Value};
pub use sink::{LineMode, Sink};
