//! Plain `key=value` line handler.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::SecondsFormat;

use super::{Handler, HandlerOptions, Scope};
use crate::context::Context;
use crate::error::Result;
use crate::level::Level;
use crate::record::{Attr, Record};
use crate::sink::Sink;

/// Handler writing `time=… level=… msg=… key=value` lines.
#[derive(Debug, Clone)]
pub struct TextHandler {
    sink: Sink,
    options: HandlerOptions,
    scope: Scope,
}

impl TextHandler {
    pub fn new(sink: Sink, options: HandlerOptions) -> Self {
        Self {
            sink,
            options,
            scope: Scope::default(),
        }
    }

    pub fn render(&self, record: &Record) -> String {
        let mut out = String::new();
        if let Some(time) = &record.time {
            push_pair(&mut out, "time", &time.to_rfc3339_opts(SecondsFormat::Millis, false));
        }
        push_pair(&mut out, "level", &record.level.to_string());
        push_pair(&mut out, "msg", &record.message);

        for (key, value) in self.scope.flatten(&record.attrs) {
            push_pair(&mut out, &key, &value.to_string());
        }
        out.push('\n');
        out
    }

    fn derive(&self, scope: Scope) -> Arc<dyn Handler> {
        Arc::new(Self {
            sink: self.sink.clone(),
            options: self.options.clone(),
            scope,
        })
    }
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    push_quoted(out, key);
    out.push('=');
    push_quoted(out, value);
}

fn push_quoted(out: &mut String, text: &str) {
    if needs_quoting(text) {
        let _ = write!(out, "{:?}", text);
    } else {
        out.push_str(text);
    }
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c == ' ' || c == '=' || c == '"' || c.is_control())
}

impl Handler for TextHandler {
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
