//! JSON lines handler.
//!
//! Each record becomes one object: `time`, `level`, `msg`, then attributes.
//! Groups become nested objects and durations encode as nanoseconds. A key
//! repeated by an attribute is written again rather than replacing the
//! earlier entry.

use std::sync::Arc;

use chrono::SecondsFormat;
use serde_json::Value as Json;

use super::{Fields, Handler, HandlerOptions, Scope};
use crate::context::Context;
use crate::error::Result;
use crate::level::Level;
use crate::record::{Attr, Record};
use crate::sink::Sink;

#[derive(Debug, Clone)]
pub struct JsonHandler {
    sink: Sink,
    options: HandlerOptions,
    scope: Scope,
}

impl JsonHandler {
    pub fn new(sink: Sink, options: HandlerOptions) -> Self {
        Self {
            sink,
            options,
            scope: Scope::default(),
        }
    }

    /// Encode `record` as a single newline-terminated JSON object.
    pub fn render(&self, record: &Record) -> Result<Vec<u8>> {
        let mut fields = Fields::default();
        if let Some(time) = &record.time {
            fields.push(
                "time",
                Json::String(time.to_rfc3339_opts(SecondsFormat::Millis, false)),
            );
        }
        fields.push("level", Json::String(record.level.to_string()));
        fields.push("msg", Json::String(record.message.clone()));
        self.scope.nest(&record.attrs, &mut fields)?;

        let mut line = serde_json::to_vec(&fields)?;
        line.push(b'\n');
        Ok(line)
    }

    fn derive(&self, scope: Scope) -> Arc<dyn Handler> {
        Arc::new(Self {
            sink: self.sink.clone(),
            options: self.options.clone(),
            scope,
        })
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.options.level.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        let line = self.render(record)?;
        self.sink.write_line(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.derive(self.scope.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.scope.with_group(name))
    }
}
