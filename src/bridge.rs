//! Bridge from the `tracing` ecosystem into slogger handlers.
//!
//! [`SloggerLayer`] is a `tracing_subscriber` layer that turns each
//! `tracing` event into a [`Record`] and hands it to a slogger handler, so
//! libraries instrumented with `tracing` share the logger's output and
//! threshold.
//!
//! ```rust,ignore
//! let log = slogger::new_console(Context::background());
//! slogger::init_tracing(&log)?;
//! tracing::info!(port = 8080, "listening");
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context as LayerContext, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::context::Context;
use crate::error::Result;
use crate::handler::Handler;
use crate::level::Level;
use crate::logger::Slogger;
use crate::record::{Attr, Record, Value};

/// Forwards `tracing` events to a slogger [`Handler`].
pub struct SloggerLayer {
    handler: Arc<dyn Handler>,
    ctx: Context,
}

impl SloggerLayer {
    pub fn new(handler: Arc<dyn Handler>, ctx: Context) -> Self {
        Self { handler, ctx }
    }

    /// Map a `tracing` level onto the slogger scale.
    pub fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::TRACE => Level::new(Level::DEBUG.value() - 4),
            tracing::Level::DEBUG => Level::DEBUG,
            tracing::Level::INFO => Level::INFO,
            tracing::Level::WARN => Level::WARN,
            tracing::Level::ERROR => Level::ERROR,
        }
    }
}

impl<S> Layer<S> for SloggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
        let level = Self::map_level(event.metadata().level());
        if !self.handler.enabled(&self.ctx, level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let record = Record::new(level, visitor.message.unwrap_or_default()).with_attrs(visitor.attrs);
        // Errors are dropped here; reporting them through tracing would
        // re-enter this layer.
        let _ = self.handler.handle(&self.ctx, &record);
    }
}

/// Collects the `message` field and every other field as an attribute.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    attrs: Vec<Attr>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.attrs.push(Attr::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::error(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::Str(format!("{:?}", value)));
    }
}

/// Install `logger`'s layer as the global `tracing` subscriber.
pub fn init_tracing(logger: &Slogger) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry().with(logger.layer()).try_init()?;
    Ok(())
}
