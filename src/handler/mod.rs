//! Record handlers.
//!
//! # Data Flow
//! ```text
//! Slogger::info(msg, attrs)
//!     → Handler::enabled (shared LevelVar)
//!     → Record { time, level, message, attrs }
//!     → Handler::handle
//!         → json.rs    (one JSON object per line)
//!         → text.rs    (key=value line)
//!         → console.rs (colorized line)
//!     → Sink::write_line (serialized by the sink lock)
//! ```
//!
//! # Design Decisions
//! - One trait, three encodings; callers hold `Arc<dyn Handler>`
//! - `with_attrs`/`with_group` return new handlers sharing sink, lock and
//!   level with their origin; the origin is never modified
//! - Scoping (bound attrs and group prefixes) is shared by all encodings

pub mod console;
pub mod json;
pub mod text;

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::context::Context;
use crate::error::Result;
use crate::level::{Level, LevelVar};
use crate::record::{Attr, Record, Value};

pub use console::{ConsoleHandler, ConsoleOptions};
pub use json::JsonHandler;
pub use text::TextHandler;

/// Converts records into bytes on a sink.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be handled.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Render and write one record.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()>;

    /// A handler that adds `attrs` to every future record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler whose future attribute keys are nested under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Options common to every built-in handler.
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    /// Minimum level; shared with whoever holds a clone of it.
    pub level: LevelVar,
}

/// Bound attributes and open groups of a derived handler.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    groups: Vec<String>,
    bound: Vec<(Vec<String>, Attr)>,
}

impl Scope {
    pub(crate) fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut scope = self.clone();
        scope.bound.extend(
            attrs
                .into_iter()
                .filter(|attr| !attr.value.is_empty_group())
                .map(|attr| (self.groups.clone(), attr)),
        );
        scope
    }

    pub(crate) fn with_group(&self, name: &str) -> Self {
        let mut scope = self.clone();
        if !name.is_empty() {
            scope.groups.push(name.to_string());
        }
        scope
    }

    /// Bound attrs followed by `attrs`, flattened to dotted keys.
    pub(crate) fn flatten<'a>(&'a self, attrs: &'a [Attr]) -> Vec<(String, &'a Value)> {
        let mut out = Vec::with_capacity(self.bound.len() + attrs.len());
        for (path, attr) in &self.bound {
            flatten_attr(&path.join("."), attr, &mut out);
        }
        let prefix = self.groups.join(".");
        for attr in attrs {
            flatten_attr(&prefix, attr, &mut out);
        }
        out
    }

    /// Bound attrs followed by `attrs`, inserted into `fields` as nested
    /// objects.
    pub(crate) fn nest(&self, attrs: &[Attr], fields: &mut Fields) -> Result<()> {
        for (path, attr) in &self.bound {
            nest_attr(fields.descend(path), attr)?;
        }
        if attrs.iter().any(|attr| !attr.value.is_empty_group()) {
            let target = fields.descend(&self.groups);
            for attr in attrs {
                nest_attr(target, attr)?;
            }
        }
        Ok(())
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else if key.is_empty() {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_attr<'a>(prefix: &str, attr: &'a Attr, out: &mut Vec<(String, &'a Value)>) {
    match &attr.value {
        Value::Group(children) => {
            // Empty groups are dropped; an unnamed group inlines its members.
            let prefix = join_key(prefix, &attr.key);
            for child in children {
                flatten_attr(&prefix, child, out);
            }
        }
        value => out.push((join_key(prefix, &attr.key), value)),
    }
}

/// Ordered JSON object that keeps repeated keys instead of overwriting
/// them, so attributes never replace the built-in `time`/`level`/`msg`.
#[derive(Debug, Default)]
pub(crate) struct Fields(Vec<(String, Field)>);

#[derive(Debug)]
pub(crate) enum Field {
    Leaf(serde_json::Value),
    Object(Fields),
}

impl Fields {
    pub(crate) fn push(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.push((key.into(), Field::Leaf(value)));
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The latest object under `key`, created if there is none. Scalars
    /// with the same key are left in place.
    fn object(&mut self, key: &str) -> &mut Fields {
        let index = match self
            .0
            .iter()
            .rposition(|(k, field)| k == key && matches!(field, Field::Object(_)))
        {
            Some(index) => index,
            None => {
                self.0.push((key.to_string(), Field::Object(Fields::default())));
                self.0.len() - 1
            }
        };
        match &mut self.0[index].1 {
            Field::Object(inner) => inner,
            Field::Leaf(_) => unreachable!("index points at an object"),
        }
    }

    fn descend(&mut self, path: &[String]) -> &mut Fields {
        let mut fields = self;
        for segment in path {
            fields = fields.object(segment);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, field) in &self.0 {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Leaf(value) => value.serialize(serializer),
            Field::Object(fields) => fields.serialize(serializer),
        }
    }
}

fn nest_attr(fields: &mut Fields, attr: &Attr) -> Result<()> {
    match &attr.value {
        Value::Group(children) if children.is_empty() => Ok(()),
        Value::Group(children) if attr.key.is_empty() => {
            for child in children {
                nest_attr(fields, child)?;
            }
            Ok(())
        }
        Value::Group(children) => {
            let inner = fields.object(&attr.key);
            for child in children {
                nest_attr(inner, child)?;
            }
            Ok(())
        }
        value => {
            fields.push(attr.key.clone(), serde_json::to_value(value)?);
            Ok(())
        }
    }
}
