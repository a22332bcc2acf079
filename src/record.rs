//! Log records, attributes and attribute values.
//!
//! A [`Record`] is built fresh for every emitted call and dropped once the
//! handler has rendered it.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::level::Level;

/// A loosely-typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Group(Vec<Attr>),
    Null,
}

impl Value {
    /// Capture an error's display text.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Value::Str(err.to_string())
    }

    pub fn is_empty_group(&self) -> bool {
        matches!(self, Value::Group(attrs) if attrs.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("<nil>"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Duration(d) => {
                let nanos = u64::try_from(d.as_nanos()).unwrap_or(u64::MAX);
                serializer.serialize_u64(nanos)
            }
            Value::Group(attrs) => {
                let mut map = serializer.serialize_map(Some(attrs.len()))?;
                for attr in attrs {
                    map.serialize_entry(&attr.key, &attr.value)?;
                }
                map.end()
            }
            Value::Null => serializer.serialize_unit(),
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(Uint as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Group(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A nested group of attributes under `key`.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs),
        }
    }

    /// An error's display text under the `error` key.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self {
            key: "error".to_string(),
            value: Value::error(err),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Build a `Vec<Attr>` from `key => value` pairs.
///
/// ```
/// let attrs = slogger::attrs!["port" => 8080, "env" => "prod"];
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new($key, $value)),+]
    };
}

/// One structured log event.
#[derive(Debug, Clone)]
pub struct Record {
    /// Wall-clock time of the call. `None` suppresses the time field.
    pub time: Option<DateTime<Local>>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    /// A record stamped with the current local time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Some(Local::now()),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    pub fn at(mut self, time: Option<DateTime<Local>>) -> Self {
        self.time = time;
        self
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(8080).to_string(), "8080");
        assert_eq!(Value::from("prod").to_string(), "prod");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(Duration::from_millis(1500)).to_string(), "1.5s");
        assert_eq!(Value::from(None::<i32>).to_string(), "<nil>");
    }

    #[test]
    fn test_group_display() {
        let group = Value::Group(vec![Attr::new("a", 1), Attr::new("b", "x")]);
        assert_eq!(group.to_string(), "[a=1 b=x]");
    }

    #[test]
    fn test_attrs_macro() {
        let attrs = crate::attrs!["port" => 8080u16, "env" => "prod"];
        assert_eq!(attrs[0], Attr::new("port", Value::Uint(8080)));
        assert_eq!(attrs[1], Attr::new("env", "prod"));
        assert!(crate::attrs![].is_empty());
    }

    #[test]
    fn test_error_attr() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let attr = Attr::error(&err);
        assert_eq!(attr.key, "error");
        assert_eq!(attr.value, Value::Str("disk full".into()));
    }

    #[test]
    fn test_value_serializes_as_json() {
        let group = Value::Group(vec![
            Attr::new("elapsed", Duration::from_micros(2)),
            Attr::new("missing", Value::Null),
        ]);
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, r#"{"elapsed":2000,"missing":null}"#);
    }
}
