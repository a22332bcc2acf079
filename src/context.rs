//! Call-site context carried from the facade to handlers.
//!
//! Built-in handlers accept the context but never read it; custom handlers
//! may use it to pick up request-scoped values.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::record::Value;

/// Immutable value carrier. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<BTreeMap<String, Value>>,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// A copy of this context with `key` bound to `value`.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_value_leaves_parent_untouched() {
        let parent = Context::background();
        let child = parent.with_value("request_id", "abc");

        assert!(parent.value("request_id").is_none());
        assert_eq!(child.value("request_id"), Some(&Value::from("abc")));
    }
}
