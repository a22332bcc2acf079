//! Severity levels and the shared threshold cell.
//!
//! # Design Decisions
//! - Levels are plain signed integers so values between the named levels stay
//!   representable (bridged `tracing` TRACE events land at -8)
//! - The threshold is owned per logger, never process-global
//! - `LevelVar` clones share one atomic, so derived handlers observe
//!   `set_level` immediately

use std::fmt;
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

/// Severity of a log record. Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i8);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i8 {
        self.0
    }

    /// Map a configuration name to a level.
    ///
    /// Only `debug`, `warn` and `error` are recognized; everything else,
    /// `info` included, yields [`Level::INFO`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, anchor) = if *self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if *self < Level::WARN {
            ("INFO", Level::INFO)
        } else if *self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        };

        let offset = i16::from(self.0) - i16::from(anchor.0);
        if offset == 0 {
            f.write_str(base)
        } else {
            write!(f, "{}{:+}", base, offset)
        }
    }
}

/// Atomically readable and writable minimum severity.
#[derive(Debug, Clone)]
pub struct LevelVar {
    inner: Arc<AtomicI8>,
}

impl LevelVar {
    pub fn new(level: Level) -> Self {
        Self {
            inner: Arc::new(AtomicI8::new(level.value())),
        }
    }

    pub fn load(&self) -> Level {
        Level(self.inner.load(Ordering::Acquire))
    }

    pub fn set(&self, level: Level) {
        self.inner.store(level.value(), Ordering::Release);
    }

    /// Set the threshold from a configuration name, see [`Level::from_name`].
    pub fn set_name(&self, name: &str) {
        self.set(Level::from_name(name));
    }

    /// Whether a record at `level` passes this threshold.
    pub fn allows(&self, level: Level) -> bool {
        level >= self.load()
    }
}

impl Default for LevelVar {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(Level::DEBUG.to_string(), "DEBUG");
        assert_eq!(Level::INFO.to_string(), "INFO");
        assert_eq!(Level::WARN.to_string(), "WARN");
        assert_eq!(Level::ERROR.to_string(), "ERROR");
    }

    #[test]
    fn test_intermediate_level_names() {
        assert_eq!(Level::new(-8).to_string(), "DEBUG-4");
        assert_eq!(Level::new(2).to_string(), "INFO+2");
        assert_eq!(Level::new(12).to_string(), "ERROR+4");
    }

    #[test]
    fn test_from_name_defaults_to_info() {
        assert_eq!(Level::from_name("debug"), Level::DEBUG);
        assert_eq!(Level::from_name("warn"), Level::WARN);
        assert_eq!(Level::from_name("error"), Level::ERROR);
        assert_eq!(Level::from_name("info"), Level::INFO);
        assert_eq!(Level::from_name("WARN"), Level::INFO);
        assert_eq!(Level::from_name("verbose"), Level::INFO);
        assert_eq!(Level::from_name(""), Level::INFO);
    }

    #[test]
    fn level_var_clones_share_state() {
        let var = LevelVar::default();
        let shared = var.clone();
        assert_eq!(shared.load(), Level::INFO);

        var.set_name("error");
        assert_eq!(shared.load(), Level::ERROR);
        assert!(!shared.allows(Level::WARN));
        assert!(shared.allows(Level::ERROR));
    }

    #[test]
    fn threshold_ordering_is_total() {
        let levels = [Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR];
        for threshold in levels {
            let var = LevelVar::new(threshold);
            for level in levels {
                assert_eq!(var.allows(level), level >= threshold);
            }
        }
    }
}
