//! ANSI color encoding for console output.

use crate::level::Level;

/// Reset sequence appended after every colorized segment.
pub const RESET: &str = "\x1b[0m";

pub const BLACK: i32 = 30;
pub const RED: i32 = 31;
pub const GREEN: i32 = 32;
pub const YELLOW: i32 = 33;
pub const BLUE: i32 = 34;
pub const MAGENTA: i32 = 35;
pub const CYAN: i32 = 36;
pub const LIGHT_GRAY: i32 = 37;
pub const DARK_GRAY: i32 = 90;
pub const LIGHT_RED: i32 = 91;
pub const LIGHT_GREEN: i32 = 92;
pub const LIGHT_YELLOW: i32 = 93;
pub const LIGHT_BLUE: i32 = 94;
pub const LIGHT_MAGENTA: i32 = 95;
pub const LIGHT_CYAN: i32 = 96;
pub const WHITE: i32 = 97;

/// Color used for message text.
pub const MESSAGE: i32 = WHITE;

/// Wrap `text` in an SGR escape for `code` followed by [`RESET`].
///
/// The code is not validated; any integer, negative or out of the SGR
/// table, is embedded as-is.
pub fn colorize(code: i32, text: &str) -> String {
    format!("\x1b[{}m{}{}", code, text, RESET)
}

/// Color for a level token. Only the four named levels are colored.
pub fn level_color(level: Level) -> Option<i32> {
    match level {
        Level::DEBUG => Some(LIGHT_GRAY),
        Level::INFO => Some(CYAN),
        Level::WARN => Some(LIGHT_BLUE),
        Level::ERROR => Some(LIGHT_RED),
        _ => None,
    }
}
