// Rust guideline compliant 2026-10-12

//! Terminal utilities for the ascx CLI.
//!
//! Color detection and ANSI painting of short labels.

use std::env;
use std::io::Write;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stdout)
}

/// Wraps text in ANSI color codes.
///
/// # Arguments
/// * `text` - The text to paint
/// * `color` - Foreground color
/// * `bold` - Whether to use bold text
/// * `use_color` - When false the text is returned unchanged
///
/// # Returns
/// The painted text
pub fn paint(text: &str, color: Color, bold: bool, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    let mut buffer = Buffer::ansi();
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(buffer, "{}", text);
    let _ = buffer.reset();
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}

/// Color for an issue severity label.
pub fn severity_color(severity: &str) -> Color {
    match severity {
        "error" => Color::Red,
        "warning" => Color::Yellow,
        _ => Color::Cyan,
    }
}
