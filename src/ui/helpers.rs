//! Shared rendering utilities.
//!
//! ANSI escape builders and width-aware truncation used by the renderer.
//! Everything here returns strings; nothing prints.

/// ANSI 24-bit foreground color escape.
#[must_use]
pub fn fg((r, g, b): (u8, u8, u8)) -> String {
    format!("\u{001b}[38;2;{r};{g};{b}m")
}

/// ANSI 24-bit background color escape.
#[must_use]
pub fn bg((r, g, b): (u8, u8, u8)) -> String {
    format!("\u{001b}[48;2;{r};{g};{b}m")
}

#[must_use]
pub const fn bold() -> &'static str {
    "\u{001b}[1m"
}

#[must_use]
pub const fn dim() -> &'static str {
    "\u{001b}[2m"
}

#[must_use]
pub const fn reset() -> &'static str {
    "\u{001b}[0m"
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
///
/// Counts `char`s, not bytes, so multi-byte titles are never split.
///
/// # Example
///
/// ```rust
/// use futurejoy::ui::helpers::truncate;
///
/// assert_eq!(truncate("Birthday Party", 8), "Birthda…");
/// assert_eq!(truncate("Trip", 8), "Trip");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
