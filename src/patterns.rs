//! Compiled regex patterns used by the scoring models and filters.
//!
//! All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Hidden Element Patterns
// =============================================================================

/// Inline style hiding the element with `display: none`.
pub static DISPLAY_NONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*display\s*:\s*none\b").expect("DISPLAY_NONE regex")
});

/// Inline style hiding the element with `visibility: hidden`.
pub static VISIBILITY_HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*visibility\s*:\s*hidden\b").expect("VISIBILITY_HIDDEN regex")
});

/// Inline style using absolute positioning.
pub static POSITION_ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*position\s*:\s*absolute\b").expect("POSITION_ABSOLUTE regex")
});

/// Inline style moving the element off-screen to the left.
pub static NEGATIVE_LEFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*left\s*:\s*-\s*\d").expect("NEGATIVE_LEFT regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// Runs of two or more whitespace characters, or any single non-space
/// whitespace character.
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\n\r\f]{2,}|[\t\n\r\f]").expect("WHITESPACE_RUN regex")
});

/// Hair space and other invisible or narrow spacing characters.
pub static INVISIBLE_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{2007}\u{2008}\u{2009}\u{200A}\u{200B}\u{202F}\u{205F}\u{FEFF}]")
        .expect("INVISIBLE_SPACE regex")
});

/// Separators between `id`/`class` tokens.
pub static ATTRIBUTE_TOKEN_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("ATTRIBUTE_TOKEN_SEPARATOR regex")
});

// =============================================================================
// URL Patterns
// =============================================================================

/// Script URLs (`javascript:`), tolerating leading whitespace and mixed case.
pub static SCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*javascript\s*:").expect("SCRIPT_URL regex")
});
