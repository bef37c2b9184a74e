//! # Input Normalization
//!
//! Turns free-form user input into something a phone camera will act on.
//!
//! ## Classification Order
//!
//! | Kind | Detected by | Rewritten as |
//! |------|-------------|--------------|
//! | Email | has `@` and `.`, no whitespace | `mailto:<text>` |
//! | Phone | only digits, spaces, `-+()`, 10+ digits | `tel:<digits and +>` |
//! | URL | starts with `label.tld` | `https://<text>` |
//! | Text | anything else | unchanged |
//!
//! The first matching rule wins. Already-prefixed input (`mailto:`, `tel:`,
//! `http://`, `https://`) passes through untouched, so [`normalize`] is
//! idempotent on its own output.
//!
//! Known quirks, kept on purpose: a long numeric code such as an order number
//! is classified as a phone number, and the domain pattern is only anchored at
//! the start, so `example.com is great` becomes `https://example.com is great`.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::PALETTE;

/// Fallback color for anything that fails validation.
pub const DEFAULT_COLOR: &str = "#000000";

/// Minimum digit count for the phone heuristic.
const MIN_PHONE_DIGITS: usize = 10;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern"));

static PHONE_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d+]").expect("phone strip pattern"));

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+\.[a-zA-Z]{2,}").expect("domain pattern"));

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color pattern")
});

/// Normalize user input for encoding.
///
/// ## Example
///
/// ```
/// use qrforge::input::normalize;
///
/// assert_eq!(normalize("user@example.com"), "mailto:user@example.com");
/// assert_eq!(normalize("+1 (555) 123-4567"), "tel:+15551234567");
/// assert_eq!(normalize("example.com"), "https://example.com");
/// assert_eq!(normalize("  plain text  "), "plain text");
/// ```
pub fn normalize(text: &str) -> String {
    let data = text.trim();

    if looks_like_email(data) {
        return format!("mailto:{}", data);
    }

    if looks_like_phone(data) {
        let cleaned = PHONE_STRIP_RE.replace_all(data, "");
        return format!("tel:{}", cleaned);
    }

    if looks_like_bare_domain(data) {
        return format!("https://{}", data);
    }

    data.to_string()
}

fn looks_like_email(data: &str) -> bool {
    data.contains('@')
        && data.contains('.')
        && !data.starts_with("mailto:")
        && !data.chars().any(char::is_whitespace)
        && !data.starts_with("http")
}

fn looks_like_phone(data: &str) -> bool {
    if data.starts_with("tel:") || !PHONE_RE.is_match(data) {
        return false;
    }
    data.chars().filter(|c| c.is_numeric()).count() >= MIN_PHONE_DIGITS
}

fn looks_like_bare_domain(data: &str) -> bool {
    const SCHEMES: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];
    !SCHEMES.iter().any(|s| data.starts_with(s)) && DOMAIN_RE.is_match(data)
}

/// Validate a user-supplied color.
///
/// Returns `#RRGGBB` for valid hex input (expanding the `#RGB` short form),
/// a palette entry if the value is one, and [`DEFAULT_COLOR`] otherwise.
///
/// ```
/// use qrforge::input::validate_color;
///
/// assert_eq!(validate_color(Some("#abc")), "#aabbcc");
/// assert_eq!(validate_color(Some(" #6c63ff ")), "#6c63ff");
/// assert_eq!(validate_color(None), "#000000");
/// ```
pub fn validate_color(input: Option<&str>) -> String {
    let Some(raw) = input.filter(|c| !c.is_empty()) else {
        return DEFAULT_COLOR.to_string();
    };

    let color = raw.trim();
    if HEX_COLOR_RE.is_match(color) {
        if color.len() == 4 {
            return color[1..].chars().fold(String::from("#"), |mut out, c| {
                out.push(c);
                out.push(c);
                out
            });
        }
        return color.to_string();
    }

    // Only reachable for values the pattern rejected
    if PALETTE.contains(&color) {
        return color.to_string();
    }

    DEFAULT_COLOR.to_string()
}

/// Parse a validated `#RRGGBB` color into RGB channels.
pub fn parse_hex_rgb(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
