//! HTML output escaping
//!
//! Sponsor names and URLs come from a third-party API, so everything written
//! into markup goes through one of these helpers.

use url::{ParseError, Url};

/// URL schemes allowed in `href`/`src` attributes
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "ftp", "ftps"];

/// Escape text for use inside a double- or single-quoted HTML attribute
pub fn esc_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Sanitize a URL for an `href` or `src` attribute
///
/// Absolute URLs are normalized by the `url` parser (punycode hosts,
/// percent-encoded paths) and dropped when their scheme is not in the
/// allow-list (`javascript:`, `data:`, ...). Relative URLs are kept with
/// unsafe characters percent-encoded. Anything else becomes empty.
pub fn esc_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let normalized = match Url::parse(trimmed) {
        Ok(parsed) => {
            if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
                return String::new();
            }
            parsed.to_string()
        }
        Err(ParseError::RelativeUrlWithoutBase) => encode_relative(trimmed),
        Err(_) => return String::new(),
    };

    esc_attr(&normalized)
}

/// Percent-encode every byte of a relative URL outside the URL-safe set
fn encode_relative(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        if c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c) {
            encoded.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
