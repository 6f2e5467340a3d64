//! Verbatim (`<nowiki>`) region protection.
//!
//! Regions are cut out of the raw text before line splitting and replaced by
//! an empty placeholder, so no block or inline rule ever sees their content.
//! After rendering, placeholders are filled back in from the saved stack.
//!
//! Restore pairs regions with placeholders by position, so every inline rule
//! must hand its placeholders through unchanged: never escaped, never dropped,
//! never copied. [`conserve`] enforces the count for one rendered element.

use std::cmp::Ordering;

use memchr::{memchr, memmem};

const OPEN: &[u8] = b"<nowiki>";
const CLOSE: &[u8] = b"</nowiki>";

/// Placeholder left in the text for every saved region.
pub const PLACEHOLDER: &str = "<nowiki></nowiki>";

/// Saved verbatim regions, in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerbatimStack {
    saved: Vec<String>,
}

impl VerbatimStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    #[inline]
    pub fn push(&mut self, content: String) {
        self.saved.push(content);
    }

    /// Pop the most recently saved region.
    #[inline]
    pub fn pop(&mut self) -> Option<String> {
        self.saved.pop()
    }

    /// Cut every `<nowiki>…</nowiki>` region out of `text`.
    ///
    /// Matching is case-insensitive and non-greedy: each opener pairs with the
    /// nearest closer after it. An opener without a closer is left as text.
    pub fn save(&mut self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(open) = find_ignore_case(bytes, pos, OPEN) {
            let body_start = open + OPEN.len();
            let Some(close) = find_ignore_case(bytes, body_start, CLOSE) else {
                break;
            };
            out.push_str(&text[copied..open]);
            out.push_str(PLACEHOLDER);
            self.push(text[body_start..close].to_string());
            copied = close + CLOSE.len();
            pos = copied;
        }

        out.push_str(&text[copied..]);
        out
    }

    /// Replace every placeholder in `html` with a saved region.
    ///
    /// Placeholders are consumed from the end of the buffer backwards, one pop
    /// per placeholder, so the last-saved region lands on the last placeholder.
    /// A placeholder with nothing left to pop becomes the empty string.
    pub fn restore(&mut self, html: &str) -> String {
        let bytes = html.as_bytes();
        let mut positions = Vec::new();
        let mut pos = 0;
        while let Some(at) = find_ignore_case(bytes, pos, PLACEHOLDER.as_bytes()) {
            positions.push(at);
            pos = at + PLACEHOLDER.len();
        }
        if positions.is_empty() {
            return html.to_string();
        }

        let mut restored = Vec::with_capacity(positions.len());
        for _ in &positions {
            restored.push(self.pop().unwrap_or_else(|| {
                log::warn!("verbatim placeholder without saved content; substituting empty text");
                String::new()
            }));
        }
        // `restored` runs from the last placeholder to the first.
        restored.reverse();

        let mut out = String::with_capacity(html.len());
        let mut copied = 0;
        for (at, content) in positions.into_iter().zip(restored) {
            out.push_str(&html[copied..at]);
            out.push_str(&content);
            copied = at + PLACEHOLDER.len();
        }
        out.push_str(&html[copied..]);
        out
    }
}

/// Number of placeholders in `text`.
pub fn count_placeholders(text: &str) -> usize {
    memmem::find_iter(text.as_bytes(), PLACEHOLDER).count()
}

/// Only the placeholders of `text`, in order.
pub fn placeholders_of(text: &str) -> String {
    PLACEHOLDER.repeat(count_placeholders(text))
}

/// Give `rendered` exactly as many placeholders as the `source` it was
/// rendered from.
///
/// Missing placeholders are appended. Surplus ones are removed from the
/// front, where attribute copies of the displayed text are written.
pub fn conserve(source: &str, mut rendered: String) -> String {
    let wanted = count_placeholders(source);
    let found = count_placeholders(&rendered);
    match found.cmp(&wanted) {
        Ordering::Equal => rendered,
        Ordering::Less => {
            rendered.push_str(&PLACEHOLDER.repeat(wanted - found));
            rendered
        }
        Ordering::Greater => rendered.replacen(PLACEHOLDER, "", found - wanted),
    }
}

/// Find `needle` (lowercase ASCII, starting with `<`) in `haystack[from..]`,
/// ignoring ASCII case. Returns an absolute offset.
fn find_ignore_case(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    let mut pos = from;
    while pos < haystack.len() {
        let at = pos + memchr(b'<', &haystack[pos..])?;
        let candidate = &haystack[at..];
        if candidate.len() >= needle.len() && candidate[..needle.len()].eq_ignore_ascii_case(needle)
        {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}
