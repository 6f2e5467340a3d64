//! HTML output writer.
//!
//! Block and inline handlers build their replacement text through an
//! [`HtmlWriter`], which fixes the exact markup (and whitespace) emitted for
//! every construct.

use html_escape::encode_quoted_attribute;

use crate::verbatim::PLACEHOLDER;

/// Kind of an open list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*` markers, rendered as `<ul>`.
    Unordered,
    /// `#` markers, rendered as `<ol>`.
    Ordered,
}

impl ListKind {
    /// Map a list marker byte to its kind.
    #[inline]
    pub fn from_marker(b: u8) -> Option<Self> {
        match b {
            b'*' => Some(Self::Unordered),
            b'#' => Some(Self::Ordered),
            _ => None,
        }
    }

    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// HTML output writer with an owned, growable buffer.
///
/// # Example
/// ```
/// use ferrowiki::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.heading(2, "Title");
/// assert_eq!(writer.into_string(), "\n\n<h2>Title</h2>\n\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: String::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write a string without escaping.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.out.push(c);
    }

    /// Write an attribute value, escaping quotes, apostrophes, `<`, `>` and `&`.
    ///
    /// Verbatim placeholders pass through unescaped so they can still be
    /// restored.
    pub fn write_escaped_attr(&mut self, value: &str) {
        let mut rest = value;
        while let Some(at) = rest.find(PLACEHOLDER) {
            self.out.push_str(&encode_quoted_attribute(&rest[..at]));
            self.out.push_str(PLACEHOLDER);
            rest = &rest[at + PLACEHOLDER.len()..];
        }
        self.out.push_str(&encode_quoted_attribute(rest));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- Block elements ---

    /// Heading with surrounding blank lines: `\n\n<hN>content</hN>\n\n`
    pub fn heading(&mut self, level: u8, content: &str) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("\n\n<h");
        self.write_char(char::from(b'0' + level));
        self.write_char('>');
        self.write_str(content);
        self.write_str("</h");
        self.write_char(char::from(b'0' + level));
        self.write_str(">\n\n");
    }

    /// Paragraph break emitted for a blank line.
    #[inline]
    pub fn paragraph_break(&mut self) {
        self.write_str("<br /><br />");
    }

    #[inline]
    pub fn horizontal_rule(&mut self) {
        self.write_str("<hr />");
    }

    /// Open a list level together with its first item: `\n<ul>\n<li>`
    #[inline]
    pub fn list_open(&mut self, kind: ListKind) {
        self.write_str("\n<");
        self.write_str(kind.tag());
        self.write_str(">\n<li>");
    }

    /// Close the current item and its list level: `</li>\n</ul>\n`
    #[inline]
    pub fn list_close(&mut self, kind: ListKind) {
        self.write_str("</li>\n</");
        self.write_str(kind.tag());
        self.write_str(">\n");
    }

    /// Close the current item and open a sibling: `</li>\n<li>`
    #[inline]
    pub fn list_item_break(&mut self) {
        self.write_str("</li>\n<li>");
    }

    #[inline]
    pub fn definition_list_start(&mut self) {
        self.write_str("<dl>\n");
    }

    #[inline]
    pub fn definition_list_end(&mut self) {
        self.write_str("</dl>\n");
    }

    #[inline]
    pub fn definition_term(&mut self, term: &str) {
        self.write_str("<dt>");
        self.write_str(term);
        self.write_str("</dt>");
    }

    #[inline]
    pub fn definition(&mut self, definition: &str) {
        self.write_str("<dd>");
        self.write_str(definition);
        self.write_str("</dd>");
    }

    #[inline]
    pub fn preformat_start(&mut self) {
        self.write_str("<pre>");
    }

    #[inline]
    pub fn preformat_end(&mut self) {
        self.write_str("</pre>\n");
    }

    // --- Inline elements ---

    /// Anchor: `<a href="url">text</a>`, optionally opening a new browsing context.
    pub fn anchor(&mut self, href: &str, text: &str, new_window: bool) {
        self.write_str("<a href=\"");
        self.write_escaped_attr(href);
        self.write_char('"');
        if new_window {
            self.write_str(" target=\"_blank\"");
        }
        self.write_char('>');
        self.write_str(text);
        self.write_str("</a>");
    }

    /// Image: `<img src="src" alt="alt" />`
    pub fn image(&mut self, src: &str, alt: &str) {
        self.write_str("<img src=\"");
        self.write_escaped_attr(src);
        self.write_str("\" alt=\"");
        self.write_escaped_attr(alt);
        self.write_str("\" />");
    }
}

impl std::fmt::Write for HtmlWriter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}
