//! Internal (`[[…]]`) and external (`[…]`) link resolution.
//!
//! Both passes scan the line left to right and never rescan their own
//! replacement text.

use memchr::{memchr, memmem};

use super::image::{render_image, MEDIA_NAMESPACES};
use crate::render::HtmlWriter;
use crate::verbatim;
use crate::Options;

/// The parts of a `[[namespace:target|title]]suffix` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalLink<'a> {
    /// Text before the first `:`, when non-empty.
    pub namespace: Option<&'a str>,
    pub target: &'a str,
    /// Text after the first `|` of the target, when non-empty.
    pub title: Option<&'a str>,
    /// ASCII letters directly following `]]`.
    pub suffix: &'a str,
}

impl<'a> InternalLink<'a> {
    /// Split the body between `[[` and `]]` into its parts.
    pub fn from_body(body: &'a str, suffix: &'a str) -> Self {
        let (namespace, rest) = match body.find(':') {
            Some(colon) => (Some(&body[..colon]), &body[colon + 1..]),
            None => (None, body),
        };
        let (target, title) = match rest.find('|') {
            Some(bar) => (&rest[..bar], Some(&rest[bar + 1..])),
            None => (rest, None),
        };
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()),
            target,
            title: title.filter(|t| !t.is_empty()),
            suffix,
        }
    }

    /// The display text before cleanup: the explicit title, or the target
    /// with the suffix appended.
    pub fn display(&self) -> String {
        match self.title {
            Some(title) => title.to_string(),
            None => format!("{}{}", self.target, self.suffix),
        }
    }

    pub fn is_media(&self) -> bool {
        self.namespace
            .is_some_and(|ns| MEDIA_NAMESPACES.contains(&ns))
    }
}

/// Normalize a page name for use in a URL: spaces become underscores and the
/// first character is upper-cased.
pub fn normalize_target(target: &str) -> String {
    let replaced = target.replace(' ', "_");
    let mut chars = replaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => replaced,
    }
}

/// Remove parenthesized disambiguators and any leading `prefix:` from a
/// display title.
pub fn clean_display_title(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|c| open + c) else {
            break;
        };
        stripped.push_str(&rest[..open]);
        rest = &rest[close + 1..];
    }
    stripped.push_str(rest);

    match stripped.find(':') {
        Some(colon) => stripped[colon + 1..].to_string(),
        None => stripped,
    }
}

/// Render one internal link.
pub fn render_internal_link(link: &InternalLink<'_>, options: &Options) -> String {
    let mut title = link.display();

    if link.is_media() {
        let caption = {
            let mut parts: Vec<&str> = title.split('|').collect();
            let caption = parts.pop().unwrap_or_default().to_string();
            match &options.image_parser_callback {
                None => return render_image(link.target, &caption, &parts, options),
                Some(renderer) => {
                    let rendered = renderer.render(link.target, &caption, &parts);
                    if options.insert_image_callback_output {
                        if let Some(markup) = rendered {
                            return markup;
                        }
                    }
                }
            }
            caption
        };
        title = caption;
    }

    let title = clean_display_title(&title);
    if options.strip_internal_links {
        return title;
    }

    let mut href = String::new();
    href.push_str(options.internal_link_prefix.as_deref().unwrap_or(""));
    if let Some(namespace) = link.namespace {
        href.push_str(namespace);
        href.push(':');
    }
    href.push_str(&normalize_target(link.target));

    let mut writer = HtmlWriter::new();
    writer.anchor(&href, &title, false);
    writer.into_string()
}

/// Replace every `[[…]]` link in `line`.
///
/// A link carries as many verbatim placeholders out as it took in, even when
/// its target is both the href and the display text, or is not shown at all.
pub fn internal_links(line: &str, options: &Options) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memmem::find(&bytes[pos..], b"[[") {
        let open = pos + found;
        let body_start = open + 2;
        // The body may not contain `]`, so the first `]` must start the closer.
        let Some(close) = memchr(b']', &bytes[body_start..]).map(|c| body_start + c) else {
            break;
        };
        if bytes.get(close + 1) != Some(&b']') {
            pos = open + 1;
            continue;
        }
        let suffix_start = close + 2;
        let suffix_len = bytes[suffix_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let end = suffix_start + suffix_len;

        let link = InternalLink::from_body(&line[body_start..close], &line[suffix_start..end]);
        out.push_str(&line[copied..open]);
        out.push_str(&verbatim::conserve(
            &line[body_start..end],
            render_internal_link(&link, options),
        ));
        copied = end;
        pos = end;
    }

    out.push_str(&line[copied..]);
    out
}

/// Render one external link. A missing title takes the next number from
/// `counter`, shown as `[n]`.
pub fn render_external_link(url: &str, title: Option<&str>, counter: &mut u32) -> String {
    let label = match title {
        Some(title) => title.to_string(),
        None => {
            *counter += 1;
            format!("[{counter}]")
        }
    };
    let mut writer = HtmlWriter::new();
    writer.anchor(url, &label, true);
    writer.into_string()
}

/// Replace every `[url title]` link in `line`.
///
/// The URL runs to the first whitespace; the rest, minus that whitespace, is
/// the title. Brackets with an empty URL are left alone.
pub fn external_links(line: &str, counter: &mut u32) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memchr(b'[', &bytes[pos..]) {
        let open = pos + found;
        let body_start = open + 1;
        let Some(close) = memchr(b']', &bytes[body_start..]).map(|c| body_start + c) else {
            break;
        };
        let body = &line[body_start..close];
        let url_len = body
            .bytes()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(body.len());
        if url_len == 0 {
            pos = open + 1;
            continue;
        }
        let url = &body[..url_len];
        let title = body[url_len..].trim_start_matches(|c: char| c.is_ascii_whitespace());
        let title = (!title.is_empty()).then_some(title);

        out.push_str(&line[copied..open]);
        out.push_str(&render_external_link(url, title, counter));
        copied = close + 1;
        pos = copied;
    }

    out.push_str(&line[copied..]);
    out
}
