//! Inline tokenization.
//!
//! Runs after the block rules on every line that was not hard-stopped.
//! Passes apply in a fixed order, each over the previous pass's output:
//! 1. internal links and images
//! 2. external links
//! 3. emphasis
//! 4. elimination of behavior switches (`__TOC__` and friends)
//! 5. magic variables

pub mod emphasis;
pub mod image;
pub mod links;
pub mod variables;

use memchr::memmem;

use crate::cursor::Cursor;
use crate::state::{ParserState, RenderContext};

/// One inline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    InternalLink,
    ExternalLink,
    Emphasis,
    Eliminate,
    Variable,
}

/// Order in which inline passes run.
pub const INLINE_ORDER: [InlineRule; 5] = [
    InlineRule::InternalLink,
    InlineRule::ExternalLink,
    InlineRule::Emphasis,
    InlineRule::Eliminate,
    InlineRule::Variable,
];

/// Behavior switches removed from the output.
const ELIMINATED: [&[u8]; 3] = [b"__TOC__", b"__NOTOC__", b"__NOEDITSECTION__"];

/// Run every inline pass over `line`.
pub fn tokenize(line: &str, state: &mut ParserState<'_>, ctx: &RenderContext<'_>) -> String {
    let mut line = line.to_string();
    for rule in INLINE_ORDER {
        line = match rule {
            InlineRule::InternalLink => links::internal_links(&line, ctx.options),
            InlineRule::ExternalLink => {
                links::external_links(&line, &mut state.external_link_counter)
            }
            InlineRule::Emphasis => {
                emphasis::apply(&line, &mut state.emphasis, ctx.semantic_emphasis())
            }
            InlineRule::Eliminate => eliminate(&line),
            InlineRule::Variable => variables::apply(&line, state.title, ctx.clock, ctx.site),
        };
    }
    line
}

/// Remove `__TOC__`, `__NOTOC__` and `__NOEDITSECTION__`, ignoring case.
pub fn eliminate(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memmem::find(&bytes[pos..], b"__") {
        let start = pos + found;
        let mut cursor = Cursor::new_at(bytes, start);
        if ELIMINATED
            .iter()
            .any(|token| cursor.eat_bytes_ignore_case(token))
        {
            out.push_str(&line[copied..start]);
            copied = cursor.offset();
            pos = copied;
        } else {
            pos = start + 1;
        }
    }

    out.push_str(&line[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::variables::{FixedClock, StaticSite};
    use crate::Options;
    use chrono::NaiveDate;

    fn tokenize_line(line: &str, options: &Options) -> String {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid date"),
        );
        let site = StaticSite("example.org".into());
        let ctx = RenderContext {
            options,
            clock: &clock,
            site: &site,
        };
        let mut state = ParserState::new("Page");
        tokenize(line, &mut state, &ctx)
    }

    #[test]
    fn test_eliminate_tokens() {
        assert_eq!(eliminate("a__TOC__b"), "ab");
        assert_eq!(eliminate("__notoc__x__NOEDITSECTION__"), "x");
        assert_eq!(eliminate("snake__case"), "snake__case");
    }

    #[test]
    fn test_passes_compose() {
        let html = tokenize_line("''[[foo]]'' on {{SITENAME}}__TOC__", &Options::default());
        assert_eq!(html, "<i><a href=\"Foo\">foo</a></i> on example.org");
    }

    #[test]
    fn test_link_runs_before_variables() {
        // Variables inside a link target are substituted after the anchor is built.
        let html = tokenize_line("[[{{PAGENAME}}]]", &Options::default());
        assert_eq!(html, "<a href=\"Page\">Page</a>");
    }

    #[test]
    fn test_apostrophes_in_targets_do_not_emphasize_href() {
        let html = tokenize_line("[[Rock ''n'' roll]]", &Options::default());
        assert!(html.starts_with("<a href=\"Rock_&"));
        assert!(!html.contains("href=\"Rock_<i>"));
        assert!(html.contains(">Rock <i>n</i> roll</a>"));
    }
}
