//! Block rule handlers.
//!
//! Each handler tests one line against its rule and, on a match, returns the
//! rewritten line together with how classification should continue.

use super::{BlockRule, RuleOutcome};
use crate::cursor::Cursor;
use crate::limits::{MAX_HEADING_LEVEL, MAX_LIST_DEPTH};
use crate::render::{HtmlWriter, ListKind};
use crate::state::{ParserState, RenderContext};

/// Dispatch `rule` against `line`.
pub fn apply(
    rule: BlockRule,
    line: &str,
    state: &mut ParserState<'_>,
    ctx: &RenderContext<'_>,
) -> RuleOutcome {
    match rule {
        BlockRule::Preformat => preformat(line, state),
        BlockRule::DefinitionList => definition_list(line, state),
        BlockRule::BlankLine => blank_line(line, state, ctx),
        BlockRule::ListItem => list_item(line, state),
        BlockRule::Heading => heading(line, state, ctx),
        BlockRule::HorizontalRule => horizontal_rule(line),
    }
}

/// A line starting with whitespace joins the open preformatted block.
///
/// Hard-stops: preformatted text never sees inline rules.
pub fn preformat(line: &str, state: &mut ParserState<'_>) -> RuleOutcome {
    if !Cursor::new(line.as_bytes())
        .peek()
        .is_some_and(|b| b.is_ascii_whitespace())
    {
        return RuleOutcome::NoMatch;
    }

    let mut writer = HtmlWriter::new();
    if !state.preformat_open {
        writer.preformat_start();
        state.preformat_open = true;
    }
    writer.write_str(&line[1..]);
    writer.write_char('\n');
    RuleOutcome::HardStop(writer.into_string())
}

/// `;term`, `;term : definition` or `:definition`.
pub fn definition_list(line: &str, state: &mut ParserState<'_>) -> RuleOutcome {
    let mut cursor = Cursor::new(line.as_bytes());
    let marker = match cursor.peek() {
        Some(b @ (b';' | b':')) => b,
        _ => return RuleOutcome::NoMatch,
    };
    cursor.eat(marker);
    cursor.skip_whitespace();
    let body = &line[cursor.offset()..];

    let mut writer = HtmlWriter::new();
    if !state.definition_list_open {
        writer.definition_list_start();
        state.definition_list_open = true;
    }

    if marker == b';' {
        // The space before `:` belongs to the separator, so the term never
        // ends in whitespace. The definition keeps the space after it.
        match body.find(" :") {
            Some(split) => {
                writer.definition_term(&body[..split]);
                writer.definition(&body[split + 2..]);
            }
            None => writer.definition_term(body),
        }
    } else {
        writer.definition(body);
        writer.write_char('\n');
    }
    RuleOutcome::Continue(writer.into_string())
}

/// An empty line ends the paragraph with a break, unless the previous line
/// already supplied one. Open emphasis never survives it.
pub fn blank_line(line: &str, state: &mut ParserState<'_>, ctx: &RenderContext<'_>) -> RuleOutcome {
    if !line.is_empty() {
        return RuleOutcome::NoMatch;
    }

    let flushed = state.emphasis.flush(ctx.semantic_emphasis());
    if state.suppress_next_linebreak {
        return RuleOutcome::Continue(flushed);
    }

    let mut writer = HtmlWriter::new();
    writer.write_str(&flushed);
    writer.paragraph_break();
    RuleOutcome::Stop(writer.into_string())
}

/// `*`/`#` markers set the list depth for this item.
///
/// Every level opened on one line takes its kind from the last marker.
pub fn list_item(line: &str, state: &mut ParserState<'_>) -> RuleOutcome {
    let markers = Cursor::new(line.as_bytes()).skip_while(|b| ListKind::from_marker(b).is_some());
    if markers == 0 {
        return RuleOutcome::NoMatch;
    }
    let Some(kind) = ListKind::from_marker(line.as_bytes()[markers - 1]) else {
        return RuleOutcome::NoMatch;
    };
    let depth = markers.min(MAX_LIST_DEPTH);

    let mut writer = HtmlWriter::new();
    let mut closed = false;
    while state.list_level() != depth {
        if state.list_level() > depth {
            if let Some(open) = state.list_stack.pop() {
                writer.list_close(open);
            }
            closed = true;
        } else {
            state.list_stack.push(kind);
            writer.list_open(kind);
        }
    }

    if writer.is_empty() || (closed && state.list_level() > 0) {
        writer.list_item_break();
    }
    writer.write_str(&line[markers..]);
    RuleOutcome::Continue(writer.into_string())
}

/// Close every open list level, innermost first.
pub fn close_lists(state: &mut ParserState<'_>) -> String {
    let mut writer = HtmlWriter::new();
    while let Some(open) = state.list_stack.pop() {
        writer.list_close(open);
    }
    writer.into_string()
}

/// Split a heading line into its level and interior text.
///
/// Mirrors `^(={1,6})(.*?)(={1,6})$`: the opening run is the longest prefix
/// of at most six `=` that still leaves a closing run, and the closing run is
/// at most six `=`.
pub fn split_heading(line: &str) -> Option<(u8, &str)> {
    let leading = Cursor::new(line.as_bytes()).skip_while(|b| b == b'=');
    for level in (1..=leading.min(MAX_HEADING_LEVEL)).rev() {
        let rest = &line[level..];
        let trailing = rest.bytes().rev().take_while(|&b| b == b'=').count();
        if trailing > 0 {
            let close = trailing.min(MAX_HEADING_LEVEL);
            return Some((level as u8, &rest[..rest.len() - close]));
        }
    }
    None
}

/// `== Title ==` headings, levels 1 to 6.
pub fn heading(line: &str, state: &mut ParserState<'_>, ctx: &RenderContext<'_>) -> RuleOutcome {
    let Some((level, content)) = split_heading(line) else {
        return RuleOutcome::NoMatch;
    };

    let mut writer = HtmlWriter::new();
    writer.write_str(&state.emphasis.flush(ctx.semantic_emphasis()));
    writer.heading(level, content.trim());
    RuleOutcome::Stop(writer.into_string())
}

/// Exactly four hyphens.
pub fn horizontal_rule(line: &str) -> RuleOutcome {
    if line != "----" {
        return RuleOutcome::NoMatch;
    }
    let mut writer = HtmlWriter::new();
    writer.horizontal_rule();
    RuleOutcome::Continue(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ParserState<'static> {
        ParserState::new("")
    }

    fn text(outcome: RuleOutcome) -> String {
        match outcome {
            RuleOutcome::NoMatch => panic!("expected a match"),
            RuleOutcome::Continue(s) | RuleOutcome::Stop(s) | RuleOutcome::HardStop(s) => s,
        }
    }

    #[test]
    fn test_preformat_opens_once() {
        let mut state = state();
        let first = preformat(" code", &mut state);
        assert!(matches!(first, RuleOutcome::HardStop(ref s) if s == "<pre>code\n"));
        let second = preformat("\tmore", &mut state);
        assert!(matches!(second, RuleOutcome::HardStop(ref s) if s == "more\n"));
        assert!(state.preformat_open);
    }

    #[test]
    fn test_preformat_requires_leading_whitespace() {
        assert_eq!(preformat("code", &mut state()), RuleOutcome::NoMatch);
        assert_eq!(preformat("", &mut state()), RuleOutcome::NoMatch);
    }

    #[test]
    fn test_definition_term_and_definition() {
        let mut state = state();
        let html = text(definition_list(";  Term : meaning", &mut state));
        assert_eq!(html, "<dl>\n<dt>Term</dt><dd> meaning</dd>");
        let html = text(definition_list(": more", &mut state));
        assert_eq!(html, "<dd>more</dd>\n");
    }

    #[test]
    fn test_definition_term_only() {
        let html = text(definition_list(";Term", &mut state()));
        assert_eq!(html, "<dl>\n<dt>Term</dt>");
    }

    #[test]
    fn test_list_nesting() {
        let mut state = state();
        assert_eq!(text(list_item("* a", &mut state)), "\n<ul>\n<li> a");
        assert_eq!(text(list_item("** b", &mut state)), "\n<ul>\n<li> b");
        assert_eq!(
            text(list_item("* c", &mut state)),
            "</li>\n</ul>\n</li>\n<li> c"
        );
        assert_eq!(state.list_level(), 1);
        assert_eq!(close_lists(&mut state), "</li>\n</ul>\n");
        assert_eq!(state.list_level(), 0);
    }

    #[test]
    fn test_list_sibling_items() {
        let mut state = state();
        text(list_item("# one", &mut state));
        assert_eq!(text(list_item("# two", &mut state)), "</li>\n<li> two");
    }

    #[test]
    fn test_list_kind_from_last_marker() {
        let mut state = state();
        assert_eq!(
            text(list_item("*#x", &mut state)),
            "\n<ol>\n<li>\n<ol>\n<li>x"
        );
        assert_eq!(state.list_stack.as_slice(), &[ListKind::Ordered, ListKind::Ordered]);
    }

    #[test]
    fn test_list_depth_is_clamped() {
        let mut state = state();
        let line = format!("{}x", "*".repeat(MAX_LIST_DEPTH + 10));
        text(list_item(&line, &mut state));
        assert_eq!(state.list_level(), MAX_LIST_DEPTH);
    }

    #[test]
    fn test_split_heading() {
        assert_eq!(split_heading("== Title =="), Some((2, " Title ")));
        assert_eq!(split_heading("=x="), Some((1, "x")));
        assert_eq!(split_heading("===a="), Some((3, "a")));
        assert_eq!(split_heading("===="), Some((3, "")));
        assert_eq!(split_heading("======= x ="), Some((6, "= x ")));
        assert_eq!(split_heading("= no close"), None);
        assert_eq!(split_heading("="), None);
        assert_eq!(split_heading("plain"), None);
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(text(horizontal_rule("----")), "<hr />");
        assert_eq!(horizontal_rule("-----"), RuleOutcome::NoMatch);
    }
}
