//! Block-level classification.
//!
//! The block pass is line-oriented. Each line is tested against the block
//! rules in a fixed order:
//! - Preformatted text
//! - Definition lists
//! - Blank lines
//! - List items
//! - Headings
//! - Horizontal rules
//!
//! A matching rule rewrites the line; later rules then see the rewritten
//! text unless the rule stopped classification. Inline tokenization runs
//! afterwards, then any list, definition list or preformatted block the
//! line did not continue is closed.

pub mod rules;

use log::trace;

use crate::inline;
use crate::render::HtmlWriter;
use crate::state::{ParserState, RenderContext};

/// One block rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    Preformat,
    DefinitionList,
    BlankLine,
    ListItem,
    Heading,
    HorizontalRule,
}

impl BlockRule {
    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockRule::Preformat => "preformat",
            BlockRule::DefinitionList => "definition list",
            BlockRule::BlankLine => "blank line",
            BlockRule::ListItem => "list item",
            BlockRule::Heading => "heading",
            BlockRule::HorizontalRule => "horizontal rule",
        }
    }
}

/// Order in which block rules are tested.
pub const BLOCK_ORDER: [BlockRule; 6] = [
    BlockRule::Preformat,
    BlockRule::DefinitionList,
    BlockRule::BlankLine,
    BlockRule::ListItem,
    BlockRule::Heading,
    BlockRule::HorizontalRule,
];

/// Result of testing one rule against a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule does not apply; the line is unchanged.
    NoMatch,
    /// Matched; later rules still run on the rewritten line.
    Continue(String),
    /// Matched; no further block rules run.
    Stop(String),
    /// Matched; no further block rules and no inline tokenization.
    HardStop(String),
}

/// Set of rules that matched one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matched(u8);

impl Matched {
    #[inline]
    pub fn insert(&mut self, rule: BlockRule) {
        self.0 |= rule.bit();
    }

    #[inline]
    pub fn contains(self, rule: BlockRule) -> bool {
        self.0 & rule.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Characters stripped from the ends of lines.
pub(crate) const LINE_TRIM: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Strip trailing whitespace from a raw source line.
#[inline]
pub fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(LINE_TRIM)
}

/// Render one source line.
pub fn process_line(
    raw: &str,
    line_no: usize,
    state: &mut ParserState<'_>,
    ctx: &RenderContext<'_>,
) -> String {
    let mut line = trim_line_end(raw).to_string();
    let mut matched = Matched::default();
    let mut tokenize = true;

    for rule in BLOCK_ORDER {
        let (text, done) = match rules::apply(rule, &line, state, ctx) {
            RuleOutcome::NoMatch => continue,
            RuleOutcome::Continue(text) => (text, false),
            RuleOutcome::Stop(text) => (text, true),
            RuleOutcome::HardStop(text) => {
                tokenize = false;
                (text, true)
            }
        };
        trace!("line {line_no}: {}", rule.name());
        matched.insert(rule);
        line = text;
        if done {
            break;
        }
    }

    if tokenize {
        line = inline::tokenize(&line, state, ctx);
    }

    let has_content = !line.trim_matches(LINE_TRIM).is_empty();
    let line = close_unmatched(line, matched, state);
    if has_content {
        state.suppress_next_linebreak =
            matched.contains(BlockRule::BlankLine) || matched.contains(BlockRule::Heading);
    }
    line
}

/// Close every block the line did not continue, prepending the closing tags.
fn close_unmatched(line: String, matched: Matched, state: &mut ParserState<'_>) -> String {
    let mut writer = HtmlWriter::new();

    if !matched.contains(BlockRule::Preformat) && state.preformat_open {
        state.preformat_open = false;
        writer.preformat_end();
    }
    if !matched.contains(BlockRule::DefinitionList) && state.definition_list_open {
        state.definition_list_open = false;
        writer.definition_list_end();
    }
    if !matched.contains(BlockRule::ListItem) && state.list_level() > 0 {
        writer.write_str(&rules::close_lists(state));
    }

    if writer.is_empty() {
        return line;
    }
    writer.write_str(&line);
    writer.into_string()
}

/// Close everything still open at the end of the document.
pub fn finish(state: &mut ParserState<'_>, ctx: &RenderContext<'_>) -> String {
    let mut out = state.emphasis.flush(ctx.semantic_emphasis());
    out.push_str(&close_unmatched(String::new(), Matched::default(), state));
    out
}
