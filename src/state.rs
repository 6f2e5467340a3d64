//! Per-document parser state and render context.

use smallvec::SmallVec;

use crate::inline::emphasis::EmphasisState;
use crate::inline::variables::{Clock, SiteEnvironment};
use crate::limits::INLINE_LIST_STACK;
use crate::render::ListKind;
use crate::verbatim::VerbatimStack;
use crate::Options;

/// Everything a document parse carries from one line to the next.
///
/// Created fresh for every document and dropped when the document is done;
/// it has no reset.
#[derive(Debug)]
pub struct ParserState<'t> {
    /// Open list levels, outermost first. Its length is the list depth.
    pub list_stack: SmallVec<[ListKind; INLINE_LIST_STACK]>,
    pub definition_list_open: bool,
    pub preformat_open: bool,
    pub emphasis: EmphasisState,
    /// Set after a line that already produced vertical separation
    /// (a blank-line break or a heading).
    pub suppress_next_linebreak: bool,
    pub verbatim: VerbatimStack,
    /// Last number handed to an untitled external link.
    pub external_link_counter: u32,
    /// Title supplied by the caller, used for `{{PAGENAME}}`.
    pub title: &'t str,
    pub redirect_target: Option<String>,
}

impl<'t> ParserState<'t> {
    pub(crate) fn new(title: &'t str) -> Self {
        Self {
            list_stack: SmallVec::new(),
            definition_list_open: false,
            preformat_open: false,
            emphasis: EmphasisState::new(),
            suppress_next_linebreak: false,
            verbatim: VerbatimStack::new(),
            external_link_counter: 0,
            title,
            redirect_target: None,
        }
    }

    #[inline]
    pub fn list_level(&self) -> usize {
        self.list_stack.len()
    }
}

/// Read-only inputs shared by every rule during one parse.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: &'a Options,
    pub clock: &'a dyn Clock,
    pub site: &'a dyn SiteEnvironment,
}

impl<'a> RenderContext<'a> {
    #[inline]
    pub fn semantic_emphasis(&self) -> bool {
        self.options.use_semantic_emphasis
    }
}
