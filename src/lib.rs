//! ferrowiki: wiki markup to HTML converter
//!
//! Converts a constrained MediaWiki-style dialect (headings, lists,
//! definition lists, preformatted blocks, emphasis, internal and external
//! links, images, magic variables, `<nowiki>` regions) into HTML.
//!
//! # Design Principles
//! - Line-oriented: block rules classify one line at a time
//! - No regex: pure byte-level scanning
//! - Fresh state per document: nothing leaks between parses
//! - Permissive: malformed markup degrades to literal text, never an error
//!
//! # Example
//! ```
//! let html = ferrowiki::to_html("== Hello ==\n''World''", "Greeting");
//! assert!(html.contains("<h2>Hello</h2>"));
//! assert!(html.contains("<i>World</i>"));
//! ```

pub mod block;
pub mod cursor;
pub mod error;
pub mod inline;
pub mod limits;
pub mod options;
pub mod render;
pub mod repair;
pub mod state;
pub mod verbatim;

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::block::LINE_TRIM;
use crate::cursor::Cursor;
use crate::state::{ParserState, RenderContext};

// Re-export primary types
pub use error::{Error, RepairError, Result};
pub use inline::image::{ImageRenderer, SharedImageRenderer};
pub use inline::variables::{Clock, FixedClock, HostEnvironment, SiteEnvironment, StaticSite, SystemClock};
pub use options::{OptionKey, OptionValue, Options};
pub use render::{HtmlWriter, ListKind};
#[cfg(feature = "repair")]
pub use repair::Html5everRepair;
pub use repair::{default_repair, HtmlRepair, PassThrough};

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    html: String,
    redirect_target: Option<String>,
}

impl Rendered {
    #[inline]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Target of a `#REDIRECT [[target]]` directive on the first line.
    #[inline]
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_target.as_deref()
    }

    #[inline]
    pub fn into_html(self) -> String {
        self.html
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Converter configured with options and its external collaborators.
///
/// Parsing takes `&self` and builds all per-document state inside the call,
/// so one parser can serve any number of documents, on any number of threads.
#[derive(Clone)]
pub struct WikiParser {
    options: Options,
    clock: Arc<dyn Clock>,
    site: Arc<dyn SiteEnvironment>,
    repair: Arc<dyn HtmlRepair>,
}

impl Default for WikiParser {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl fmt::Debug for WikiParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiParser")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl WikiParser {
    /// Parser with the system clock, the host environment and the default repair.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
            site: Arc::new(HostEnvironment),
            repair: default_repair(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_site(mut self, site: impl SiteEnvironment + 'static) -> Self {
        self.site = Arc::new(site);
        self
    }

    pub fn with_repair(mut self, repair: impl HtmlRepair + 'static) -> Self {
        self.repair = Arc::new(repair);
        self
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Read an option by name.
    pub fn get_option(&self, name: &str) -> Result<OptionValue> {
        self.options.get(name)
    }

    /// Write an option by name.
    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        self.options.set(name, value)
    }

    /// Convert one document. `title` is used for `{{PAGENAME}}`.
    pub fn parse(&self, text: &str, title: &str) -> Rendered {
        let ctx = RenderContext {
            options: &self.options,
            clock: self.clock.as_ref(),
            site: self.site.as_ref(),
        };
        let mut state = ParserState::new(title);

        let text = state.verbatim.save(text);
        debug!(
            "parsing {:?}: {} bytes, {} verbatim regions",
            title,
            text.len(),
            state.verbatim.len()
        );

        state.redirect_target = text.split('\n').next().and_then(redirect_target);
        if let Some(target) = &state.redirect_target {
            debug!("redirect to {target:?}");
        }

        let mut writer = HtmlWriter::with_capacity_for(text.len());
        let mut lines = 0;
        for (i, line) in text.split('\n').enumerate() {
            writer.write_str(&block::process_line(line, i + 1, &mut state, &ctx));
            lines += 1;
        }
        writer.write_str(&block::finish(&mut state, &ctx));

        let mut html = state.verbatim.restore(writer.as_str());
        if self.options.clean_html {
            match self.repair.repair(&html) {
                Ok(repaired) => html = repaired,
                Err(err) => warn!("{err}; returning unrepaired output"),
            }
        }

        debug!("rendered {lines} lines into {} bytes", html.len());
        Rendered {
            html,
            redirect_target: state.redirect_target,
        }
    }
}

/// Match `#REDIRECT [[target]]` filling the whole (trimmed) line.
fn redirect_target(first_line: &str) -> Option<String> {
    let line = first_line.trim_matches(LINE_TRIM);
    let mut cursor = Cursor::new(line.as_bytes());
    if !cursor.eat_bytes(b"#REDIRECT") || cursor.skip_whitespace() == 0 || !cursor.eat_bytes(b"[[")
    {
        return None;
    }
    let target = line[cursor.offset()..].strip_suffix("]]")?;
    (!target.is_empty()).then(|| target.to_string())
}

/// Convert wiki markup to HTML with default options.
///
/// This is the primary API for simple use cases.
pub fn to_html(text: &str, title: &str) -> String {
    WikiParser::default().parse(text, title).into_html()
}

/// Convert wiki markup to HTML with options.
pub fn to_html_with_options(text: &str, title: &str, options: &Options) -> String {
    WikiParser::new(options.clone()).parse(text, title).into_html()
}
