//! Apostrophe-run emphasis.
//!
//! Unlike delimiter-matching emphasis, wiki emphasis is a toggle: every run of
//! 2–5 apostrophes flips the open/closed state for that exact run length, and
//! the state carries across lines until a block boundary flushes it.

use smallvec::SmallVec;

use crate::limits::{MAX_EMPHASIS_RUN, MIN_EMPHASIS_RUN};

/// Opening and closing tags for a run length.
fn tags(run: usize, semantic: bool) -> (&'static str, &'static str) {
    match (run, semantic) {
        (2, false) => ("<i>", "</i>"),
        (3 | 4, false) => ("<b>", "</b>"),
        (5, false) => ("<b><i>", "</i></b>"),
        (2, true) => ("<em>", "</em>"),
        (3 | 4, true) => ("<strong>", "</strong>"),
        (5, true) => ("<em><strong>", "</strong></em>"),
        _ => ("", ""),
    }
}

/// Per-run-length emphasis parity for one document.
#[derive(Debug, Default, Clone)]
pub struct EmphasisState {
    /// Indexed by run length; only 2..=5 are ever set.
    open: [bool; MAX_EMPHASIS_RUN + 1],
    /// Open run lengths, oldest first.
    order: SmallVec<[u8; 4]>,
}

impl EmphasisState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_open(&self, run: usize) -> bool {
        self.open.get(run).copied().unwrap_or(false)
    }

    #[inline]
    pub fn any_open(&self) -> bool {
        !self.order.is_empty()
    }

    /// Toggle emphasis for a run of `run` apostrophes and return the markup.
    ///
    /// A run that would open while the next-shorter length is open is read as
    /// one literal apostrophe followed by a toggle of the shorter length, so
    /// `''somethin'''` closes the italic after `somethin'`.
    pub fn toggle(&mut self, run: usize, semantic: bool) -> String {
        debug_assert!((MIN_EMPHASIS_RUN..=MAX_EMPHASIS_RUN).contains(&run));
        let mut run = run;
        let mut out = String::new();

        if !self.is_open(run) && run > MIN_EMPHASIS_RUN && self.is_open(run - 1) {
            run -= 1;
            out.push('\'');
        }

        let (open_tag, close_tag) = tags(run, semantic);
        if self.open[run] {
            out.push_str(close_tag);
            self.open[run] = false;
            self.order.retain(|&mut n| n as usize != run);
        } else {
            out.push_str(open_tag);
            self.open[run] = true;
            self.order.push(run as u8);
        }
        out
    }

    /// Close every open run length, most recently opened first.
    pub fn flush(&mut self, semantic: bool) -> String {
        let mut out = String::new();
        while let Some(&run) = self.order.last() {
            out.push_str(&self.toggle(run as usize, semantic));
        }
        out
    }
}

/// Replace every apostrophe run in `line` with emphasis markup.
///
/// Runs longer than five are consumed five at a time; a single leftover
/// apostrophe stays literal.
pub fn apply(line: &str, state: &mut EmphasisState, semantic: bool) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len() + 16);
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memchr::memchr(b'\'', &bytes[pos..]) {
        let start = pos + found;
        let mut end = start;
        while end < bytes.len() && bytes[end] == b'\'' {
            end += 1;
        }
        let mut remaining = end - start;
        if remaining >= MIN_EMPHASIS_RUN {
            out.push_str(&line[copied..start]);
            while remaining >= MIN_EMPHASIS_RUN {
                let run = remaining.min(MAX_EMPHASIS_RUN);
                out.push_str(&state.toggle(run, semantic));
                remaining -= run;
            }
            if remaining == 1 {
                out.push('\'');
            }
            copied = end;
        }
        pos = end;
    }

    out.push_str(&line[copied..]);
    out
}
