//! Markup limits.
//!
//! These bound the work done for pathological inputs and pin the
//! numeric ranges of the wiki syntax.

/// Maximum list nesting depth; longer marker runs are clamped.
pub const MAX_LIST_DEPTH: usize = 32;

/// Heading markers accepted on each side of a heading line.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Shortest apostrophe run that toggles emphasis.
pub const MIN_EMPHASIS_RUN: usize = 2;

/// Longest apostrophe run that toggles emphasis; longer runs are split.
pub const MAX_EMPHASIS_RUN: usize = 5;

/// Inline list stack capacity before spilling to the heap.
pub const INLINE_LIST_STACK: usize = 8;
