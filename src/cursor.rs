//! Byte cursor for scanning a single line.
//!
//! Every marker in the wiki syntax is ASCII, so offsets produced by the
//! cursor always fall on UTF-8 character boundaries of the scanned `str`.

/// A cursor for byte-by-byte scanning over one line of text.
///
/// # Example
/// ```
/// use ferrowiki::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"== Title ==");
/// assert_eq!(cursor.skip_while(|b| b == b'='), 2);
/// assert_eq!(cursor.peek(), Some(b' '));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor over a byte slice.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at an offset.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self { input, pos: offset }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Check if current position matches a byte.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Skip while predicate is true, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip ASCII whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(|b| b.is_ascii_whitespace())
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a byte sequence if present.
    #[inline]
    pub fn eat_bytes(&mut self, bytes: &[u8]) -> bool {
        if self.remaining_slice().starts_with(bytes) {
            self.pos += bytes.len();
            true
        } else {
            false
        }
    }

    /// Consume a byte sequence if present, ignoring ASCII case.
    #[inline]
    pub fn eat_bytes_ignore_case(&mut self, bytes: &[u8]) -> bool {
        let rest = self.remaining_slice();
        if rest.len() >= bytes.len() && rest[..bytes.len()].eq_ignore_ascii_case(bytes) {
            self.pos += bytes.len();
            true
        } else {
            false
        }
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}
