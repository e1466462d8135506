//! Byte cursor over the configuration buffer
//!
//! The cursor only moves forward. Slices handed out by [`Cursor::span`]
//! borrow the underlying buffer, so they cannot outlive it.

/// Forward-only view over a byte buffer (position + remaining length)
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Look at the next byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Current offset into the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if every byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bytes between `start` and the current position
    ///
    /// `start` must be a position previously returned by [`Cursor::position`].
    pub fn span(&self, start: usize) -> &'a [u8] {
        &self.data[start.min(self.pos)..self.pos]
    }
}

impl Iterator for Cursor<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
