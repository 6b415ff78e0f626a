/// Character returned by [`Cursor::current`] and [`Cursor::peek`] once the
/// input is exhausted.
pub const SENTINEL: char = '\0';

/// A scan position over an immutable string.
///
/// Positions count characters, not bytes, so every index the cursor reports
/// can be shown to a user as-is. Moving past either end is clamped, and no
/// method ever panics; callers check [`Cursor::has_more`] instead.
///
/// # Example
/// ```
/// use shunt::util::cursor::Cursor;
///
/// let mut cursor = Cursor::new("abc123 rest");
/// let word = cursor.take_while(char::is_alphabetic);
/// assert_eq!(word, "abc");
/// assert_eq!(cursor.current(), '1');
///
/// cursor.advance_while(|c| c.is_ascii_digit());
/// cursor.skip_whitespace();
/// assert_eq!(cursor.position(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    chars:    Vec<char>,
    position: usize,
}

impl Cursor {
    /// Creates a cursor at the start of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self { chars:    text.chars().collect(),
               position: 0, }
    }

    /// Current character index.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` while unread characters remain.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.position < self.chars.len()
    }

    /// The character under the cursor, or [`SENTINEL`] when exhausted.
    #[must_use]
    pub fn current(&self) -> char {
        self.peek(0)
    }

    /// The character `offset` places ahead of the cursor, or [`SENTINEL`].
    #[must_use]
    pub fn peek(&self, offset: usize) -> char {
        self.chars
            .get(self.position + offset)
            .copied()
            .unwrap_or(SENTINEL)
    }

    /// The next character that is not whitespace, without moving the cursor.
    #[must_use]
    pub fn peek_non_whitespace(&self) -> char {
        self.chars[self.position.min(self.chars.len())..].iter()
                                                          .copied()
                                                          .find(|c| !c.is_whitespace())
                                                          .unwrap_or(SENTINEL)
    }

    /// Moves one character forward and returns the character passed over.
    pub fn advance(&mut self) -> char {
        let c = self.current();
        self.advance_by(1);
        c
    }

    /// Moves `n` characters forward, stopping at the end of input.
    pub fn advance_by(&mut self, n: usize) {
        self.position = self.position.saturating_add(n).min(self.chars.len());
    }

    /// Moves forward while `predicate` holds and returns how many characters
    /// were passed over.
    pub fn advance_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> usize {
        let start = self.position;
        while self.has_more() && predicate(self.current()) {
            self.position += 1;
        }
        self.position - start
    }

    /// Moves `n` characters back, stopping at the start of input.
    pub const fn retreat_by(&mut self, n: usize) {
        self.position = self.position.saturating_sub(n);
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub fn take_while(&mut self, predicate: impl FnMut(char) -> bool) -> String {
        let start = self.position;
        self.advance_while(predicate);
        self.slice(start, self.position)
    }

    /// Skips whitespace and returns how many characters were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        self.advance_while(char::is_whitespace)
    }

    /// Returns the characters in `start..end`, clamped to the input.
    ///
    /// # Example
    /// ```
    /// use shunt::util::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("héllo");
    /// assert_eq!(cursor.slice(1, 3), "él");
    /// assert_eq!(cursor.slice(3, 99), "lo");
    /// assert_eq!(cursor.slice(4, 2), "");
    /// ```
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }
}
