//! The search query buffer.
//!
//! [`Query`] keeps the text the user has typed in two encodings at once: a
//! bounded sequence of code points, which editing operates on, and the UTF-8
//! byte string handed to the filter and the renderer. Neither encoding is
//! exposed mutably, so the two can never drift apart.
//!
//! Every editing method reports whether the text changed. The session uses
//! that to decide whether the result list must be rebuilt.

/// Code-point capacity of the buffer, including the reserved terminator slot.
pub const QUERY_CAPACITY: usize = 256;

/// A query held as code points and as UTF-8 bytes.
///
/// # Example
///
/// ```
/// use zofi::app::Query;
///
/// let mut query = Query::new();
/// query.insert('f');
/// query.insert('é');
/// assert_eq!(query.as_str(), "fé");
/// assert_eq!(query.byte_len(), 3);
///
/// query.delete_last();
/// assert_eq!(query.as_bytes(), b"f");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    chars: Vec<char>,
    encoded: String,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chars: Vec::with_capacity(QUERY_CAPACITY),
            encoded: String::with_capacity(QUERY_CAPACITY * 4),
        }
    }

    /// Appends a code point.
    ///
    /// Returns `false` without touching the buffer once `QUERY_CAPACITY - 1`
    /// code points are stored.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.chars.len() >= QUERY_CAPACITY - 1 {
            tracing::trace!(len = self.chars.len(), "query at capacity, dropping input");
            return false;
        }
        self.chars.push(ch);
        self.encoded.push(ch);
        true
    }

    /// Removes the last code point. Returns `false` if the buffer was empty.
    pub fn delete_last(&mut self) -> bool {
        if self.chars.pop().is_none() {
            return false;
        }
        self.reencode();
        true
    }

    /// Removes trailing whitespace, then the word before it.
    ///
    /// Returns `false` if the buffer was empty.
    pub fn delete_word(&mut self) -> bool {
        if self.chars.is_empty() {
            return false;
        }
        while self.chars.last().is_some_and(|c| c.is_whitespace()) {
            self.chars.pop();
        }
        while self.chars.last().is_some_and(|c| !c.is_whitespace()) {
            self.chars.pop();
        }
        self.reencode();
        true
    }

    /// Empties both encodings.
    pub fn clear(&mut self) {
        self.chars.clear();
        self.encoded.clear();
    }

    /// Rebuilds the byte string from the code points.
    fn reencode(&mut self) {
        self.encoded.clear();
        self.encoded.extend(self.chars.iter());
    }

    /// The query as UTF-8 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The query as a UTF-8 byte string.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.encoded.as_bytes()
    }

    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Number of bytes in the UTF-8 encoding.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.encoded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
