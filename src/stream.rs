//! The intermediate character stream (spec.md §4.1).
//!
//! Layers a growable, splice-able character buffer over a
//! [`SourceCursor`], so that parameter- and general-entity expansion
//! can reroute reading through replacement text in place (`push`)
//! while still exposing `previous()` back-stepping and a faithful
//! [`IntermediateStream::content`] of the *unexpanded* source.
//!
//! Grounded in `xmlparser::Stream`'s `consume_*`/`skip_*` naming and its
//! `gen_text_pos`-on-demand position calculation, but the underlying
//! storage is an owned `Vec<char>` rather than a borrowed `&str` span,
//! because a splice can replace characters that don't live in the
//! original source at all (see `DESIGN.md`).

use crate::charclass::is_space;
use crate::error::TextPos;
use crate::source::SourceCursor;

/// A buffered, splice-able cursor over a [`SourceCursor`].
///
/// `B` is the buffer, `h` the logical head index into it, `S`/`E` the
/// source insertion points bracketing every character ever pulled into
/// `B`. See spec.md §3 "Intermediate stream state" for the invariants.
pub struct IntermediateStream<'c, C: SourceCursor> {
    source: &'c mut C,
    buffer: Vec<char>,
    head: usize,
    start: usize,
    end: usize,
}

impl<'c, C: SourceCursor> IntermediateStream<'c, C> {
    /// Creates a stream starting at the source cursor's current
    /// position.
    pub fn new(source: &'c mut C) -> Self {
        let start = source.insertion_point();
        IntermediateStream {
            source,
            buffer: Vec::new(),
            head: 0,
            start,
            end: start,
        }
    }

    /// The character at the head, or `None` at the end of input.
    ///
    /// If the head is at the buffer boundary, the wrapped source's
    /// current character is returned without absorbing it into the
    /// buffer.
    pub fn current(&self) -> Option<char> {
        if self.head < self.buffer.len() {
            Some(self.buffer[self.head])
        } else {
            self.source.current()
        }
    }

    /// Advances one character and returns the new current one.
    ///
    /// When the head is at the buffer boundary, the source's current
    /// character is first copied into the buffer, `E` is updated to the
    /// source's post-read insertion point, and the source advances;
    /// otherwise the head is simply incremented. Either way this keeps
    /// a full record of every character seen, so splices stay
    /// reversible in position.
    pub fn next(&mut self) -> Option<char> {
        if self.head == self.buffer.len() {
            if let Some(c) = self.source.current() {
                self.buffer.push(c);
                self.source.next();
                self.end = self.source.insertion_point();
            }
        }

        if self.head < self.buffer.len() {
            self.head += 1;
        }

        self.current()
    }

    /// Decrements the head and returns the new current character.
    ///
    /// # Panics
    ///
    /// Panics if the head is already `0`.
    pub fn previous(&mut self) -> Option<char> {
        assert!(self.head > 0, "previous() called at the start of the stream");
        self.head -= 1;
        self.current()
    }

    /// Calls [`IntermediateStream::next`] `n` times.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.next();
        }
    }

    /// Splices replacement text into the stream at the head.
    ///
    /// Removes the `remove` buffered characters ending at the current
    /// head and inserts `text` in their place, then resets the head to
    /// the start of the insertion. This is how parameter- and
    /// general-entity expansion reroute reading through replacement
    /// text transparently.
    ///
    /// # Panics
    ///
    /// Panics if `remove` is larger than the head (i.e. if it would
    /// remove characters that were never read through this stream).
    pub fn push(&mut self, remove: usize, text: &str) {
        assert!(remove <= self.head, "cannot remove past the start of the stream");
        let removal_start = self.head - remove;
        self.buffer.splice(removal_start..self.head, text.chars());
        self.head = removal_start;
    }

    /// Peek match: checks whether the upcoming characters equal `word`,
    /// without permanently consuming anything (the head is restored
    /// afterwards; characters read from the source to perform the
    /// check remain buffered, same as any other `next()`).
    pub fn continues_with(&mut self, word: &str) -> bool {
        if self.head == self.buffer.len() {
            return self.source.continues_with(word, false);
        }

        let saved_head = self.head;
        let mut matched = true;
        for expected in word.chars() {
            match self.current() {
                Some(c) if c == expected => {
                    self.next();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        self.head = saved_head;
        matched
    }

    /// Returns the substring of the *original* source from the start of
    /// this stream to the furthest character ever consumed into the
    /// buffer — the unexpanded DTD text, unaffected by any splice.
    pub fn content(&self) -> String {
        self.source.copy(self.start, self.end)
    }

    /// Skips `S ::= (#x20 | #x9 | #xD | #xA)+` at the head, if any.
    pub fn skip_spaces(&mut self) {
        while matches!(self.current(), Some(c) if is_space(c)) {
            self.next();
        }
    }

    /// Consumes characters matching `f`, returning the consumed text.
    pub fn consume_while<F: Fn(char) -> bool>(&mut self, f: F) -> String {
        let mut out = String::new();
        while let Some(c) = self.current() {
            if f(c) {
                out.push(c);
                self.next();
            } else {
                break;
            }
        }
        out
    }

    /// Computes the line/column position of the head.
    ///
    /// Expensive (scans the buffer from the start of the stream); use
    /// only when constructing an error.
    pub fn gen_text_pos(&self) -> TextPos {
        let seen = &self.buffer[..self.head];
        let mut row = 1u32;
        let mut col = 1u32;
        for &c in seen {
            if c == '\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        TextPos::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrCursor;

    #[test]
    fn current_and_next_walk_the_source() {
        let mut src = StrCursor::new("abc");
        let mut s = IntermediateStream::new(&mut src);
        assert_eq!(s.current(), Some('a'));
        assert_eq!(s.next(), Some('b'));
        assert_eq!(s.next(), Some('c'));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn next_then_previous_is_identity() {
        let mut src = StrCursor::new("abc");
        let mut s = IntermediateStream::new(&mut src);
        s.next();
        s.next();
        assert_eq!(s.current(), Some('c'));
        assert_eq!(s.previous(), Some('b'));
        assert_eq!(s.current(), Some('b'));
    }

    #[test]
    fn push_splices_and_resumes_after_removed_span() {
        let mut src = StrCursor::new("%x;b");
        let mut s = IntermediateStream::new(&mut src);
        // Consume the whole "%x;" reference (3 characters) into the buffer.
        s.next(); // consumes '%', current becomes 'x'
        s.next(); // consumes 'x', current becomes ';'
        s.next(); // consumes ';', current becomes 'b'
        assert_eq!(s.current(), Some('b'));

        // Splice out the 3-character "%x;" span and insert "REPL".
        s.push(3, "REPL");
        assert_eq!(s.current(), Some('R'));
        s.next();
        s.next();
        s.next();
        assert_eq!(s.current(), Some('L'));
        // Resumes with the character that followed the removed span.
        assert_eq!(s.next(), Some('b'));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn content_returns_unexpanded_source_despite_splice() {
        let mut src = StrCursor::new("%x;b");
        let mut s = IntermediateStream::new(&mut src);
        s.advance(3);
        s.push(3, "REPLACEMENT");
        s.advance(20); // walk past the end, consuming the rest of the source too
        assert_eq!(s.content(), "%x;b");
    }

    #[test]
    fn continues_with_does_not_consume() {
        let mut src = StrCursor::new("INCLUDE[");
        let mut s = IntermediateStream::new(&mut src);
        assert!(s.continues_with("INCLUDE"));
        assert_eq!(s.current(), Some('I'));
        assert!(!s.continues_with("IGNORE"));
        assert_eq!(s.current(), Some('I'));
    }

    #[test]
    fn gen_text_pos_tracks_newlines() {
        let mut src = StrCursor::new("ab\ncd");
        let mut s = IntermediateStream::new(&mut src);
        s.advance(4); // 'a' 'b' '\n' 'c'
        assert_eq!(s.gen_text_pos(), TextPos::new(2, 2));
    }
}
