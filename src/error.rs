//! Error types.
//!
//! Mirrors the teacher crate's two-level split (`Error` wraps a cause,
//! `TextPos` gives line/column) but follows spec.md §7's fatal /
//! recoverable distinction instead of the teacher's single `Error` enum:
//! fatal errors abort the current `get()` call and are returned as
//! `Err`, recoverable errors are reported through an [`ErrorSink`] and
//! scanning continues.

use std::fmt;

/// Position in text.
///
/// Indicates a row/line and a column in the original text, both
/// starting from 1. Constructed by the scanner while walking the
/// intermediate stream; never guess one manually.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextPos {
    pub row: u32,
    pub col: u32,
}

impl TextPos {
    /// Constructs a new `TextPos`.
    pub fn new(row: u32, col: u32) -> TextPos {
        TextPos { row, col }
    }
}

impl fmt::Display for TextPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A fatal error: the condition spec.md §7 calls "abort parsing,
/// surface to caller".
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    DtdInvalid(TextPos),
    DtdNameInvalid(TextPos),
    DtdDeclInvalid(TextPos),
    DtdTypeInvalid(TextPos),
    DtdTypeContent(TextPos),
    DtdEntityInvalid(TextPos),
    DtdAttListInvalid(TextPos),
    DtdPEReferenceInvalid(TextPos),
    XmlInvalidPI(TextPos),
    XmlLtInAttributeValue(TextPos),
    CommentEndedUnexpected(TextPos),
    CharacterReferenceNotTerminated(TextPos),
    CharacterReferenceInvalidCode(TextPos),
    /// Unexpected end of stream mid-declaration, with no salvageable
    /// partial token.
    Eof(TextPos),
}

impl Error {
    /// Returns the error position.
    pub fn pos(&self) -> TextPos {
        match *self {
            Error::DtdInvalid(pos)
            | Error::DtdNameInvalid(pos)
            | Error::DtdDeclInvalid(pos)
            | Error::DtdTypeInvalid(pos)
            | Error::DtdTypeContent(pos)
            | Error::DtdEntityInvalid(pos)
            | Error::DtdAttListInvalid(pos)
            | Error::DtdPEReferenceInvalid(pos)
            | Error::XmlInvalidPI(pos)
            | Error::XmlLtInAttributeValue(pos)
            | Error::CommentEndedUnexpected(pos)
            | Error::CharacterReferenceNotTerminated(pos)
            | Error::CharacterReferenceInvalidCode(pos)
            | Error::Eof(pos) => pos,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DtdInvalid(pos) => write!(f, "invalid DTD declaration at {}", pos),
            Error::DtdNameInvalid(pos) => write!(f, "invalid XML name at {}", pos),
            Error::DtdDeclInvalid(pos) => write!(f, "invalid markup declaration at {}", pos),
            Error::DtdTypeInvalid(pos) => write!(f, "invalid attribute type at {}", pos),
            Error::DtdTypeContent(pos) => write!(f, "invalid content model at {}", pos),
            Error::DtdEntityInvalid(pos) => write!(f, "invalid entity declaration at {}", pos),
            Error::DtdAttListInvalid(pos) => {
                write!(f, "invalid attribute-list declaration at {}", pos)
            }
            Error::DtdPEReferenceInvalid(pos) => {
                write!(f, "reference to an undefined parameter entity at {}", pos)
            }
            Error::XmlInvalidPI(pos) => write!(f, "invalid processing instruction at {}", pos),
            Error::XmlLtInAttributeValue(pos) => {
                write!(f, "'<' is not allowed in an attribute value at {}", pos)
            }
            Error::CommentEndedUnexpected(pos) => {
                write!(f, "'--' is not allowed inside a comment at {}", pos)
            }
            Error::CharacterReferenceNotTerminated(pos) => {
                write!(f, "character reference is not terminated with ';' at {}", pos)
            }
            Error::CharacterReferenceInvalidCode(pos) => write!(
                f,
                "character reference does not resolve to a valid XML character at {}",
                pos
            ),
            Error::Eof(pos) => write!(f, "unexpected end of input at {}", pos),
        }
    }
}

impl std::error::Error for Error {}

/// A recoverable error: the condition spec.md §7 calls "emit to the
/// error channel, continue".
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum RecoverableError {
    /// A NUL character occurred in a literal; the scanner substitutes
    /// U+FFFD and keeps going.
    Null,
    /// A non-`PubidChar` occurred in a pubid/system literal.
    InvalidCharacter(char),
    /// Garbage was skipped before a closing `>`.
    InputUnexpected,
    /// A declaration was closed with `]>` (the `CDATA`/conditional-section
    /// closer) instead of a bare `>`; the scanner consumes both characters
    /// and treats the declaration as closed.
    TagClosedWrong,
    /// A `<!...>` markup declaration the scanner does not recognize.
    UndefinedMarkupDeclaration,
    /// A `NOTATION` declaration's mandatory `PUBLIC` literal was missing
    /// its opening quote; the scanner salvages an empty identifier.
    NotationPublicInvalid,
    /// A `NOTATION` declaration's mandatory `SYSTEM` literal was missing
    /// its opening quote; the scanner salvages an empty identifier.
    NotationSystemInvalid,
    /// A non-empty `Mixed` content model lacked its mandatory `*`; the
    /// scanner salvages the model as if `*` had been present.
    QuantifierMissing,
    /// End of stream reached at a point where a best-effort partial
    /// token could still be produced; the scanner stops accumulating and
    /// returns the token built from whatever was read so far.
    UnexpectedEof,
}

impl fmt::Display for RecoverableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecoverableError::Null => write!(f, "NUL character replaced with U+FFFD"),
            RecoverableError::InvalidCharacter(c) => {
                write!(f, "character {:?} is not a valid PubidChar", c)
            }
            RecoverableError::InputUnexpected => write!(f, "unexpected input before closing '>'"),
            RecoverableError::TagClosedWrong => {
                write!(f, "declaration closed with the wrong character")
            }
            RecoverableError::UndefinedMarkupDeclaration => {
                write!(f, "undefined markup declaration")
            }
            RecoverableError::NotationPublicInvalid => {
                write!(f, "invalid NOTATION PUBLIC identifier")
            }
            RecoverableError::NotationSystemInvalid => {
                write!(f, "invalid NOTATION SYSTEM identifier")
            }
            RecoverableError::QuantifierMissing => {
                write!(f, "missing quantifier on mixed content model")
            }
            RecoverableError::UnexpectedEof => {
                write!(f, "unexpected end of input, salvaging partial token")
            }
        }
    }
}

impl std::error::Error for RecoverableError {}

/// Receives recoverable errors as the scanner encounters them.
///
/// Implementers should not treat a call to `report` as a reason to stop
/// scanning; the scanner has already decided to salvage and continue.
pub trait ErrorSink {
    /// Reports a recoverable error at the given position.
    fn report(&mut self, err: RecoverableError, pos: TextPos);
}

/// An [`ErrorSink`] that discards every recoverable error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullErrorSink;

impl ErrorSink for NullErrorSink {
    fn report(&mut self, _err: RecoverableError, _pos: TextPos) {}
}

/// An [`ErrorSink`] that collects recoverable errors into a `Vec`, in
/// the order they were reported.
#[derive(Debug, Default, Clone)]
pub struct VecErrorSink {
    errors: Vec<(RecoverableError, TextPos)>,
}

impl VecErrorSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the errors collected so far.
    pub fn errors(&self) -> &[(RecoverableError, TextPos)] {
        &self.errors
    }

    /// Consumes the sink, returning the collected errors.
    pub fn into_errors(self) -> Vec<(RecoverableError, TextPos)> {
        self.errors
    }
}

impl ErrorSink for VecErrorSink {
    fn report(&mut self, err: RecoverableError, pos: TextPos) {
        self.errors.push((err, pos));
    }
}

impl<F: FnMut(RecoverableError, TextPos)> ErrorSink for F {
    fn report(&mut self, err: RecoverableError, pos: TextPos) {
        (self)(err, pos)
    }
}
