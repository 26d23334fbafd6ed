//! Span data model.
//!
//! A span annotates a contiguous run of document text without owning any of
//! it. All offsets are **character offsets** (Unicode scalar values, `char`)
//! from the start of the document, half-open `start..end`. Span collections
//! are bookkeeping the engine projects onto the visible window at render
//! time; they are never a source of truth for the text itself.

use crate::scheme::TokenKind;

/// Which half of a delimiter pair a bracket highlight marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    /// The opening delimiter.
    Open,
    /// The closing delimiter.
    Close,
}

/// A coarse span kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Syntax style produced by a tokenization pass.
    Style(TokenKind),
    /// A search match produced by the find engine.
    FindResult,
    /// An error marker, usually a whole reported line.
    Error,
    /// One half of the matching-delimiter highlight.
    Bracket(BracketSide),
}

/// A materialized annotation over a character range, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// What the span annotates.
    pub kind: SpanKind,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, kind: SpanKind) -> Self {
        Self { start, end, kind }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if the span overlaps the half-open range `start..end`.
    ///
    /// Empty spans overlap nothing.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        !self.is_empty() && self.start < end && start < self.end
    }
}

/// A style annotation produced by a tokenization pass.
///
/// Carries a token category rather than concrete display attributes; the
/// category is resolved against the active [`SyntaxScheme`](crate::scheme::SyntaxScheme)
/// when the span is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Token category of the run.
    pub token: TokenKind,
}

impl StyleSpan {
    /// Create a new style span.
    pub fn new(start: usize, end: usize, token: TokenKind) -> Self {
        Self { start, end, token }
    }
}

/// A search-match annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindSpan {
    /// Match start character offset (inclusive).
    pub start: usize,
    /// Match end character offset (exclusive).
    pub end: usize,
}

impl FindSpan {
    /// Create a new find span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// An error-marker annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSpan {
    /// Marker start character offset (inclusive).
    pub start: usize,
    /// Marker end character offset (exclusive).
    pub end: usize,
}

impl ErrorSpan {
    /// Create a new error span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// The matching-delimiter highlight: the offsets of both delimiters of a
/// balanced pair. Each covers exactly one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    /// Character offset of the opening delimiter.
    pub open: usize,
    /// Character offset of the closing delimiter.
    pub close: usize,
}
