//! Span bookkeeping: one store per document.
//!
//! The store owns every live annotation span and the offset-shift logic that
//! keeps them attached to the right text across edits. Collections are plain
//! ordered vectors: style spans arrive pre-sorted from a tokenization pass,
//! find spans are pushed in document order by the search scan, and error
//! spans are few.
//!
//! All mutation happens on the single thread that owns the document.
//! Tokenization results produced off-thread are marshalled onto that thread
//! (see [`dispatch`](crate::dispatch)) before they reach the store, so no
//! collection is ever touched concurrently.

use crate::span::{BracketPair, ErrorSpan, FindSpan, StyleSpan};

/// Payload-free selector for the span collections a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanCategory {
    /// Syntax style spans.
    Style,
    /// Search-match spans.
    FindResult,
    /// Error-marker spans.
    Error,
    /// The matching-delimiter pair.
    Bracket,
}

/// All annotation spans for one document.
#[derive(Debug, Default)]
pub struct SpanStore {
    style_spans: Vec<StyleSpan>,
    find_spans: Vec<FindSpan>,
    error_spans: Vec<ErrorSpan>,
    bracket_pair: Option<BracketPair>,
}

impl SpanStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Style spans, in the order the tokenizer emitted them.
    pub fn style_spans(&self) -> &[StyleSpan] {
        &self.style_spans
    }

    /// Find spans, in document order.
    pub fn find_spans(&self) -> &[FindSpan] {
        &self.find_spans
    }

    /// Error spans, in insertion order.
    pub fn error_spans(&self) -> &[ErrorSpan] {
        &self.error_spans
    }

    /// The matching-delimiter pair, if one is currently highlighted.
    pub fn bracket_pair(&self) -> Option<BracketPair> {
        self.bracket_pair
    }

    /// Total number of live spans across all categories.
    pub fn len(&self) -> usize {
        self.style_spans.len()
            + self.find_spans.len()
            + self.error_spans.len()
            + if self.bracket_pair.is_some() { 2 } else { 0 }
    }

    /// Returns `true` if no spans are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically replace the whole style-span set with the output of a
    /// completed tokenization pass.
    pub fn replace_style_spans(&mut self, spans: Vec<StyleSpan>) {
        self.style_spans = spans;
    }

    /// Append a find span. Callers push in document order.
    pub fn push_find_span(&mut self, span: FindSpan) {
        self.find_spans.push(span);
    }

    /// Remove and return the find span at `index`, if present.
    pub fn remove_find_span(&mut self, index: usize) -> Option<FindSpan> {
        if index < self.find_spans.len() {
            Some(self.find_spans.remove(index))
        } else {
            None
        }
    }

    /// Append an error span.
    pub fn push_error_span(&mut self, span: ErrorSpan) {
        self.error_spans.push(span);
    }

    /// Set the matching-delimiter pair, replacing any previous one.
    pub fn set_bracket_pair(&mut self, pair: BracketPair) {
        self.bracket_pair = Some(pair);
    }

    /// Clear the matching-delimiter pair.
    pub fn clear_bracket_pair(&mut self) {
        self.bracket_pair = None;
    }

    /// Remove every span of one category.
    pub fn clear(&mut self, category: SpanCategory) {
        match category {
            SpanCategory::Style => self.style_spans.clear(),
            SpanCategory::FindResult => self.find_spans.clear(),
            SpanCategory::Error => self.error_spans.clear(),
            SpanCategory::Bracket => self.bracket_pair = None,
        }
    }

    /// Shift every span for an edit at `from` whose net length change is
    /// `delta` characters, against a post-edit document of `text_len`
    /// characters.
    ///
    /// Style and error spans move an endpoint when it is at or past the edit
    /// point (`start >= from`, `end >= from`). Find spans move their start
    /// only when **strictly** past it, so a match that the edit point falls
    /// inside does not grow to absorb inserted text.
    ///
    /// Each collection is rebuilt and swapped in one pass; a span whose
    /// shifted endpoints come out inverted, negative, or beyond `text_len`
    /// is dropped rather than left dangling. The bracket pair is always
    /// dropped: it is derived from the caret and recomputed on the next
    /// caret move.
    pub fn shift(&mut self, from: usize, delta: isize, text_len: usize) {
        self.style_spans = self
            .style_spans
            .iter()
            .filter_map(|s| {
                shift_range(s.start, s.end, from, delta, false, text_len)
                    .map(|(start, end)| StyleSpan::new(start, end, s.token))
            })
            .collect();
        self.find_spans = self
            .find_spans
            .iter()
            .filter_map(|s| {
                shift_range(s.start, s.end, from, delta, true, text_len)
                    .map(|(start, end)| FindSpan::new(start, end))
            })
            .collect();
        self.error_spans = self
            .error_spans
            .iter()
            .filter_map(|s| {
                shift_range(s.start, s.end, from, delta, false, text_len)
                    .map(|(start, end)| ErrorSpan::new(start, end))
            })
            .collect();
        self.bracket_pair = None;
    }
}

/// Shift one `start..end` range. Returns `None` when the shifted range is no
/// longer valid and the span should be dropped.
fn shift_range(
    start: usize,
    end: usize,
    from: usize,
    delta: isize,
    strict_start: bool,
    text_len: usize,
) -> Option<(usize, usize)> {
    let start_moves = if strict_start {
        start > from
    } else {
        start >= from
    };
    let mut new_start = start as i64;
    let mut new_end = end as i64;
    if start_moves {
        new_start += delta as i64;
    }
    if end >= from {
        new_end += delta as i64;
    }
    if new_start < 0 || new_end < new_start || new_end > text_len as i64 {
        return None;
    }
    Some((new_start as usize, new_end as usize))
}
