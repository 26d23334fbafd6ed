//! Find engine: query compilation and match scanning.
//!
//! Search runs over a full-text snapshot and reports **character offsets**
//! (not byte offsets) for all public inputs/outputs. Literal queries are
//! escaped and compiled through the same regex path as pattern queries, so
//! both share one scan loop; case-insensitivity is a compile flag rather
//! than a query rewrite, which keeps non-ASCII case folding correct.

use crate::span::FindSpan;
use regex::{Regex, RegexBuilder};

/// Options that control how a query is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, matches case exactly.
    pub match_case: bool,
    /// If `true`, treats the query as a regex pattern instead of a literal.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_case: true,
            regex: false,
        }
    }
}

/// Query compilation errors.
///
/// An invalid pattern never escapes the engine's find operation, which
/// degrades to "no matches"; [`compile_query`] exposes the error for hosts
/// that want to surface feedback in their search UI.
#[derive(Debug)]
pub enum PatternError {
    /// The query failed to compile as a regex.
    InvalidSyntax(regex::Error),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax(err) => write!(f, "Invalid search pattern: {}", err),
        }
    }
}

impl std::error::Error for PatternError {}

/// Maps byte offsets of the snapshot back to character offsets.
#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Compile `query` into a regex according to `options`.
pub fn compile_query(query: &str, options: SearchOptions) -> Result<Regex, PatternError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.match_case)
        .multi_line(true)
        .build()
        .map_err(PatternError::InvalidSyntax)
}

/// Scan `text` and return every non-overlapping match, in document order.
///
/// An empty query or one that fails to compile yields an empty list; the
/// compile failure is logged at debug level and otherwise swallowed, since
/// a half-typed pattern in a search box is routine, not exceptional. Empty
/// matches (possible with patterns like `a*`) are skipped so every returned
/// span covers at least one character.
pub fn find_all(text: &str, query: &str, options: SearchOptions) -> Vec<FindSpan> {
    if query.is_empty() {
        return Vec::new();
    }
    let re = match compile_query(query, options) {
        Ok(re) => re,
        Err(err) => {
            log::debug!("search pattern rejected: {err}");
            return Vec::new();
        }
    };

    let index = CharIndex::new(text);
    let mut spans = Vec::new();
    for m in re.find_iter(text) {
        let start = index.byte_to_char(m.start());
        let end = index.byte_to_char(m.end());
        if start < end {
            spans.push(FindSpan::new(start, end));
        }
    }
    spans
}
