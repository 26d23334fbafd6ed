//! `highlight-core-rules` - Generic regex-rule tokenizer for `highlight-core`.
//!
//! For lightweight formats where a full parser is unnecessary: a grammar is
//! a flat list of regex rules, each mapping its matches (or one capture
//! group of them) to a token category. Rules run per line, in order, and
//! may overlap; the engine's paint order resolves overlaps, later spans
//! over earlier ones.
//!
//! The host builds a [`RuleTokenizer`] for whatever format it associates
//! with the document and installs it through
//! [`HighlightEngine::set_tokenizer`](highlight_core::HighlightEngine::set_tokenizer).

use highlight_core::{StyleSpan, SyntaxScheme, TokenKind, Tokenizer};
use regex::Regex;
use thiserror::Error;

/// Errors produced when building a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid rule pattern {pattern:?}: {source}")]
    /// A rule pattern failed to compile.
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying compile error.
        source: regex::Error,
    },
}

/// A single tokenize rule: pattern to token category.
#[derive(Debug, Clone)]
pub struct TokenRule {
    regex: Regex,
    token: TokenKind,
    capture_group: Option<usize>,
}

impl TokenRule {
    /// Compile `pattern` into a rule emitting `token` spans.
    pub fn new(pattern: &str, token: TokenKind) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            token,
            capture_group: None,
        })
    }

    /// Emit only one capture group of each match.
    ///
    /// Example (key before `=`):
    /// - pattern: `^\s*([^=\s]+)\s*=`
    /// - capture group: `1` (the key)
    pub fn with_capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    /// The token category this rule emits.
    pub fn token(&self) -> TokenKind {
        self.token
    }
}

/// A rule-driven [`Tokenizer`]: runs every rule over every line.
///
/// Patterns are line-scoped; a construct spanning lines needs a real
/// parser, not this crate.
#[derive(Debug, Clone)]
pub struct RuleTokenizer {
    rules: Vec<TokenRule>,
}

impl RuleTokenizer {
    /// Build a tokenizer from an ordered rule list.
    pub fn new(rules: Vec<TokenRule>) -> Self {
        Self { rules }
    }

    /// The rules, in application order.
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&mut self, text: &str, _scheme: &SyntaxScheme) -> Vec<StyleSpan> {
        let mut spans = Vec::new();
        let mut line_start = 0usize;

        for line in text.split('\n') {
            // Match against the content without the '\r' of a CRLF break,
            // but keep it in the offset arithmetic.
            let content = line.strip_suffix('\r').unwrap_or(line);

            for rule in &self.rules {
                if let Some(group) = rule.capture_group {
                    for caps in rule.regex.captures_iter(content) {
                        let Some(m) = caps.get(group) else {
                            continue;
                        };
                        if let Some(span) =
                            span_from_match(line_start, content, m.start(), m.end(), rule.token)
                        {
                            spans.push(span);
                        }
                    }
                } else {
                    for m in rule.regex.find_iter(content) {
                        if let Some(span) =
                            span_from_match(line_start, content, m.start(), m.end(), rule.token)
                        {
                            spans.push(span);
                        }
                    }
                }
            }

            line_start += line.chars().count() + 1;
        }

        spans
    }
}

/// Convert a byte-offset match within one line into a char-offset span.
fn span_from_match(
    line_start_offset: usize,
    line_text: &str,
    match_start_byte: usize,
    match_end_byte: usize,
    token: TokenKind,
) -> Option<StyleSpan> {
    if match_start_byte >= match_end_byte || match_end_byte > line_text.len() {
        return None;
    }

    let start_col = line_text[..match_start_byte].chars().count();
    let end_col = line_text[..match_end_byte].chars().count();
    if start_col >= end_col {
        return None;
    }

    Some(StyleSpan::new(
        line_start_offset + start_col,
        line_start_offset + end_col,
        token,
    ))
}
