//! Structured text change deltas.
//!
//! The engine never owns the host's buffer. The host applies an edit to its
//! own storage, then reports it here as a structured delta so the engine can
//! keep its internal snapshot and span offsets in sync without diffing
//! old/new text. Deltas are expressed in **character offsets** (Unicode
//! scalar values) against the document as it was immediately before the
//! edit.

/// A single contiguous text edit expressed in character offsets.
///
/// `start` addresses the pre-edit document; the deleted range is defined by
/// the length (in `char`s) of `deleted_text`. Carrying the exact texts (not
/// just lengths) lets replace operations hand a self-contained edit back to
/// the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextEdit {
    /// An insertion of `text` at `start`.
    pub fn insert(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// A deletion of `deleted` starting at `start`.
    pub fn delete(start: usize, deleted: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted.into(),
            inserted_text: String::new(),
        }
    }

    /// A replacement of `deleted` by `inserted` at `start`.
    pub fn replace(start: usize, deleted: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted.into(),
            inserted_text: inserted.into(),
        }
    }

    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset of the deleted range in the pre-edit
    /// document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Net change in document length, in characters.
    pub fn shift_delta(&self) -> isize {
        self.inserted_len() as isize - self.deleted_len() as isize
    }
}
