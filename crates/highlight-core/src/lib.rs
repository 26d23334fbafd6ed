#![warn(missing_docs)]
//! Highlight Core - Headless Syntax Highlighting and Search Engine
//!
//! # Overview
//!
//! `highlight-core` is the engine behind a code editor widget: it owns every
//! annotation derived from the text (syntax styles, search matches, error
//! markers, the matching-delimiter pair) while the host keeps the buffer and
//! does the drawing. The host feeds it edits, caret moves, and scroll
//! geometry; the engine answers with clamped span lists for the visible
//! window, scroll targets for search navigation, and edits to apply for
//! replace operations.
//!
//! # Core Features
//!
//! - **Span bookkeeping**: offset shifting across edits, with defensive
//!   pruning of spans an edit invalidated
//! - **Windowed rendering**: only spans near the viewport are materialized,
//!   so render cost tracks the screen, not the document
//! - **Asynchronous highlighting**: tokenization runs on a worker thread
//!   behind a generation counter; superseded passes are dropped, never
//!   applied
//! - **Find/replace**: literal and regex queries, case folding done by the
//!   regex engine, non-wrapping navigation, single and whole-document
//!   replacement
//! - **Delimiter matching**: nesting-aware scan for `{ [ ( } ] )` around
//!   the caret
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Engine Facade (HighlightEngine)            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Viewport Projection (DirtyWindow)          │  ← Display Data
//! ├─────────────────────────────────────────────┤
//! │  Find / Brackets / Dispatch                 │  ← Derived State
//! ├─────────────────────────────────────────────┤
//! │  Span Store (shift + prune)                 │  ← Bookkeeping
//! ├─────────────────────────────────────────────┤
//! │  Text Snapshot (Rope)                       │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use highlight_core::{HighlightEngine, SearchOptions, TextEdit, Viewport};
//!
//! let mut engine = HighlightEngine::new("fn main() {\n    println!(\"hi\");\n}\n");
//!
//! // Search selects the first match and reports where it is.
//! let selected = engine.find("println", SearchOptions::default()).unwrap();
//! assert_eq!((selected.start, selected.end), (16, 23));
//!
//! // The host applies an edit to its buffer, then reports it.
//! engine.apply_edit(&TextEdit::insert(0, "// demo\n"));
//! assert_eq!(engine.store().find_spans()[0].start, 24);
//!
//! // Only spans near the viewport are materialized.
//! engine.update_viewport(Viewport { scroll_y: 0, height_px: 64, line_height_px: 16 });
//! assert!(!engine.visible_spans().is_empty());
//! ```
//!
//! # Module Description
//!
//! - [`span`] - span data model (style, find, error, bracket)
//! - [`scheme`] - token categories and color schemes
//! - [`store`] - per-document span store with shift/prune
//! - [`delta`] - structured text change deltas
//! - [`brackets`] - matching-delimiter scan
//! - [`find`] - query compilation and match scanning
//! - [`tokenizer`] - the pluggable tokenizer seam
//! - [`dispatch`] - off-thread tokenization with cancellation
//! - [`viewport`] - dirty-window computation and span materialization
//! - [`engine`] - the per-document facade
//!
//! # Threading Model
//!
//! Everything runs on the thread that owns the document, except tokenization:
//! the dispatch worker tokenizes snapshots in the background and its results
//! re-enter through [`HighlightEngine::poll_highlight`] on the owning thread.
//! Span collections are never shared across threads.

pub mod brackets;
pub mod delta;
pub mod dispatch;
pub mod engine;
pub mod find;
pub mod scheme;
pub mod span;
pub mod store;
pub mod tokenizer;
pub mod viewport;

pub use brackets::{DELIMITERS, match_at};
pub use delta::TextEdit;
pub use dispatch::TokenizerDispatch;
pub use engine::{EngineConfig, HighlightEngine, SelectedMatch};
pub use find::{PatternError, SearchOptions, compile_query, find_all};
pub use scheme::{Color, SyntaxScheme, TextStyle, TokenKind};
pub use span::{BracketPair, BracketSide, ErrorSpan, FindSpan, Span, SpanKind, StyleSpan};
pub use store::{SpanCategory, SpanStore};
pub use tokenizer::Tokenizer;
pub use viewport::{
    DEFAULT_TAB_WIDTH, DIRTY_MARGIN_LINES, DirtyWindow, ScrollTarget, Viewport, materialize,
    visual_x_for_column,
};
