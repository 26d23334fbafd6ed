//! Per-document engine facade.
//!
//! One [`HighlightEngine`] per open document ties the pieces together: the
//! text snapshot, the span store, find state, scroll geometry, and the
//! tokenizer dispatch. The host owns the authoritative buffer and the
//! widget; the engine owns every annotation derived from the text and tells
//! the host what to display, where to scroll, and which edits to apply for
//! replace operations.
//!
//! All methods are called from the single thread that owns the document.
//! The only concurrency in the system is the tokenizer worker behind
//! [`TokenizerDispatch`], whose results re-enter through
//! [`HighlightEngine::poll_highlight`] on the owning thread.

use crate::brackets;
use crate::delta::TextEdit;
use crate::dispatch::TokenizerDispatch;
use crate::find::{self, SearchOptions};
use crate::scheme::SyntaxScheme;
use crate::span::{ErrorSpan, FindSpan, Span};
use crate::store::{SpanCategory, SpanStore};
use crate::tokenizer::Tokenizer;
use crate::viewport::{
    self, DEFAULT_TAB_WIDTH, DirtyWindow, ScrollTarget, Viewport, visual_x_for_column,
};
use ropey::Rope;

/// Engine behavior toggles supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Recompute the matching-delimiter pair on caret moves.
    pub highlight_delimiters: bool,
    /// Soft wrap. When on, horizontal scroll targets are suppressed since
    /// every column is reachable by vertical scrolling alone.
    pub word_wrap: bool,
    /// Tab width in cells for the horizontal scroll metric.
    pub tab_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_delimiters: true,
            word_wrap: false,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// The currently selected find match, plus the scroll needed to reveal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMatch {
    /// Match start character offset.
    pub start: usize,
    /// Match end character offset.
    pub end: usize,
    /// Scroll adjustment revealing the match; `None` when it is already
    /// inside the visible window.
    pub scroll: Option<ScrollTarget>,
}

/// The engine facade: one instance per open document.
pub struct HighlightEngine {
    text: Rope,
    store: SpanStore,
    scheme: SyntaxScheme,
    config: EngineConfig,
    dispatch: Option<TokenizerDispatch>,
    viewport: Viewport,
    window: DirtyWindow,
    selected_find_result: usize,
}

impl HighlightEngine {
    /// Create an engine over an initial snapshot of the host buffer, with
    /// the default scheme and config and no tokenizer installed.
    pub fn new(text: &str) -> Self {
        let text = Rope::from_str(text);
        let viewport = Viewport::default();
        let window = DirtyWindow::compute(viewport, text.len_lines());
        Self {
            text,
            store: SpanStore::new(),
            scheme: SyntaxScheme::default(),
            config: EngineConfig::default(),
            dispatch: None,
            viewport,
            window,
            selected_find_result: 0,
        }
    }

    /// The engine's full text snapshot.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Snapshot length in characters.
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Number of lines in the snapshot. A trailing newline opens a final
    /// empty line, and the empty document has one line.
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Read access to the span store.
    pub fn store(&self) -> &SpanStore {
        &self.store
    }

    /// The active color scheme.
    pub fn scheme(&self) -> &SyntaxScheme {
        &self.scheme
    }

    /// The active config.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Replace the config.
    ///
    /// Turning delimiter matching off also drops the current pair, so a
    /// stale highlight cannot outlive the setting.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        if !config.highlight_delimiters {
            self.store.clear_bracket_pair();
        }
    }

    // ----------------------------------------------------------------------
    // Document lifecycle
    // ----------------------------------------------------------------------

    /// Replace the whole snapshot, reset all derived state, and start a
    /// fresh tokenization pass.
    pub fn set_text(&mut self, text: &str) {
        self.reset_document(Rope::from_str(text));
    }

    /// Apply one structured edit to the snapshot and every span collection.
    ///
    /// Error markers are cleared wholesale (they describe lines of a
    /// document revision that no longer exists), the remaining spans are
    /// shifted from the edit point, and the in-flight tokenization pass, if
    /// any, is superseded by a fresh one over the new snapshot.
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        let start = edit.start.min(self.text.len_chars());
        let deleted = edit.deleted_len().min(self.text.len_chars() - start);
        if deleted > 0 {
            self.text.remove(start..start + deleted);
        }
        if !edit.inserted_text.is_empty() {
            self.text.insert(start, &edit.inserted_text);
        }

        self.store.clear(SpanCategory::Error);
        let delta = edit.inserted_len() as isize - deleted as isize;
        self.store.shift(start, delta, self.text.len_chars());
        self.window = DirtyWindow::compute(self.viewport, self.line_count());
        self.request_highlight();
    }

    // ----------------------------------------------------------------------
    // Highlighting
    // ----------------------------------------------------------------------

    /// Install a new color scheme and start a fresh pass under it.
    ///
    /// The pass in flight, if any, was captured against the old scheme and
    /// is superseded rather than recolored.
    pub fn set_scheme(&mut self, scheme: SyntaxScheme) {
        self.scheme = scheme;
        self.request_highlight();
    }

    /// Install or remove the tokenizer.
    ///
    /// Installing spawns a fresh dispatch worker and requests a pass;
    /// existing style spans stay visible until it completes. Removing drops
    /// the worker and clears all style spans immediately.
    pub fn set_tokenizer(&mut self, tokenizer: Option<Box<dyn Tokenizer>>) {
        self.dispatch = tokenizer.map(TokenizerDispatch::new);
        if self.dispatch.is_some() {
            self.request_highlight();
        } else {
            self.store.clear(SpanCategory::Style);
        }
    }

    /// Supersede any in-flight pass and request a fresh one over the
    /// current snapshot and scheme. No-op without a tokenizer.
    pub fn request_highlight(&self) {
        if let Some(dispatch) = &self.dispatch {
            dispatch.request(self.text.to_string(), self.scheme.clone());
        }
    }

    /// Marshal a completed tokenization pass into the store, if one is
    /// ready. Returns `true` when a pass landed.
    ///
    /// Spans the tokenizer emitted beyond the current snapshot are dropped
    /// before they reach the store.
    pub fn poll_highlight(&mut self) -> bool {
        let Some(dispatch) = &self.dispatch else {
            return false;
        };
        let Some(mut spans) = dispatch.poll() else {
            return false;
        };
        let len = self.text.len_chars();
        spans.retain(|s| s.start < s.end && s.end <= len);
        self.store.replace_style_spans(spans);
        true
    }

    // ----------------------------------------------------------------------
    // Caret and delimiter matching
    // ----------------------------------------------------------------------

    /// Caret-move notification, with the live selection range.
    ///
    /// The previous delimiter pair is always dropped. A new one is computed
    /// only when matching is enabled and the selection is empty (a plain
    /// caret); the delimiter inspected is the character before `sel_start`.
    pub fn caret_moved(&mut self, sel_start: usize, sel_end: usize) {
        self.store.clear_bracket_pair();
        if !self.config.highlight_delimiters || sel_start != sel_end {
            return;
        }
        if let Some(pair) = brackets::match_at(&self.text, sel_start) {
            self.store.set_bracket_pair(pair);
        }
    }

    // ----------------------------------------------------------------------
    // Error markers
    // ----------------------------------------------------------------------

    /// Mark a reported error on a **1-based** line number, spanning the
    /// line's content. Line 0 and lines past the end are ignored; an empty
    /// line produces no span. Markers accumulate until the next edit or
    /// [`set_text`](Self::set_text).
    pub fn set_error_line(&mut self, line_number: usize) {
        if line_number == 0 {
            return;
        }
        let line = line_number - 1;
        if line >= self.line_count() {
            return;
        }
        let start = self.text.line_to_char(line);
        let end = start + line_content_len(&self.text, line);
        if start < end {
            self.store.push_error_span(ErrorSpan::new(start, end));
        }
    }

    // ----------------------------------------------------------------------
    // Viewport
    // ----------------------------------------------------------------------

    /// Report new scroll geometry and recompute the dirty window.
    pub fn update_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.window = DirtyWindow::compute(viewport, self.line_count());
    }

    /// The current scroll geometry.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The dirty line window derived from the current geometry and
    /// document.
    pub fn dirty_window(&self) -> DirtyWindow {
        self.window
    }

    /// Spans projected into the current dirty window, clamped to its
    /// edges. Pure with respect to engine state: calling it repeatedly
    /// yields identical output.
    pub fn visible_spans(&self) -> Vec<Span> {
        let (start, end) = self.window_char_range();
        viewport::materialize(&self.store, start, end)
    }

    /// Character range of the dirty window, including the trailing newline
    /// of its bottom line.
    fn window_char_range(&self) -> (usize, usize) {
        let last_line = self.line_count() - 1;
        let top = self.window.top_line.min(last_line);
        let start = self.text.line_to_char(top);
        let end = if self.window.bottom_line >= last_line {
            self.text.len_chars()
        } else {
            self.text.line_to_char(self.window.bottom_line + 1)
        };
        (start, end)
    }

    // ----------------------------------------------------------------------
    // Find and replace
    // ----------------------------------------------------------------------

    /// Run a fresh search, replacing any previous result set.
    ///
    /// On success the first match becomes current and is returned with its
    /// scroll target. An empty query clears nothing and returns `None`; a
    /// query with no matches (including a malformed regex pattern) leaves
    /// an empty result set.
    pub fn find(&mut self, query: &str, options: SearchOptions) -> Option<SelectedMatch> {
        if query.is_empty() {
            return None;
        }
        self.clear_find_result_spans();
        let snapshot = self.text.to_string();
        for span in find::find_all(&snapshot, query, options) {
            self.store.push_find_span(span);
        }
        log::debug!("search produced {} match(es)", self.store.find_spans().len());
        self.selected_find_result = 0;
        self.selected_match()
    }

    /// Step to the next match. No wraparound: at the last match this is a
    /// no-op returning `None`.
    pub fn find_next(&mut self) -> Option<SelectedMatch> {
        let len = self.store.find_spans().len();
        if self.selected_find_result + 1 < len {
            self.selected_find_result += 1;
            self.selected_match()
        } else {
            None
        }
    }

    /// Step to the previous match. No wraparound: at the first match this
    /// is a no-op returning `None`.
    pub fn find_previous(&mut self) -> Option<SelectedMatch> {
        let len = self.store.find_spans().len();
        if self.selected_find_result > 0 && self.selected_find_result < len {
            self.selected_find_result -= 1;
            self.selected_match()
        } else {
            None
        }
    }

    /// Number of live find results.
    pub fn match_count(&self) -> usize {
        self.store.find_spans().len()
    }

    /// Index of the current match within the ordered result set.
    pub fn selected_find_result(&self) -> usize {
        self.selected_find_result
    }

    /// Drop every find result and reset the current index.
    pub fn clear_find_result_spans(&mut self) {
        self.selected_find_result = 0;
        self.store.clear(SpanCategory::FindResult);
    }

    /// Replace the current match with `replacement`.
    ///
    /// The consumed match leaves the result set, the edit runs through the
    /// normal edit path (snapshot update, span shift, highlight restart),
    /// and the index clamps into the surviving result set. The clamp covers
    /// more than the consumed match leaving: the shift can also drop a
    /// neighboring match the replacement invalidated. Returns the edit for
    /// the host to apply to its own buffer, or `None` without results.
    pub fn replace_find_result(&mut self, replacement: &str) -> Option<TextEdit> {
        let span = self.store.remove_find_span(self.selected_find_result)?;
        let deleted = self.text.slice(span.start..span.end).to_string();
        let edit = TextEdit::replace(span.start, deleted, replacement);
        self.apply_edit(&edit);
        let len = self.store.find_spans().len();
        self.selected_find_result = self.selected_find_result.min(len.saturating_sub(1));
        Some(edit)
    }

    /// Replace every match with `replacement` in one shot.
    ///
    /// Replacements are applied back-to-front so earlier offsets stay
    /// valid, then the whole snapshot is swapped atomically, resetting
    /// derived state exactly like [`set_text`](Self::set_text). Returns the
    /// new document content for the host to install, or `None` without
    /// results.
    pub fn replace_all_find_results(&mut self, replacement: &str) -> Option<String> {
        if self.store.find_spans().is_empty() {
            return None;
        }
        let mut new_text = self.text.clone();
        for span in self.store.find_spans().iter().rev() {
            new_text.remove(span.start..span.end);
            new_text.insert(span.start, replacement);
        }
        let result = new_text.to_string();
        self.reset_document(new_text);
        Some(result)
    }

    /// The current match with its scroll target, when the result set is
    /// non-empty.
    fn selected_match(&self) -> Option<SelectedMatch> {
        let span = self
            .store
            .find_spans()
            .get(self.selected_find_result)
            .copied()?;
        Some(SelectedMatch {
            start: span.start,
            end: span.end,
            scroll: self.scroll_to_result(span),
        })
    }

    /// Scroll adjustment revealing `span`, or `None` when it already sits
    /// inside the visible window (margin excluded).
    fn scroll_to_result(&self, span: FindSpan) -> Option<ScrollTarget> {
        let line_height = self.viewport.line_height_px.max(1);
        let last_line = self.line_count() - 1;
        let top_visible = (self.viewport.scroll_y / line_height).min(last_line);
        let bottom_visible =
            ((self.viewport.scroll_y + self.viewport.height_px) / line_height).min(last_line);
        let visible_start = self.text.line_to_char(top_visible);
        let visible_end = if bottom_visible >= last_line {
            self.text.len_chars()
        } else {
            self.text.line_to_char(bottom_visible + 1)
        };
        if span.start >= visible_start && span.end <= visible_end {
            return None;
        }

        let match_line = self.text.char_to_line(span.start);
        let max_scroll =
            (self.line_count() * line_height).saturating_sub(self.viewport.height_px);
        let y_px = (match_line * line_height).min(max_scroll);
        let x_cells = if self.config.word_wrap {
            None
        } else {
            let line_start = self.text.line_to_char(match_line);
            let column = span.start - line_start;
            let line = self.text.line(match_line).to_string();
            Some(visual_x_for_column(&line, column, self.config.tab_width))
        };
        Some(ScrollTarget { y_px, x_cells })
    }

    /// Swap in a new snapshot and reset every piece of derived state.
    fn reset_document(&mut self, text: Rope) {
        self.text = text;
        self.store.clear(SpanCategory::Style);
        self.store.clear(SpanCategory::FindResult);
        self.store.clear(SpanCategory::Error);
        self.store.clear_bracket_pair();
        self.selected_find_result = 0;
        self.window = DirtyWindow::compute(self.viewport, self.line_count());
        self.request_highlight();
    }
}

/// Length of a line's content in characters, excluding its line break.
fn line_content_len(text: &Rope, line: usize) -> usize {
    let slice = text.line(line);
    let mut len = slice.len_chars();
    if len > 0 && slice.char(len - 1) == '\n' {
        len -= 1;
        if len > 0 && slice.char(len - 1) == '\r' {
            len -= 1;
        }
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SpanKind;

    #[test]
    fn test_error_line_is_one_based_and_bounds_checked() {
        let mut engine = HighlightEngine::new("alpha\nbeta\ngamma\n");
        engine.set_error_line(0);
        assert!(engine.store().error_spans().is_empty());

        engine.set_error_line(2);
        assert_eq!(engine.store().error_spans(), &[ErrorSpan::new(6, 10)]);

        engine.set_error_line(99);
        assert_eq!(engine.store().error_spans().len(), 1);
    }

    #[test]
    fn test_error_on_empty_line_produces_no_span() {
        let mut engine = HighlightEngine::new("a\n\nb\n");
        engine.set_error_line(2);
        assert!(engine.store().error_spans().is_empty());
    }

    #[test]
    fn test_error_line_handles_crlf() {
        let mut engine = HighlightEngine::new("one\r\ntwo\r\n");
        engine.set_error_line(2);
        assert_eq!(engine.store().error_spans(), &[ErrorSpan::new(5, 8)]);
    }

    #[test]
    fn test_caret_move_with_selection_suppresses_matching() {
        let mut engine = HighlightEngine::new("(ab)");
        engine.caret_moved(1, 1);
        assert!(engine.store().bracket_pair().is_some());

        engine.caret_moved(1, 3);
        assert!(engine.store().bracket_pair().is_none());
    }

    #[test]
    fn test_caret_move_respects_the_config_gate() {
        let mut engine = HighlightEngine::new("(ab)");
        engine.set_config(EngineConfig {
            highlight_delimiters: false,
            ..EngineConfig::default()
        });
        engine.caret_moved(1, 1);
        assert!(engine.store().bracket_pair().is_none());
    }

    #[test]
    fn test_disabling_delimiters_drops_the_current_pair() {
        let mut engine = HighlightEngine::new("(ab)");
        engine.caret_moved(1, 1);
        assert!(engine.store().bracket_pair().is_some());
        engine.set_config(EngineConfig {
            highlight_delimiters: false,
            ..EngineConfig::default()
        });
        assert!(engine.store().bracket_pair().is_none());
    }

    #[test]
    fn test_edits_keep_the_snapshot_in_sync() {
        let mut engine = HighlightEngine::new("hello world");
        engine.apply_edit(&TextEdit::replace(6, "world", "there"));
        assert_eq!(engine.text(), "hello there");
        engine.apply_edit(&TextEdit::insert(11, "!"));
        assert_eq!(engine.text(), "hello there!");
        engine.apply_edit(&TextEdit::delete(0, "hello "));
        assert_eq!(engine.text(), "there!");
    }

    #[test]
    fn test_edits_clear_error_spans() {
        let mut engine = HighlightEngine::new("alpha\nbeta\n");
        engine.set_error_line(1);
        assert_eq!(engine.store().error_spans().len(), 1);
        engine.apply_edit(&TextEdit::insert(0, "x"));
        assert!(engine.store().error_spans().is_empty());
    }

    #[test]
    fn test_set_text_resets_derived_state() {
        let mut engine = HighlightEngine::new("one two one");
        engine.find("one", SearchOptions::default());
        engine.set_error_line(1);
        assert!(!engine.store().is_empty());

        engine.set_text("fresh");
        assert!(engine.store().is_empty());
        assert_eq!(engine.selected_find_result(), 0);
        assert_eq!(engine.text(), "fresh");
    }

    #[test]
    fn test_visible_spans_reflect_the_window_after_edits() {
        let text = (0..100).map(|i| format!("line {i}\n")).collect::<String>();
        let mut engine = HighlightEngine::new(&text);
        engine.update_viewport(Viewport {
            scroll_y: 0,
            height_px: 160,
            line_height_px: 16,
        });
        engine.find("line 5", SearchOptions::default());
        assert_eq!(engine.match_count(), 11);
        // Only the hit on line 5 lands in the window; the prefix hits on
        // "line 50".."line 59" sit far below it.
        let spans = engine.visible_spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::FindResult);
        assert_eq!((spans[0].start, spans[0].end), (35, 41));
    }
}
