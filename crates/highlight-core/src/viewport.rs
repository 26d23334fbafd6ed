//! Visible-window computation and span materialization.
//!
//! Rendering cost must track the viewport, not the document. On every
//! scroll, resize, or content change the engine recomputes a dirty line
//! range from the scroll geometry, widens it by a fixed margin so fast
//! scrolling does not reveal unstyled text, and projects only the spans
//! intersecting that range into the display set, clamped to its edges.

use crate::span::{BracketSide, Span, SpanKind};
use crate::store::SpanStore;
use unicode_width::UnicodeWidthChar;

/// Lines materialized beyond each viewport edge.
pub const DIRTY_MARGIN_LINES: usize = 10;

/// Default tab width (in cells) for the horizontal scroll metric.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Scroll geometry reported by the host view.
///
/// The engine never measures anything itself; the host supplies pixel
/// geometry and gets line/offset decisions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Vertical scroll offset in pixels.
    pub scroll_y: usize,
    /// Viewport height in pixels.
    pub height_px: usize,
    /// Height of one rendered line in pixels.
    pub line_height_px: usize,
}

/// The line range currently materialized for display, inclusive on both
/// ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyWindow {
    /// First materialized line.
    pub top_line: usize,
    /// Last materialized line.
    pub bottom_line: usize,
}

impl DirtyWindow {
    /// Compute the dirty line range for `viewport` over a document of
    /// `line_count` lines.
    ///
    /// Both edges are widened by [`DIRTY_MARGIN_LINES`] and clamped into
    /// `0..line_count`. The result is a pure function of its inputs, so
    /// recomputation on an unchanged viewport is free of side effects.
    pub fn compute(viewport: Viewport, line_count: usize) -> Self {
        let line_height = viewport.line_height_px.max(1);
        let last_line = line_count.max(1) - 1;
        let top_line = (viewport.scroll_y / line_height)
            .saturating_sub(DIRTY_MARGIN_LINES)
            .min(last_line);
        let bottom_line = ((viewport.scroll_y + viewport.height_px) / line_height)
            .saturating_add(DIRTY_MARGIN_LINES)
            .min(last_line);
        Self {
            top_line,
            bottom_line,
        }
    }
}

/// A scroll adjustment the host should apply to reveal an off-screen match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    /// Target vertical scroll offset in pixels, capped at the bottommost
    /// scroll position.
    pub y_px: usize,
    /// Target horizontal position in cells; `None` under word wrap, where
    /// vertical scrolling alone reveals the match.
    pub x_cells: Option<usize>,
}

/// Project every stored span that intersects `window_start..window_end`
/// (character offsets) into the unified display set, clamping partial
/// overlaps to the window edges.
///
/// The output is ordered style, find, error, bracket; hosts that paint in
/// list order get find/error/bracket highlights over syntax color, matching
/// their priority. Pure: identical inputs produce identical output, so
/// re-rendering an unchanged window is idempotent.
pub fn materialize(store: &SpanStore, window_start: usize, window_end: usize) -> Vec<Span> {
    let mut out = Vec::new();
    for span in store.style_spans() {
        push_clamped(
            &mut out,
            span.start,
            span.end,
            SpanKind::Style(span.token),
            window_start,
            window_end,
        );
    }
    for span in store.find_spans() {
        push_clamped(
            &mut out,
            span.start,
            span.end,
            SpanKind::FindResult,
            window_start,
            window_end,
        );
    }
    for span in store.error_spans() {
        push_clamped(
            &mut out,
            span.start,
            span.end,
            SpanKind::Error,
            window_start,
            window_end,
        );
    }
    if let Some(pair) = store.bracket_pair() {
        push_clamped(
            &mut out,
            pair.open,
            pair.open + 1,
            SpanKind::Bracket(BracketSide::Open),
            window_start,
            window_end,
        );
        push_clamped(
            &mut out,
            pair.close,
            pair.close + 1,
            SpanKind::Bracket(BracketSide::Close),
            window_start,
            window_end,
        );
    }
    out
}

fn push_clamped(
    out: &mut Vec<Span>,
    start: usize,
    end: usize,
    kind: SpanKind,
    window_start: usize,
    window_end: usize,
) {
    if start < window_end && end > window_start {
        out.push(Span::new(start.max(window_start), end.min(window_end), kind));
    }
}

/// Width of `ch` in display cells, given the cell offset it would start at.
/// Tabs snap to the next multiple of `tab_width`; other characters use
/// their Unicode width (wide CJK counts 2), defaulting to 1.
fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - (cell_offset_in_line % tab_width)
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Visual cell offset from the start of `line` to character `column`.
///
/// This is the horizontal scroll metric: the host multiplies it by its cell
/// width to position the viewport over a match on a long unwrapped line.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}
