use highlight_core::{FindSpan, SpanStore, StyleSpan, TokenKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference shift for one endpoint pair, mirroring the store's contract:
/// style/error endpoints move at-or-after the edit point, find starts only
/// strictly after it.
fn shift_expected(
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
    let new_start = start as i64 + if start_moves { delta as i64 } else { 0 };
    let new_end = end as i64 + if end >= from { delta as i64 } else { 0 };
    if new_start < 0 || new_end < new_start || new_end > text_len as i64 {
        None
    } else {
        Some((new_start as usize, new_end as usize))
    }
}

#[test]
fn test_random_edit_sequences_match_the_reference() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let mut text_len: usize = rng.gen_range(50..500);

        let mut store = SpanStore::new();
        let mut expected_style: Vec<(usize, usize)> = Vec::new();
        let mut expected_find: Vec<(usize, usize)> = Vec::new();

        let mut style = Vec::new();
        for _ in 0..rng.gen_range(1..40) {
            let start = rng.gen_range(0..text_len);
            let end = rng.gen_range(start + 1..=text_len);
            style.push(StyleSpan::new(start, end, TokenKind::Keyword));
            expected_style.push((start, end));
        }
        store.replace_style_spans(style);
        for _ in 0..rng.gen_range(1..10) {
            let start = rng.gen_range(0..text_len);
            let end = rng.gen_range(start + 1..=text_len);
            store.push_find_span(FindSpan::new(start, end));
            expected_find.push((start, end));
        }

        // Apply a random edit sequence to both the store and the reference.
        for _ in 0..rng.gen_range(1..20) {
            let from = rng.gen_range(0..=text_len);
            let max_delete = (text_len - from) as isize;
            let delta = rng.gen_range(-max_delete..=20);
            text_len = (text_len as isize + delta) as usize;

            store.shift(from, delta, text_len);
            expected_style = expected_style
                .iter()
                .filter_map(|&(s, e)| shift_expected(s, e, from, delta, false, text_len))
                .collect();
            expected_find = expected_find
                .iter()
                .filter_map(|&(s, e)| shift_expected(s, e, from, delta, true, text_len))
                .collect();
        }

        let got_style: Vec<(usize, usize)> =
            store.style_spans().iter().map(|s| (s.start, s.end)).collect();
        let got_find: Vec<(usize, usize)> =
            store.find_spans().iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(got_style, expected_style);
        assert_eq!(got_find, expected_find);
    }
}

#[test]
fn test_shifted_spans_never_dangle() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let mut text_len: usize = 200;
        let mut store = SpanStore::new();
        let mut style = Vec::new();
        for _ in 0..30 {
            let start = rng.gen_range(0..text_len);
            let end = rng.gen_range(start + 1..=text_len);
            style.push(StyleSpan::new(start, end, TokenKind::String));
        }
        store.replace_style_spans(style);

        for _ in 0..10 {
            let from = rng.gen_range(0..=text_len);
            let max_delete = (text_len - from) as isize;
            let delta = rng.gen_range(-max_delete..=30);
            text_len = (text_len as isize + delta) as usize;
            store.shift(from, delta, text_len);

            for span in store.style_spans() {
                assert!(span.start <= span.end, "inverted span survived");
                assert!(span.end <= text_len, "span past the end survived");
            }
        }
    }
}

#[test]
fn test_pure_insertion_preserves_span_count_and_widths() {
    let mut store = SpanStore::new();
    store.replace_style_spans(vec![
        StyleSpan::new(0, 5, TokenKind::Comment),
        StyleSpan::new(10, 20, TokenKind::Keyword),
        StyleSpan::new(30, 40, TokenKind::String),
    ]);

    // Insertions never invalidate spans, only slide or widen them.
    store.shift(25, 7, 107);
    assert_eq!(store.style_spans().len(), 3);
    assert_eq!(store.style_spans()[0], StyleSpan::new(0, 5, TokenKind::Comment));
    assert_eq!(store.style_spans()[1], StyleSpan::new(10, 20, TokenKind::Keyword));
    assert_eq!(store.style_spans()[2], StyleSpan::new(37, 47, TokenKind::String));
}
