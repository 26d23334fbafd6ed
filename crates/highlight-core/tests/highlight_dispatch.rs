use highlight_core::{
    Color, HighlightEngine, SpanKind, StyleSpan, SyntaxScheme, TextEdit, TokenKind, Tokenizer,
    Viewport,
};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Marks the whole snapshot as one keyword span.
struct WholeTextMarker;

impl Tokenizer for WholeTextMarker {
    fn tokenize(&mut self, text: &str, _scheme: &SyntaxScheme) -> Vec<StyleSpan> {
        vec![StyleSpan::new(0, text.chars().count(), TokenKind::Keyword)]
    }
}

/// Blocks inside `tokenize` until the test releases the gate, and reports
/// which snapshot each pass ran against.
struct GatedTokenizer {
    started: mpsc::Sender<String>,
    gate: mpsc::Receiver<()>,
}

impl Tokenizer for GatedTokenizer {
    fn tokenize(&mut self, text: &str, _scheme: &SyntaxScheme) -> Vec<StyleSpan> {
        let _ = self.started.send(text.to_string());
        let _ = self.gate.recv();
        vec![StyleSpan::new(0, text.chars().count(), TokenKind::Keyword)]
    }
}

/// Records the keyword color of the scheme each pass was started with.
struct SchemeProbe {
    seen: Arc<Mutex<Vec<Color>>>,
}

impl Tokenizer for SchemeProbe {
    fn tokenize(&mut self, _text: &str, scheme: &SyntaxScheme) -> Vec<StyleSpan> {
        self.seen.lock().unwrap().push(scheme.keyword.color);
        vec![StyleSpan::new(0, 1, TokenKind::Keyword)]
    }
}

fn wait_until(mut condition: impl FnMut() -> bool, deadline: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn test_completed_pass_lands_in_the_store() {
    let mut engine = HighlightEngine::new("let x = 1;");
    engine.set_tokenizer(Some(Box::new(WholeTextMarker)));

    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert_eq!(
        engine.store().style_spans(),
        &[StyleSpan::new(0, 10, TokenKind::Keyword)]
    );

    // The style span materializes into the visible window.
    engine.update_viewport(Viewport {
        scroll_y: 0,
        height_px: 16,
        line_height_px: 16,
    });
    assert!(
        engine
            .visible_spans()
            .iter()
            .any(|s| s.kind == SpanKind::Style(TokenKind::Keyword))
    );
}

#[test]
fn test_edit_supersedes_the_running_pass() {
    let (started_tx, started) = mpsc::channel();
    let (gate_tx, gate) = mpsc::channel();

    let mut engine = HighlightEngine::new("aaaa");
    engine.set_tokenizer(Some(Box::new(GatedTokenizer {
        started: started_tx,
        gate,
    })));

    // The install-time pass is now running against the old snapshot.
    assert_eq!(started.recv_timeout(Duration::from_secs(5)).unwrap(), "aaaa");

    engine.apply_edit(&TextEdit::insert(4, "bbbb"));
    gate_tx.send(()).unwrap();
    gate_tx.send(()).unwrap();

    // The pass over the old snapshot ran to completion but its output must
    // never surface; only the post-edit pass may land.
    assert_eq!(
        started.recv_timeout(Duration::from_secs(5)).unwrap(),
        "aaaabbbb"
    );
    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert_eq!(
        engine.store().style_spans(),
        &[StyleSpan::new(0, 8, TokenKind::Keyword)]
    );
}

#[test]
fn test_scheme_change_restarts_with_the_new_scheme() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut engine = HighlightEngine::new("x");
    engine.set_tokenizer(Some(Box::new(SchemeProbe { seen: Arc::clone(&seen) })));

    let default_keyword = engine.scheme().keyword.color;
    assert!(wait_until(
        || seen.lock().unwrap().contains(&default_keyword),
        Duration::from_secs(5)
    ));

    let mut custom = SyntaxScheme::darcula();
    custom.keyword.color = Color::rgb(1, 2, 3);
    engine.set_scheme(custom);

    assert!(wait_until(
        || seen.lock().unwrap().contains(&Color::rgb(1, 2, 3)),
        Duration::from_secs(5)
    ));
}

#[test]
fn test_removing_the_tokenizer_clears_style_spans() {
    let mut engine = HighlightEngine::new("abc");
    engine.set_tokenizer(Some(Box::new(WholeTextMarker)));
    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert!(!engine.store().style_spans().is_empty());

    engine.set_tokenizer(None);
    assert!(engine.store().style_spans().is_empty());
    assert!(!engine.poll_highlight());
}

/// Emits one valid span and a pile of junk past the end of the text.
struct JunkEmitter;

impl Tokenizer for JunkEmitter {
    fn tokenize(&mut self, _text: &str, _scheme: &SyntaxScheme) -> Vec<StyleSpan> {
        vec![
            StyleSpan::new(0, 2, TokenKind::Comment),
            StyleSpan::new(5, 999, TokenKind::Comment),
            StyleSpan::new(7, 7, TokenKind::Comment),
        ]
    }
}

#[test]
fn test_out_of_range_tokenizer_output_is_pruned() {
    let mut engine = HighlightEngine::new("abc");
    engine.set_tokenizer(Some(Box::new(JunkEmitter)));

    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert_eq!(
        engine.store().style_spans(),
        &[StyleSpan::new(0, 2, TokenKind::Comment)]
    );
}

#[test]
fn test_set_text_restarts_highlighting_over_the_new_snapshot() {
    let mut engine = HighlightEngine::new("aa");
    engine.set_tokenizer(Some(Box::new(WholeTextMarker)));
    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert_eq!(engine.store().style_spans()[0].end, 2);

    engine.set_text("bbbbbb");
    assert!(wait_until(|| engine.poll_highlight(), Duration::from_secs(5)));
    assert_eq!(engine.store().style_spans()[0].end, 6);
}
