use highlight_core::{HighlightEngine, SpanKind, TextEdit, TokenKind, Viewport};
use highlight_core_rules::{RuleTokenizer, TokenRule};
use std::thread;
use std::time::Duration;

fn drain(engine: &mut HighlightEngine) {
    // The tokenizer runs on a worker thread; give it a moment and fold
    // the outcome back in, the way a UI tick would.
    for _ in 0..200 {
        if engine.poll_highlight() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("tokenizer never delivered");
}

fn main() -> Result<(), highlight_core_rules::RuleError> {
    let rules = vec![
        TokenRule::new(r"#.*", TokenKind::Comment)?,
        TokenRule::new(r"^\s*\[[^\]]*\]", TokenKind::Type)?,
        TokenRule::new(r"^\s*([^=\s#\[]+)\s*=", TokenKind::Keyword)?.with_capture_group(1),
        TokenRule::new(r"\b\d+(\.\d+)?\b", TokenKind::Number)?,
        TokenRule::new(r#""[^"]*""#, TokenKind::String)?,
    ];

    let mut engine = HighlightEngine::new(
        "\
[server]
host = \"127.0.0.1\"
port = 8080

# tuning
workers = 4
",
    );
    engine.update_viewport(Viewport {
        scroll_y: 0,
        height_px: 160,
        line_height_px: 16,
    });
    engine.set_tokenizer(Some(Box::new(RuleTokenizer::new(rules))));
    drain(&mut engine);

    println!("-- initial pass --");
    for span in engine.visible_spans() {
        if let SpanKind::Style(token) = span.kind {
            println!("{token:?} {}..{}", span.start, span.end);
        }
    }

    // Type a new key; stale spans shift in place while the next pass runs.
    let eof = engine.len_chars();
    engine.apply_edit(&TextEdit::insert(eof, "timeout = 30\n"));
    drain(&mut engine);

    println!("-- after edit --");
    for span in engine.visible_spans() {
        if let SpanKind::Style(token) = span.kind {
            println!("{token:?} {}..{}", span.start, span.end);
        }
    }

    Ok(())
}
