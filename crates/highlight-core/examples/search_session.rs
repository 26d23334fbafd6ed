use highlight_core::{HighlightEngine, SearchOptions, TextEdit, Viewport};

fn main() {
    let source = "\
fn apply(tax: f64, price: f64) -> f64 {
    let total = price * (1.0 + tax);
    total
}
";
    let mut engine = HighlightEngine::new(source);
    engine.update_viewport(Viewport {
        scroll_y: 0,
        height_px: 64,
        line_height_px: 16,
    });

    // Search for every use of `total` and walk the results.
    let first = engine
        .find("total", SearchOptions::default())
        .expect("matches");
    println!(
        "{} matches, first at {}..{}",
        engine.match_count(),
        first.start,
        first.end
    );
    while let Some(next) = engine.find_next() {
        println!("next at {}..{}", next.start, next.end);
    }

    // Rename the current occurrence; the engine hands back the edit to run
    // against the host buffer.
    let edit: TextEdit = engine.replace_find_result("subtotal").expect("a match");
    println!(
        "replace {:?} -> {:?} at {}",
        edit.deleted_text, edit.inserted_text, edit.start
    );
    assert!(engine.text().contains("subtotal"));

    // Everything the window needs to paint, clamped to the window.
    for span in engine.visible_spans() {
        println!("{:?} {}..{}", span.kind, span.start, span.end);
    }

    // The caret just moved behind the opening brace of the function body.
    let brace = engine.text().find('{').unwrap();
    engine.caret_moved(brace + 1, brace + 1);
    if let Some(pair) = engine.store().bracket_pair() {
        println!("brace pair: {} <-> {}", pair.open, pair.close);
    }
}
