//! Asynchronous tokenization with explicit cancellation.
//!
//! A dispatch owns one worker thread and the tokenizer installed on it.
//! Every request carries a generation number taken from a shared counter;
//! bumping the counter (a newer request, or an explicit cancel) invalidates
//! whatever is queued or running. The worker checks the counter before and
//! after each pass and drops stale work; [`TokenizerDispatch::poll`] checks
//! it once more on the owning thread, which is the only place results
//! surface. Span collections are therefore never touched from two threads.
//!
//! Rapid typing degenerates to the cheap path by design: each edit bumps
//! the generation, the worker abandons or discards the superseded pass, and
//! only the last request's output is ever applied.

use crate::scheme::SyntaxScheme;
use crate::span::StyleSpan;
use crate::tokenizer::Tokenizer;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;

struct HighlightJob {
    generation: u64,
    text: String,
    scheme: SyntaxScheme,
}

struct HighlightOutcome {
    generation: u64,
    spans: Vec<StyleSpan>,
}

/// Runs tokenization passes on a worker thread, superseding stale ones.
///
/// Dropping the dispatch closes the job channel; the worker exits after its
/// current pass, and any unread result is discarded with the channel.
pub struct TokenizerDispatch {
    jobs: mpsc::Sender<HighlightJob>,
    outcomes: mpsc::Receiver<HighlightOutcome>,
    generation: Arc<AtomicU64>,
}

impl TokenizerDispatch {
    /// Spawn a worker thread around `tokenizer`.
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<HighlightJob>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<HighlightOutcome>();
        let generation = Arc::new(AtomicU64::new(0));
        {
            let generation = Arc::clone(&generation);
            thread::spawn(move || worker_loop(tokenizer, job_rx, outcome_tx, generation));
        }
        Self {
            jobs: job_tx,
            outcomes: outcome_rx,
            generation,
        }
    }

    /// Supersede any in-flight pass and enqueue a new one over `text`.
    ///
    /// The scheme is captured here and stays fixed for the whole pass, so a
    /// theme change mid-pass cannot produce half-recolored output.
    pub fn request(&self, text: String, scheme: SyntaxScheme) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::trace!("tokenization pass {generation} requested");
        // A send failure means the worker died; the engine then simply stops
        // receiving style updates instead of failing the edit path.
        let _ = self.jobs.send(HighlightJob {
            generation,
            text,
            scheme,
        });
    }

    /// Invalidate the outstanding pass, if any, without starting a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Drain finished passes and return the spans of the one that is still
    /// current, if any.
    ///
    /// Call from the owning thread, typically once per frame or input-loop
    /// turn. Results from superseded generations are discarded here even if
    /// the worker finished them before it saw the newer request.
    pub fn poll(&self) -> Option<Vec<StyleSpan>> {
        let current = self.generation.load(Ordering::SeqCst);
        let mut latest = None;
        while let Ok(outcome) = self.outcomes.try_recv() {
            if outcome.generation == current {
                latest = Some(outcome.spans);
            } else {
                log::trace!(
                    "discarding stale tokenization pass {} (current {})",
                    outcome.generation,
                    current
                );
            }
        }
        latest
    }
}

fn worker_loop(
    mut tokenizer: Box<dyn Tokenizer>,
    jobs: mpsc::Receiver<HighlightJob>,
    outcomes: mpsc::Sender<HighlightOutcome>,
    generation: Arc<AtomicU64>,
) {
    while let Ok(mut job) = jobs.recv() {
        // Collapse any backlog down to the newest job before doing work.
        while let Ok(newer) = jobs.try_recv() {
            job = newer;
        }
        if job.generation != generation.load(Ordering::SeqCst) {
            continue;
        }
        let spans = tokenizer.tokenize(&job.text, &job.scheme);
        if job.generation != generation.load(Ordering::SeqCst) {
            // Superseded while running; drop the result instead of sending
            // spans that describe text the document no longer contains.
            continue;
        }
        if outcomes
            .send(HighlightOutcome {
                generation: job.generation,
                spans,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::TokenKind;
    use std::time::{Duration, Instant};

    /// Marks the whole text as one keyword span, so tests can tell which
    /// snapshot a result came from by its length.
    struct WholeTextMarker;

    impl Tokenizer for WholeTextMarker {
        fn tokenize(&mut self, text: &str, _scheme: &SyntaxScheme) -> Vec<StyleSpan> {
            vec![StyleSpan::new(0, text.chars().count(), TokenKind::Keyword)]
        }
    }

    fn poll_until(dispatch: &TokenizerDispatch, deadline: Duration) -> Option<Vec<StyleSpan>> {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if let Some(spans) = dispatch.poll() {
                return Some(spans);
            }
            thread::sleep(Duration::from_millis(1));
        }
        None
    }

    #[test]
    fn test_completed_pass_surfaces_through_poll() {
        let dispatch = TokenizerDispatch::new(Box::new(WholeTextMarker));
        dispatch.request("abcde".to_string(), SyntaxScheme::darcula());
        let spans = poll_until(&dispatch, Duration::from_secs(5)).expect("pass did not finish");
        assert_eq!(spans, vec![StyleSpan::new(0, 5, TokenKind::Keyword)]);
    }

    #[test]
    fn test_cancel_discards_the_outstanding_pass() {
        let dispatch = TokenizerDispatch::new(Box::new(WholeTextMarker));
        dispatch.request("abcde".to_string(), SyntaxScheme::darcula());
        dispatch.cancel();
        assert!(poll_until(&dispatch, Duration::from_millis(200)).is_none());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let dispatch = TokenizerDispatch::new(Box::new(WholeTextMarker));
        dispatch.request("first".to_string(), SyntaxScheme::darcula());
        dispatch.request("a longer second text".to_string(), SyntaxScheme::darcula());
        let spans = poll_until(&dispatch, Duration::from_secs(5)).expect("pass did not finish");
        // Only the second snapshot's spans may ever surface.
        assert_eq!(spans, vec![StyleSpan::new(0, 20, TokenKind::Keyword)]);
        // And nothing else arrives afterwards.
        assert!(poll_until(&dispatch, Duration::from_millis(100)).is_none());
    }
}
