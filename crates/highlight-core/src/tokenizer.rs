//! The pluggable tokenizer seam.
//!
//! A tokenizer turns a full-text snapshot plus the active color scheme into
//! style spans. Implementations are grammar-specific and installed on the
//! engine by the host; choosing one (by file extension, user override, ...)
//! is host policy, not engine logic. The synchronous entry point defined
//! here is wrapped by [`TokenizerDispatch`](crate::dispatch::TokenizerDispatch),
//! which provides the cancellable off-thread execution the engine uses on
//! the edit path.

use crate::scheme::SyntaxScheme;
use crate::span::StyleSpan;

/// A grammar-specific analyzer that produces style spans from source text.
///
/// Implementations must be `Send`: passes run on the dispatch worker
/// thread. A tokenizer may keep internal state between passes (caches,
/// interned tables), hence `&mut self`; the dispatch guarantees passes on
/// one tokenizer never run concurrently.
pub trait Tokenizer: Send {
    /// Tokenize `text` and return style spans in character offsets.
    ///
    /// `scheme` is the scheme the pass was started with; tokenizers that
    /// resolve categories purely structurally can ignore it.
    fn tokenize(&mut self, text: &str, scheme: &SyntaxScheme) -> Vec<StyleSpan>;
}
