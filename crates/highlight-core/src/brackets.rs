//! Matching-delimiter scan.
//!
//! When the caret sits immediately after one of the fixed delimiters
//! `{ [ ( } ] )`, the engine scans for its partner, tracking nesting depth,
//! and highlights both. The scan walks outward from the caret and costs
//! O(distance to the match); there is no distance cap, so a pathologically
//! unbalanced buffer is scanned to its end before giving up.

use crate::span::BracketPair;
use ropey::Rope;

/// The fixed delimiter table. The entry at index `i` pairs with the entry at
/// `(i + 3) % 6`; the first three are the opening delimiters.
pub const DELIMITERS: [char; 6] = ['{', '[', '(', '}', ']', ')'];

/// Find the delimiter pair for a caret at character offset `caret`.
///
/// The character inspected is the one **before** the caret, matching how a
/// caret visually trails the delimiter just typed or stepped over. Returns
/// `None` when that character is not a delimiter, when the caret is at the
/// start of the document, or when the scan exhausts the buffer without
/// balancing.
pub fn match_at(text: &Rope, caret: usize) -> Option<BracketPair> {
    if caret == 0 || caret > text.len_chars() {
        return None;
    }
    let ch = text.char(caret - 1);
    let index = DELIMITERS.iter().position(|&d| d == ch)?;
    let partner = DELIMITERS[(index + 3) % 6];
    if index <= 2 {
        scan_forward(text, caret, ch, partner).map(|close| BracketPair {
            open: caret - 1,
            close,
        })
    } else {
        scan_backward(text, caret, ch, partner).map(|open| BracketPair {
            open,
            close: caret - 1,
        })
    }
}

/// Scan right from `from` for the partner of an opening delimiter. `same`
/// deepens the nesting, `partner` closes it. Returns the partner's offset.
fn scan_forward(text: &Rope, from: usize, same: char, partner: char) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    for ch in text.chars_at(from) {
        if ch == partner {
            depth -= 1;
        } else if ch == same {
            depth += 1;
        }
        if depth == 0 {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Scan left from the delimiter at `caret - 1` for its opening partner.
fn scan_backward(text: &Rope, caret: usize, same: char, partner: char) -> Option<usize> {
    if caret < 2 {
        return None;
    }
    let mut depth = 1usize;
    let mut pos = caret - 2;
    let mut chars = text.chars_at(caret - 1);
    while let Some(ch) = chars.prev() {
        if ch == partner {
            depth -= 1;
        } else if ch == same {
            depth += 1;
        }
        if depth == 0 {
            return Some(pos);
        }
        if pos == 0 {
            break;
        }
        pos -= 1;
    }
    None
}
