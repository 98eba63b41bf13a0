//! Hiding an emoji sequence in ordinary text and getting it back.
//!
//! [`mix`] spreads the emoji evenly through the words of a message: each
//! element `i` of a list of length `L` is given the target position
//! `(i + 1) / (L + 1)` and the two lists are merged by target. A short
//! sequence in a long message therefore ends up scattered across the whole
//! message instead of bunched at one end.
//!
//! [`extract`] does not need the words at all. It scans for alphabet
//! symbols anywhere in the text, including glued to words, and returns them
//! in canonical form.

use crate::alphabet::{Alphabet, Variant};
use crate::codec::SymbolSequence;
use crate::error::CodecResult;

/// Merge two lists so that each is spread evenly over the result.
///
/// Both lists keep their internal order. When two heads have the same target
/// position the element from `second` goes first.
pub fn interleave_evenly<T>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let (len_a, len_b) = (first.len(), second.len());
    let mut merged = Vec::with_capacity(len_a + len_b);
    let mut a = first.into_iter().enumerate().peekable();
    let mut b = second.into_iter().enumerate().peekable();

    loop {
        let take_first = match (a.peek(), b.peek()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            // (i+1)/(len_a+1) < (j+1)/(len_b+1), compared without rounding.
            (Some(&(i, _)), Some(&(j, _))) => (i + 1) * (len_b + 1) < (j + 1) * (len_a + 1),
        };
        let next = if take_first { a.next() } else { b.next() };
        if let Some((_, item)) = next {
            merged.push(item);
        }
    }

    merged
}

/// Mix `symbols` into the whitespace-separated words of `message`.
///
/// The result is the merged tokens joined by single spaces.
pub fn mix<S: AsRef<str>>(symbols: &[S], message: &str) -> String {
    let words: Vec<&str> = message.split_whitespace().collect();
    let symbols: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
    interleave_evenly(words, symbols).join(" ")
}

/// Mix an encoded position into `message` using its canonical emoji.
pub fn mix_sequence(
    alphabet: &Alphabet,
    sequence: &SymbolSequence,
    message: &str,
) -> CodecResult<String> {
    let symbols = sequence.symbols(alphabet)?;
    Ok(mix(&symbols, message))
}

/// Alphabet indices of every symbol in `text`, left to right.
pub fn extract_indices(alphabet: &Alphabet, text: &str) -> Vec<usize> {
    alphabet.scan(text).map(|m| m.index).collect()
}

/// Every alphabet symbol in `text`, in canonical form, concatenated.
///
/// Loose renderings come back fully qualified. Text without symbols gives an
/// empty string.
pub fn extract(alphabet: &Alphabet, text: &str) -> String {
    let canonical = alphabet.entries(Variant::Canonical);
    alphabet
        .scan(text)
        .map(|m| canonical[m.index].symbol.as_str())
        .collect()
}
