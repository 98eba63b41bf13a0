//! Hiding positions in messages and recovering them.

mod common;

use covert_chess::codec::{self, SymbolSequence};
use covert_chess::error::CodecError;
use covert_chess::interleave;
use covert_chess::position::{Position, START_FEN};

#[test]
fn mixed_start_position_extracts_back_to_canonical_emoji() {
    let alphabet = common::alphabet();
    let sequence = codec::encode(&alphabet, &Position::start()).unwrap();

    let mixed = interleave::mix_sequence(&alphabet, &sequence, common::MESSAGE).unwrap();
    assert_eq!(
        interleave::extract(&alphabet, &mixed),
        sequence.render(&alphabet).unwrap()
    );
}

#[test]
fn mix_keeps_every_word_in_order() {
    let alphabet = common::alphabet();
    let sequence = codec::encode(&alphabet, &Position::start()).unwrap();
    let mixed = interleave::mix_sequence(&alphabet, &sequence, common::MESSAGE).unwrap();

    let words: Vec<&str> = common::MESSAGE.split_whitespace().collect();
    let tokens: Vec<&str> = mixed.split(' ').collect();
    assert_eq!(tokens.len(), words.len() + 25);

    let kept: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| alphabet.describe(t).is_none())
        .collect();
    assert_eq!(kept, words);
}

#[test]
fn symbols_are_spread_through_the_message() {
    let alphabet = common::alphabet();
    let sequence = codec::encode(&alphabet, &Position::start()).unwrap();
    let mixed = interleave::mix_sequence(&alphabet, &sequence, common::MESSAGE).unwrap();

    let tokens: Vec<&str> = mixed.split(' ').collect();
    let first_word = tokens.iter().position(|t| alphabet.describe(t).is_none()).unwrap();
    let last_word = tokens.iter().rposition(|t| alphabet.describe(t).is_none()).unwrap();
    let symbols_between = tokens[first_word..=last_word]
        .iter()
        .filter(|t| alphabet.describe(t).is_some())
        .count();
    assert!(symbols_between >= 23, "symbols bunched at an end: {mixed}");
}

#[test]
fn empty_message_yields_bare_symbols() {
    let alphabet = common::alphabet();
    let sequence = codec::encode(&alphabet, &Position::start()).unwrap();
    let mixed = interleave::mix_sequence(&alphabet, &sequence, "   ").unwrap();
    assert_eq!(mixed, sequence.symbols(&alphabet).unwrap().join(" "));
    assert_eq!(codec::decode_to_fen(&alphabet, &mixed).unwrap(), START_FEN);
}

#[test]
fn message_without_symbols_extracts_nothing() {
    let alphabet = common::alphabet();
    assert_eq!(interleave::extract(&alphabet, common::MESSAGE), "");
    assert!(interleave::extract_indices(&alphabet, "").is_empty());
}

#[test]
fn symbols_glued_to_words_are_found() {
    let alphabet = common::alphabet();
    let a = alphabet.symbol_at(300).unwrap();
    let b = alphabet.symbol_at(2000).unwrap();
    let text = format!("hello{a}world, see{b}you");
    assert_eq!(interleave::extract_indices(&alphabet, &text), vec![300, 2000]);
    assert_eq!(interleave::extract(&alphabet, &text), format!("{a}{b}"));
}

#[test]
fn loose_renderings_come_back_fully_qualified() {
    let alphabet = common::alphabet();
    let indices = [0usize, 17, 255, 1200, 3000];
    let loose: Vec<&str> = indices.iter().map(|&i| alphabet.loose_at(i).unwrap()).collect();
    let canonical: String = indices
        .iter()
        .map(|&i| alphabet.symbol_at(i).unwrap())
        .collect();

    let mixed = interleave::mix(&loose, "one two three four five six");
    assert_eq!(interleave::extract_indices(&alphabet, &mixed), indices);
    assert_eq!(interleave::extract(&alphabet, &mixed), canonical);
}

#[test]
fn full_pipeline_recovers_the_position() {
    let alphabet = common::alphabet();
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let sequence = codec::encode(&alphabet, &Position::from_fen(fen).unwrap()).unwrap();
    let mixed = interleave::mix_sequence(&alphabet, &sequence, common::MESSAGE).unwrap();

    let extracted = interleave::extract(&alphabet, &mixed);
    assert_eq!(codec::decode_to_fen(&alphabet, &extracted).unwrap(), fen);

    let recovered = SymbolSequence::from_text(&alphabet, &mixed).unwrap();
    assert_eq!(recovered, sequence);
}

#[test]
fn extra_symbol_in_message_is_malformed() {
    let alphabet = common::alphabet();
    let sequence = codec::encode(&alphabet, &Position::start()).unwrap();
    let mixed = interleave::mix_sequence(&alphabet, &sequence, common::MESSAGE).unwrap();
    let tampered = format!("{mixed} {}", alphabet.symbol_at(42).unwrap());

    assert!(matches!(
        SymbolSequence::from_text(&alphabet, &tampered),
        Err(CodecError::MalformedSequence { .. })
    ));
    let extracted = interleave::extract(&alphabet, &tampered);
    assert!(matches!(
        codec::decode_to_fen(&alphabet, &extracted),
        Err(CodecError::MalformedSequence { .. })
    ));
}
