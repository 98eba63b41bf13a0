//! Position codec: FEN position ↔ 25 emoji.
//!
//! Every field of the position is packed into alphabet indices with
//! mixed-radix arithmetic:
//!
//! | Symbols | Content | Index |
//! |---------|---------|-------|
//! | 0 | cell a8 | `2441 + v` |
//! | 1–21 | cells in triples | `(i·1111 + v0·169 + v1·13 + v2) mod N` |
//! | 22 | side, castling, en passant | `1040·black + 520·K + 260·Q + 130·k + 65·q + ep` |
//! | 23–24 | move counters | `halfmove + 101·fullmove` as two base-N digits |
//!
//! Cell values are 0 for empty, 1–6 for `PNBRQK` and 7–12 for `pnbrqk`.
//! The per-triple phase `i·1111` keeps neighbouring triples from sharing
//! emoji. Each triple inverts on its own because 13³ ≤ N.
//!
//! The arithmetic lives in [`pack`] and [`unpack`], which only need N.
//! [`encode`] and [`decode`] map between indices and emoji.

use crate::alphabet::Alphabet;
use crate::error::{CodecError, CodecResult};
use crate::position::{CastlingRights, Color, Piece, PieceKind, Position, Square};

/// Number of emoji in an encoded position.
pub const SEQUENCE_LEN: usize = 25;
/// Alphabet index of the emoji for an empty a8.
pub const BASE_OFFSET: usize = 2441;
/// Number of three-cell symbols.
pub const TRIPLE_COUNT: usize = 21;
/// Index phase added per triple.
pub const TRIPLE_PHASE: usize = 1111;
/// Radix separating the halfmove clock from the fullmove number.
pub const MOVE_RADIX: usize = 101;
/// Largest halfmove clock that survives a round trip.
pub const MAX_HALFMOVE: u32 = (MOVE_RADIX - 1) as u32;

const CELL_RADIX: usize = 13;
const SIDE_WEIGHT: usize = 1040;
/// K, Q, k, q.
const CASTLING_WEIGHTS: [usize; 4] = [520, 260, 130, 65];
const EN_PASSANT_RADIX: usize = 65;
const MAX_GAME_STATE: usize = SIDE_WEIGHT
    + CASTLING_WEIGHTS[0]
    + CASTLING_WEIGHTS[1]
    + CASTLING_WEIGHTS[2]
    + CASTLING_WEIGHTS[3]
    + 64;

/// Smallest alphabet the codec can count in.
pub const MIN_ALPHABET_LEN: usize = BASE_OFFSET + CELL_RADIX;

const _: () = assert!(MAX_GAME_STATE < MIN_ALPHABET_LEN);
const _: () = assert!(CELL_RADIX * CELL_RADIX * CELL_RADIX <= MIN_ALPHABET_LEN);
const _: () = assert!(1 + 3 * TRIPLE_COUNT == 64);

/// An encoded position: 25 alphabet indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolSequence {
    indices: [usize; SEQUENCE_LEN],
}

impl SymbolSequence {
    /// Wrap raw indices, which must number exactly 25.
    pub fn from_indices(indices: &[usize]) -> CodecResult<Self> {
        let indices: [usize; SEQUENCE_LEN] =
            indices.try_into().map_err(|_| CodecError::MalformedSequence {
                reason: format!("expected {SEQUENCE_LEN} symbols, found {}", indices.len()),
            })?;
        Ok(Self { indices })
    }

    /// Parse a bare emoji sequence.
    ///
    /// Whitespace between emoji is allowed. Anything else that is not an
    /// alphabet symbol is an `UnknownSymbol` error.
    pub fn parse(alphabet: &Alphabet, text: &str) -> CodecResult<Self> {
        let mut indices = Vec::with_capacity(SEQUENCE_LEN);
        let mut cursor = 0;
        for m in alphabet.scan(text) {
            reject_gap(&text[cursor..m.start])?;
            indices.push(m.index);
            cursor = m.end;
        }
        reject_gap(&text[cursor..])?;
        Self::from_indices(&indices)
    }

    /// Pull the emoji out of text that may have words mixed in, then
    /// require exactly 25 of them.
    pub fn from_text(alphabet: &Alphabet, text: &str) -> CodecResult<Self> {
        let indices: Vec<usize> = alphabet.scan(text).map(|m| m.index).collect();
        Self::from_indices(&indices)
    }

    pub fn indices(&self) -> &[usize; SEQUENCE_LEN] {
        &self.indices
    }

    /// Canonical emoji, one per index.
    pub fn symbols<'a>(&self, alphabet: &'a Alphabet) -> CodecResult<Vec<&'a str>> {
        self.indices
            .iter()
            .map(|&index| alphabet.symbol_at(index))
            .collect()
    }

    /// Canonical emoji concatenated with no separators.
    pub fn render(&self, alphabet: &Alphabet) -> CodecResult<String> {
        Ok(self.symbols(alphabet)?.concat())
    }
}

fn reject_gap(gap: &str) -> CodecResult<()> {
    let gap = gap.trim();
    if gap.is_empty() {
        Ok(())
    } else {
        Err(CodecError::UnknownSymbol {
            symbol: gap.to_string(),
        })
    }
}

/// Encode a position into alphabet emoji.
pub fn encode(alphabet: &Alphabet, position: &Position) -> CodecResult<SymbolSequence> {
    let indices = pack(position, alphabet.len())?;
    tracing::debug!(fen = %position, ?indices, "encoded position");
    Ok(SymbolSequence { indices })
}

/// Decode emoji back into a position.
pub fn decode(alphabet: &Alphabet, sequence: &SymbolSequence) -> CodecResult<Position> {
    let position = unpack(sequence.indices(), alphabet.len())?;
    tracing::debug!(fen = %position, "decoded position");
    Ok(position)
}

/// Parse FEN and return its emoji encoding.
pub fn encode_fen(alphabet: &Alphabet, fen: &str) -> CodecResult<String> {
    let position = Position::from_fen(fen)?;
    encode(alphabet, &position)?.render(alphabet)
}

/// Decode a bare emoji sequence into FEN.
pub fn decode_to_fen(alphabet: &Alphabet, emoji: &str) -> CodecResult<String> {
    let sequence = SymbolSequence::parse(alphabet, emoji)?;
    Ok(decode(alphabet, &sequence)?.to_fen())
}

/// Pack a position into alphabet indices for an alphabet of `n` symbols.
pub fn pack(position: &Position, n: usize) -> CodecResult<[usize; SEQUENCE_LEN]> {
    check_capacity(n)?;
    let moves = move_total(position, n)?;

    let cells: Vec<usize> = position.board.iter().map(|&cell| cell_value(cell)).collect();
    let mut indices = [0usize; SEQUENCE_LEN];

    indices[0] = BASE_OFFSET + cells[0];
    for (i, triple) in cells[1..].chunks_exact(3).enumerate() {
        let value = triple[0] * CELL_RADIX * CELL_RADIX + triple[1] * CELL_RADIX + triple[2];
        indices[1 + i] = (i * TRIPLE_PHASE + value) % n;
    }
    indices[1 + TRIPLE_COUNT] = game_state_value(position);
    indices[2 + TRIPLE_COUNT] = (moves / n as u64) as usize;
    indices[3 + TRIPLE_COUNT] = (moves % n as u64) as usize;

    Ok(indices)
}

/// Inverse of [`pack`].
pub fn unpack(indices: &[usize; SEQUENCE_LEN], n: usize) -> CodecResult<Position> {
    check_capacity(n)?;
    if let Some(&index) = indices.iter().find(|&&index| index >= n) {
        return Err(CodecError::IndexOutOfRange { index, len: n });
    }

    let mut position = Position::empty();

    let head = indices[0]
        .checked_sub(BASE_OFFSET)
        .filter(|&v| v < CELL_RADIX)
        .ok_or_else(|| CodecError::MalformedSequence {
            reason: format!("first symbol (index {}) does not encode a square", indices[0]),
        })?;
    position.board[0] = cell_from_value(head)?;

    for i in 0..TRIPLE_COUNT {
        let value = (indices[1 + i] + n - (i * TRIPLE_PHASE) % n) % n;
        let values = [
            value / (CELL_RADIX * CELL_RADIX),
            (value / CELL_RADIX) % CELL_RADIX,
            value % CELL_RADIX,
        ];
        for (k, v) in values.into_iter().enumerate() {
            position.board[1 + 3 * i + k] = cell_from_value(v)?;
        }
    }

    let state = indices[1 + TRIPLE_COUNT];
    let flags = state / EN_PASSANT_RADIX;
    position.side_to_move = if flags >= 16 { Color::Black } else { Color::White };
    position.castling = CastlingRights {
        white_kingside: flags & 8 != 0,
        white_queenside: flags & 4 != 0,
        black_kingside: flags & 2 != 0,
        black_queenside: flags & 1 != 0,
    };
    position.en_passant = en_passant_square(state % EN_PASSANT_RADIX);

    let moves = indices[2 + TRIPLE_COUNT] as u64 * n as u64 + indices[3 + TRIPLE_COUNT] as u64;
    position.halfmove_clock = (moves % MOVE_RADIX as u64) as u32;
    position.fullmove_number = u32::try_from(moves / MOVE_RADIX as u64).map_err(|_| {
        CodecError::MalformedSequence {
            reason: format!("move counter value {moves} is out of range"),
        }
    })?;

    Ok(position)
}

fn check_capacity(n: usize) -> CodecResult<()> {
    if n < MIN_ALPHABET_LEN {
        return Err(CodecError::IndexOutOfRange {
            index: MIN_ALPHABET_LEN - 1,
            len: n,
        });
    }
    Ok(())
}

fn move_total(position: &Position, n: usize) -> CodecResult<u64> {
    let halfmove = position.halfmove_clock;
    let fullmove = position.fullmove_number;
    let overflow = |reason: String| CodecError::CapacityOverflow {
        halfmove,
        fullmove,
        reason,
    };

    if halfmove > MAX_HALFMOVE {
        return Err(overflow(format!("halfmove clock exceeds {MAX_HALFMOVE}")));
    }
    let total = u64::from(halfmove) + u64::from(fullmove) * MOVE_RADIX as u64;
    let limit = n as u64 * n as u64;
    if total >= limit {
        return Err(overflow(format!(
            "combined value {total} does not fit below {limit}"
        )));
    }
    Ok(total)
}

fn game_state_value(position: &Position) -> usize {
    let castling = position.castling;
    let mut value = match position.side_to_move {
        Color::White => 0,
        Color::Black => SIDE_WEIGHT,
    };
    for (set, weight) in [
        castling.white_kingside,
        castling.white_queenside,
        castling.black_kingside,
        castling.black_queenside,
    ]
    .into_iter()
    .zip(CASTLING_WEIGHTS)
    {
        if set {
            value += weight;
        }
    }
    value + en_passant_value(position.en_passant)
}

/// 0 for none, else 1–64 counting from a8 across each rank.
fn en_passant_value(square: Option<Square>) -> usize {
    square.map_or(0, |sq| 8 * (7 - sq.rank() as usize) + sq.file() as usize + 1)
}

fn en_passant_square(value: usize) -> Option<Square> {
    let v = value.checked_sub(1)?;
    Square::new((v % 8) as u8, (7 - v / 8) as u8)
}

fn cell_value(cell: Option<Piece>) -> usize {
    let Some(piece) = cell else {
        return 0;
    };
    let kind = match piece.kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 2,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 4,
        PieceKind::Queen => 5,
        PieceKind::King => 6,
    };
    match piece.color {
        Color::White => kind,
        Color::Black => kind + 6,
    }
}

fn cell_from_value(value: usize) -> CodecResult<Option<Piece>> {
    match value {
        0 => Ok(None),
        1..=6 => Ok(Some(Piece::new(Color::White, PieceKind::ALL[value - 1]))),
        7..=12 => Ok(Some(Piece::new(Color::Black, PieceKind::ALL[value - 7]))),
        _ => Err(CodecError::MalformedSequence {
            reason: format!("cell value {value} is not a piece"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::START_FEN;

    const N: usize = 3178;

    fn fen(s: &str) -> Position {
        Position::from_fen(s).unwrap()
    }

    #[test]
    fn start_position_indices() {
        let indices = pack(&Position::start(), N).unwrap();
        // a8 holds a black rook.
        assert_eq!(indices[0], BASE_OFFSET + 10);
        // b8 c8 d8 = n b q.
        assert_eq!(indices[1], 8 * 169 + 9 * 13 + 11);
        // White to move with all four rights, no en passant.
        assert_eq!(indices[22], 520 + 260 + 130 + 65);
        // 0 + 1 * 101.
        assert_eq!(indices[23], 0);
        assert_eq!(indices[24], 101);
    }

    #[test]
    fn triple_phase_wraps_modulo_alphabet() {
        // Triple 20 covers f1 g1 h1; an empty board puts it at 20 * 1111 mod N.
        let indices = pack(&Position::empty(), N).unwrap();
        assert_eq!(indices[21], (20 * TRIPLE_PHASE) % N);
        assert_eq!(indices[3], 2 * TRIPLE_PHASE);
    }

    #[test]
    fn start_position_round_trips() {
        let indices = pack(&Position::start(), N).unwrap();
        assert_eq!(unpack(&indices, N).unwrap().to_fen(), START_FEN);
    }

    #[test]
    fn game_state_round_trips_for_every_combination() {
        let mut base = Position::empty();
        for black in [false, true] {
            for bits in 0u8..16 {
                for ep in 0..=64usize {
                    base.side_to_move = if black { Color::Black } else { Color::White };
                    base.castling = CastlingRights {
                        white_kingside: bits & 8 != 0,
                        white_queenside: bits & 4 != 0,
                        black_kingside: bits & 2 != 0,
                        black_queenside: bits & 1 != 0,
                    };
                    base.en_passant = en_passant_square(ep);
                    let indices = pack(&base, N).unwrap();
                    assert!(indices[22] <= MAX_GAME_STATE);
                    let back = unpack(&indices, N).unwrap();
                    assert_eq!(back.side_to_move, base.side_to_move);
                    assert_eq!(back.castling, base.castling);
                    assert_eq!(back.en_passant, base.en_passant);
                }
            }
        }
    }

    #[test]
    fn en_passant_numbering() {
        assert_eq!(en_passant_value("a8".parse().ok()), 1);
        assert_eq!(en_passant_value("h8".parse().ok()), 8);
        assert_eq!(en_passant_value("e3".parse().ok()), 8 * 5 + 5);
        assert_eq!(en_passant_value("h1".parse().ok()), 64);
        assert_eq!(en_passant_value(None), 0);
        assert_eq!(en_passant_square(45).map(|s| s.to_string()), Some("e3".into()));
    }

    #[test]
    fn every_cell_value_round_trips_in_every_slot() {
        for value in 0..CELL_RADIX {
            let piece = cell_from_value(value).unwrap();
            let mut pos = Position::empty();
            pos.board = [piece; 64];
            let back = unpack(&pack(&pos, N).unwrap(), N).unwrap();
            assert_eq!(back.board, pos.board);
            assert_eq!(cell_value(piece), value);
        }
    }

    #[test]
    fn move_counters_round_trip_at_bounds() {
        let limit = (N * N - 1 - 100) / MOVE_RADIX;
        for (half, full) in [(0, 0), (0, 1), (100, 1), (57, 31_000), (100, limit as u32)] {
            let mut pos = Position::empty();
            pos.halfmove_clock = half;
            pos.fullmove_number = full;
            let back = unpack(&pack(&pos, N).unwrap(), N).unwrap();
            assert_eq!((back.halfmove_clock, back.fullmove_number), (half, full));
        }
    }

    #[test]
    fn halfmove_above_100_is_capacity_overflow() {
        let pos = fen("8/8/8/8/8/8/8/8 w - - 101 1");
        assert!(matches!(
            pack(&pos, N),
            Err(CodecError::CapacityOverflow { halfmove: 101, .. })
        ));
    }

    #[test]
    fn move_total_beyond_two_digits_is_capacity_overflow() {
        let mut pos = Position::empty();
        pos.fullmove_number = (N * N / MOVE_RADIX + 1) as u32;
        assert!(matches!(
            pack(&pos, N),
            Err(CodecError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn small_alphabet_is_rejected() {
        assert!(matches!(
            pack(&Position::start(), MIN_ALPHABET_LEN - 1),
            Err(CodecError::IndexOutOfRange { .. })
        ));
        assert!(pack(&Position::start(), MIN_ALPHABET_LEN).is_ok());
    }

    #[test]
    fn foreign_head_symbol_is_malformed() {
        let mut indices = pack(&Position::start(), N).unwrap();
        indices[0] = 17;
        assert!(matches!(
            unpack(&indices, N),
            Err(CodecError::MalformedSequence { .. })
        ));
    }

    #[test]
    fn foreign_triple_symbol_outside_cell_range_is_malformed() {
        let mut indices = pack(&Position::empty(), N).unwrap();
        // 13^3 lands on a first cell value of 13.
        indices[1] = CELL_RADIX * CELL_RADIX * CELL_RADIX;
        assert!(matches!(
            unpack(&indices, N),
            Err(CodecError::MalformedSequence { .. })
        ));
    }

    #[test]
    fn index_beyond_alphabet_is_out_of_range() {
        let mut indices = pack(&Position::start(), N).unwrap();
        indices[5] = N;
        assert!(matches!(
            unpack(&indices, N),
            Err(CodecError::IndexOutOfRange { index, len: N }) if index == N
        ));
    }

    #[test]
    fn from_indices_requires_exactly_25() {
        for len in [0, 24, 26] {
            let raw = vec![0usize; len];
            assert!(matches!(
                SymbolSequence::from_indices(&raw),
                Err(CodecError::MalformedSequence { .. })
            ));
        }
        assert!(SymbolSequence::from_indices(&[0; SEQUENCE_LEN]).is_ok());
    }
}
