//! Position descriptor and FEN notation.
//!
//! Parsing only checks that the notation is well formed: eight ranks of eight
//! files, known piece letters, `w`/`b`, castling rights in `KQkq` order, a
//! square or `-` for en passant, and two plain decimal clocks. Whether the
//! position is reachable in a real game is not checked.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Piece for a FEN letter (uppercase is white).
    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, kind })
    }

    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A board square. `file` 0 is the a-file, `rank` 0 is the first rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => Ok(Self {
                file: f as u8 - b'a',
                rank: r as u8 - b'1',
            }),
            _ => Err(format!("invalid square \"{s}\"")),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: Self = Self {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    fn flags(self) -> [(char, bool); 4] {
        [
            ('K', self.white_kingside),
            ('Q', self.white_queenside),
            ('k', self.black_kingside),
            ('q', self.black_queenside),
        ]
    }
}

impl FromStr for CastlingRights {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::default());
        }
        let mut rights = Self::default();
        let mut rest = s;
        for (letter, slot) in [
            ('K', &mut rights.white_kingside),
            ('Q', &mut rights.white_queenside),
            ('k', &mut rights.black_kingside),
            ('q', &mut rights.black_queenside),
        ] {
            if let Some(tail) = rest.strip_prefix(letter) {
                *slot = true;
                rest = tail;
            }
        }
        if s.is_empty() || !rest.is_empty() {
            return Err(format!(
                "castling rights \"{s}\" must be '-' or a subset of KQkq in that order"
            ));
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self
            .flags()
            .iter()
            .filter(|(_, set)| *set)
            .map(|(c, _)| *c)
            .collect();
        if letters.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&letters)
        }
    }
}

/// A complete chess position as described by FEN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Cells in FEN order: a8, b8, ..., h8, a7, ..., h1.
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    /// The standard starting position.
    pub fn start() -> Self {
        START_FEN
            .parse()
            .unwrap_or_else(|e| unreachable!("START_FEN is well formed: {e}"))
    }

    /// An empty board with white to move and no rights.
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse FEN, reporting the first problem found.
    pub fn from_fen(fen: &str) -> Result<Self, CodecError> {
        parse_fen(fen).map_err(|reason| CodecError::MalformedPosition {
            notation: fen.to_string(),
            reason,
        })
    }

    /// Render as FEN.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Position {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, rank) in self.board.chunks(8).enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0;
            for cell in rank {
                match cell {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_char())?;
                    }
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            f,
            " {side} {} {en_passant} {} {}",
            self.castling, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_fen(fen: &str) -> Result<Position, String> {
    let fields: Vec<&str> = fen.split(' ').collect();
    if fields.len() != 6 {
        return Err(format!("expected 6 space-separated fields, found {}", fields.len()));
    }

    let board = parse_placement(fields[0])?;
    let side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(format!("side to move must be 'w' or 'b', found \"{other}\"")),
    };
    let castling = fields[2].parse()?;
    let en_passant = match fields[3] {
        "-" => None,
        square => Some(square.parse()?),
    };
    let halfmove_clock = parse_counter("halfmove clock", fields[4])?;
    let fullmove_number = parse_counter("fullmove number", fields[5])?;

    Ok(Position {
        board,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], String> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(format!("expected 8 ranks, found {}", ranks.len()));
    }

    let mut board = [None; 64];
    for (r, rank) in ranks.iter().enumerate() {
        let mut file = 0usize;
        let mut previous_was_digit = false;
        for c in rank.chars() {
            match c {
                '1'..='8' => {
                    if previous_was_digit {
                        return Err(format!("rank {} has adjacent empty-run digits", 8 - r));
                    }
                    file += c as usize - '0' as usize;
                    previous_was_digit = true;
                }
                _ => {
                    let piece = Piece::from_char(c)
                        .ok_or_else(|| format!("invalid character '{c}' in rank {}", 8 - r))?;
                    if file < 8 {
                        board[r * 8 + file] = Some(piece);
                    }
                    file += 1;
                    previous_was_digit = false;
                }
            }
            if file > 8 {
                return Err(format!("rank {} covers more than 8 files", 8 - r));
            }
        }
        if file != 8 {
            return Err(format!("rank {} covers {file} files, expected 8", 8 - r));
        }
    }
    Ok(board)
}

fn parse_counter(label: &str, field: &str) -> Result<u32, String> {
    let value: u32 = field
        .parse()
        .map_err(|_| format!("{label} \"{field}\" is not a non-negative integer"))?;
    if value.to_string() != field {
        return Err(format!("{label} \"{field}\" must be written without sign or leading zeros"));
    }
    Ok(value)
}
