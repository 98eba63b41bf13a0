//! Rich diagnostic error types for covert-chess.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know what went wrong with a
//! position, an emoji sequence, or the alphabet table.

use miette::Diagnostic;
use thiserror::Error;

use crate::alphabet::AlphabetError;
use crate::config::ConfigError;

/// Top-level error type for covert-chess.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum CovertError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error("malformed position \"{notation}\": {reason}")]
    #[diagnostic(
        code(covert::codec::malformed_position),
        help(
            "Positions use FEN: six space-separated fields, e.g. \
             `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`. \
             Castling rights must be listed in KQkq order and clocks must be \
             plain decimal numbers."
        )
    )]
    MalformedPosition { notation: String, reason: String },

    #[error("malformed emoji sequence: {reason}")]
    #[diagnostic(
        code(covert::codec::malformed_sequence),
        help(
            "An encoded position is exactly 25 emoji. If the message was mixed \
             into text, make sure no emoji were added or removed along the way."
        )
    )]
    MalformedSequence { reason: String },

    #[error("unknown symbol \"{symbol}\"")]
    #[diagnostic(
        code(covert::codec::unknown_symbol),
        help(
            "The text contains characters that are not part of the emoji alphabet. \
             Check that the alphabet file matches the one used for encoding."
        )
    )]
    UnknownSymbol { symbol: String },

    #[error("alphabet index {index} out of range (alphabet has {len} symbols)")]
    #[diagnostic(
        code(covert::codec::index_out_of_range),
        help(
            "This is an internal invariant violation. The alphabet table is \
             probably truncated or corrupted; reload it from a complete emoji-test file."
        )
    )]
    IndexOutOfRange { index: usize, len: usize },

    #[error("move counters do not fit: halfmove {halfmove}, fullmove {fullmove} ({reason})")]
    #[diagnostic(
        code(covert::codec::capacity_overflow),
        help(
            "The halfmove clock must be at most 100 and the combined move counters \
             must fit in two emoji. Reset the counters before encoding."
        )
    )]
    CapacityOverflow {
        halfmove: u32,
        fullmove: u32,
        reason: String,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Result type for operations that span several subsystems.
pub type CovertResult<T> = std::result::Result<T, CovertError>;
