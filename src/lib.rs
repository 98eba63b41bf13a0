// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # covert-chess
//!
//! Encode a chess position (FEN) as 25 emoji and hide those emoji inside an
//! ordinary text message, then recover the position from the message.
//!
//! ## Architecture
//!
//! - **Alphabet** (`alphabet`): the fully-qualified emoji of a Unicode
//!   `emoji-test.txt` file, in order, with a loose variant for less-qualified
//!   renderings
//! - **Position** (`position`): FEN parsing and formatting
//! - **Codec** (`codec`): mixed-radix packing of a position into 25 alphabet indices
//! - **Interleave** (`interleave`): even spreading of emoji through text, and extraction
//! - **Links** (`links`): analysis board / editor URLs for a position
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use covert_chess::alphabet::Alphabet;
//! use covert_chess::{codec, interleave};
//! use covert_chess::position::Position;
//!
//! let alphabet = Alphabet::load(Path::new("emoji-test.txt")).unwrap();
//! let position = Position::start();
//! let sequence = codec::encode(&alphabet, &position).unwrap();
//! let message = interleave::mix_sequence(&alphabet, &sequence, "see you at noon").unwrap();
//!
//! let recovered = codec::SymbolSequence::from_text(&alphabet, &message).unwrap();
//! assert_eq!(codec::decode(&alphabet, &recovered).unwrap(), position);
//! ```

pub mod alphabet;
pub mod codec;
pub mod config;
pub mod error;
pub mod interleave;
pub mod links;
pub mod paths;
pub mod position;
