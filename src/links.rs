//! Links to an online analysis board and board editor for a position.

use serde::{Deserialize, Serialize};

use crate::position::START_FEN;

/// Default analysis board, which accepts FEN with spaces replaced by `_`.
pub const ANALYSIS_BASE: &str = "https://lichess.org/analysis/";
/// Default board editor.
pub const EDITOR_BASE: &str = "https://lichess.org/editor/";

/// Base URLs for position links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub analysis_base: String,
    pub editor_base: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            analysis_base: ANALYSIS_BASE.into(),
            editor_base: EDITOR_BASE.into(),
        }
    }
}

impl LinkConfig {
    /// Analysis board for `fen`, where the next move can be played.
    pub fn analysis_url(&self, fen: &str) -> String {
        join(&self.analysis_base, fen)
    }

    /// Board editor opened on `fen`, or on the start position when `None`.
    pub fn editor_url(&self, fen: Option<&str>) -> String {
        join(&self.editor_base, fen.unwrap_or(START_FEN))
    }
}

fn join(base: &str, fen: &str) -> String {
    format!("{base}{}", fen.replace(' ', "_"))
}
