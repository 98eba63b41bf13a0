//! Emoji alphabet: the ordered symbol table the position codec counts in.
//!
//! The alphabet is read from a Unicode `emoji-test.txt` file. Every
//! fully-qualified emoji becomes one digit, in file order. A second,
//! index-aligned *loose* variant holds the minimally-qualified or unqualified
//! rendering of a digit where the file lists one, so text that lost its
//! variation selectors still resolves to the right index.
//!
//! ## Components
//!
//! - [`loader`]: `emoji-test.txt` record parser
//! - [`scan`]: leftmost-longest symbol scanner over arbitrary text
//!
//! The table is immutable once built. [`shared`] caches one instance for the
//! whole process.

pub mod loader;
pub mod scan;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::error::{CodecError, CodecResult};

pub use scan::SymbolMatch;

/// Errors that can occur while building the alphabet.
#[derive(Debug, Error, Diagnostic)]
pub enum AlphabetError {
    #[error("failed to read alphabet file: {path}")]
    #[diagnostic(
        code(covert::alphabet::io),
        help(
            "Download `emoji-test.txt` from https://unicode.org/Public/emoji/ and point \
             `--alphabet`, `COVERT_CHESS_ALPHABET` or `alphabet_path` in the config at it."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed emoji-test record on line {line}: {reason}")]
    #[diagnostic(
        code(covert::alphabet::parse),
        help("Each record must look like `1F600 ; fully-qualified # 😀 grinning face`.")
    )]
    Parse { line: usize, reason: String },

    #[error("alphabet file contains no fully-qualified emoji")]
    #[diagnostic(
        code(covert::alphabet::empty),
        help("Check that the file is a Unicode emoji-test file and not an empty download.")
    )]
    Empty,

    #[error("failed to build symbol scanner: {message}")]
    #[diagnostic(
        code(covert::alphabet::scanner),
        help("The alphabet produced a pattern the regex engine rejected. File a bug report.")
    )]
    Scanner { message: String },
}

/// Result type for alphabet operations.
pub type AlphabetResult<T> = std::result::Result<T, AlphabetError>;

/// Which rendering of a symbol a lookup matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// The fully-qualified rendering.
    Canonical,
    /// A minimally-qualified or unqualified rendering.
    Loose,
}

/// One alphabet digit and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    /// Rendered symbol.
    pub symbol: String,
    /// Code points as `\U` escapes, e.g. `\U0001F600`.
    pub escape: String,
    /// Human-readable CLDR name.
    pub name: String,
    /// `# group:` the record appeared under.
    pub category: String,
    /// `# subgroup:` the record appeared under.
    pub subcategory: String,
}

/// The ordered emoji alphabet with reverse lookup.
#[derive(Debug)]
pub struct Alphabet {
    canonical: Vec<SymbolEntry>,
    loose: Vec<SymbolEntry>,
    canonical_index: HashMap<String, usize>,
    loose_index: HashMap<String, usize>,
    scanner: scan::Scanner,
}

impl Alphabet {
    /// Build an alphabet from the contents of an `emoji-test.txt` file.
    pub fn parse(source: &str) -> AlphabetResult<Self> {
        let table = loader::parse_table(source)?;
        Self::from_table(table)
    }

    /// Read and parse an `emoji-test.txt` file.
    pub fn load(path: &Path) -> AlphabetResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| AlphabetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let alphabet = Self::parse(&source)?;
        tracing::info!(
            path = %path.display(),
            symbols = alphabet.len(),
            loose = alphabet.loose_count(),
            "loaded emoji alphabet"
        );
        Ok(alphabet)
    }

    fn from_table(table: loader::Table) -> AlphabetResult<Self> {
        let loader::Table { canonical, loose } = table;
        if canonical.is_empty() {
            return Err(AlphabetError::Empty);
        }

        let mut canonical_index = HashMap::with_capacity(canonical.len());
        for (index, entry) in canonical.iter().enumerate() {
            canonical_index.entry(entry.symbol.clone()).or_insert(index);
        }
        let mut loose_index = HashMap::new();
        for (index, entry) in loose.iter().enumerate() {
            loose_index.entry(entry.symbol.clone()).or_insert(index);
        }

        let scanner = scan::Scanner::new(
            canonical_index
                .keys()
                .chain(loose_index.keys())
                .map(String::as_str),
        )
        .map_err(|e| AlphabetError::Scanner {
            message: e.to_string(),
        })?;

        Ok(Self {
            canonical,
            loose,
            canonical_index,
            loose_index,
            scanner,
        })
    }

    /// Number of digits (N).
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Always false for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Number of digits whose loose rendering differs from the canonical one.
    pub fn loose_count(&self) -> usize {
        self.canonical
            .iter()
            .zip(&self.loose)
            .filter(|(c, l)| c.symbol != l.symbol)
            .count()
    }

    /// Look up the index of a symbol, trying the canonical rendering first and
    /// the loose rendering second.
    pub fn lookup(&self, symbol: &str) -> Option<usize> {
        self.canonical_index
            .get(symbol)
            .or_else(|| self.loose_index.get(symbol))
            .copied()
    }

    /// Index of `symbol`, or `UnknownSymbol` if neither rendering matches.
    pub fn resolve(&self, symbol: &str) -> CodecResult<usize> {
        self.lookup(symbol).ok_or_else(|| CodecError::UnknownSymbol {
            symbol: symbol.to_string(),
        })
    }

    /// Canonical rendering of digit `index`.
    pub fn symbol_at(&self, index: usize) -> CodecResult<&str> {
        self.metadata_at(index).map(|entry| entry.symbol.as_str())
    }

    /// Loose rendering of digit `index` (equal to the canonical one when the
    /// file lists no less-qualified variant).
    pub fn loose_at(&self, index: usize) -> CodecResult<&str> {
        self.loose
            .get(index)
            .map(|entry| entry.symbol.as_str())
            .ok_or(CodecError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Metadata of digit `index`.
    pub fn metadata_at(&self, index: usize) -> CodecResult<&SymbolEntry> {
        self.canonical.get(index).ok_or(CodecError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// All digits in order, in the requested rendering.
    pub fn entries(&self, variant: Variant) -> &[SymbolEntry] {
        match variant {
            Variant::Canonical => &self.canonical,
            Variant::Loose => &self.loose,
        }
    }

    /// If `text` (ignoring surrounding whitespace) is exactly one symbol,
    /// return its index and the rendering that matched.
    pub fn describe(&self, text: &str) -> Option<(usize, Variant)> {
        let text = text.trim();
        if let Some(&index) = self.canonical_index.get(text) {
            return Some((index, Variant::Canonical));
        }
        self.loose_index
            .get(text)
            .map(|&index| (index, Variant::Loose))
    }

    /// Scan `text` left to right for symbols in either rendering.
    ///
    /// Matching is substring based and prefers the longest symbol starting at
    /// the leftmost position, so skin-tone and ZWJ sequences are never split.
    pub fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = SymbolMatch> + 'a {
        self.scanner
            .find_iter(text)
            .filter_map(move |(start, end)| {
                self.lookup(&text[start..end])
                    .map(|index| SymbolMatch { start, end, index })
            })
    }
}

static SHARED: OnceLock<Alphabet> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

/// Process-wide alphabet, loaded from `path` on first use.
///
/// Callers racing the first load block on an init lock until it finishes, so
/// the file is parsed once. The first successful load wins and later `path`
/// arguments are ignored. A failed load leaves the cache empty.
pub fn shared(path: &Path) -> AlphabetResult<&'static Alphabet> {
    if let Some(alphabet) = SHARED.get() {
        return Ok(alphabet);
    }
    let _guard = SHARED_INIT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(alphabet) = SHARED.get() {
        return Ok(alphabet);
    }
    let alphabet = Alphabet::load(path)?;
    Ok(SHARED.get_or_init(|| alphabet))
}

/// The process-wide alphabet if [`shared`] has already loaded it.
pub fn try_shared() -> Option<&'static Alphabet> {
    SHARED.get()
}

/// Default location of the alphabet file under the XDG data directory.
pub fn default_path(data_dir: &Path) -> PathBuf {
    data_dir.join("emoji-test.txt")
}
