//! Parser for Unicode `emoji-test.txt` files.
//!
//! Record lines look like
//!
//! ```text
//! 263A FE0F                                  ; fully-qualified     # ☺️ E0.6 smiling face
//! 263A                                       ; unqualified         # ☺ E0.6 smiling face
//! ```
//!
//! `# group:` and `# subgroup:` lines set the category of the records that
//! follow. Fully-qualified records append a digit to both variants; a
//! less-qualified record replaces the loose rendering of the digit just before
//! it. Components (skin tones, hair styles) are not digits.

use std::str::FromStr;

use super::{AlphabetError, AlphabetResult, SymbolEntry};

/// Qualification status column of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualification {
    FullyQualified,
    MinimallyQualified,
    Unqualified,
    Component,
}

impl FromStr for Qualification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fully-qualified" => Ok(Self::FullyQualified),
            "minimally-qualified" => Ok(Self::MinimallyQualified),
            "unqualified" => Ok(Self::Unqualified),
            "component" => Ok(Self::Component),
            other => Err(format!("unknown qualification status \"{other}\"")),
        }
    }
}

/// One parsed record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub symbol: String,
    pub escape: String,
    pub status: Qualification,
    pub name: String,
}

/// Both alphabet variants, index-aligned.
#[derive(Debug, Default)]
pub(crate) struct Table {
    pub canonical: Vec<SymbolEntry>,
    pub loose: Vec<SymbolEntry>,
}

pub(crate) fn parse_table(source: &str) -> AlphabetResult<Table> {
    let mut table = Table::default();
    let mut group = String::new();
    let mut subgroup = String::new();

    for (number, line) in source.lines().enumerate() {
        if let Some(rest) = line.strip_prefix("# group:") {
            group = rest.trim().to_string();
            continue;
        }
        if let Some(rest) = line.strip_prefix("# subgroup:") {
            subgroup = rest.trim().to_string();
            continue;
        }
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let record = parse_record(line).map_err(|reason| AlphabetError::Parse {
            line: number + 1,
            reason,
        })?;

        match record.status {
            Qualification::FullyQualified => {
                let entry = SymbolEntry {
                    symbol: record.symbol,
                    escape: record.escape,
                    name: record.name,
                    category: group.clone(),
                    subcategory: subgroup.clone(),
                };
                table.loose.push(entry.clone());
                table.canonical.push(entry);
            }
            Qualification::MinimallyQualified | Qualification::Unqualified => {
                match table.loose.last_mut() {
                    Some(last) => {
                        last.symbol = record.symbol;
                        last.escape = record.escape;
                    }
                    None => tracing::warn!(
                        line = number + 1,
                        symbol = %record.symbol,
                        "less-qualified record before any fully-qualified one, skipping"
                    ),
                }
            }
            Qualification::Component => {}
        }
    }

    Ok(table)
}

/// Parse a single record line.
pub fn parse_record(line: &str) -> Result<Record, String> {
    let (points, rest) = line
        .split_once(';')
        .ok_or_else(|| "missing ';' after code points".to_string())?;
    let (status, comment) = rest
        .split_once('#')
        .ok_or_else(|| "missing '#' comment with name".to_string())?;

    let status: Qualification = status.trim().parse()?;

    let mut symbol = String::new();
    let mut escape = String::new();
    for point in points.split_whitespace() {
        let value = u32::from_str_radix(point, 16)
            .map_err(|_| format!("invalid code point \"{point}\""))?;
        let ch = char::from_u32(value)
            .ok_or_else(|| format!("code point U+{value:04X} is not a scalar value"))?;
        symbol.push(ch);
        escape.push_str(&format!("\\U{value:08X}"));
    }
    if symbol.is_empty() {
        return Err("record has no code points".into());
    }

    Ok(Record {
        symbol,
        escape,
        status,
        name: parse_name(comment),
    })
}

/// Name from the trailing comment: drop the rendered symbol and, in files
/// from Emoji 13.0 on, the `E<version>` token in front of the name.
fn parse_name(comment: &str) -> String {
    let after_symbol = comment
        .trim()
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim_start())
        .unwrap_or("");
    match after_symbol.split_once(' ') {
        Some((token, rest)) if is_version_token(token) => rest.trim().to_string(),
        _ => after_symbol.trim_end().to_string(),
    }
}

fn is_version_token(token: &str) -> bool {
    token
        .strip_prefix('E')
        .and_then(|v| v.split_once('.'))
        .is_some_and(|(major, minor)| {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        })
}
