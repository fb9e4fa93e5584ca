//! `symbol=text` input lines.

use super::error::DefinitionError;

/// One symbol and the raw text to encode for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    pub symbol: &'a str,
    pub text: &'a str,
}

impl<'a> Definition<'a> {
    /// Split `line` at its first `=`.
    ///
    /// The text may itself contain `=` and may be empty; the symbol may not.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (symbol, text) = line.split_once('=')?;
        if symbol.is_empty() {
            return None;
        }
        Some(Self { symbol, text })
    }

    /// [`Definition::parse`] with a diagnostic on failure.
    pub fn parse_at(
        line: &'a str,
        source_name: &str,
        line_no: usize,
    ) -> Result<Self, DefinitionError> {
        Self::parse(line).ok_or_else(|| DefinitionError::Malformed {
            source_name: source_name.to_string(),
            line_no,
            line: line.to_string(),
        })
    }
}
