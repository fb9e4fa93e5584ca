// This module compiles table-definition lines into a TokenTable, the immutable token to
// byte map that drives encoding. Each line has the shape `token=byteSpec` where byteSpec
// is one or two hex digits with an optional 0x/0X prefix. Because tokens may contain `=`
// themselves, a line is partitioned at the last `=` whose suffix is a valid byte literal
// and whose prefix is non-empty. TableCompiler accumulates lines fail-fast: the first
// malformed or duplicate line aborts compilation and no partial table escapes. After all
// user tokens are in, the compiler can optionally register the 256 escape tokens `\h00`
// through `\hFF` so every raw byte value stays reachable whatever the user table covers.
// Finishing consumes the compiler, so the augmentation runs at most once and always last.

//! Token table compilation.

use hashbrown::HashMap;

use super::error::{TableError, TableResult};
use super::hex::parse_hex_byte;

/// Prefix of the generated escape tokens (`\h00` .. `\hFF`).
pub const ESCAPE_PREFIX: &str = "\\h";

/// The escape token that stands for `value`.
pub fn escape_token(value: u8) -> String {
    format!("{ESCAPE_PREFIX}{value:02X}")
}

/// Immutable token to byte mapping.
///
/// Lookups are exact and case sensitive. The table also remembers the length
/// (in characters) of its longest token, which bounds the tokenizer's scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: HashMap<String, u8>,
    max_token_chars: usize,
    escape_codes: bool,
}

impl TokenTable {
    pub fn get(&self, token: &str) -> Option<u8> {
        self.entries.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in characters of the longest token, 0 for an empty table.
    pub fn max_token_chars(&self) -> usize {
        self.max_token_chars
    }

    /// Whether the `\hXX` escape tokens were registered.
    pub fn has_escape_codes(&self) -> bool {
        self.escape_codes
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.entries.iter().map(|(token, &value)| (token.as_str(), value))
    }
}

/// Incremental builder for a [`TokenTable`].
#[derive(Debug)]
pub struct TableCompiler {
    source_name: String,
    entries: HashMap<String, u8>,
    max_token_chars: usize,
    lines_seen: usize,
}

impl TableCompiler {
    /// Create a compiler; `source_name` identifies the table in diagnostics.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            entries: HashMap::new(),
            max_token_chars: 0,
            lines_seen: 0,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Parse one table line and register its token.
    ///
    /// Lines are numbered from 1 in the order they are added.
    pub fn add_line(&mut self, line: &str) -> TableResult<()> {
        self.lines_seen += 1;
        let line_no = self.lines_seen;

        let Some((token, value)) = split_table_line(line) else {
            return Err(TableError::Parse {
                source_name: self.source_name.clone(),
                line_no,
                line: line.to_string(),
            });
        };

        self.insert(token, value, Some(line_no))
    }

    /// Add every line from `lines`, stopping at the first error.
    pub fn add_lines<I, S>(&mut self, lines: I) -> TableResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Freeze the user tokens into a table.
    pub fn finish(self) -> TokenTable {
        log::debug!(
            "compiled {} tokens from \"{}\" (longest token {} chars)",
            self.entries.len(),
            self.source_name,
            self.max_token_chars
        );
        TokenTable {
            entries: self.entries,
            max_token_chars: self.max_token_chars,
            escape_codes: false,
        }
    }

    /// Register `\h00` through `\hFF` after the user tokens, then freeze.
    ///
    /// Fails with [`TableError::DuplicateToken`] if the user table already
    /// defines one of the escape tokens.
    pub fn finish_with_escape_codes(mut self) -> TableResult<TokenTable> {
        for value in 0..=u8::MAX {
            self.insert(&escape_token(value), value, None)?;
        }
        let mut table = self.finish();
        table.escape_codes = true;
        Ok(table)
    }

    fn insert(&mut self, token: &str, value: u8, line_no: Option<usize>) -> TableResult<()> {
        if self.entries.contains_key(token) {
            return Err(TableError::DuplicateToken {
                source_name: self.source_name.clone(),
                line_no,
                token: token.to_string(),
            });
        }
        self.max_token_chars = self.max_token_chars.max(token.chars().count());
        self.entries.insert(token.to_string(), value);
        Ok(())
    }
}

/// Partition a table line into `(token, byte)`.
///
/// The split point is the last `=` that leaves a non-empty token on the left
/// and a valid byte literal on the right, so `==3D` defines the token `=`.
pub fn split_table_line(line: &str) -> Option<(&str, u8)> {
    line.rmatch_indices('=').find_map(|(idx, _)| {
        let token = &line[..idx];
        if token.is_empty() {
            return None;
        }
        parse_hex_byte(&line[idx + 1..]).map(|value| (token, value))
    })
}

/// Compile `lines` into a table without escape codes.
pub fn compile_table<I, S>(source_name: &str, lines: I) -> TableResult<TokenTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut compiler = TableCompiler::new(source_name);
    compiler.add_lines(lines)?;
    Ok(compiler.finish())
}

/// Compile `lines` and add the `\hXX` escape tokens.
pub fn compile_table_with_escapes<I, S>(source_name: &str, lines: I) -> TableResult<TokenTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut compiler = TableCompiler::new(source_name);
    compiler.add_lines(lines)?;
    compiler.finish_with_escape_codes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_valid_equals() {
        assert_eq!(split_table_line("A=41"), Some(("A", 0x41)));
        assert_eq!(split_table_line("==3D"), Some(("=", 0x3D)));
        assert_eq!(split_table_line("a=b=0x1"), Some(("a=b", 0x01)));
        assert_eq!(split_table_line(" =0"), Some((" ", 0x00)));
    }

    #[test]
    fn falls_back_to_earlier_equals_when_suffix_is_not_hex() {
        // The last `=` leaves an empty suffix, the first one leaves "7=".
        assert_eq!(split_table_line("x=7="), None);
        assert_eq!(split_table_line("=1=2"), Some(("=1", 0x02)));
    }

    #[test]
    fn rejects_lines_without_token_or_value() {
        assert_eq!(split_table_line("=41"), None);
        assert_eq!(split_table_line("A="), None);
        assert_eq!(split_table_line("A"), None);
        assert_eq!(split_table_line(""), None);
        assert_eq!(split_table_line("A=123"), None);
    }

    #[test]
    fn tracks_longest_token_in_chars() {
        let table = compile_table("t", ["A=1", "äöü=2", "[PLAYER]=FD"]).unwrap();
        assert_eq!(table.max_token_chars(), 8);
        assert_eq!(table.get("äöü"), Some(0x02));
        assert!(!table.has_escape_codes());
    }

    #[test]
    fn line_numbers_are_one_based() {
        let mut compiler = TableCompiler::new("t");
        compiler.add_line("A=1").unwrap();
        let err = compiler.add_line("bogus").unwrap_err();
        assert_eq!(
            err,
            TableError::Parse {
                source_name: "t".into(),
                line_no: 2,
                line: "bogus".into()
            }
        );
    }

    #[test]
    fn escape_tokens_are_uppercase() {
        assert_eq!(escape_token(0), "\\h00");
        assert_eq!(escape_token(0xab), "\\hAB");
    }
}
