// This module tokenizes one line of text against a compiled TokenTable and produces the
// byte sequence that represents it. The scan is a single left-to-right pass: at each
// cursor position candidate lengths are tried and the first one whose substring is a
// table token wins, its byte is emitted and the cursor advances past it. The default
// strategy tries lengths from 1 upward, so the SHORTEST token at a position is taken,
// and a longer token sharing that prefix is never considered. Longest-first is available
// as an explicit opt-in and never the default. Candidate lengths are
// bounded by the remaining text and by the table's longest token, and a position where
// no length matches fails with EncodeError::UnmatchedText instead of scanning forever.
// An optional terminator byte is appended after the text.

//! Greedy table-driven line encoding.

use std::fmt;
use std::str::FromStr;

use super::error::{EncodeError, EncodeResult, HexByteError};
use super::hex::{format_byte, parse_hex_byte_or_error};
use super::table::TokenTable;

/// Which candidate length wins at a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Try length 1, 2, 3, ... and take the first hit.
    #[default]
    ShortestFirst,
    /// Try the longest possible length first and shrink down to 1.
    LongestFirst,
}

/// Byte appended after every encoded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminator(pub u8);

impl Terminator {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl FromStr for Terminator {
    type Err = HexByteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_byte_or_error(s).map(Terminator)
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_byte(self.0))
    }
}

/// The bytes produced for one line, terminator included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedLine {
    bytes: Vec<u8>,
}

impl EncodedLine {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Comma joined `0xXX` literals, e.g. `0x01,0xFF`.
    pub fn to_byte_list(&self) -> String {
        self.bytes
            .iter()
            .map(|&b| format_byte(b))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for EncodedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_byte_list())
    }
}

impl From<Vec<u8>> for EncodedLine {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// Encoder bound to a table, strategy and optional terminator.
///
/// Encoding is a pure function of these settings and the input text, so one
/// encoder can be shared freely across lines (and threads).
#[derive(Debug, Clone, Copy)]
pub struct LineEncoder<'t> {
    table: &'t TokenTable,
    strategy: MatchStrategy,
    terminator: Option<Terminator>,
}

impl<'t> LineEncoder<'t> {
    pub fn new(table: &'t TokenTable) -> Self {
        Self {
            table,
            strategy: MatchStrategy::default(),
            terminator: None,
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_terminator(mut self, terminator: Option<Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn table(&self) -> &'t TokenTable {
        self.table
    }

    /// Tokenize `text` and return its bytes.
    pub fn encode(&self, text: &str) -> EncodeResult<EncodedLine> {
        // Byte offset of every char, plus the end of the string.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut bytes = Vec::with_capacity(char_count + 1);
        let mut cursor = 0;

        while cursor < char_count {
            let limit = (char_count - cursor).min(self.table.max_token_chars());
            let lookup = |len: usize| {
                let token = &text[bounds[cursor]..bounds[cursor + len]];
                self.table.get(token).map(|value| (len, value))
            };
            let hit = match self.strategy {
                MatchStrategy::ShortestFirst => (1..=limit).find_map(lookup),
                MatchStrategy::LongestFirst => (1..=limit).rev().find_map(lookup),
            };

            let Some((len, value)) = hit else {
                return Err(EncodeError::UnmatchedText {
                    cursor,
                    remaining: text[bounds[cursor]..].to_string(),
                });
            };

            log::trace!(
                "{:?} -> {} at char {}",
                &text[bounds[cursor]..bounds[cursor + len]],
                format_byte(value),
                cursor
            );
            bytes.push(value);
            cursor += len;
        }

        if let Some(terminator) = self.terminator {
            bytes.push(terminator.value());
        }

        Ok(EncodedLine { bytes })
    }
}

/// Encode `text` with the default shortest-first strategy.
pub fn encode_line(
    table: &TokenTable,
    text: &str,
    terminator: Option<Terminator>,
) -> EncodeResult<EncodedLine> {
    LineEncoder::new(table).with_terminator(terminator).encode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{compile_table, compile_table_with_escapes};

    #[test]
    fn single_char_tokens() {
        let table = compile_table("t", ["A=01", "B=02"]).unwrap();
        let line = encode_line(&table, "AB", None).unwrap();
        assert_eq!(line.bytes(), &[0x01, 0x02]);
    }

    #[test]
    fn grows_length_until_a_token_matches() {
        let table = compile_table_with_escapes("t", ["AB=10"]).unwrap();
        let line = encode_line(&table, "AB", None).unwrap();
        assert_eq!(line.bytes(), &[0x10]);
    }

    #[test]
    fn shortest_token_wins_by_default() {
        let table = compile_table("t", ["A=01", "B=02", "AB=10"]).unwrap();
        let line = encode_line(&table, "AB", None).unwrap();
        assert_eq!(line.bytes(), &[0x01, 0x02]);
    }

    #[test]
    fn longest_first_prefers_multi_char_tokens() {
        let table = compile_table("t", ["A=01", "B=02", "AB=10"]).unwrap();
        let encoder = LineEncoder::new(&table).with_strategy(MatchStrategy::LongestFirst);
        assert_eq!(encoder.encode("ABA").unwrap().bytes(), &[0x10, 0x01]);
    }

    #[test]
    fn appends_terminator() {
        let table = compile_table_with_escapes("t", ["A=01"]).unwrap();
        let terminator: Terminator = "0xFF".parse().unwrap();
        let line = encode_line(&table, "A", Some(terminator)).unwrap();
        assert_eq!(line.bytes(), &[0x01, 0xFF]);
        assert_eq!(line.to_byte_list(), "0x01,0xFF");
    }

    #[test]
    fn empty_text_is_empty_or_just_the_terminator() {
        let table = compile_table("t", ["A=01"]).unwrap();
        assert!(encode_line(&table, "", None).unwrap().is_empty());
        let line = encode_line(&table, "", Some(Terminator(0))).unwrap();
        assert_eq!(line.bytes(), &[0x00]);
    }

    #[test]
    fn unmatched_text_reports_char_cursor() {
        let table = compile_table("t", ["ä=01", "b=02"]).unwrap();
        let err = encode_line(&table, "äbäc!", None).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnmatchedText {
                cursor: 3,
                remaining: "c!".to_string()
            }
        );
    }

    #[test]
    fn empty_table_fails_on_first_char() {
        let table = compile_table("t", Vec::<&str>::new()).unwrap();
        assert!(matches!(
            encode_line(&table, "x", None),
            Err(EncodeError::UnmatchedText { cursor: 0, .. })
        ));
    }

    #[test]
    fn escape_codes_reach_any_byte() {
        let table = compile_table_with_escapes("t", ["A=41"]).unwrap();
        let line = encode_line(&table, "A\\h00\\hFF", None).unwrap();
        assert_eq!(line.bytes(), &[0x41, 0x00, 0xFF]);
    }

    #[test]
    fn terminator_rejects_garbage() {
        assert!("0x".parse::<Terminator>().is_err());
        assert!("1FF".parse::<Terminator>().is_err());
        assert_eq!("a".parse::<Terminator>().unwrap().to_string(), "0x0A");
    }
}
