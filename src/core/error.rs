// This module defines the error types for tblasm using the thiserror crate. TableError
// covers table compilation failures: a line that does not match the `token=byteSpec`
// grammar and a token that is defined twice (including a collision with the generated
// `\hXX` escape tokens). EncodeError covers tokenization failures, where no table token
// matches at some cursor position. HexByteError reports a malformed hexadecimal byte
// literal, and DefinitionError a malformed `symbol=text` input line. Every variant
// carries the offending text plus its source name and line number so the caller can
// print a precise diagnostic. Result aliases are provided for each family.

//! Error types for the encoding engine.

use thiserror::Error;

/// Failure while compiling a token table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Error while parsing \"{line}\" in file \"{source_name}\" (line {line_no})")]
    Parse {
        source_name: String,
        line_no: usize,
        line: String,
    },

    #[error("{} in file \"{source_name}\"", describe_duplicate(.token, .line_no))]
    DuplicateToken {
        source_name: String,
        /// `None` when the collision comes from the escape-code augmentation.
        line_no: Option<usize>,
        token: String,
    },
}

fn describe_duplicate(token: &str, line_no: &Option<usize>) -> String {
    match line_no {
        Some(n) => format!("Token \"{token}\" redefined on line {n}"),
        None => format!("Token \"{token}\" collides with a generated escape code"),
    }
}

/// Result type alias for table compilation.
pub type TableResult<T> = Result<T, TableError>;

/// Failure while tokenizing one line of text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("No table entry matches at character {cursor}: \"{remaining}\"")]
    UnmatchedText { cursor: usize, remaining: String },
}

/// Result type alias for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// A hexadecimal byte literal that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexByteError {
    #[error("\"{0}\" is not a hexadecimal byte (expected 1-2 hex digits, optional 0x prefix)")]
    Invalid(String),
}

/// An input line that is not of the form `symbol=text`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Error while parsing \"{line}\" in file \"{source_name}\" (line {line_no})")]
    Malformed {
        source_name: String,
        line_no: usize,
        line: String,
    },
}
