//! tblasm - table-driven string assembler.
//!
//! tblasm turns lines of human-readable text into `.byte` data for GNU as,
//! using a user-supplied table that maps characters (or multi-character
//! tokens) to byte values. It is meant for localized or custom-encoded string
//! data on embedded and retro targets, where the game or firmware has its own
//! character set.
//!
//! # Primary Usage
//!
//! ```
//! use tblasm::core::{compile_table_with_escapes, encode_line, Terminator};
//!
//! let table = compile_table_with_escapes("menu.tbl", ["A=01", "B=02", " =00"])?;
//! let line = encode_line(&table, "AB A\\hFE", Some(Terminator(0xFF)))?;
//! assert_eq!(line.to_byte_list(), "0x01,0x02,0x00,0x01,0xFE,0xFF");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`core`] - Table compilation and line encoding
//! - [`asm`] - Assembly emission (banner, strings, reference table)
//! - [`convert`] - File-level pipeline used by the `tblasm` binary

pub mod asm;
pub mod convert;
pub mod core;

pub use self::core::{
    // Tables
    compile_table, compile_table_with_escapes, TableCompiler, TokenTable,
    // Encoding
    encode_line, EncodedLine, LineEncoder, MatchStrategy, Terminator,
    // Errors
    EncodeError, TableError,
};
pub use self::convert::{convert, ConvertError, ConvertOptions, ConvertSummary};
