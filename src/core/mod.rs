// This module is the encoding engine of tblasm. It compiles a user table of
// `token=byte` lines into an immutable TokenTable (optionally extended with the
// `\hXX` escape tokens), parses `symbol=text` definitions, and tokenizes each text
// against the table into a byte sequence with an optional terminator. Nothing here
// touches the file system or keeps global state: the table is built once and then
// passed by reference into every encoding call.

//! Core encoding engine.
//!
//! # Key Components
//!
//! ## Tables (`table`)
//! - `token=byteSpec` line grammar, fail-fast compilation
//! - Duplicate detection, escape-code augmentation
//!
//! ## Encoding (`encoder`)
//! - Shortest-first scan (default) or longest-first
//! - Terminator handling and `0xXX` formatting
//!
//! ## Definitions (`definition`)
//! - `symbol=text` splitting

pub mod definition;
pub mod encoder;
pub mod error;
pub mod hex;
pub mod table;

pub use definition::Definition;

pub use encoder::{
    encode_line,
    EncodedLine,
    LineEncoder,
    MatchStrategy,
    Terminator,
};

pub use error::{
    DefinitionError,
    EncodeError,
    EncodeResult,
    HexByteError,
    TableError,
    TableResult,
};

pub use hex::{format_byte, parse_hex_byte};

pub use table::{
    compile_table,
    compile_table_with_escapes,
    escape_token,
    TableCompiler,
    TokenTable,
};
