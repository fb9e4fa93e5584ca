//! Hexadecimal byte literals.
//!
//! Both the right-hand side of a table line and the terminator option use the
//! same grammar: one or two hex digits, optionally prefixed by `0x` or `0X`.

use super::error::HexByteError;

/// Parse a byte literal such as `41`, `f`, `0x0A` or `0XFF`.
///
/// Returns `None` when `spec` does not match the grammar exactly; no
/// surrounding whitespace is accepted.
pub fn parse_hex_byte(spec: &str) -> Option<u8> {
    let digits = spec
        .strip_prefix("0x")
        .or_else(|| spec.strip_prefix("0X"))
        .unwrap_or(spec);

    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Like [`parse_hex_byte`] but reports the rejected literal.
pub fn parse_hex_byte_or_error(spec: &str) -> Result<u8, HexByteError> {
    parse_hex_byte(spec).ok_or_else(|| HexByteError::Invalid(spec.to_string()))
}

/// Render a byte the way it appears in `.byte` directives.
pub fn format_byte(value: u8) -> String {
    format!("0x{value:02X}")
}
