// This module renders encoded strings as GNU as source for the ARM (AGB) toolchain.
// A block starts with the banner comment, `.text` when the output file is fresh, and
// `.align 2`. Each encoded string becomes a global label followed by one `.byte`
// directive. The block ends with a reference table: a global `<stem>_array` label
// followed by one `<symbol>_ref: .word <symbol>` entry per string, so C code can index
// the strings through a pointer array. The writer is generic over io::Write so the
// pipeline can render into memory first and only touch the output file on success.

//! Assembly emission.

use std::io::{self, Write};

use super::banner::Banner;
use crate::core::EncodedLine;

/// One symbol with its encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedString {
    pub symbol: String,
    pub line: EncodedLine,
}

impl EncodedString {
    pub fn new(symbol: impl Into<String>, line: EncodedLine) -> Self {
        Self {
            symbol: symbol.into(),
            line,
        }
    }
}

/// Streams directives into any [`Write`] sink.
pub struct AsmWriter<W: Write> {
    out: W,
}

impl<W: Write> AsmWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Banner plus section setup.
    ///
    /// `fresh` is true when the output starts empty; otherwise the block is
    /// appended after a separating empty line and `.text` is not repeated.
    pub fn write_header(&mut self, banner: &Banner, fresh: bool) -> io::Result<()> {
        if fresh {
            write!(self.out, "{banner}")?;
            writeln!(self.out, ".text")?;
        } else {
            writeln!(self.out)?;
            write!(self.out, "{banner}")?;
        }
        writeln!(self.out, ".align 2")
    }

    pub fn write_string(&mut self, string: &EncodedString) -> io::Result<()> {
        let symbol = &string.symbol;
        writeln!(self.out)?;
        writeln!(self.out, ".global {symbol}")?;
        writeln!(self.out, "{symbol}:")?;
        if !string.line.is_empty() {
            writeln!(self.out, ".byte {}", string.line.to_byte_list())?;
        }
        Ok(())
    }

    /// Pointer table named `<array_stem>_array` with one `.word` per string.
    pub fn write_reference_table(
        &mut self,
        input_name: &str,
        array_stem: &str,
        strings: &[EncodedString],
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "@@@@ reference table for \"{input_name}\" @@@@")?;
        writeln!(self.out)?;
        writeln!(self.out, ".align 2")?;
        writeln!(self.out)?;
        writeln!(self.out, ".global {array_stem}_array")?;
        writeln!(self.out, "{array_stem}_array:")?;
        writeln!(self.out)?;
        for string in strings {
            let symbol = &string.symbol;
            writeln!(self.out, ".global {symbol}_ref")?;
            writeln!(self.out, "{symbol}_ref:")?;
            writeln!(self.out, ".word {symbol}")?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Header, every string, then the reference table.
    pub fn write_block(
        &mut self,
        banner: &Banner,
        fresh: bool,
        input_name: &str,
        array_stem: &str,
        strings: &[EncodedString],
    ) -> io::Result<()> {
        self.write_header(banner, fresh)?;
        for string in strings {
            self.write_string(string)?;
        }
        self.write_reference_table(input_name, array_stem, strings)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
