// This module drives one complete conversion run: read the table file and compile it
// (with or without the `\hXX` escape tokens), read the definitions file, encode every
// `symbol=text` line against the table, and emit the result as assembly. The run is
// fail-fast. Any table, definition or encoding error aborts before the output file is
// opened, so a failed run never leaves a half-written file behind. In append mode the
// new block is added after the existing content and `.text` is only emitted when the
// output was empty. ConvertOptions is the library-facing form of the command line.

//! End-to-end conversion pipeline.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::asm::{AsmWriter, Banner, EncodedString};
use crate::core::{
    Definition, DefinitionError, EncodeError, LineEncoder, MatchStrategy, TableCompiler,
    TableError, Terminator, TokenTable,
};

/// Settings for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub table_path: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Append to the output file instead of overwriting it.
    pub append: bool,
    pub terminator: Option<Terminator>,
    /// Register `\h00`..`\hFF` after the user table.
    pub escape_codes: bool,
    pub strategy: MatchStrategy,
}

impl ConvertOptions {
    pub fn new(
        table_path: impl Into<PathBuf>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            table_path: table_path.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            append: false,
            terminator: None,
            escape_codes: true,
            strategy: MatchStrategy::default(),
        }
    }
}

/// Any failure of a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("\"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Cannot encode \"{symbol}\" in file \"{source_name}\" (line {line_no}): {source}")]
    Encode {
        source_name: String,
        line_no: usize,
        symbol: String,
        source: EncodeError,
    },
}

/// Result type alias for conversion runs.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertSummary {
    pub strings: usize,
    pub bytes: usize,
}

/// Read a text file, dropping a leading byte order mark.
pub fn read_source(path: &Path) -> ConvertResult<String> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Compile table source text.
pub fn build_table(source_name: &str, text: &str, escape_codes: bool) -> ConvertResult<TokenTable> {
    let mut compiler = TableCompiler::new(source_name);
    compiler.add_lines(text.lines())?;
    let table = if escape_codes {
        compiler.finish_with_escape_codes()?
    } else {
        compiler.finish()
    };
    Ok(table)
}

/// Encode every definition line of `text`, stopping at the first error.
pub fn encode_definitions(
    encoder: &LineEncoder<'_>,
    source_name: &str,
    text: &str,
) -> ConvertResult<Vec<EncodedString>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| -> ConvertResult<EncodedString> {
            let line_no = idx + 1;
            let def = Definition::parse_at(line, source_name, line_no)?;
            let encoded = encoder.encode(def.text).map_err(|source| ConvertError::Encode {
                source_name: source_name.to_string(),
                line_no,
                symbol: def.symbol.to_string(),
                source,
            })?;
            Ok(EncodedString::new(def.symbol, encoded))
        })
        .collect()
}

/// Run a full conversion as described by `options`.
pub fn convert(options: &ConvertOptions) -> ConvertResult<ConvertSummary> {
    let table_name = options.table_path.display().to_string();
    let input_name = options.input_path.display().to_string();

    let table_text = read_source(&options.table_path)?;
    let table = build_table(&table_name, &table_text, options.escape_codes)?;

    let input_text = read_source(&options.input_path)?;
    let encoder = LineEncoder::new(&table)
        .with_strategy(options.strategy)
        .with_terminator(options.terminator);
    let strings = encode_definitions(&encoder, &input_name, &input_text)?;
    log::info!("encoded {} strings from \"{}\"", strings.len(), input_name);

    let fresh = !options.append || output_is_empty(&options.output_path);
    let array_stem = options
        .input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut writer = AsmWriter::new(Vec::new());
    let banner = Banner::for_conversion(&input_name, &table_name);
    writer
        .write_block(&banner, fresh, &input_name, &array_stem, &strings)
        .map_err(|source| ConvertError::Io {
            path: options.output_path.clone(),
            source,
        })?;
    let rendered = writer.into_inner();

    write_output(&options.output_path, options.append, &rendered)?;
    log::debug!(
        "wrote {} bytes of assembly to \"{}\"",
        rendered.len(),
        options.output_path.display()
    );

    Ok(ConvertSummary {
        strings: strings.len(),
        bytes: strings.iter().map(|s| s.line.len()).sum(),
    })
}

fn output_is_empty(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true)
}

fn write_output(path: &Path, append: bool, contents: &[u8]) -> ConvertResult<()> {
    let io_err = |source: std::io::Error| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    file.flush().map_err(io_err)
}
