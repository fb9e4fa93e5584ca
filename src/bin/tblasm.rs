//! tblasm command line front end.
//!
//! Reads a token table and a file of `symbol=text` lines and writes GNU as
//! source with one `.byte` string per symbol plus a reference table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use tblasm::{convert, ConvertOptions, MatchStrategy, Terminator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatchArg {
    /// Take the shortest table token at each position
    Shortest,
    /// Take the longest table token at each position
    Longest,
}

impl From<MatchArg> for MatchStrategy {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Shortest => MatchStrategy::ShortestFirst,
            MatchArg::Longest => MatchStrategy::LongestFirst,
        }
    }
}

/// Convert text into assembler byte data using a character table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File used to convert text into hex strings (`token=byte` per line)
    #[arg(short, long = "table", value_name = "PATH")]
    table: PathBuf,

    /// Input file to read `symbol=text` lines from
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file to write the assembly to
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Append to the output file instead of overwriting it
    #[arg(short, long)]
    append: bool,

    /// Terminate every string with the given byte (hexadecimal)
    #[arg(short = 'e', long = "terminate", value_name = "HEX")]
    terminate: Option<Terminator>,

    /// Do not add the \hXX escape tokens to the table
    #[arg(long)]
    no_escapes: bool,

    /// Tokenization strategy
    #[arg(long = "match", value_enum, default_value_t = MatchArg::Shortest)]
    match_strategy: MatchArg,

    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn into_options(self) -> ConvertOptions {
        let mut options = ConvertOptions::new(self.table, self.input, self.output);
        options.append = self.append;
        options.terminator = self.terminate;
        options.escape_codes = !self.no_escapes;
        options.strategy = self.match_strategy.into();
        options
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let options = args.into_options();
    match convert(&options) {
        Ok(summary) => {
            log::info!(
                "{} strings, {} bytes -> \"{}\"",
                summary.strings,
                summary.bytes,
                options.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
