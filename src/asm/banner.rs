//! Decorative `@` comment box placed at the top of every emitted block.
//!
//! `@` starts a line comment in ARM GNU as, so the whole box is inert.

use std::fmt;

/// Extra width added around the longest line.
const PADDING: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    lines: Vec<String>,
}

impl Banner {
    /// The standard three line banner naming the input and table files.
    pub fn for_conversion(input_name: &str, table_name: &str) -> Self {
        Self::new(vec![
            format!("result of file \"{input_name}\""),
            format!("using table \"{table_name}\""),
            format!("converted using {}", env!("CARGO_PKG_NAME")),
        ])
    }

    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            + PADDING
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width();
        let inner = width - 2;

        writeln!(f, "{}", "@".repeat(width))?;
        writeln!(f, "@{}@", " ".repeat(inner))?;
        for line in &self.lines {
            let slack = inner - line.chars().count();
            let left = slack / 2;
            let right = slack - left;
            writeln!(f, "@{}{}{}@", " ".repeat(left), line, " ".repeat(right))?;
        }
        writeln!(f, "@{}@", " ".repeat(inner))?;
        writeln!(f, "{}", "@".repeat(width))?;
        writeln!(f)
    }
}
