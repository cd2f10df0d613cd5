//! Low-level SQL text production.
//!
//! `SqlWriter` owns the output stream and counts terminated statements.
//! Multi-tuple `INSERT … VALUES` statements are assembled in `batch`.

mod batch;

use std::{
    fmt,
    io::{self, Write},
};

use crate::{QuoteStyle, escape::escape_text};

pub(crate) use batch::ValuesBatch;

/// Unquoted SQL null.
pub(crate) const NULL: &str = "NULL";

/// Statement terminator, including the line break that separates statements.
pub(crate) const TERMINATOR: &str = ";\n";

/// Renders values as SQL literals in one quote style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Literals {
    style: QuoteStyle,
}

impl Literals {
    pub(crate) const fn new(style: QuoteStyle) -> Self {
        Self { style }
    }

    /// Quoted, escaped text.
    pub(crate) fn text(self, value: &str) -> String {
        self.quoted(&escape_text(value))
    }

    /// Quoted text, or `NULL` when absent.
    pub(crate) fn optional_text(self, value: Option<&str>) -> String {
        value.map_or_else(|| NULL.to_owned(), |text| self.text(text))
    }

    /// Quoted integer. Identifiers and sequence numbers are quoted like text.
    pub(crate) fn integer<N: fmt::Display + Copy>(self, value: N) -> String {
        self.quoted(&value.to_string())
    }

    fn quoted(self, body: &str) -> String {
        let delimiter = self.style.delimiter();
        let mut literal = String::with_capacity(body.len() + 2);
        literal.push(delimiter);
        literal.push_str(body);
        literal.push(delimiter);
        literal
    }
}

/// Statement sink shared by every emitter of one session.
#[derive(Debug)]
pub(crate) struct SqlWriter<W> {
    output: W,
    literals: Literals,
    statements: u64,
}

impl<W: Write> SqlWriter<W> {
    pub(crate) const fn new(output: W, style: QuoteStyle) -> Self {
        Self {
            output,
            literals: Literals::new(style),
            statements: 0,
        }
    }

    pub(crate) const fn literals(&self) -> Literals {
        self.literals
    }

    /// Write text verbatim; used for the transaction framing.
    pub(crate) fn raw(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    /// Write one statement body followed by the terminator.
    pub(crate) fn statement(&mut self, body: &str) -> io::Result<()> {
        self.output.write_all(body.as_bytes())?;
        self.output.write_all(TERMINATOR.as_bytes())?;
        self.statements += 1;
        Ok(())
    }

    /// Write a batch if it holds at least one tuple.
    pub(crate) fn batch(&mut self, batch: ValuesBatch) -> io::Result<()> {
        match batch.into_statement() {
            Some(body) => self.statement(&body),
            None => Ok(()),
        }
    }

    pub(crate) const fn statements(&self) -> u64 {
        self.statements
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(QuoteStyle::Double, "\"a&quot;b\"")]
    #[case(QuoteStyle::Single, "'a&quot;b'")]
    fn text_literals_are_escaped_then_quoted(#[case] style: QuoteStyle, #[case] expected: &str) {
        assert_eq!(Literals::new(style).text("a\"b"), expected);
    }

    #[rstest]
    fn apostrophes_pass_through_unescaped() {
        assert_eq!(
            Literals::new(QuoteStyle::Single).text("McDonald's"),
            "'McDonald's'"
        );
        assert_eq!(
            Literals::new(QuoteStyle::Double).text("McDonald's"),
            "\"McDonald's\""
        );
    }

    #[rstest]
    fn absent_text_renders_null() {
        let literals = Literals::new(QuoteStyle::Double);
        assert_eq!(literals.optional_text(None), "NULL");
        assert_eq!(literals.optional_text(Some("x")), "\"x\"");
    }

    #[rstest]
    fn integers_are_quoted() {
        let literals = Literals::new(QuoteStyle::Single);
        assert_eq!(literals.integer(-7_i64), "'-7'");
        assert_eq!(literals.integer(3_usize), "'3'");
    }

    #[rstest]
    fn statements_are_terminated_and_counted() {
        let mut buffer = Vec::new();
        let mut writer = SqlWriter::new(&mut buffer, QuoteStyle::Double);
        writer.raw("BEGIN\n").expect("write raw");
        writer.statement("SELECT 1").expect("write statement");
        writer
            .batch(ValuesBatch::new("INSERT INTO t (a) VALUES "))
            .expect("skip empty batch");
        assert_eq!(writer.statements(), 1);
        assert_eq!(String::from_utf8_lossy(&buffer), "BEGIN\nSELECT 1;\n");
    }
}
