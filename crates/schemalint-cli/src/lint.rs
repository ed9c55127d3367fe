//! The resolve → read → parse → format → write pipeline.

use crate::source::{SchemaSource, SourceDescriptor, SourceError};
use schemalint_core::{
    parse_schema_with_dialect, render_statement, Dialect, FormatError, ParseError,
    STATEMENT_TERMINATOR,
};
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Failure of a lint run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("wrong number of arguments: expected 1 source, got {0}")]
    Argument(usize),

    #[error("failed to create schema source")]
    SourceConstruction(#[source] SourceError),

    #[error("failed to read from source")]
    SourceRead(#[source] SourceError),

    #[error("failed to parse source")]
    Parse(#[source] ParseError),

    #[error("failed to format source")]
    Format(#[source] FormatError),

    #[error("failed to write output")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    pub dialect: Dialect,
}

/// Counts from a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintReport {
    pub bytes_read: u64,
    pub statements: usize,
}

/// Resolve `identifier` into a source, without opening it.
pub fn resolve(identifier: &str) -> Result<SourceDescriptor, LintError> {
    let source = SourceDescriptor::parse(identifier).map_err(LintError::SourceConstruction)?;
    debug!(kind = %source.kind(), source = %source, "resolved schema source");
    Ok(source)
}

/// Run the pipeline on an already resolved source.
pub fn lint_descriptor(
    source: &SourceDescriptor,
    options: &LintOptions,
    out: &mut dyn Write,
) -> Result<LintReport, LintError> {
    let mut raw = Vec::new();
    let bytes_read = source
        .write_schema(&mut raw)
        .map_err(LintError::SourceRead)?;

    let statements = lint_text(&raw, options, out)?;
    Ok(LintReport {
        bytes_read,
        statements,
    })
}

/// Parse raw schema bytes and write each statement, in source order, followed
/// by the statement terminator. Returns the number of statements written.
pub fn lint_text(raw: &[u8], options: &LintOptions, out: &mut dyn Write) -> Result<usize, LintError> {
    let text = std::str::from_utf8(raw)
        .map_err(|err| LintError::Parse(ParseError::invalid_encoding(&err)))?;
    let statements =
        parse_schema_with_dialect(text, options.dialect).map_err(LintError::Parse)?;
    debug!(count = statements.len(), dialect = %options.dialect, "parsed schema");

    for (index, statement) in statements.iter().enumerate() {
        let rendered = render_statement(statement)
            .map_err(|err| LintError::Format(err.at_statement(index)))?;
        out.write_all(rendered.as_bytes())
            .and_then(|()| out.write_all(STATEMENT_TERMINATOR.as_bytes()))
            .map_err(LintError::Output)?;
    }
    out.flush().map_err(LintError::Output)?;

    Ok(statements.len())
}
