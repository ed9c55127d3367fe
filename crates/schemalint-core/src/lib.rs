//! Parse SQL schema definitions and render them back as canonical text.
//!
//! This crate is the statement boundary of `schemalint`: raw schema text goes
//! in through [`parse_schema`], and each resulting statement comes back out
//! through [`render_statement`].

pub mod error;
pub mod format;
pub mod parser;
pub mod types;

pub use error::{FormatError, ParseError, Position};
pub use format::{render_statement, render_statements, STATEMENT_TERMINATOR};
pub use parser::{parse_schema, parse_schema_with_dialect};
pub use types::Dialect;

/// Parsed statement type, re-exported so callers need not depend on `sqlparser`.
pub use sqlparser::ast::Statement;
