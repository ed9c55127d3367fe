//! Error types for the parse and format stages.
//!
//! [`ParseError`] keeps the line and column `sqlparser` buries in its message
//! text so callers can point at the offending spot in the schema. [`FormatError`] is raised when a parsed
//! statement has no canonical schema rendering.

use crate::types::Dialect;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error encountered while parsing schema text.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Location of the error, if the parser reported one.
    pub position: Option<Position>,
    /// Dialect in effect when the error occurred.
    pub dialect: Option<Dialect>,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
        }
    }

    /// Builds the error reported when raw schema bytes fail UTF-8 decoding.
    pub fn invalid_encoding(err: &std::str::Utf8Error) -> Self {
        Self::new(format!(
            "schema text is not valid UTF-8 (invalid byte at offset {})",
            err.valid_up_to()
        ))
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Extracts `Line: X, Column: Y` from a `sqlparser` error message.
    fn parse_position_from_message(message: &str) -> Option<Position> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = POSITION_REGEX.get_or_init(|| {
            Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("Invalid regex pattern")
        });

        let result = re.captures(message).and_then(|caps| {
            let line: usize = caps.get(1)?.as_str().parse().ok()?;
            let column: usize = caps.get(2)?.as_str().parse().ok()?;
            Some(Position { line, column })
        });

        #[cfg(feature = "tracing")]
        if result.is_none() && message.contains("Line") {
            trace!("no position recognised in parser message: {}", message);
        }

        result
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error")?;

        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect})")?;
        }

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<sqlparser::parser::ParserError> for ParseError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        let message = err.to_string();
        let position = Self::parse_position_from_message(&message);

        Self {
            message,
            position,
            dialect: None,
        }
    }
}

/// Error raised when a statement cannot be rendered as schema text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("statement {index} is a {kind} statement, not a schema definition")]
    NotSchemaStatement { index: usize, kind: &'static str },
    #[error("statement {index} rendered as empty text")]
    EmptyRendering { index: usize },
}

impl FormatError {
    /// Zero-based position of the offending statement in the source.
    pub fn index(&self) -> usize {
        match self {
            Self::NotSchemaStatement { index, .. } | Self::EmptyRendering { index } => *index,
        }
    }

    /// The same error, attributed to statement `index`.
    pub fn at_statement(self, index: usize) -> Self {
        match self {
            Self::NotSchemaStatement { kind, .. } => Self::NotSchemaStatement { index, kind },
            Self::EmptyRendering { .. } => Self::EmptyRendering { index },
        }
    }
}
