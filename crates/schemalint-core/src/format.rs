//! Canonical rendering of parsed schema statements.

use crate::error::FormatError;
use sqlparser::ast::Statement;

/// Text written after every rendered statement.
pub const STATEMENT_TERMINATOR: &str = ";\n\n";

/// Render one statement as canonical schema text, without a terminator.
///
/// Data-manipulation statements are rejected: a schema file that contains
/// them cannot be re-emitted as a schema.
pub fn render_statement(statement: &Statement) -> Result<String, FormatError> {
    if let Some(kind) = data_statement_kind(statement) {
        return Err(FormatError::NotSchemaStatement { index: 0, kind });
    }

    let rendered = statement.to_string();
    let trimmed = rendered.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    if trimmed.is_empty() {
        return Err(FormatError::EmptyRendering { index: 0 });
    }
    Ok(trimmed.to_string())
}

/// Render every statement in order, stopping at the first failure.
pub fn render_statements(statements: &[Statement]) -> Result<Vec<String>, FormatError> {
    statements
        .iter()
        .enumerate()
        .map(|(index, stmt)| render_statement(stmt).map_err(|err| err.at_statement(index)))
        .collect()
}

fn data_statement_kind(statement: &Statement) -> Option<&'static str> {
    match statement {
        Statement::Query(_) => Some("SELECT"),
        Statement::Insert(_) => Some("INSERT"),
        Statement::Update { .. } => Some("UPDATE"),
        Statement::Delete(_) => Some("DELETE"),
        Statement::Merge { .. } => Some("MERGE"),
        _ => None,
    }
}
