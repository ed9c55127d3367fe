use crate::error::ParseError;
use crate::types::Dialect;
use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// Parse schema text using the specified dialect.
///
/// Statements come back in source order. Blank input parses to no statements.
pub fn parse_schema_with_dialect(
    sql: &str,
    dialect: Dialect,
) -> Result<Vec<Statement>, ParseError> {
    if sql.trim().is_empty() {
        return Ok(Vec::new());
    }

    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    match Parser::parse_sql(sqlparser_dialect.as_ref(), sql) {
        Ok(statements) => Ok(statements),
        Err(primary_err) => {
            // Dumps from a live server use backticks and table options the
            // generic dialect rejects.
            if matches!(dialect, Dialect::Generic) && looks_like_mysql_syntax(sql) {
                let mysql = MySqlDialect {};
                if let Ok(statements) = Parser::parse_sql(&mysql, sql) {
                    return Ok(statements);
                }
            }
            Err(ParseError::from(primary_err).with_dialect(dialect))
        }
    }
}

fn looks_like_mysql_syntax(sql: &str) -> bool {
    let upper = sql.to_ascii_uppercase();
    sql.contains('`')
        || upper.contains("ENGINE=")
        || upper.contains("ENGINE =")
        || upper.contains("AUTO_INCREMENT")
}

/// Parse schema text using the MySQL dialect.
pub fn parse_schema(sql: &str) -> Result<Vec<Statement>, ParseError> {
    parse_schema_with_dialect(sql, Dialect::Mysql)
}
