//! Shared types.

use std::fmt;

/// SQL dialect used to read schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    Generic,
    #[default]
    Mysql,
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect_is_mysql() {
        assert_eq!(Dialect::default(), Dialect::Mysql);
    }

    #[test]
    fn test_dialect_names() {
        assert_eq!(Dialect::Mysql.to_string(), "mysql");
        assert_eq!(Dialect::Postgres.as_str(), "postgres");
        assert_eq!(Dialect::Generic.as_str(), "generic");
        assert_eq!(Dialect::Sqlite.as_str(), "sqlite");
    }
}
