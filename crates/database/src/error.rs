use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Stock with the same symbol already exists: {0}")]
    DuplicateSymbol(String),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Maps a unique-constraint violation on insert/update to `DuplicateSymbol`.
    pub(crate) fn from_write(err: sqlx::Error, symbol: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DbError::DuplicateSymbol(symbol.to_string())
            }
            _ => DbError::ConnectionError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_write_errors_stay_database_errors() {
        let err = DbError::from_write(sqlx::Error::RowNotFound, "abc");
        assert!(matches!(err, DbError::ConnectionError(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn duplicate_symbol_message_names_the_symbol() {
        let err = DbError::DuplicateSymbol("ABC".to_string());
        assert_eq!(
            err.to_string(),
            "Stock with the same symbol already exists: ABC"
        );
    }
}
