//! Common error types for TreeMatch

use thiserror::Error;

/// Common result type for TreeMatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the database and configuration layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the wrapped database error is a foreign key violation
    ///
    /// SQLite reports these as extended code 787 (SQLITE_CONSTRAINT_FOREIGNKEY).
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => {
                db_err.is_foreign_key_violation() || db_err.code().as_deref() == Some("787")
            }
            _ => false,
        }
    }
}
