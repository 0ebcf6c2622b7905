//! Error types for ormx

use thiserror::Error;

/// Result type alias for ormx operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Errors surfaced while deriving or handing off statements.
///
/// Only requests that cannot produce a valid statement at all are reported by
/// the derivation core (`NoData`, `NoInsertField`). Unknown filter shapes and
/// failed value conversions degrade to an empty contribution instead.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Nothing was supplied for an INSERT.
    #[error("no data to insert")]
    NoData,

    /// The record type has no field carrying the `insert` option.
    #[error("no insert field defined in '{0}' type, mark insert fields with #[orm(db = \",insert\")]")]
    NoInsertField(String),

    /// An operator tag outside `e|ne|gt|gte|lt|lte|in|notin|like|notlike`.
    #[error("Invalid operator tag: '{0}'")]
    InvalidOperator(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Query execution error reported by the driver
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl OrmError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error reports a duplicate key.
    pub fn is_duplicate(&self) -> bool {
        match self {
            Self::UniqueViolation(_) => true,
            Self::Query(err) => err
                .as_db_error()
                .is_some_and(|db_err| db_err.code().code() == "23505"),
            _ => false,
        }
    }

    /// Parse a tokio_postgres error into a more specific OrmError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            if db_err.code().code() == "23505" {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return Self::UniqueViolation(format!("{}: {}", constraint, db_err.message()));
            }
        }
        Self::Query(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(OrmError::not_found("user 1").is_not_found());
        assert!(!OrmError::NoData.is_not_found());
        assert!(OrmError::UniqueViolation("users_pkey: dup".into()).is_duplicate());
        assert!(!OrmError::config("bad").is_duplicate());
    }

    #[test]
    fn test_from_db_error_keeps_driver_errors() {
        // A client-side failure carries no database error code.
        let driver_err = "port=not-a-port"
            .parse::<tokio_postgres::Config>()
            .unwrap_err();
        let err = OrmError::from_db_error(driver_err);
        assert!(matches!(err, OrmError::Query(_)));
        assert!(!err.is_duplicate());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(OrmError::NoData.to_string(), "no data to insert");
        assert_eq!(
            OrmError::InvalidOperator("between".into()).to_string(),
            "Invalid operator tag: 'between'"
        );
        assert!(
            OrmError::NoInsertField("User".into())
                .to_string()
                .starts_with("no insert field defined in 'User' type")
        );
    }
}
