// ABOUTME: Error taxonomy for dump operations
// ABOUTME: Separates connection, query, type-classification and value-conversion failures

use crate::dump::category::ValueCategory;
use thiserror::Error;

/// Main error type for dump operations.
///
/// Every variant aborts the whole dump; nothing is retried or skipped.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Cannot open a connection or select the database
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    /// A SHOW or SELECT statement failed
    #[error("Query failed while {context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// Column type has no rendering rule
    #[error("unsupported type: {type_name}")]
    UnsupportedType { type_name: String },

    /// A value's runtime representation does not match its column category
    #[error("Failed to render column '{column}': {source}")]
    Conversion {
        column: String,
        #[source]
        source: ConversionError,
    },

    /// Row width differs from the column list it was paired with
    #[error("Row for table {table} has {values} values but {columns} columns")]
    ColumnCountMismatch {
        table: String,
        columns: usize,
        values: usize,
    },

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    /// Create a Connection error from a plain message
    pub fn connection(message: impl Into<String>) -> Self {
        DumpError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Query error with context about what was being queried
    pub fn query(source: sqlx::Error, context: impl Into<String>) -> Self {
        DumpError::Query {
            context: context.into(),
            source,
        }
    }
}

/// Raised by the literal renderer when a value cannot be rendered for its category.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{category} literal requires {expected}, got {found}")]
pub struct ConversionError {
    pub category: ValueCategory,
    pub expected: &'static str,
    pub found: &'static str,
}
