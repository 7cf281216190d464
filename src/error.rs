//! Error type shared by the query and intersection modules.
//!
//! The association builder itself never produces errors: it forwards to the
//! root query, and problems surface when the query is validated or executed.
//! Errors here come from the reference query engine (filter expression
//! checks), intersection table construction and join-row synchronization.

use thiserror::Error;

/// Errors raised by `typequery`
#[derive(Debug, Error)]
pub enum QueryError {
    /// `IntersectionBuilder::build()` was called before any column was added
    #[error("intersection table `{table}` has no columns")]
    NoColumns { table: String },

    /// The same column was added twice to an intersection table
    #[error("column `{column}` added more than once to intersection table `{table}`")]
    DuplicateColumn { table: String, column: String },

    /// A join row did not carry one bind value per intersection column
    #[error("intersection table `{table}` expects {expected} bind values, got {actual}")]
    BindCount {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// A `filterMany` expression string does not match its bind parameters
    #[error("invalid filterMany expression on `{path}`: {message}")]
    FilterExpression { path: String, message: String },

    /// A bind value has no PostgreSQL parameter mapping
    #[error("unsupported bind value: {0}")]
    UnsupportedValue(String),

    /// The executor failed to run a statement
    #[error("statement execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QueryError {
    /// Wrap an executor error
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        QueryError::Execution(Box::new(err))
    }
}
