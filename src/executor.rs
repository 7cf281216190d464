//! Statement execution seam for join-row synchronization.
//!
//! The crate never opens connections or manages transactions. Callers adapt
//! their PostgreSQL client (or the transaction they are in) to [`SqlExecutor`]
//! and hand it to [`IntersectionSync`](crate::IntersectionSync).

use crate::error::QueryError;
use postgres_types::ToSql;

/// Trait for executing a single parameterized statement
///
/// # Examples
///
/// ```
/// use typequery::{QueryError, SqlExecutor};
/// use postgres_types::ToSql;
///
/// struct DryRun;
///
/// impl SqlExecutor for DryRun {
///     fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64, QueryError> {
///         println!("{sql} {params:?}");
///         Ok(1)
///     }
/// }
/// ```
pub trait SqlExecutor {
    /// Execute a statement and return the number of rows affected
    ///
    /// # Arguments
    ///
    /// * `sql` - SQL with PostgreSQL placeholders (`$1`, `$2`, ...)
    /// * `params` - Bind values in placeholder order
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Execution` wrapping the driver error.
    fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64, QueryError>;
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for &E {
    fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64, QueryError> {
        (**self).execute(sql, params)
    }
}
