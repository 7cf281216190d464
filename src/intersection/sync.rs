//! Join-row synchronization against an executor.
//!
//! Inserts and deletes intersection rows using the statements of an
//! [`IntersectionTable`]. Each row is one bind value per join column, in the
//! order the columns were added to the builder, and statements are issued
//! with PostgreSQL `$n` bind markers.

use super::IntersectionTable;
use crate::error::QueryError;
use crate::executor::SqlExecutor;
use crate::value_conversion::with_converted_params;
use sea_query::Value;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Rows affected by [`IntersectionSync::sync`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCount {
    pub deleted: u64,
    pub inserted: u64,
}

/// Applies join-row changes for one intersection table
pub struct IntersectionSync<'t, E: ?Sized> {
    table: &'t IntersectionTable,
    executor: &'t E,
}

impl<'t, E: SqlExecutor + ?Sized> IntersectionSync<'t, E> {
    pub fn new(table: &'t IntersectionTable, executor: &'t E) -> Self {
        Self { table, executor }
    }

    /// Insert one join row
    ///
    /// # Errors
    ///
    /// Returns `QueryError::BindCount` when `values` does not have one entry
    /// per join column, otherwise whatever conversion or execution reports.
    pub fn insert_row(&self, values: &[Value]) -> Result<u64, QueryError> {
        self.run("insert", self.table.pg_insert_sql(), values)
    }

    /// Delete one join row
    pub fn delete_row(&self, values: &[Value]) -> Result<u64, QueryError> {
        self.run("delete", self.table.pg_delete_sql(), values)
    }

    /// Delete `removed` rows, then insert `added` rows
    ///
    /// Stops at the first failing statement; rows already applied are not
    /// undone here, so run inside the caller's transaction.
    pub fn sync(&self, removed: &[Vec<Value>], added: &[Vec<Value>]) -> Result<SyncCount, QueryError> {
        let mut count = SyncCount::default();
        for row in removed {
            count.deleted += self.delete_row(row)?;
        }
        for row in added {
            count.inserted += self.insert_row(row)?;
        }
        log::debug!(
            "intersection `{}` synchronized: {} deleted, {} inserted",
            self.table.table(),
            count.deleted,
            count.inserted
        );
        Ok(count)
    }

    fn run(&self, op: &'static str, sql: &str, values: &[Value]) -> Result<u64, QueryError> {
        if values.len() != self.table.column_count() {
            return Err(QueryError::BindCount {
                table: self.table.table().to_string(),
                expected: self.table.column_count(),
                actual: values.len(),
            });
        }

        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::intersection_span(self.table.table(), op).entered();

        log::trace!("{op} on `{}`: {sql}", self.table.table());
        with_converted_params(values, |params| self.executor.execute(sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::IntersectionBuilder;
    use postgres_types::ToSql;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingExecutor {
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl SqlExecutor for RecordingExecutor {
        fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64, QueryError> {
            let params = params.iter().map(|p| format!("{p:?}")).collect();
            self.calls.borrow_mut().push((sql.to_string(), params));
            Ok(1)
        }
    }

    struct FailingExecutor;

    impl SqlExecutor for FailingExecutor {
        fn execute(&self, _sql: &str, _params: &[&(dyn ToSql + Sync)]) -> Result<u64, QueryError> {
            Err(QueryError::execution(std::io::Error::new(
                std::io::ErrorKind::Other,
                "connection reset",
            )))
        }
    }

    fn customer_product() -> IntersectionTable {
        let mut builder = IntersectionBuilder::new("o_customer_product");
        builder.add_column("customer_id").add_column("product_id");
        builder.build().unwrap()
    }

    fn row(customer: i64, product: i64) -> Vec<Value> {
        vec![Value::BigInt(Some(customer)), Value::BigInt(Some(product))]
    }

    #[test]
    fn test_insert_row_binds_in_column_order() {
        let table = customer_product();
        let executor = RecordingExecutor::default();

        let affected = IntersectionSync::new(&table, &executor).insert_row(&row(1, 2)).unwrap();

        assert_eq!(affected, 1);
        assert_eq!(
            executor.calls.borrow()[0],
            (
                "insert into o_customer_product (customer_id, product_id) values ($1, $2)".to_string(),
                vec!["1".to_string(), "2".to_string()],
            )
        );
    }

    #[test]
    fn test_delete_row() {
        let table = customer_product();
        let executor = RecordingExecutor::default();

        IntersectionSync::new(&table, &executor).delete_row(&row(3, 4)).unwrap();

        let calls = executor.calls.borrow();
        assert_eq!(
            calls[0].0,
            "delete from o_customer_product where customer_id = $1 and product_id = $2"
        );
        assert_eq!(calls[0].1, vec!["3", "4"]);
    }

    #[test]
    fn test_sync_deletes_before_inserts() {
        let table = customer_product();
        let executor = RecordingExecutor::default();

        let count = IntersectionSync::new(&table, &executor)
            .sync(&[row(1, 2)], &[row(1, 5), row(1, 6)])
            .unwrap();

        assert_eq!(count, SyncCount { deleted: 1, inserted: 2 });
        let calls = executor.calls.borrow();
        assert!(calls[0].0.starts_with("delete from"));
        assert!(calls[1].0.starts_with("insert into"));
        assert!(calls[2].0.starts_with("insert into"));
    }

    #[test]
    fn test_bind_count_checked_before_execution() {
        let table = customer_product();
        let executor = RecordingExecutor::default();

        let err = IntersectionSync::new(&table, &executor)
            .insert_row(&[Value::BigInt(Some(1))])
            .unwrap_err();

        assert!(matches!(
            err,
            QueryError::BindCount { expected: 2, actual: 1, .. }
        ));
        assert!(executor.calls.borrow().is_empty());
    }

    #[test]
    fn test_executor_error_propagates() {
        let table = customer_product();
        let err = IntersectionSync::new(&table, &FailingExecutor)
            .sync(&[], &[row(1, 2)])
            .unwrap_err();
        assert!(matches!(err, QueryError::Execution(_)));
    }

    #[test]
    fn test_question_mark_in_identifier_is_not_a_bind() {
        let mut builder = IntersectionBuilder::new("o_link");
        builder.add_column("\"is_primary?\"").add_column("b_id");
        let table = builder.build().unwrap();
        let executor = RecordingExecutor::default();

        IntersectionSync::new(&table, &executor)
            .insert_row(&[Value::Bool(Some(true)), Value::BigInt(Some(9))])
            .unwrap();

        let calls = executor.calls.borrow();
        assert_eq!(
            calls[0].0,
            "insert into o_link (\"is_primary?\", b_id) values ($1, $2)"
        );
        assert_eq!(calls[0].1, vec!["true", "9"]);
    }
}
