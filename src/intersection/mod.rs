//! Intersection (join) table SQL for many-to-many associations.
//!
//! [`IntersectionBuilder`] collects the join columns in order and renders the
//! two statements needed to maintain join rows:
//!
//! ```
//! use typequery::IntersectionBuilder;
//!
//! let mut builder = IntersectionBuilder::new("o_customer_product");
//! builder.add_column("customer_id").add_column("product_id");
//!
//! let table = builder.build()?;
//! assert_eq!(
//!     table.insert_sql(),
//!     "insert into o_customer_product (customer_id, product_id) values (?, ?)"
//! );
//! assert_eq!(
//!     table.delete_sql(),
//!     "delete from o_customer_product where customer_id = ? and product_id = ?"
//! );
//! # Ok::<(), typequery::QueryError>(())
//! ```
//!
//! Bind values are positional and must follow the order columns were added.
//! [`IntersectionTable::pg_insert_sql`] and [`IntersectionTable::pg_delete_sql`]
//! carry the same statements with PostgreSQL `$n` markers.
//! Table and column names are emitted verbatim, without quoting.

use crate::error::QueryError;

pub mod sync;
#[doc(inline)]
pub use sync::{IntersectionSync, SyncCount};

/// Accumulates join columns for one intersection table
#[derive(Debug, Clone)]
pub struct IntersectionBuilder {
    table: String,
    columns: Vec<String>,
}

impl IntersectionBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Append a join column; call order is bind order
    pub fn add_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.columns.push(column.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Render the insert and delete statements
    ///
    /// Building twice from the same columns yields identical strings.
    ///
    /// # Errors
    ///
    /// - [`QueryError::NoColumns`] when no column was added
    /// - [`QueryError::DuplicateColumn`] when a column was added twice
    pub fn build(&self) -> Result<IntersectionTable, QueryError> {
        if self.columns.is_empty() {
            return Err(QueryError::NoColumns {
                table: self.table.clone(),
            });
        }
        if let Some(column) = self.first_duplicate() {
            return Err(QueryError::DuplicateColumn {
                table: self.table.clone(),
                column: column.to_string(),
            });
        }

        let table = IntersectionTable {
            table: self.table.clone(),
            insert_sql: self.insert_sql(positional),
            delete_sql: self.delete_sql(positional),
            pg_insert_sql: self.insert_sql(numbered),
            pg_delete_sql: self.delete_sql(numbered),
            column_count: self.columns.len(),
        };
        log::debug!(
            "intersection table `{}` built with {} columns",
            table.table,
            table.column_count
        );
        Ok(table)
    }

    fn first_duplicate(&self) -> Option<&str> {
        self.columns
            .iter()
            .enumerate()
            .find(|(i, column)| self.columns[..*i].contains(*column))
            .map(|(_, column)| column.as_str())
    }

    fn insert_sql(&self, bind: fn(&mut String, usize)) -> String {
        let mut sql = format!("insert into {} (", self.table);
        push_separated(&mut sql, &self.columns, ", ", |sql, column| {
            sql.push_str(column)
        });
        sql.push_str(") values (");
        push_separated(&mut sql, 1..=self.columns.len(), ", ", bind);
        sql.push(')');
        sql
    }

    fn delete_sql(&self, bind: fn(&mut String, usize)) -> String {
        let mut sql = format!("delete from {} where ", self.table);
        push_separated(
            &mut sql,
            self.columns.iter().enumerate(),
            " and ",
            |sql, (i, column)| {
                sql.push_str(column);
                sql.push_str(" = ");
                bind(sql, i + 1);
            },
        );
        sql
    }
}

/// `?` bind marker
fn positional(sql: &mut String, _n: usize) {
    sql.push('?');
}

/// PostgreSQL `$n` bind marker
fn numbered(sql: &mut String, n: usize) {
    sql.push('$');
    sql.push_str(&n.to_string());
}

/// Emit `separator` before every item except the first
fn push_separated<I, F>(sql: &mut String, items: I, separator: &str, mut push: F)
where
    I: IntoIterator,
    F: FnMut(&mut String, I::Item),
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        push(sql, item);
    }
}

/// The generated statements for one intersection table
///
/// Immutable once built; share it freely across threads (e.g. in an `Arc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionTable {
    table: String,
    insert_sql: String,
    delete_sql: String,
    pg_insert_sql: String,
    pg_delete_sql: String,
    column_count: usize,
}

impl IntersectionTable {
    pub fn table(&self) -> &str {
        &self.table
    }

    /// `insert into <table> (<c1>, ..., <cN>) values (?, ..., ?)`
    pub fn insert_sql(&self) -> &str {
        &self.insert_sql
    }

    /// `delete from <table> where <c1> = ? and ... and <cN> = ?`
    pub fn delete_sql(&self) -> &str {
        &self.delete_sql
    }

    /// [`insert_sql`](Self::insert_sql) with `$1..$N` bind markers
    pub fn pg_insert_sql(&self) -> &str {
        &self.pg_insert_sql
    }

    /// [`delete_sql`](Self::delete_sql) with `$1..$N` bind markers
    pub fn pg_delete_sql(&self) -> &str {
        &self.pg_delete_sql
    }

    /// Bind values each statement expects
    pub fn column_count(&self) -> usize {
        self.column_count
    }
}
