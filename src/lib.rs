//! # typequery
//!
//! Typed association builders and many-to-many intersection SQL for a
//! PostgreSQL persistence layer.
//!
//! - [`AssocBean`] turns typed fetch and filter calls on an association into
//!   string-keyed calls on the root query, returning the root for chaining.
//! - [`IntersectionBuilder`] renders the insert/delete statements that maintain
//!   a join table, and [`IntersectionSync`] applies join-row changes through a
//!   [`SqlExecutor`].

pub mod assoc;
pub mod config;
pub mod error;
pub mod executor;
pub mod fetch;
pub mod intersection;
pub mod path;
pub mod property;
pub mod query;

#[cfg(feature = "tracing")]
mod tracing_helpers;
mod value_conversion;

pub use assoc::AssocBean;
pub use config::QueryConfig;
pub use error::QueryError;
pub use executor::SqlExecutor;
pub use fetch::FetchConfig;
pub use intersection::{IntersectionBuilder, IntersectionSync, IntersectionTable, SyncCount};
pub use property::{Property, PropertyRef, PropertySet};
pub use query::{
    EntityBean, Expression, ExpressionList, Expressions, FetchDetail, FetchPath, FetchPlanEntry,
    FilterMany, Query, QueryFetch, QueryRoot,
};
