//! Root query contracts and the reference query state.
//!
//! Association builders never talk to SQL directly. They translate typed calls
//! into string-keyed calls on two capabilities a root query bean exposes:
//!
//! - [`QueryFetch`]: registers fetch paths with a [`FetchConfig`]
//! - [`ExpressionList`]: adds predicates keyed by property path
//!
//! [`QueryRoot`] ties both to a typed root query bean, so the fetch capability
//! is guaranteed by the root's type rather than discovered at runtime.
//!
//! [`Query`] is the in-crate implementation: it records fetch paths in a
//! [`FetchDetail`] and predicates in [`Expressions`], ready for a planner or
//! SQL renderer to consume.
//!
//! # Example
//!
//! ```
//! use typequery::{AssocBean, FetchConfig, Query};
//!
//! struct Customer;
//! struct Contact;
//!
//! let mut query: Query<Customer> = Query::new();
//! AssocBean::<Contact, _>::new("contacts", &mut query).fetch_query();
//!
//! let plan = query.fetch_plan();
//! assert_eq!(plan[0].path, "contacts");
//! assert_eq!(plan[0].config, FetchConfig::Query);
//! ```

use crate::fetch::FetchConfig;
use crate::property::PropertySet;
use sea_query::Value;

pub mod detail;
#[doc(inline)]
pub use detail::{FetchDetail, FetchPath};

pub mod expression;
#[doc(inline)]
pub use expression::{Expression, Expressions, FilterMany};

pub mod root;
#[doc(inline)]
pub use root::{FetchPlanEntry, Query};

/// Fetch registration capability of a root query
///
/// Implementors provide [`fetch_path`](QueryFetch::fetch_path) and
/// [`fetch_properties`](QueryFetch::fetch_properties); the strategy-specific
/// methods are shorthands for them. Registering the same path again is the
/// implementor's decision (the in-crate [`FetchDetail`] replaces it).
pub trait QueryFetch {
    /// Register `path` with an optional comma/space delimited property list
    ///
    /// `None` fetches every property of the association.
    fn fetch_path(&mut self, path: &str, properties: Option<&str>, config: FetchConfig);

    /// Register `path` with an already reduced property set
    fn fetch_properties(&mut self, path: &str, properties: PropertySet, config: FetchConfig);

    /// Eager fetch of all properties in the main query
    fn fetch(&mut self, path: &str) {
        self.fetch_path(path, None, FetchConfig::Default);
    }

    /// Eager fetch of the listed properties in the main query
    fn fetch_props(&mut self, path: &str, properties: &str) {
        self.fetch_path(path, Some(properties), FetchConfig::Default);
    }

    /// Load via a secondary "query join"
    fn fetch_query(&mut self, path: &str) {
        self.fetch_path(path, None, FetchConfig::Query);
    }

    fn fetch_query_props(&mut self, path: &str, properties: &str) {
        self.fetch_path(path, Some(properties), FetchConfig::Query);
    }

    /// Load through the L2 bean cache
    fn fetch_cache(&mut self, path: &str) {
        self.fetch_path(path, None, FetchConfig::Cache);
    }

    fn fetch_cache_props(&mut self, path: &str, properties: &str) {
        self.fetch_path(path, Some(properties), FetchConfig::Cache);
    }

    /// Defer loading until first access
    fn fetch_lazy(&mut self, path: &str) {
        self.fetch_path(path, None, FetchConfig::Lazy);
    }

    fn fetch_lazy_props(&mut self, path: &str, properties: &str) {
        self.fetch_path(path, Some(properties), FetchConfig::Lazy);
    }
}

/// Predicate-building capability of a root query
///
/// Paths are association or property paths. For `eq`/`ne` on an association
/// path the engine compares against the association's identity column(s).
pub trait ExpressionList {
    /// `path = value`
    fn eq(&mut self, path: &str, value: Value);

    /// `path <> value`
    fn ne(&mut self, path: &str, value: Value);

    /// The filter list constraining which rows of a to-many `path` are fetched
    fn filter_many(&mut self, path: &str) -> &mut Self;

    /// Merge every predicate of `other` into this list
    fn add_all(&mut self, other: Self)
    where
        Self: Sized;

    /// Parse-later filter on a to-many `path` with `?` or `?N` placeholders
    fn filter_many_expr(&mut self, path: &str, expression: &str, params: Vec<Value>);

    /// Not-exists sub-query on a to-many `path`
    fn is_empty(&mut self, path: &str);

    /// Exists sub-query on a to-many `path`
    fn is_not_empty(&mut self, path: &str);
}

/// An entity that can be compared by identity
pub trait EntityBean {
    /// The identity (primary key) value
    fn id_value(&self) -> Value;
}

/// A typed root query bean
///
/// Root beans own the query state; association wrappers borrow the root
/// mutably, forward to these accessors and hand the root back.
pub trait QueryRoot {
    type Query: QueryFetch;
    type Expr: ExpressionList;

    /// Fetch registration for this query
    fn query(&mut self) -> &mut Self::Query;

    /// The where expression list for this query
    fn expr(&mut self) -> &mut Self::Expr;
}
