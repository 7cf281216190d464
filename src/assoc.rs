//! Association fetch and filter builder.
//!
//! An [`AssocBean`] names one to-one or to-many association of a root query
//! bean. Each call translates into a string-keyed call on the root query and
//! hands the root back, so several associations can be configured in a single
//! chained expression:
//!
//! ```
//! use typequery::{AssocBean, Query};
//!
//! struct Customer;
//! struct Contact;
//! struct Order;
//!
//! let mut query: Query<Customer> = Query::new();
//! let root = AssocBean::<Contact, _>::new("contacts", &mut query).fetch_query();
//! AssocBean::<Order, _>::new("orders", root).is_not_empty();
//!
//! assert!(query.detail().contains("contacts"));
//! assert_eq!(query.where_expr().expressions().len(), 1);
//! ```
//!
//! The builder validates nothing. Unknown paths, to-one associations used
//! with `is_empty`, malformed filter expressions and the like are reported by
//! the root query when it is validated or executed.

use crate::fetch::FetchConfig;
use crate::path;
use crate::property::{PropertyRef, PropertySet};
use crate::query::{EntityBean, ExpressionList, QueryFetch, QueryRoot};
use sea_query::Value;
use std::marker::PhantomData;

/// Typed wrapper around one association of a root query bean
///
/// # Type Parameters
///
/// * `T` - The associated entity type (e.g. `Contact`)
/// * `R` - The root query bean type (e.g. `QCustomer`)
///
/// The wrapper borrows its root mutably for `'a` and never owns it; every
/// operation consumes the wrapper and returns that same `&'a mut R`.
pub struct AssocBean<'a, T, R: QueryRoot> {
    path: String,
    root: &'a mut R,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T, R: QueryRoot> AssocBean<'a, T, R> {
    /// Bind association `name` to `root`
    pub fn new(name: &str, root: &'a mut R) -> Self {
        Self::with_prefix(name, root, None)
    }

    /// Bind association `name` below an optional path prefix
    ///
    /// The effective path is resolved here once and never changes.
    pub fn with_prefix(name: &str, root: &'a mut R, prefix: Option<&str>) -> Self {
        Self {
            path: path::add(prefix, name),
            root,
            _entity: PhantomData,
        }
    }

    /// The effective (dotted) association path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Navigate to an association of the associated entity
    ///
    /// Typed wrappers use this for multi-level paths such as
    /// `customer.billingAddress`.
    pub fn nested<U>(self, name: &str) -> AssocBean<'a, U, R> {
        AssocBean::with_prefix(name, self.root, Some(&self.path))
    }

    /// Eagerly fetch this association with all its properties
    pub fn fetch(self) -> &'a mut R {
        self.root.query().fetch(&self.path);
        self.root
    }

    /// Deprecated alias of [`fetch`](Self::fetch)
    #[deprecated(note = "use fetch()")]
    pub fn fetch_all(self) -> &'a mut R {
        self.fetch()
    }

    /// Eagerly fetch this association using a "query join"
    pub fn fetch_query(self) -> &'a mut R {
        self.root.query().fetch_query(&self.path);
        self.root
    }

    /// Eagerly fetch this association using the L2 bean cache
    ///
    /// Cache misses are loaded as with [`fetch_query`](Self::fetch_query).
    pub fn fetch_cache(self) -> &'a mut R {
        self.root.query().fetch_cache(&self.path);
        self.root
    }

    /// Use lazy loading for this association
    pub fn fetch_lazy(self) -> &'a mut R {
        self.root.query().fetch_lazy(&self.path);
        self.root
    }

    /// Eagerly fetch the listed properties, e.g. `"firstName, email"`
    pub fn fetch_props(self, properties: &str) -> &'a mut R {
        self.root.query().fetch_props(&self.path, properties);
        self.root
    }

    /// Query join fetching the listed properties
    pub fn fetch_query_props(self, properties: &str) -> &'a mut R {
        self.root.query().fetch_query_props(&self.path, properties);
        self.root
    }

    /// L2 cache fetch of the listed properties; misses load via query join
    pub fn fetch_cache_props(self, properties: &str) -> &'a mut R {
        self.root.query().fetch_cache_props(&self.path, properties);
        self.root
    }

    /// Eagerly fetch some of the properties
    ///
    /// Intended for typed wrappers that expose strongly typed overloads such as
    /// `fetch_with(&QContact::FIRST_NAME, &QContact::EMAIL)`.
    pub fn fetch_properties(self, props: &[&dyn PropertyRef]) -> &'a mut R {
        self.fetch_with_properties(FetchConfig::Default, props)
    }

    /// Query join fetching some of the properties
    pub fn fetch_query_properties(self, props: &[&dyn PropertyRef]) -> &'a mut R {
        self.fetch_with_properties(FetchConfig::Query, props)
    }

    /// L2 cache fetch of some of the properties
    pub fn fetch_cache_properties(self, props: &[&dyn PropertyRef]) -> &'a mut R {
        self.fetch_with_properties(FetchConfig::Cache, props)
    }

    /// Lazy loading of some of the properties
    pub fn fetch_lazy_properties(self, props: &[&dyn PropertyRef]) -> &'a mut R {
        self.fetch_with_properties(FetchConfig::Lazy, props)
    }

    fn fetch_with_properties(self, config: FetchConfig, props: &[&dyn PropertyRef]) -> &'a mut R {
        let properties = PropertySet::from_properties(props);
        self.root
            .query()
            .fetch_properties(&self.path, properties, config);
        self.root
    }

    /// Is equal to by identity
    pub fn eq(self, other: &T) -> &'a mut R
    where
        T: EntityBean,
    {
        self.root.expr().eq(&self.path, other.id_value());
        self.root
    }

    /// Deprecated alias of [`eq`](Self::eq)
    #[deprecated(note = "use eq()")]
    pub fn equal_to(self, other: &T) -> &'a mut R
    where
        T: EntityBean,
    {
        self.eq(other)
    }

    /// Is not equal to by identity
    pub fn ne(self, other: &T) -> &'a mut R
    where
        T: EntityBean,
    {
        self.root.expr().ne(&self.path, other.id_value());
        self.root
    }

    /// Deprecated alias of [`ne`](Self::ne)
    #[deprecated(note = "use ne()")]
    pub fn not_equal_to(self, other: &T) -> &'a mut R
    where
        T: EntityBean,
    {
        self.ne(other)
    }

    /// Apply a pre-built filter when fetching these beans
    ///
    /// Rows are constrained by the database (sub-query), not filtered after
    /// loading.
    pub fn filter_many(self, filter: R::Expr) -> &'a mut R {
        self.root.expr().filter_many(&self.path).add_all(filter);
        self.root
    }

    /// Apply a filter expression when fetching these beans
    ///
    /// Placeholders use `?` or `?1` style, bound from `params`:
    ///
    /// ```
    /// use typequery::{AssocBean, Query};
    /// use sea_query::Value;
    ///
    /// # struct Customer;
    /// # struct Contact;
    /// let mut query: Query<Customer> = Query::new();
    /// AssocBean::<Contact, _>::new("contacts", &mut query)
    ///     .filter_many_expr("firstName istartsWith ?", vec![Value::from("Rob")]);
    ///
    /// assert!(query.validate().is_ok());
    /// ```
    pub fn filter_many_expr(self, expressions: &str, params: Vec<Value>) -> &'a mut R {
        self.root
            .expr()
            .filter_many_expr(&self.path, expressions, params);
        self.root
    }

    /// Is empty for a to-many association (adds a not-exists sub-query)
    #[allow(clippy::wrong_self_convention)]
    pub fn is_empty(self) -> &'a mut R {
        self.root.expr().is_empty(&self.path);
        self.root
    }

    /// Is not empty for a to-many association (adds an exists sub-query)
    #[allow(clippy::wrong_self_convention)]
    pub fn is_not_empty(self) -> &'a mut R {
        self.root.expr().is_not_empty(&self.path);
        self.root
    }
}

impl<T, R: QueryRoot> std::fmt::Debug for AssocBean<'_, T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssocBean")
            .field("path", &self.path)
            .field("entity", &std::any::type_name::<T>())
            .finish()
    }
}
