//! Typed query beans built on `AssocBean`
//!
//! These tests use hand-written query beans shaped like generated code:
//! a root bean (`QCustomer`) owning its `Query`, association accessors that
//! bind an `AssocBean` to the root, and a typed association wrapper
//! (`QAssocContact`) exposing a strongly typed partial fetch.

#![allow(deprecated)]

use sea_query::Value;
use typequery::{
    AssocBean, EntityBean, Expression, ExpressionList, Expressions, FetchConfig, Property,
    PropertyRef, Query, QueryConfig, QueryRoot,
};

// ============================================================================
// Entities
// ============================================================================

pub struct Customer;

pub struct Contact {
    pub id: i64,
}

impl EntityBean for Contact {
    fn id_value(&self) -> Value {
        Value::BigInt(Some(self.id))
    }
}

pub struct Address;

// ============================================================================
// Query beans
// ============================================================================

pub struct QContact;

impl QContact {
    pub const FIRST_NAME: Property = Property::new("firstName");
    pub const LAST_NAME: Property = Property::new("lastName");
    pub const EMAIL: Property = Property::new("email");
}

/// Root query bean for `Customer`
pub struct QCustomer {
    query: Query<Customer>,
}

impl QCustomer {
    pub fn new() -> Self {
        Self {
            query: Query::with_config(QueryConfig::default()),
        }
    }

    pub fn contacts(&mut self) -> QAssocContact<'_, Self> {
        QAssocContact {
            bean: AssocBean::new("contacts", self),
        }
    }

    pub fn billing_address(&mut self) -> AssocBean<'_, Address, Self> {
        AssocBean::new("billingAddress", self)
    }

    pub fn query_state(&self) -> &Query<Customer> {
        &self.query
    }
}

impl QueryRoot for QCustomer {
    type Query = Query<Customer>;
    type Expr = Expressions;

    fn query(&mut self) -> &mut Query<Customer> {
        &mut self.query
    }

    fn expr(&mut self) -> &mut Expressions {
        self.query.where_expr_mut()
    }
}

/// Typed wrapper for the `contacts` association
pub struct QAssocContact<'a, R: QueryRoot> {
    bean: AssocBean<'a, Contact, R>,
}

impl<'a, R: QueryRoot> QAssocContact<'a, R> {
    /// Fetch only the given contact properties
    pub fn fetch_with(self, first: &Property, rest: &[&Property]) -> &'a mut R {
        let mut props: Vec<&dyn PropertyRef> = Vec::with_capacity(rest.len() + 1);
        props.push(first);
        props.extend(rest.iter().map(|p| *p as &dyn PropertyRef));
        self.bean.fetch_properties(&props)
    }

    pub fn fetch_query_with(self, props: &[&Property]) -> &'a mut R {
        let props: Vec<&dyn PropertyRef> =
            props.iter().map(|p| *p as &dyn PropertyRef).collect();
        self.bean.fetch_query_properties(&props)
    }

    pub fn notes(self) -> AssocBean<'a, Contact, R> {
        self.bean.nested("notes")
    }

    pub fn assoc(self) -> AssocBean<'a, Contact, R> {
        self.bean
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_fluent_chain_across_associations() {
    let mut q = QCustomer::new();
    q.contacts()
        .assoc()
        .fetch_query()
        .billing_address()
        .fetch()
        .contacts()
        .assoc()
        .is_not_empty();

    let state = q.query_state();
    let plan = state.fetch_plan();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].path, "contacts");
    assert_eq!(plan[0].config, FetchConfig::Query);
    assert_eq!(plan[0].batch_size, Some(100));
    assert_eq!(plan[1].path, "billingAddress");
    assert_eq!(plan[1].batch_size, None);
    assert_eq!(state.where_expr().expressions().len(), 1);
}

#[test]
fn test_returns_same_root_instance() {
    let mut q = QCustomer::new();
    let returned: *const QCustomer = q.contacts().assoc().fetch_lazy();
    assert!(std::ptr::eq(returned, &q));
}

#[test]
fn test_typed_partial_fetch() {
    let mut q = QCustomer::new();
    q.contacts()
        .fetch_with(&QContact::FIRST_NAME, &[&QContact::EMAIL, &QContact::FIRST_NAME]);

    let fetch = q.query_state().detail().get("contacts").unwrap();
    assert_eq!(fetch.config, FetchConfig::Default);
    assert_eq!(
        fetch.properties.as_ref().unwrap().iter().collect::<Vec<_>>(),
        vec!["firstName", "email"]
    );
}

#[test]
fn test_typed_partial_fetch_order_matters() {
    let mut a = QCustomer::new();
    a.contacts()
        .fetch_query_with(&[&QContact::LAST_NAME, &QContact::FIRST_NAME]);
    let mut b = QCustomer::new();
    b.contacts()
        .fetch_query_with(&[&QContact::FIRST_NAME, &QContact::LAST_NAME]);

    let a_props = a.query_state().detail().get("contacts").unwrap().properties.clone();
    let b_props = b.query_state().detail().get("contacts").unwrap().properties.clone();
    assert_ne!(a_props, b_props);
    assert_eq!(a_props.map(|p| p.len()), b_props.map(|p| p.len()));
}

#[test]
fn test_nested_path_from_typed_wrapper() {
    let mut q = QCustomer::new();
    q.contacts().notes().fetch_cache();

    let fetch = q.query_state().detail().get("contacts.notes").unwrap();
    assert_eq!(fetch.config, FetchConfig::Cache);
    assert_eq!(q.query_state().fetch_plan()[0].fallback, Some(FetchConfig::Query));
}

#[test]
fn test_identity_comparisons() {
    let contact = Contact { id: 11 };

    let mut a = QCustomer::new();
    a.contacts().assoc().eq(&contact);
    let mut b = QCustomer::new();
    b.contacts().assoc().equal_to(&contact);
    assert_eq!(
        a.query_state().where_expr().expressions(),
        b.query_state().where_expr().expressions()
    );

    let mut c = QCustomer::new();
    c.contacts().assoc().not_equal_to(&contact);
    assert_eq!(
        c.query_state().where_expr().expressions(),
        &[Expression::Ne {
            path: "contacts".to_string(),
            value: Value::BigInt(Some(11)),
        }]
    );
}

#[test]
fn test_filter_many_variants() {
    let mut prebuilt = Expressions::new();
    prebuilt.eq("firstName", Value::from("Rob"));

    let mut q = QCustomer::new();
    q.contacts()
        .assoc()
        .filter_many(prebuilt)
        .contacts()
        .assoc()
        .filter_many_expr("lastName istartsWith ?", vec![Value::from("Sm")]);

    let filter = q
        .query_state()
        .where_expr()
        .filter_many_of("contacts")
        .unwrap();
    assert_eq!(filter.expressions().len(), 2);
    assert!(q.query_state().validate().is_ok());
}

#[test]
fn test_malformed_filter_reported_by_query() {
    let mut q = QCustomer::new();
    q.contacts()
        .assoc()
        .filter_many_expr("whenCreated inRange ? to ?", vec![Value::from("2024-01-01")]);

    assert!(q.query_state().validate().is_err());
}

#[test]
fn test_is_empty_and_is_not_empty_both_recorded() {
    let mut q = QCustomer::new();
    q.contacts().assoc().is_empty().contacts().assoc().is_not_empty();

    let exprs = q.query_state().where_expr().expressions();
    assert_eq!(exprs.len(), 2);
    assert!(matches!(exprs[0], Expression::IsEmpty { .. }));
    assert!(matches!(exprs[1], Expression::IsNotEmpty { .. }));
}
