//! The root query object owned by typed query beans.

use super::{Expressions, FetchDetail, QueryFetch, QueryRoot};
use crate::config::{QueryConfig, DEFAULT_CONFIG};
use crate::error::QueryError;
use crate::fetch::FetchConfig;
use crate::property::PropertySet;
use std::marker::PhantomData;

/// Query state for entity type `T`
///
/// Holds the registered fetch paths and the where expression list. Typed root
/// beans embed one `Query` and expose it through [`QueryRoot`]; `Query` also
/// implements [`QueryRoot`] itself so associations can be bound to it directly.
pub struct Query<T> {
    detail: FetchDetail,
    where_expr: Expressions,
    config: QueryConfig,
    _entity: PhantomData<fn() -> T>,
}

/// A fetch path resolved against the query configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlanEntry {
    pub path: String,
    pub properties: Option<PropertySet>,
    pub config: FetchConfig,
    /// Parent identities per secondary statement; `None` for joined fetches
    pub batch_size: Option<u32>,
    /// Strategy for cache misses
    pub fallback: Option<FetchConfig>,
}

impl<T> Query<T> {
    /// Create a query using the process-wide configuration
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG.clone())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        Self {
            detail: FetchDetail::new(),
            where_expr: Expressions::new(),
            config,
            _entity: PhantomData,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn detail(&self) -> &FetchDetail {
        &self.detail
    }

    pub fn where_expr(&self) -> &Expressions {
        &self.where_expr
    }

    pub fn where_expr_mut(&mut self) -> &mut Expressions {
        &mut self.where_expr
    }

    /// Fetch paths with batch sizes and cache fallbacks filled in
    pub fn fetch_plan(&self) -> Vec<FetchPlanEntry> {
        self.detail
            .paths()
            .iter()
            .map(|fetch| FetchPlanEntry {
                path: fetch.path.clone(),
                properties: fetch.properties.clone(),
                config: fetch.config,
                batch_size: fetch.config.batch_size(&self.config),
                fallback: fetch.config.fallback(),
            })
            .collect()
    }

    /// Check the where expressions before the query is handed to an executor
    pub fn validate(&self) -> Result<(), QueryError> {
        self.where_expr.validate()
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("entity", &std::any::type_name::<T>())
            .field("detail", &self.detail)
            .field("where_expr", &self.where_expr)
            .field("config", &self.config)
            .finish()
    }
}

impl<T> QueryFetch for Query<T> {
    fn fetch_path(&mut self, path: &str, properties: Option<&str>, config: FetchConfig) {
        self.detail.fetch_path(path, properties, config);
    }

    fn fetch_properties(&mut self, path: &str, properties: PropertySet, config: FetchConfig) {
        self.detail.fetch_properties(path, properties, config);
    }
}

impl<T> QueryRoot for Query<T> {
    type Query = Self;
    type Expr = Expressions;

    fn query(&mut self) -> &mut Self {
        self
    }

    fn expr(&mut self) -> &mut Expressions {
        &mut self.where_expr
    }
}
