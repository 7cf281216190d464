//! Fetch strategies for associations.

use crate::config::QueryConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an association is loaded
///
/// The four variants are the only fetch configurations; they are `Copy`
/// constants, never built per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchConfig {
    /// Eager fetch joined into the main SQL statement
    #[default]
    Default,
    /// Eager fetch via a secondary query keyed by parent identities
    Query,
    /// Read through the L2 bean cache; misses are loaded as [`FetchConfig::Query`]
    Cache,
    /// Deferred until the association is first accessed
    Lazy,
}

impl FetchConfig {
    /// The strategy the cache collaborator must use for misses
    ///
    /// ```
    /// use typequery::FetchConfig;
    ///
    /// assert_eq!(FetchConfig::Cache.fallback(), Some(FetchConfig::Query));
    /// assert_eq!(FetchConfig::Query.fallback(), None);
    /// ```
    pub const fn fallback(self) -> Option<FetchConfig> {
        match self {
            FetchConfig::Cache => Some(FetchConfig::Query),
            _ => None,
        }
    }

    /// Whether the association is loaded outside the main SQL statement
    pub const fn is_secondary(self) -> bool {
        !matches!(self, FetchConfig::Default)
    }

    /// Parent identities loaded per secondary statement
    ///
    /// `Default` fetches are part of the main statement and have no batch.
    pub fn batch_size(self, config: &QueryConfig) -> Option<u32> {
        match self {
            FetchConfig::Default => None,
            FetchConfig::Query | FetchConfig::Cache => Some(config.query_batch_size),
            FetchConfig::Lazy => Some(config.lazy_batch_size),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FetchConfig::Default => "default",
            FetchConfig::Query => "query",
            FetchConfig::Cache => "cache",
            FetchConfig::Lazy => "lazy",
        }
    }
}

impl fmt::Display for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
