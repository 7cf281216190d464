//! Registered fetch paths of a query.

use super::QueryFetch;
use crate::fetch::FetchConfig;
use crate::property::PropertySet;

/// One fetch registration: an association path, what to select, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPath {
    pub path: String,
    /// `None` selects every property of the association
    pub properties: Option<PropertySet>,
    pub config: FetchConfig,
}

/// Fetch paths of a query in registration order
///
/// Registering a path that is already present replaces the earlier entry in
/// place: the last call for a path wins and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchDetail {
    paths: Vec<FetchPath>,
}

impl FetchDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the registration for `fetch.path`
    pub fn register(&mut self, fetch: FetchPath) {
        match self.paths.iter_mut().find(|p| p.path == fetch.path) {
            Some(existing) => {
                if *existing != fetch {
                    log::debug!(
                        "fetch path `{}` replaced: {} -> {}",
                        fetch.path,
                        existing.config,
                        fetch.config
                    );
                }
                *existing = fetch;
            }
            None => {
                log::trace!("fetch path `{}` registered ({})", fetch.path, fetch.config);
                self.paths.push(fetch);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&FetchPath> {
        self.paths.iter().find(|p| p.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> &[FetchPath] {
        &self.paths
    }
}

impl QueryFetch for FetchDetail {
    fn fetch_path(&mut self, path: &str, properties: Option<&str>, config: FetchConfig) {
        let properties = properties.map(PropertySet::parse);
        self.fetch_properties(path, properties.unwrap_or_default(), config);
    }

    fn fetch_properties(&mut self, path: &str, properties: PropertySet, config: FetchConfig) {
        // an empty selection means the whole association
        let properties = (!properties.is_empty()).then_some(properties);
        self.register(FetchPath {
            path: path.to_string(),
            properties,
            config,
        });
    }
}
