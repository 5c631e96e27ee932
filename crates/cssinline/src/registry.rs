//! Process-wide filters, one per stylesheet identifier.

use crate::config::InlineConfig;
use crate::filter::InlineFilter;
use anyhow::{Result, bail};
use css::CompileCache;
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Keeps one [`InlineFilter`] per stylesheet identifier. Entries are never evicted.
#[derive(Debug)]
pub struct FilterRegistry {
    config: InlineConfig,
    filters: Mutex<HashMap<String, Arc<InlineFilter>>>,
    selector_cache: Arc<Mutex<CompileCache>>,
}

static GLOBAL_REGISTRY: Lazy<FilterRegistry> =
    Lazy::new(|| FilterRegistry::new(InlineConfig::from_env()));

/// The process-wide registry, configured from the environment on first use.
pub fn global_registry() -> &'static FilterRegistry {
    &GLOBAL_REGISTRY
}

/// Look up or create the filter for `identifier` in the process-wide registry.
///
/// # Errors
/// Returns an error if `identifier` is empty.
pub fn filter_for(identifier: &str) -> Result<Arc<InlineFilter>> {
    global_registry().filter_for(identifier)
}

impl FilterRegistry {
    pub fn new(config: InlineConfig) -> Self {
        Self {
            config,
            filters: Mutex::new(HashMap::new()),
            selector_cache: Arc::new(Mutex::new(CompileCache::new())),
        }
    }

    #[inline]
    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    /// Return the filter for `identifier`, creating it on first request.
    ///
    /// Creating a filter does not touch the stylesheet; it is loaded when the
    /// filter is first used.
    ///
    /// # Errors
    /// Returns an error if `identifier` is empty.
    pub fn filter_for(&self, identifier: &str) -> Result<Arc<InlineFilter>> {
        if identifier.trim().is_empty() {
            bail!("stylesheet identifier cannot be empty");
        }
        let mut filters = self.filters.lock();
        if let Some(existing) = filters.get(identifier) {
            debug!("filter cache hit for '{identifier}'");
            return Ok(Arc::clone(existing));
        }
        debug!("filter cache miss for '{identifier}'");
        let cache = self
            .config
            .share_selector_cache
            .then(|| Arc::clone(&self.selector_cache));
        let filter = Arc::new(InlineFilter::with_cache(self.config.resolve(identifier), cache));
        filters.insert(identifier.to_owned(), Arc::clone(&filter));
        Ok(filter)
    }

    /// Inline the stylesheet named by `identifier` into `markup`.
    ///
    /// # Errors
    /// See [`FilterRegistry::filter_for`] and [`InlineFilter::filter`].
    pub fn inline(&self, identifier: &str, markup: &str) -> Result<String> {
        self.filter_for(identifier)?.filter(markup)
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.lock().is_empty()
    }

    /// Number of selectors in the shared compile cache.
    pub fn cached_selectors(&self) -> usize {
        self.selector_cache.lock().len()
    }
}
