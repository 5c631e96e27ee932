//! Configuration for stylesheet lookup and selector caching.

use std::env;
use std::path::{Path, PathBuf};

const ROOT_VAR: &str = "CSSINLINE_STYLESHEET_ROOT";
const SHARED_CACHE_VAR: &str = "CSSINLINE_SHARED_SELECTOR_CACHE";

/// Runtime configuration of the inlining adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineConfig {
    /// Base directory for relative stylesheet identifiers
    pub stylesheet_root: Option<PathBuf>,
    /// Whether filters from one registry share a compiled-selector cache
    pub share_selector_cache: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl InlineConfig {
    /// Construct a configuration with explicit values.
    #[inline]
    #[must_use]
    pub const fn new(stylesheet_root: Option<PathBuf>, share_selector_cache: bool) -> Self {
        Self {
            stylesheet_root,
            share_selector_cache,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `CSSINLINE_STYLESHEET_ROOT`: base directory for relative stylesheet paths
    /// - `CSSINLINE_SHARED_SELECTOR_CACHE`: set to "0" to give every filter its own cache
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from `lookup`, which maps a variable name to its value.
    ///
    /// An empty root counts as unset. A missing lookup yields [`InlineConfig::default`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let stylesheet_root = lookup(ROOT_VAR)
            .filter(|val| !val.is_empty())
            .map(PathBuf::from);
        let share_selector_cache =
            lookup(SHARED_CACHE_VAR).is_none_or(|val| val.trim() != "0");
        Self::new(stylesheet_root, share_selector_cache)
    }

    /// Resolve a stylesheet identifier to a file path.
    ///
    /// Absolute identifiers, and every identifier when no root is configured,
    /// are used as given.
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        let path = Path::new(identifier);
        match &self.stylesheet_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
