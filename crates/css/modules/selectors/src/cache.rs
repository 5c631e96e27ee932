//! Compiled selector memoization.
//! Compilation is a pure function of the selector text, so results can be
//! shared between stylesheets and passes.

use crate::compiler::compile_group;
use crate::{SelectorError, SelectorList};
use std::collections::HashMap;
use std::sync::Arc;

/// Memo of `compile_group`, keyed by the exact selector text. No eviction.
#[derive(Default, Debug)]
pub struct CompileCache {
    store: HashMap<String, Arc<SelectorList>>,
}

impl CompileCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached compilation of `selector`, compiling it on first use.
    /// Failures are not cached.
    ///
    /// # Errors
    /// Propagates the compilation error.
    pub fn get_or_compile(&mut self, selector: &str) -> Result<Arc<SelectorList>, SelectorError> {
        if let Some(hit) = self.store.get(selector) {
            return Ok(Arc::clone(hit));
        }
        let compiled = Arc::new(compile_group(selector)?);
        self.store.insert(selector.to_owned(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Number of cached selectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when nothing has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
