//! One stylesheet bound to the HTML documents it is applied to.

use anyhow::{Context as _, Result};
use css::{CompileCache, CssInliner, StyleSheet};
use log::debug;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inlines one stylesheet into HTML documents.
///
/// The stylesheet is read and compiled on the first call to
/// [`InlineFilter::filter`]; later calls reuse the compiled form. A failed
/// load is not remembered, so the next call tries again.
#[derive(Debug)]
pub struct InlineFilter {
    path: PathBuf,
    cache: Option<Arc<Mutex<CompileCache>>>,
    inliner: OnceCell<CssInliner>,
}

impl InlineFilter {
    /// A filter for the stylesheet at `path` with its own selector cache.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cache(path, None)
    }

    /// A filter whose selectors are compiled through `cache` when one is given.
    pub fn with_cache(path: impl Into<PathBuf>, cache: Option<Arc<Mutex<CompileCache>>>) -> Self {
        Self {
            path: path.into(),
            cache,
            inliner: OnceCell::new(),
        }
    }

    /// A filter for stylesheet text that is already in memory.
    ///
    /// # Errors
    /// Returns an error if the stylesheet does not parse or a selector does not compile.
    pub fn from_source(source: &str) -> Result<Self> {
        let inliner = compile(source, None).context("Failed to compile inline stylesheet")?;
        Ok(Self {
            path: PathBuf::new(),
            cache: None,
            inliner: OnceCell::with_value(inliner),
        })
    }

    /// Stylesheet location this filter reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the stylesheet has been loaded and compiled.
    pub fn is_loaded(&self) -> bool {
        self.inliner.get().is_some()
    }

    /// Parse `markup`, inline the stylesheet and serialize the result.
    ///
    /// # Errors
    /// Returns an error if the stylesheet cannot be read, parsed or compiled.
    pub fn filter(&self, markup: &str) -> Result<String> {
        let inliner = self.inliner.get_or_try_init(|| self.load())?;
        let mut document = html::parse_html(markup).context("Failed to build HTML document")?;
        inliner.apply(&mut document);
        Ok(document.to_html())
    }

    fn load(&self) -> Result<CssInliner> {
        let source = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read stylesheet {}", self.path.display()))?;
        let inliner = compile(&source, self.cache.as_deref())
            .with_context(|| format!("Failed to compile stylesheet {}", self.path.display()))?;
        debug!(
            "loaded stylesheet {} with {} rules",
            self.path.display(),
            inliner.len()
        );
        Ok(inliner)
    }
}

fn compile(source: &str, cache: Option<&Mutex<CompileCache>>) -> Result<CssInliner> {
    let sheet = StyleSheet::parse(source)?;
    let inliner = match cache {
        Some(shared) => CssInliner::with_cache(&sheet, &mut shared.lock())?,
        None => CssInliner::new(&sheet)?,
    };
    Ok(inliner)
}
