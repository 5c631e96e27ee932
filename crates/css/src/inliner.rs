//! Style merging: writes ranked rules into the `style` attribute of matched elements.

use crate::InlineError;
use css_cascade::StyleSheet;
use css_selectors::{CompileCache, ElementAdapter, SelectorError, SelectorList, compile_group, query};
use css_style_attr::merge_style_attribute;
use css_syntax::DeclarationBlock;
use log::{debug, trace};
use std::sync::Arc;

/// A tree the inliner can write to.
pub trait StyledTree: ElementAdapter {
    /// Context node for the selector search; every element lies below it.
    fn search_root(&self) -> Self::Handle;

    /// Set (or replace) an attribute of `element`.
    fn set_attr(&mut self, element: Self::Handle, name: &str, value: String);
}

#[derive(Clone, Debug)]
struct CompiledRule {
    selector: String,
    list: Arc<SelectorList>,
    declarations: DeclarationBlock,
}

/// A stylesheet whose selectors are all compiled, ready to apply to any number of trees.
///
/// Rules are applied in ranking order (descending specificity), and each
/// application re-reads the element's current `style`. For a property set by
/// several matching rules the last applied rule wins, so the lowest-ranked
/// rule overrides higher-ranked ones.
#[derive(Clone, Debug, Default)]
pub struct CssInliner {
    rules: Vec<CompiledRule>,
}

impl CssInliner {
    /// Compile every selector of `sheet`.
    ///
    /// # Errors
    /// The first selector that fails to compile.
    pub fn new(sheet: &StyleSheet) -> Result<Self, InlineError> {
        Self::compile_with(sheet, |selector| compile_group(selector).map(Arc::new))
    }

    /// Like [`CssInliner::new`], going through a shared compile cache.
    ///
    /// # Errors
    /// The first selector that fails to compile.
    pub fn with_cache(sheet: &StyleSheet, cache: &mut CompileCache) -> Result<Self, InlineError> {
        Self::compile_with(sheet, |selector| cache.get_or_compile(selector))
    }

    fn compile_with<F>(sheet: &StyleSheet, mut compile: F) -> Result<Self, InlineError>
    where
        F: FnMut(&str) -> Result<Arc<SelectorList>, SelectorError>,
    {
        let mut rules = Vec::with_capacity(sheet.len());
        for rule in sheet {
            let list = compile(&rule.selector)?;
            trace!("compiled '{}' into {} branches", rule.selector, list.selectors.len());
            rules.push(CompiledRule {
                selector: rule.selector.clone(),
                list,
                declarations: rule.declarations.clone(),
            });
        }
        Ok(Self { rules })
    }

    /// Merge every rule into the elements it matches.
    pub fn apply<T: StyledTree>(&self, tree: &mut T) {
        let root = tree.search_root();
        for rule in &self.rules {
            let matched = query(tree, &rule.list, root);
            debug!("'{}' matched {} elements", rule.selector, matched.len());
            for element in matched {
                let style = merge_style_attribute(tree.attr(element, "style"), &rule.declarations);
                tree.set_attr(element, "style", style);
            }
        }
    }

    /// Number of compiled rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
