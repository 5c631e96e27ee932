//! CSS inliner.
//!
//! Turns stylesheet text into per-element `style` attributes:
//! parse and expand the stylesheet ([`StyleSheet::parse`]), compile its
//! selectors ([`CssInliner::new`]) and merge each rule into every element it
//! matches ([`CssInliner::apply`]). The target tree is anything implementing
//! [`StyledTree`].

#![forbid(unsafe_code)]

mod inliner;

use thiserror::Error;

pub use css_cascade::{StyleRule, StyleSheet, expand_properties, rank_by_specificity};
pub use css_selectors::{
    CompileCache, CompiledSelector, ElementAdapter, SelectorError, SelectorList, Specificity,
    compile_group, compile_selector, find, query, specificity_of,
};
pub use css_style_attr::{merge_style_attribute, parse_style_attribute, serialize_declarations};
pub use css_syntax::{
    Declaration, DeclarationBlock, RuleBlock, SyntaxError, parse_declarations, parse_stylesheet,
};
pub use inliner::{CssInliner, StyledTree};

/// Anything that can stop an inlining pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InlineError {
    #[error("stylesheet: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("selector: {0}")]
    Selector(#[from] SelectorError),
}

/// Compile every selector of `sheet`, then merge its rules into `tree`.
///
/// # Errors
/// Returns the first selector compilation error; the tree is untouched then.
pub fn apply<T: StyledTree>(sheet: &StyleSheet, tree: &mut T) -> Result<(), InlineError> {
    CssInliner::new(sheet)?.apply(tree);
    Ok(())
}

/// Parse `source` and inline it into `tree`.
///
/// # Errors
/// Grammar errors from parsing, selector errors from compilation. In both
/// cases the tree is untouched.
pub fn inline_css<T: StyledTree>(source: &str, tree: &mut T) -> Result<(), InlineError> {
    apply(&StyleSheet::parse(source)?, tree)
}
