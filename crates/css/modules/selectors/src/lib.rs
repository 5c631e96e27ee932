//! CSS2 selectors: compilation into structural queries and their evaluation.
//!
//! A selector such as `div#main > ul li:first-child` is compiled into a
//! [`CompiledSelector`]: a first compound followed by `(combinator, compound)`
//! steps. Compilation never looks at a tree, so the result can be cached and
//! shared. Evaluation runs against any tree exposed through [`ElementAdapter`].
//!
//! Supported grammar:
//! - Type, universal, `#id` and `.class` selectors
//! - Attributes: `[attr]`, `[attr=value]`, `[attr~=value]`, `[attr|=value]`
//! - Combinators: descendant (whitespace), child (`>`), adjacent sibling (`+`)
//! - `:first-child`, `:last-child`, and `:link`/`:hover`/`:visit`/`:active`,
//!   the last four matching unconditionally
//! - Comma-separated groups

#![forbid(unsafe_code)]

mod cache;
mod compiler;
mod query;
mod specificity;

use core::hash::Hash;
use thiserror::Error;

pub use cache::CompileCache;
pub use compiler::{compile_group, compile_selector};
pub use query::{find, matches_compound, query, query_selector};
pub use specificity::{Specificity, specificity_of};

/// An adapter that abstracts tree access for selector evaluation.
/// Implement this for your DOM layer.
pub trait ElementAdapter {
    /// Cheap node reference.
    type Handle: Copy + Eq + Hash;

    /// First child of `node` that is an element. `node` may be a non-element
    /// container such as a document.
    fn first_element_child(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling element, skipping text and comments.
    fn next_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element, skipping text and comments.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Element name without any namespace prefix.
    fn local_name(&self, element: Self::Handle) -> &str;

    /// Returns the attribute value if present.
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

/// Errors raised while compiling selector text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Part of a compound could not be reduced to a tag or `*`.
    #[error("invalid CSS selector syntax near '{fragment}'")]
    Syntax {
        /// Residual text left after predicate extraction.
        fragment: String,
    },
    /// Valid CSS outside the supported subset, such as `~` or `:nth-child()`.
    #[error("unsupported CSS selector construct '{fragment}'")]
    Unsupported {
        /// The construct as written.
        fragment: String,
    },
    /// An empty selector, or an empty branch of a selector group.
    #[error("empty selector")]
    Empty,
    /// A combinator without a compound on one of its sides.
    #[error("combinator '{combinator}' is missing an operand")]
    DanglingCombinator {
        /// The combinator as written.
        combinator: char,
    },
}

/// Attribute and structural tests attached to a compound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `#id`
    IdEquals(String),
    /// `.class`: whitespace-separated word of `class`.
    ClassContains(String),
    /// `[name]`
    AttrExists { name: String },
    /// `[name=value]`
    AttrEquals { name: String, value: String },
    /// `[name~=value]`: whitespace-separated word.
    AttrContainsWord { name: String, value: String },
    /// `[name|=value]`: exactly `value` or starting with `value-`.
    AttrDashPrefix { name: String, value: String },
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
}

/// One selector step: a tag (or wildcard) plus predicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CompoundSelector {
    /// Local name to match; `None` is the wildcard.
    pub tag: Option<String>,
    /// All must hold.
    pub predicates: Vec<Predicate>,
}

/// Combinators between compounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`: only the single next element sibling is considered.
    AdjacentSibling,
}

/// A compiled selector: the first compound has no combinator, every later
/// compound carries the combinator relating it to the step before.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CompiledSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// A comma-separated group; each branch is evaluated independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SelectorList {
    pub selectors: Vec<CompiledSelector>,
}
