//! CSS grammar parsing: comment stripping, rule blocks and declaration lists.
//!
//! This is a deliberately small grammar: a stylesheet is a flat sequence of
//! `selectors { declarations }` blocks. At-rules and nested blocks are rejected
//! with [`SyntaxError::UnsupportedConstruct`] instead of being guessed at.

#![forbid(unsafe_code)]

mod comments;
mod declarations;
mod rules;

use core::fmt;
use core::slice;
use thiserror::Error;

pub use comments::strip_comments;
pub use declarations::{parse_declarations, split_declaration};
pub use rules::{parse_rules, parse_stylesheet};

/// Errors produced while parsing stylesheet text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A declaration segment has no `:` between property and value.
    #[error("malformed declaration '{declaration}': expected 'property: value'")]
    MalformedDeclaration {
        /// The offending segment, trimmed.
        declaration: String,
    },
    /// At-rules, nested blocks and stray braces.
    #[error("unsupported CSS construct: {construct}")]
    UnsupportedConstruct {
        /// Short description of what was found.
        construct: String,
    },
    /// A `;` outside any block, such as `a { x: 1 };`.
    #[error("stray ';' outside a rule block near '{context}'")]
    StraySemicolon {
        /// Text around the semicolon, trimmed.
        context: String,
    },
    /// Selector text that never reaches a closing `}`.
    #[error("unterminated rule block after '{selectors}'")]
    UnterminatedBlock {
        /// The selector text preceding the missing block.
        selectors: String,
    },
}

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, trimmed and ASCII-lowercased.
    pub property: String,
    /// Value text, trimmed. Never interpreted.
    pub value: String,
}

/// An insertion-ordered property → value map.
///
/// Re-inserting an existing property replaces its value in place, so the
/// property keeps the position of its first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    entries: Vec<Declaration>,
}

impl DeclarationBlock {
    /// Create an empty block.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite a property. Returns the previous value, if any.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let property = property.into();
        let value = value.into();
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|decl| decl.property == property)
        {
            return Some(core::mem::replace(&mut existing.value, value));
        }
        self.entries.push(Declaration { property, value });
        None
    }

    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }

    /// Whether the property is present.
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Overlay `other` onto `self`; values from `other` win.
    pub fn merge(&mut self, other: &Self) {
        for decl in other {
            self.insert(decl.property.as_str(), decl.value.as_str());
        }
    }

    /// Number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no property is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate declarations in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Declaration> {
        self.entries.iter()
    }
}

impl<'block> IntoIterator for &'block DeclarationBlock {
    type Item = &'block Declaration;
    type IntoIter = slice::Iter<'block, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<Key: Into<String>, Value: Into<String>> FromIterator<(Key, Value)> for DeclarationBlock {
    fn from_iter<Iter: IntoIterator<Item = (Key, Value)>>(iter: Iter) -> Self {
        let mut block = Self::new();
        for (property, value) in iter {
            block.insert(property, value);
        }
        block
    }
}

/// Serializes as `property:value;property:value`, values verbatim.
impl fmt::Display for DeclarationBlock {
    #[allow(clippy::min_ident_chars, reason = "Keeps the `Display::fmt` parameter name")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, decl) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", decl.property, decl.value)?;
        }
        Ok(())
    }
}

/// One `selectors { declarations }` block as written in the source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleBlock {
    /// Comma-separated selectors, trimmed, empty entries removed. Never normalized.
    pub selectors: Vec<String>,
    /// Declarations in source order, last duplicate wins.
    pub declarations: DeclarationBlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut block = DeclarationBlock::new();
        block.insert("color", "red");
        block.insert("margin", "0");
        assert_eq!(block.insert("color", "blue").as_deref(), Some("red"));
        assert_eq!(block.to_string(), "color:blue;margin:0");
    }

    #[test]
    fn merge_appends_new_properties_after_existing() {
        let mut base: DeclarationBlock = [("color", "blue"), ("font-size", "10px")]
            .into_iter()
            .collect();
        let rule: DeclarationBlock = [("color", "red"), ("border-top-width", "1px")]
            .into_iter()
            .collect();
        base.merge(&rule);
        assert_eq!(base.to_string(), "color:red;font-size:10px;border-top-width:1px");
    }

    #[test]
    fn empty_block_serializes_to_empty_string() {
        assert_eq!(DeclarationBlock::new().to_string(), "");
    }
}
