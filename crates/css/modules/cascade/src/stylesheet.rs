//! Per-selector accumulation and specificity ranking.

use crate::expand::expand_properties;
use core::cmp::Reverse;
use css_selectors::{Specificity, specificity_of};
use css_syntax::{DeclarationBlock, RuleBlock, SyntaxError, parse_stylesheet};
use log::{debug, trace};
use std::collections::HashMap;

/// One selector of a ranked stylesheet with its accumulated declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector text exactly as written in the source, trimmed.
    pub selector: String,
    pub specificity: Specificity,
    /// Expanded longhand declarations.
    pub declarations: DeclarationBlock,
}

/// Stylesheet rules keyed by selector text, ordered by descending specificity.
///
/// Equal specificities keep the order in which their selector first appeared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Parse stylesheet text, expand shorthands and rank the result.
    ///
    /// # Errors
    /// Returns the grammar error of the first malformed construct.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        Ok(Self::from_blocks(parse_stylesheet(source)?))
    }

    /// Build a ranked stylesheet from already-parsed rule blocks.
    ///
    /// Each block is expanded, then merged into the entry of every selector it
    /// lists. A selector seen in several blocks accumulates; later properties
    /// override same-named earlier ones.
    pub fn from_blocks(blocks: impl IntoIterator<Item = RuleBlock>) -> Self {
        let mut accumulated: Vec<(String, DeclarationBlock)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for block in blocks {
            let expanded = expand_properties(&block.declarations);
            for selector in block.selectors {
                match index.get(&selector) {
                    Some(&slot) => {
                        trace!("accumulating into existing selector '{selector}'");
                        accumulated[slot].1.merge(&expanded);
                    }
                    None => {
                        index.insert(selector.clone(), accumulated.len());
                        accumulated.push((selector, expanded.clone()));
                    }
                }
            }
        }
        let rules = rank_by_specificity(accumulated);
        debug!("ranked {} selectors", rules.len());
        Self { rules }
    }

    /// Rules in ranking order.
    #[inline]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Iterate rules in ranking order.
    pub fn iter(&self) -> core::slice::Iter<'_, StyleRule> {
        self.rules.iter()
    }

    /// Declarations accumulated for `selector`, if present.
    pub fn get(&self, selector: &str) -> Option<&DeclarationBlock> {
        self.rules
            .iter()
            .find(|rule| rule.selector == selector)
            .map(|rule| &rule.declarations)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'sheet> IntoIterator for &'sheet StyleSheet {
    type Item = &'sheet StyleRule;
    type IntoIter = core::slice::Iter<'sheet, StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Attach specificities and sort by descending specificity.
///
/// The sort is stable: ties keep their input order.
pub fn rank_by_specificity(
    accumulated: impl IntoIterator<Item = (String, DeclarationBlock)>,
) -> Vec<StyleRule> {
    let mut rules: Vec<StyleRule> = accumulated
        .into_iter()
        .map(|(selector, declarations)| StyleRule {
            specificity: specificity_of(&selector),
            selector,
            declarations,
        })
        .collect();
    rules.sort_by_key(|rule| Reverse(rule.specificity));
    rules
}
