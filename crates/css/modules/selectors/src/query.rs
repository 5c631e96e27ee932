//! Evaluation of compiled selectors against a tree.
//!
//! Evaluation runs left to right, like a path expression: the first compound
//! is searched among all elements below the context node, and every later
//! step maps the current node set through its combinator. Each step walks the
//! context subtree once in document order, so results come out ordered and
//! de-duplicated.

use crate::{Combinator, CompiledSelector, CompoundSelector, ElementAdapter, Predicate, SelectorList};
use std::collections::HashSet;

/// Match a compound selector against a single element.
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    matches_compound_with(adapter, element, compound, true)
}

/// `positional` false skips `:first-child`/`:last-child`; the element reached
/// through `+` is the only node of its step, so both hold trivially.
fn matches_compound_with<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
    positional: bool,
) -> bool {
    if let Some(tag) = &compound.tag
        && !adapter.local_name(element).eq_ignore_ascii_case(tag)
    {
        return false;
    }
    compound
        .predicates
        .iter()
        .filter(|predicate| {
            positional || !matches!(predicate, Predicate::FirstChild | Predicate::LastChild)
        })
        .all(|predicate| matches_predicate(adapter, element, predicate))
}

fn matches_predicate<A: ElementAdapter>(adapter: &A, element: A::Handle, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::IdEquals(id_value) => adapter.attr(element, "id") == Some(id_value.as_str()),
        Predicate::ClassContains(class_name) => {
            has_word(adapter.attr(element, "class"), class_name)
        }
        Predicate::AttrExists { name } => adapter.attr(element, name).is_some(),
        Predicate::AttrEquals { name, value } => adapter.attr(element, name) == Some(value.as_str()),
        Predicate::AttrContainsWord { name, value } => has_word(adapter.attr(element, name), value),
        Predicate::AttrDashPrefix { name, value } => {
            adapter.attr(element, name).is_some_and(|attr_value| {
                attr_value == value
                    || attr_value
                        .strip_prefix(value.as_str())
                        .is_some_and(|tail| tail.starts_with('-'))
            })
        }
        Predicate::FirstChild => adapter.previous_sibling_element(element).is_none(),
        Predicate::LastChild => adapter.next_sibling_element(element).is_none(),
    }
}

fn has_word(attr_value: Option<&str>, word: &str) -> bool {
    attr_value.is_some_and(|text| text.split_ascii_whitespace().any(|item| item == word))
}

/// Evaluate a selector group below `context`.
///
/// Branches are evaluated independently and concatenated in branch order;
/// a node already produced by an earlier branch is not repeated.
pub fn query<A: ElementAdapter>(
    adapter: &A,
    list: &SelectorList,
    context: A::Handle,
) -> Vec<A::Handle> {
    let mut seen: HashSet<A::Handle> = HashSet::new();
    let mut out = Vec::new();
    for selector in &list.selectors {
        for element in query_selector(adapter, selector, context) {
            if seen.insert(element) {
                out.push(element);
            }
        }
    }
    out
}

/// First node produced by [`query`], if any.
pub fn find<A: ElementAdapter>(
    adapter: &A,
    list: &SelectorList,
    context: A::Handle,
) -> Option<A::Handle> {
    query(adapter, list, context).into_iter().next()
}

/// Evaluate one compiled selector below `context`, in document order.
pub fn query_selector<A: ElementAdapter>(
    adapter: &A,
    selector: &CompiledSelector,
    context: A::Handle,
) -> Vec<A::Handle> {
    let mut current = vec![context];
    let steps = core::iter::once((Combinator::Descendant, &selector.first))
        .chain(selector.rest.iter().map(|(combinator, compound)| (*combinator, compound)));
    for (combinator, compound) in steps {
        if current.is_empty() {
            break;
        }
        let step = Step {
            adapter,
            combinator,
            compound,
            current: current.iter().copied().collect(),
        };
        let mut next = Vec::new();
        step.walk(context, step.current.contains(&context), &mut next);
        current = next;
    }
    current
}

/// One combinator step over the context subtree.
struct Step<'adapter, 'compound, A: ElementAdapter> {
    adapter: &'adapter A,
    combinator: Combinator,
    compound: &'compound CompoundSelector,
    current: HashSet<A::Handle>,
}

impl<A: ElementAdapter> Step<'_, '_, A> {
    /// Pre-order walk of the element children of `node`.
    /// `inside` is true when `node` or one of its ancestors is in the current set.
    fn walk(&self, node: A::Handle, inside: bool, out: &mut Vec<A::Handle>) {
        let mut cursor = self.adapter.first_element_child(node);
        while let Some(element) = cursor {
            let related = match self.combinator {
                Combinator::Descendant => inside,
                Combinator::Child => self.current.contains(&node),
                Combinator::AdjacentSibling => self
                    .adapter
                    .previous_sibling_element(element)
                    .is_some_and(|previous| self.current.contains(&previous)),
            };
            let positional = self.combinator != Combinator::AdjacentSibling;
            if related && matches_compound_with(self.adapter, element, self.compound, positional) {
                out.push(element);
            }
            self.walk(element, inside || self.current.contains(&element), out);
            cursor = self.adapter.next_sibling_element(element);
        }
    }
}
