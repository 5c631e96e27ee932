//! Selector compilation.
//!
//! A branch is split on whitespace. `>` and `+` set the combinator for the
//! next compound; every other token is a compound, reduced by a fixed
//! pipeline of predicate extractors. Each extractor strips its suffix from
//! the token and hands the residue to the next one; whatever remains at the
//! end must be a bare tag, `*`, or nothing.

use crate::{Combinator, CompiledSelector, CompoundSelector, Predicate, SelectorError, SelectorList};
use log::trace;

/// Strips one predicate from the end of a compound token, returning the residue.
type Extractor = fn(&str) -> Result<Option<(&str, Predicate)>, SelectorError>;

/// Applied in this order, each at most once.
const PREDICATE_EXTRACTORS: [Extractor; 6] = [
    extract_id,
    extract_class,
    extract_attr_contains_word,
    extract_attr_dash_prefix,
    extract_attr_equals,
    extract_attr_exists,
];

/// Compile a selector list (comma-separated) into independent branches.
///
/// # Errors
/// Fails on the first branch that does not compile; see [`compile_selector`].
pub fn compile_group(input: &str) -> Result<SelectorList, SelectorError> {
    let selectors = input
        .split(',')
        .map(compile_selector)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList { selectors })
}

/// Compile one complex selector (no commas).
///
/// # Errors
/// - [`SelectorError::Empty`] for blank input.
/// - [`SelectorError::DanglingCombinator`] for a leading, trailing or doubled
///   combinator.
/// - [`SelectorError::Unsupported`] for `~` (spaced or not) and pseudo-classes outside the
///   supported set.
/// - [`SelectorError::Syntax`] for any other residue.
pub fn compile_selector(input: &str) -> Result<CompiledSelector, SelectorError> {
    let mut first: Option<CompoundSelector> = None;
    let mut rest: Vec<(Combinator, CompoundSelector)> = Vec::new();
    let mut pending: Option<(char, Combinator)> = None;

    for token in input.split_whitespace() {
        let explicit = match token {
            ">" => Some(('>', Combinator::Child)),
            "+" => Some(('+', Combinator::AdjacentSibling)),
            "~" => {
                return Err(SelectorError::Unsupported {
                    fragment: token.to_owned(),
                });
            }
            _ => None,
        };
        if let Some((symbol, combinator)) = explicit {
            if first.is_none() || pending.is_some() {
                return Err(SelectorError::DanglingCombinator { combinator: symbol });
            }
            pending = Some((symbol, combinator));
            continue;
        }

        let compound = compile_compound(token)?;
        if first.is_none() {
            first = Some(compound);
        } else {
            let combinator = pending.map_or(Combinator::Descendant, |(_, comb)| comb);
            rest.push((combinator, compound));
        }
        pending = None;
    }

    if let Some((symbol, _)) = pending {
        return Err(SelectorError::DanglingCombinator { combinator: symbol });
    }
    let first = first.ok_or(SelectorError::Empty)?;
    trace!("compiled '{}' into {} steps", input.trim(), rest.len() + 1);
    Ok(CompiledSelector { first, rest })
}

/// Reduce one whitespace-free token to a compound selector.
fn compile_compound(token: &str) -> Result<CompoundSelector, SelectorError> {
    if has_sibling_combinator(token) {
        return Err(unsupported(token));
    }
    let mut residue = token;
    let mut predicates = Vec::new();
    for extractor in PREDICATE_EXTRACTORS {
        if let Some((remaining, predicate)) = extractor(residue)? {
            predicates.push(predicate);
            residue = remaining;
        }
    }

    if let Some((tag, pseudo)) = residue.split_once(':') {
        if !is_ident(tag) {
            return Err(unsupported(token));
        }
        match pseudo {
            "first-child" => predicates.push(Predicate::FirstChild),
            "last-child" => predicates.push(Predicate::LastChild),
            // No link or interaction state exists here; these always match.
            "link" | "hover" | "visit" | "active" => {}
            _ => return Err(unsupported(token)),
        }
        return Ok(CompoundSelector {
            tag: Some(tag.to_owned()),
            predicates,
        });
    }

    let tag = match residue {
        "" | "*" => None,
        name if is_ident(name) => Some(name.to_owned()),
        other => {
            return Err(SelectorError::Syntax {
                fragment: other.to_owned(),
            });
        }
    };
    Ok(CompoundSelector { tag, predicates })
}

/// A `~` outside attribute brackets, as in `a~b`.
fn has_sibling_combinator(token: &str) -> bool {
    let mut depth = 0_usize;
    for character in token.chars() {
        match character {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '~' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn unsupported(token: &str) -> SelectorError {
    SelectorError::Unsupported {
        fragment: token.to_owned(),
    }
}

/// Identifier characters: alphanumerics, `_` and `-`.
fn is_ident(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|character| character.is_alphanumeric() || character == '_' || character == '-')
}

/// `tag#name`
fn extract_id(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    Ok(split_suffix(token, '#').map(|(rest, name)| (rest, Predicate::IdEquals(name.to_owned()))))
}

/// `tag.name`
fn extract_class(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    Ok(split_suffix(token, '.')
        .map(|(rest, name)| (rest, Predicate::ClassContains(name.to_owned()))))
}

fn split_suffix(token: &str, marker: char) -> Option<(&str, &str)> {
    let (rest, name) = token.rsplit_once(marker)?;
    is_ident(name).then_some((rest, name))
}

/// `tag[name~=value]`
fn extract_attr_contains_word(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    extract_attr_operator(token, "~=", |name, value| Predicate::AttrContainsWord { name, value })
}

/// `tag[name|=value]`
fn extract_attr_dash_prefix(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    extract_attr_operator(token, "|=", |name, value| Predicate::AttrDashPrefix { name, value })
}

/// `tag[name=value]`
fn extract_attr_equals(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    extract_attr_operator(token, "=", |name, value| Predicate::AttrEquals { name, value })
}

/// `tag[name]`
fn extract_attr_exists(token: &str) -> Result<Option<(&str, Predicate)>, SelectorError> {
    let Some((tag, inner)) = split_attribute(token) else {
        return Ok(None);
    };
    check_attr_name(token, inner)?;
    Ok(Some((
        tag,
        Predicate::AttrExists {
            name: inner.to_owned(),
        },
    )))
}

fn extract_attr_operator<'token>(
    token: &'token str,
    operator: &str,
    build: fn(String, String) -> Predicate,
) -> Result<Option<(&'token str, Predicate)>, SelectorError> {
    let Some((tag, inner)) = split_attribute(token) else {
        return Ok(None);
    };
    let Some((name, raw_value)) = inner.rsplit_once(operator) else {
        return Ok(None);
    };
    if name.is_empty() || raw_value.is_empty() {
        return Ok(None);
    }
    check_attr_name(token, name)?;
    let value = unquote(token, raw_value)?;
    Ok(Some((tag, build(name.to_owned(), value))))
}

/// Split `tag[inner]` where `tag` is an identifier and `inner` has no `]`.
fn split_attribute(token: &str) -> Option<(&str, &str)> {
    let body = token.strip_suffix(']')?;
    let (tag, inner) = body.split_once('[')?;
    (is_ident(tag) && !inner.is_empty() && !inner.contains(']')).then_some((tag, inner))
}

fn check_attr_name(token: &str, name: &str) -> Result<(), SelectorError> {
    if is_ident(name) {
        return Ok(());
    }
    // `^=`, `$=` and `*=` leave their operator glued to the name.
    if name.ends_with(['^', '$', '*']) {
        return Err(unsupported(token));
    }
    Err(SelectorError::Syntax {
        fragment: token.to_owned(),
    })
}

/// Unquoted values are taken literally; quoted ones must close with the same quote.
fn unquote(token: &str, raw: &str) -> Result<String, SelectorError> {
    let Some(quote) = raw.chars().next().filter(|first| *first == '"' || *first == '\'') else {
        return Ok(raw.to_owned());
    };
    raw.get(1..)
        .and_then(|tail| tail.strip_suffix(quote))
        .map(ToOwned::to_owned)
        .ok_or_else(|| SelectorError::Syntax {
            fragment: token.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> CompoundSelector {
        CompoundSelector {
            tag: Some(name.to_owned()),
            predicates: Vec::new(),
        }
    }

    fn with(mut compound: CompoundSelector, predicate: Predicate) -> CompoundSelector {
        compound.predicates.push(predicate);
        compound
    }

    #[test]
    fn descendant_and_child_steps() -> Result<(), SelectorError> {
        let sel = compile_selector("div > span b")?;
        assert_eq!(sel.first, tag("div"));
        assert_eq!(
            sel.rest,
            vec![
                (Combinator::Child, tag("span")),
                (Combinator::Descendant, tag("b")),
            ]
        );
        Ok(())
    }

    #[test]
    fn combinator_resets_after_each_compound() -> Result<(), SelectorError> {
        let sel = compile_selector("i + b em")?;
        assert_eq!(
            sel.rest,
            vec![
                (Combinator::AdjacentSibling, tag("b")),
                (Combinator::Descendant, tag("em")),
            ]
        );
        Ok(())
    }

    #[test]
    fn id_then_class_extraction() -> Result<(), SelectorError> {
        let sel = compile_selector("div.note#main")?;
        assert_eq!(
            sel.first,
            with(
                with(tag("div"), Predicate::IdEquals("main".to_owned())),
                Predicate::ClassContains("note".to_owned())
            )
        );
        let bare = compile_selector(".foo")?;
        assert_eq!(bare.first.tag, None);
        assert_eq!(
            bare.first.predicates,
            vec![Predicate::ClassContains("foo".to_owned())]
        );
        Ok(())
    }

    #[test]
    fn attribute_operators() -> Result<(), SelectorError> {
        let cases = [
            (
                "li[title]",
                Predicate::AttrExists {
                    name: "title".to_owned(),
                },
            ),
            (
                "li[title=bar]",
                Predicate::AttrEquals {
                    name: "title".to_owned(),
                    value: "bar".to_owned(),
                },
            ),
            (
                "li[title=\"bar\"]",
                Predicate::AttrEquals {
                    name: "title".to_owned(),
                    value: "bar".to_owned(),
                },
            ),
            (
                "li[rel~='next']",
                Predicate::AttrContainsWord {
                    name: "rel".to_owned(),
                    value: "next".to_owned(),
                },
            ),
            (
                "li[lang|=en]",
                Predicate::AttrDashPrefix {
                    name: "lang".to_owned(),
                    value: "en".to_owned(),
                },
            ),
        ];
        for (source, predicate) in cases {
            let sel = compile_selector(source)?;
            assert_eq!(sel.first, with(tag("li"), predicate), "{source}");
        }
        Ok(())
    }

    #[test]
    fn pseudo_classes() -> Result<(), SelectorError> {
        assert_eq!(
            compile_selector("li:first-child")?.first,
            with(tag("li"), Predicate::FirstChild)
        );
        assert_eq!(
            compile_selector("li:last-child")?.first,
            with(tag("li"), Predicate::LastChild)
        );
        for source in ["a:link", "a:hover", "a:visit", "a:active"] {
            assert_eq!(compile_selector(source)?.first, tag("a"), "{source}");
        }
        Ok(())
    }

    #[test]
    fn universal_and_empty_tag_are_wildcards() -> Result<(), SelectorError> {
        assert_eq!(compile_selector("*")?.first, CompoundSelector::default());
        assert_eq!(
            compile_selector("#x")?.first,
            CompoundSelector {
                tag: None,
                predicates: vec![Predicate::IdEquals("x".to_owned())],
            }
        );
        Ok(())
    }

    #[test]
    fn group_compiles_each_branch() -> Result<(), SelectorError> {
        let list = compile_group("h1, div > p ,a:hover")?;
        assert_eq!(list.selectors.len(), 3);
        assert_eq!(list.selectors[2].first, tag("a"));
        assert_eq!(compile_group("a,,b"), Err(SelectorError::Empty));
        Ok(())
    }

    #[test]
    fn unsupported_constructs() {
        for source in ["li:nth-child(2)", "a:visited", "a ~ b", "a[href^=http]", "p:not(.x)"] {
            assert!(
                matches!(compile_selector(source), Err(SelectorError::Unsupported { .. })),
                "{source}"
            );
        }
    }

    #[test]
    fn sibling_combinator_inside_a_token_is_unsupported() -> Result<(), SelectorError> {
        assert_eq!(
            compile_selector("a~b"),
            Err(SelectorError::Unsupported {
                fragment: "a~b".to_owned()
            })
        );
        assert!(matches!(
            compile_selector("ul li[title]~li"),
            Err(SelectorError::Unsupported { .. })
        ));
        let word = compile_selector("li[title~=x]")?;
        assert_eq!(
            word.first.predicates,
            vec![Predicate::AttrContainsWord {
                name: "title".to_owned(),
                value: "x".to_owned()
            }]
        );
        Ok(())
    }

    #[test]
    fn syntax_errors_name_the_residue() {
        assert_eq!(
            compile_selector("div>b"),
            Err(SelectorError::Syntax {
                fragment: "div>b".to_owned()
            })
        );
        assert_eq!(
            compile_selector("li[title=\"bar]"),
            Err(SelectorError::Syntax {
                fragment: "li[title=\"bar]".to_owned()
            })
        );
        assert!(matches!(
            compile_selector("[title]"),
            Err(SelectorError::Syntax { .. })
        ));
    }

    #[test]
    fn dangling_combinators() {
        assert_eq!(
            compile_selector("> b"),
            Err(SelectorError::DanglingCombinator { combinator: '>' })
        );
        assert_eq!(
            compile_selector("i +"),
            Err(SelectorError::DanglingCombinator { combinator: '+' })
        );
        assert_eq!(
            compile_selector("i > + b"),
            Err(SelectorError::DanglingCombinator { combinator: '+' })
        );
        assert_eq!(compile_selector("   "), Err(SelectorError::Empty));
    }
}
