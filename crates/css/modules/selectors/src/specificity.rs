//! Selector specificity, computed from selector text alone.
//!
//! The selector is split on literal spaces and every token is weighted on its
//! own, combinators included:
//!
//! | token | weight |
//! |---|---|
//! | `#id` | 100 |
//! | `.class` | 10 |
//! | `tag#id` | 101 |
//! | `tag.class` | 11 |
//! | anything else (`tag`, `*`, `[attr]`, `a:hover`, `>`, `+`) | 1 |

use core::fmt;

/// Summed token weights of one selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32);

impl fmt::Display for Specificity {
    #[allow(clippy::min_ident_chars, reason = "Keeps the `Display::fmt` parameter name")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Compute the specificity of a selector string. Pure; no tree involved.
pub fn specificity_of(selector: &str) -> Specificity {
    Specificity(selector.split(' ').map(|token| token_weight(token.trim())).sum())
}

fn token_weight(token: &str) -> u32 {
    if token.starts_with('#') {
        100
    } else if token.starts_with('.') {
        10
    } else if is_compound_pair(token, '#') {
        101
    } else if is_compound_pair(token, '.') {
        11
    } else {
        1
    }
}

/// `word<marker>word`, both sides plain identifiers.
fn is_compound_pair(token: &str, marker: char) -> bool {
    token
        .split_once(marker)
        .is_some_and(|(tag, name)| is_word(tag) && is_word(name))
}

fn is_word(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|character| character.is_alphanumeric() || character == '_' || character == '-')
}
