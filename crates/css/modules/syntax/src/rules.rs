//! Splitting stylesheet text into rule blocks.

use crate::comments::strip_comments;
use crate::declarations::parse_declarations;
use crate::{RuleBlock, SyntaxError};
use log::{debug, trace};

/// Strip comments, then split the text into rule blocks.
///
/// # Errors
/// See [`parse_rules`].
pub fn parse_stylesheet(source: &str) -> Result<Vec<RuleBlock>, SyntaxError> {
    parse_rules(&strip_comments(source))
}

/// Split comment-free stylesheet text into rule blocks.
///
/// The text before each `{...}` group is the selector buffer; the text inside
/// is handed to [`parse_declarations`]. Blocks are not nested: the first `}`
/// after a `{` closes it. A block with no selectors in front of it is dropped.
///
/// # Errors
/// - [`SyntaxError::UnsupportedConstruct`] for at-rules, nested blocks or a
///   stray `}`.
/// - [`SyntaxError::StraySemicolon`] for a `;` between or after blocks.
/// - [`SyntaxError::UnterminatedBlock`] when selector text never gets a block.
/// - [`SyntaxError::MalformedDeclaration`] from any block body.
pub fn parse_rules(input: &str) -> Result<Vec<RuleBlock>, SyntaxError> {
    let mut blocks = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find('{') {
        let buffer = rest[..open].trim();
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            return Err(SyntaxError::UnterminatedBlock {
                selectors: buffer.to_owned(),
            });
        };
        check_selector_buffer(buffer)?;
        let body = &after_open[..close];
        if body.contains('{') {
            return Err(SyntaxError::UnsupportedConstruct {
                construct: format!("nested block inside '{buffer}'"),
            });
        }
        rest = &after_open[close + 1..];

        let selectors = split_selectors(buffer);
        if selectors.is_empty() {
            trace!("dropping rule block with no selectors");
            continue;
        }
        let declarations = parse_declarations(body)?;
        trace!(
            "parsed rule block {selectors:?} with {} declarations",
            declarations.len()
        );
        blocks.push(RuleBlock {
            selectors,
            declarations,
        });
    }

    let trailing = rest.trim();
    if !trailing.is_empty() {
        check_selector_buffer(trailing)?;
        return Err(SyntaxError::UnterminatedBlock {
            selectors: trailing.to_owned(),
        });
    }
    debug!("parsed {} rule blocks", blocks.len());
    Ok(blocks)
}

/// Reject buffers that belong to constructs outside this grammar.
fn check_selector_buffer(buffer: &str) -> Result<(), SyntaxError> {
    if buffer.contains('}') {
        return Err(SyntaxError::UnsupportedConstruct {
            construct: format!("unbalanced '}}' near '{buffer}'"),
        });
    }
    if buffer.starts_with('@') {
        let keyword = buffer
            .split(|character: char| character.is_whitespace() || character == ';')
            .next()
            .unwrap_or(buffer);
        return Err(SyntaxError::UnsupportedConstruct {
            construct: format!("at-rule {keyword}"),
        });
    }
    if buffer.contains(';') {
        return Err(SyntaxError::StraySemicolon {
            context: buffer.to_owned(),
        });
    }
    Ok(())
}

fn split_selectors(buffer: &str) -> Vec<String> {
    buffer
        .split(',')
        .map(str::trim)
        .filter(|selector| !selector.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
.foo {
  font-size: 12px;
}
.foo, bar:hover {
  color: red;
  border: 1px solid yellow;
}
";

    #[test]
    fn splits_blocks_and_selector_groups() -> Result<(), SyntaxError> {
        let blocks = parse_rules(SAMPLE)?;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].selectors, vec![".foo"]);
        assert_eq!(blocks[0].declarations.get("font-size"), Some("12px"));
        assert_eq!(blocks[1].selectors, vec![".foo", "bar:hover"]);
        assert_eq!(blocks[1].declarations.get("border"), Some("1px solid yellow"));
        Ok(())
    }

    #[test]
    fn selectors_are_not_normalized() -> Result<(), SyntaxError> {
        let blocks = parse_rules("DIV  >  b , , P.x{color:red}")?;
        assert_eq!(blocks[0].selectors, vec!["DIV  >  b", "P.x"]);
        Ok(())
    }

    #[test]
    fn block_without_selectors_is_dropped() -> Result<(), SyntaxError> {
        let blocks = parse_rules("{color: red} a {color: blue} {margin: 0}")?;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].selectors, vec!["a"]);
        Ok(())
    }

    #[test]
    fn stylesheet_entry_point_strips_comments() -> Result<(), SyntaxError> {
        let blocks = parse_stylesheet("/* a { x } */ h1 {font-size:200%;} // trailing\n")?;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].selectors, vec!["h1"]);
        Ok(())
    }

    #[test]
    fn malformed_declaration_aborts_the_parse() {
        let result = parse_rules("a { color: red } b { nonsense }");
        assert!(matches!(
            result,
            Err(SyntaxError::MalformedDeclaration { ref declaration }) if declaration == "nonsense"
        ));
    }

    #[test]
    fn at_rules_are_unsupported() {
        let result = parse_rules("@media screen { a { color: red } }");
        assert_eq!(
            result,
            Err(SyntaxError::UnsupportedConstruct {
                construct: "at-rule @media".to_owned()
            })
        );
        assert!(matches!(
            parse_rules("@import url(x.css); a { color: red }"),
            Err(SyntaxError::UnsupportedConstruct { .. })
        ));
    }

    #[test]
    fn nested_blocks_are_unsupported() {
        assert!(matches!(
            parse_rules("a { b { color: red } }"),
            Err(SyntaxError::UnsupportedConstruct { .. })
        ));
    }

    #[test]
    fn missing_close_brace_is_unterminated() {
        assert_eq!(
            parse_rules("a { color: red"),
            Err(SyntaxError::UnterminatedBlock {
                selectors: "a".to_owned()
            })
        );
        assert!(matches!(
            parse_rules("a { color: red } b"),
            Err(SyntaxError::UnterminatedBlock { .. })
        ));
    }

    #[test]
    fn stray_semicolons_are_reported_between_and_after_blocks() {
        assert_eq!(
            parse_rules("a {color:red};"),
            Err(SyntaxError::StraySemicolon {
                context: ";".to_owned()
            })
        );
        assert_eq!(
            parse_rules("a{x:1} ; b{y:2}"),
            Err(SyntaxError::StraySemicolon {
                context: "; b".to_owned()
            })
        );
    }

    #[test]
    fn empty_source_has_no_blocks() -> Result<(), SyntaxError> {
        assert!(parse_stylesheet("  \n /* only a comment */ ")?.is_empty());
        Ok(())
    }
}
