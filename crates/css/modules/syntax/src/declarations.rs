//! Declaration list parsing (`property: value; ...`).

use crate::{DeclarationBlock, SyntaxError};

/// Split one declaration segment on its first `:`.
///
/// Returns the lowercased, trimmed property and the trimmed value, or `None`
/// when the segment has no colon or an empty property name.
pub fn split_declaration(segment: &str) -> Option<(String, String)> {
    let (raw_property, raw_value) = segment.split_once(':')?;
    let property = raw_property.trim();
    if property.is_empty() {
        return None;
    }
    Some((property.to_ascii_lowercase(), raw_value.trim().to_owned()))
}

/// Parse the body of a rule block into a declaration map.
///
/// Segments are separated by `;`; blank segments are skipped. A repeated
/// property overwrites the earlier value.
///
/// # Errors
/// Returns [`SyntaxError::MalformedDeclaration`] for the first non-blank
/// segment that cannot be split into property and value.
pub fn parse_declarations(body: &str) -> Result<DeclarationBlock, SyntaxError> {
    let mut block = DeclarationBlock::new();
    for raw_segment in body.split(';') {
        let segment = raw_segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (property, value) =
            split_declaration(segment).ok_or_else(|| SyntaxError::MalformedDeclaration {
                declaration: segment.to_owned(),
            })?;
        block.insert(property, value);
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_property_and_trims_value() -> Result<(), SyntaxError> {
        let block = parse_declarations("  Font-Size : 12px ;COLOR:Red")?;
        assert_eq!(block.get("font-size"), Some("12px"));
        assert_eq!(block.get("color"), Some("Red"));
        assert_eq!(block.len(), 2);
        Ok(())
    }

    #[test]
    fn value_keeps_everything_after_first_colon() -> Result<(), SyntaxError> {
        let block = parse_declarations("background-image:url(http://example.org/a.png)")?;
        assert_eq!(
            block.get("background-image"),
            Some("url(http://example.org/a.png)")
        );
        Ok(())
    }

    #[test]
    fn last_duplicate_wins() -> Result<(), SyntaxError> {
        let block = parse_declarations("color: red; margin: 0; color: blue;")?;
        assert_eq!(block.to_string(), "color:blue;margin:0");
        Ok(())
    }

    #[test]
    fn segment_without_colon_is_an_error() {
        let err = parse_declarations("color: red; bogus; margin: 0");
        assert_eq!(
            err,
            Err(SyntaxError::MalformedDeclaration {
                declaration: "bogus".to_owned()
            })
        );
    }

    #[test]
    fn blank_body_is_empty() -> Result<(), SyntaxError> {
        assert!(parse_declarations(" ;; \n ")?.is_empty());
        Ok(())
    }

    #[test]
    fn reparsing_serialized_block_is_stable() -> Result<(), SyntaxError> {
        let first = parse_declarations("color: #000080; font-family: verdana,arial; margin-top:70px")?;
        let second = parse_declarations(&first.to_string())?;
        assert_eq!(first, second);
        Ok(())
    }
}
