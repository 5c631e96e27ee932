//! CSS Style Attributes: reading and rewriting `style="..."` text.
//!
//! Inline styles use the same declaration grammar as rule bodies, but an
//! element's existing attribute is user content we do not own: segments with
//! no `:` are dropped with a warning rather than failing the whole pass.

#![forbid(unsafe_code)]

use css_syntax::{DeclarationBlock, split_declaration};
use log::warn;

/// Parse the value of a `style` attribute into an ordered declaration map.
///
/// - Splits on semicolons (`;`) into declaration items.
/// - Splits each item on its first colon (`:`) into property and value.
/// - Trims whitespace and lowercases the property name.
/// - Later duplicates overwrite earlier ones.
pub fn parse_style_attribute(input: &str) -> DeclarationBlock {
    let mut block = DeclarationBlock::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim();
        if item.is_empty() {
            continue;
        }
        match split_declaration(item) {
            Some((property, value)) => {
                block.insert(property, value);
            }
            None => warn!("dropping malformed inline style segment '{item}'"),
        }
    }
    block
}

/// Serialize declarations as `property:value;property:value`.
///
/// Values are written verbatim, without escaping.
pub fn serialize_declarations(declarations: &DeclarationBlock) -> String {
    declarations.to_string()
}

/// Overlay `rule` onto an existing inline style and return the new attribute text.
///
/// Properties from `rule` overwrite same-named inline properties; the others
/// survive in their original position.
pub fn merge_style_attribute(existing: Option<&str>, rule: &DeclarationBlock) -> String {
    let mut merged = existing.map(parse_style_attribute).unwrap_or_default();
    merged.merge(rule);
    serialize_declarations(&merged)
}
