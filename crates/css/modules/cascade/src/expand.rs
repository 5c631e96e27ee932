//! Shorthand property expansion.

use css_syntax::DeclarationBlock;

/// Shorthands expanded positionally: the i-th value token becomes `<shorthand>-<suffix[i]>`.
const POSITIONAL_SHORTHANDS: &[(&str, &[&str])] = &[
    (
        "background",
        &["color", "image", "repeat", "attachment", "position"],
    ),
    ("border", BORDER_SUFFIXES),
    ("border-top", BORDER_SUFFIXES),
    ("border-right", BORDER_SUFFIXES),
    ("border-bottom", BORDER_SUFFIXES),
    ("border-left", BORDER_SUFFIXES),
    ("outline", &["color", "style", "width"]),
    ("list-style", &["type", "position", "image"]),
];

const BORDER_SUFFIXES: &[&str] = &["width", "style", "color"];

const FONT_SUFFIXES: &[&str] = &["style", "variant", "weight", "size", "family"];

/// Box-model shorthands expanded with the 1/2/3/4 value rule.
const BOX_SHORTHANDS: &[&str] = &["margin", "padding"];

/// Expand every recognized shorthand in `declarations` into longhands.
///
/// Unrecognized properties pass through unchanged. Output keeps source order;
/// a longhand produced twice keeps the later value.
pub fn expand_properties(declarations: &DeclarationBlock) -> DeclarationBlock {
    let mut out = DeclarationBlock::new();
    for decl in declarations {
        let property = decl.property.as_str();
        if let Some((_, suffixes)) = POSITIONAL_SHORTHANDS
            .iter()
            .find(|(shorthand, _)| *shorthand == property)
        {
            expand_positional(&mut out, property, &decl.value, suffixes);
        } else if property == "font" {
            expand_font(&mut out, &decl.value);
        } else if BOX_SHORTHANDS.contains(&property) {
            expand_box_model(&mut out, property, &decl.value);
        } else {
            out.insert(property, decl.value.as_str());
        }
    }
    out
}

/// Map space-separated value tokens onto `<shorthand>-<suffix>` in order.
///
/// Missing trailing tokens leave their longhands unset; surplus tokens are
/// ignored. A `font-size` token of the form `size/line-height` also yields
/// `line-height`.
pub fn expand_positional(out: &mut DeclarationBlock, shorthand: &str, value: &str, suffixes: &[&str]) {
    let tokens = value.split(' ').map(str::trim).filter(|token| !token.is_empty());
    for (suffix, token) in suffixes.iter().zip(tokens) {
        let longhand = format!("{shorthand}-{suffix}");
        if longhand == "font-size"
            && let Some((size, line_height)) = split_line_height(token)
        {
            out.insert("line-height", line_height);
            out.insert(longhand, size);
            continue;
        }
        out.insert(longhand, token);
    }
}

/// Expand `font`. Without a `size/line-height` token this is plain positional
/// expansion. With one, that token is the size: tokens before it fill
/// style, variant and weight in order, and the token after it is the family.
fn expand_font(out: &mut DeclarationBlock, value: &str) {
    let tokens: Vec<&str> = value.split(' ').map(str::trim).filter(|token| !token.is_empty()).collect();
    let Some(size_at) = tokens.iter().position(|token| token.contains('/')) else {
        expand_positional(out, "font", value, FONT_SUFFIXES);
        return;
    };
    for (suffix, token) in FONT_SUFFIXES.iter().zip(&tokens[..size_at]).take(3) {
        out.insert(format!("font-{suffix}"), *token);
    }
    if let Some((size, line_height)) = split_line_height(tokens[size_at]) {
        out.insert("line-height", line_height);
        out.insert("font-size", size);
    } else {
        out.insert("font-size", tokens[size_at]);
    }
    if let Some(family) = tokens.get(size_at + 1) {
        out.insert("font-family", *family);
    }
}

/// `size/line-height`, only when the token has exactly one `/`.
fn split_line_height(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(size), Some(line_height), None) => Some((size, line_height)),
        _ => None,
    }
}

/// Expand `margin`/`padding` by value count:
/// 1 → all sides; 2 → vertical, horizontal; 3 → top, horizontal, bottom;
/// 4 → top, right, bottom, left. Tokens past the fourth are ignored.
pub fn expand_box_model(out: &mut DeclarationBlock, shorthand: &str, value: &str) {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let sides = match tokens.as_slice() {
        [] => {
            out.insert(shorthand, value);
            return;
        }
        [all] => [("top", *all), ("bottom", *all), ("right", *all), ("left", *all)],
        [vertical, horizontal] => [
            ("top", *vertical),
            ("bottom", *vertical),
            ("right", *horizontal),
            ("left", *horizontal),
        ],
        [top, horizontal, bottom] => [
            ("top", *top),
            ("bottom", *bottom),
            ("right", *horizontal),
            ("left", *horizontal),
        ],
        [top, right, bottom, left, ..] => [
            ("top", *top),
            ("right", *right),
            ("bottom", *bottom),
            ("left", *left),
        ],
    };
    for (side, side_value) in sides {
        out.insert(format!("{shorthand}-{side}"), side_value);
    }
}
