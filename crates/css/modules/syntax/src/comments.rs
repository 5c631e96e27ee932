//! Comment removal.

/// Remove `/* ... */` block comments, then `// ...` line comments.
///
/// Block comments go first, so a `//` inside a block comment never eats the
/// text after the comment. An unterminated `/*` is left untouched. Line
/// comments run up to, but not including, the next `\n`.
pub fn strip_comments(input: &str) -> String {
    strip_line_comments(&strip_block_comments(input))
}

fn strip_block_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("/*") {
        let Some(close) = rest.get(open + 2..).and_then(|tail| tail.find("*/")) else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + 2 + close + 2..];
    }
    out.push_str(rest);
    out
}

fn strip_line_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("//") {
        out.push_str(&rest[..start]);
        rest = rest[start..]
            .find('\n')
            .map_or("", |newline| &rest[start + newline..]);
    }
    out.push_str(rest);
    out
}
