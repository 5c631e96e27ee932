//! Serialization back to HTML markup.

use super::{Document, DomNode, NodeKind};
use core::fmt;
use core::fmt::Write as _;
use indextree::NodeId;

/// Elements with no content and no end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

fn write_escaped(out: &mut fmt::Formatter<'_>, text: &str, attribute: bool) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '\u{a0}' => out.write_str("&nbsp;")?,
            '"' if attribute => out.write_str("&quot;")?,
            '<' if !attribute => out.write_str("&lt;")?,
            '>' if !attribute => out.write_str("&gt;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

fn write_qualified(out: &mut fmt::Formatter<'_>, prefix: Option<&str>, local: &str) -> fmt::Result {
    match prefix {
        Some(prefix) => write!(out, "{prefix}:{local}"),
        None => out.write_str(local),
    }
}

impl Document {
    /// Serialize the whole document as HTML.
    pub fn to_html(&self) -> String {
        self.to_string()
    }

    /// Serialize one node and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        OuterHtml {
            document: self,
            node,
        }
        .to_string()
    }

    fn fmt_children(&self, id: NodeId, out: &mut fmt::Formatter<'_>, raw_text: bool) -> fmt::Result {
        for child in id.children(&self.arena) {
            self.fmt_node(child, out, raw_text)?;
        }
        Ok(())
    }

    fn fmt_node(&self, id: NodeId, out: &mut fmt::Formatter<'_>, raw_text: bool) -> fmt::Result {
        let Some(DomNode { kind, attrs }) = self.node(id) else {
            return Ok(());
        };
        match kind {
            NodeKind::Document => self.fmt_children(id, out, false)?,
            NodeKind::Doctype { name } => write!(out, "<!DOCTYPE {name}>")?,
            NodeKind::Element { prefix, local } => {
                out.write_str("<")?;
                write_qualified(out, prefix.as_deref(), local)?;
                for (name, value) in attrs {
                    write!(out, " {name}=\"")?;
                    write_escaped(out, value, true)?;
                    out.write_str("\"")?;
                }
                out.write_str(">")?;
                if prefix.is_none() && VOID_ELEMENTS.contains(&local.as_str()) {
                    return Ok(());
                }
                let raw = prefix.is_none() && RAW_TEXT_ELEMENTS.contains(&local.as_str());
                self.fmt_children(id, out, raw)?;
                out.write_str("</")?;
                write_qualified(out, prefix.as_deref(), local)?;
                out.write_str(">")?;
            }
            NodeKind::Text { text } if raw_text => out.write_str(text)?,
            NodeKind::Text { text } => write_escaped(out, text, false)?,
            NodeKind::Comment { text } => write!(out, "<!--{text}-->")?,
        }
        Ok(())
    }
}

/// Display adapter for one node and its subtree.
struct OuterHtml<'doc> {
    document: &'doc Document,
    node: NodeId,
}

impl fmt::Display for OuterHtml<'_> {
    #[allow(clippy::min_ident_chars, reason = "Keeps the `Display::fmt` parameter name")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.fmt_node(self.node, f, false)
    }
}

impl fmt::Display for Document {
    #[allow(clippy::min_ident_chars, reason = "Keeps the `Display::fmt` parameter name")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f, false)
    }
}
