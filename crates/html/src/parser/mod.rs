//! HTML5 parsing using html5ever.

use crate::dom::{Document, DomError};
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML document into a [`Document`].
///
/// Parsing never fails on malformed markup; html5ever recovers the way
/// browsers do. Text is kept verbatim, whitespace included, so the tree prints
/// back close to its source.
///
/// # Errors
/// Only if the converted tree cannot be assembled, which indicates a bug.
pub fn parse_html(html: &str) -> Result<Document, DomError> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut document = Document::new();
    let root = document.root();
    convert_children(&mut document, &dom.document, root)?;
    debug!("parsed HTML into {} nodes", document.node_count());
    Ok(document)
}

fn convert_children(document: &mut Document, rc_node: &Handle, parent: NodeId) -> Result<(), DomError> {
    for child in rc_node.children.borrow().iter() {
        convert_node(document, child, parent)?;
    }
    Ok(())
}

/// Convert an html5ever node and its subtree below `parent`.
fn convert_node(document: &mut Document, rc_node: &Handle, parent: NodeId) -> Result<(), DomError> {
    let node = match &rc_node.data {
        NodeData::Document => return convert_children(document, rc_node, parent),
        NodeData::ProcessingInstruction { .. } => return Ok(()),
        NodeData::Doctype { name, .. } => document.create_doctype(name.to_string()),
        NodeData::Text { contents } => document.create_text(contents.borrow().to_string()),
        NodeData::Comment { contents } => document.create_comment(contents.to_string()),
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let qualified = name.local.to_string();
            let element = match qualified.split_once(':') {
                Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                    document.create_element_ns(prefix, local)
                }
                _ => document.create_element(qualified),
            };
            for attr in attrs.borrow().iter() {
                let attr_name = match &attr.name.prefix {
                    Some(prefix) => format!("{prefix}:{}", attr.name.local),
                    None => attr.name.local.to_string(),
                };
                document.set_attribute(element, &attr_name, attr.value.to_string())?;
            }
            if let Some(contents) = template_contents.borrow().as_ref() {
                convert_children(document, contents, element)?;
            }
            element
        }
    };
    document.append_child(parent, node)?;
    convert_children(document, rc_node, node)
}
