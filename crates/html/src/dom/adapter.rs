//! Selector and inliner tree contracts for [`Document`].

use super::{Document, DomNode};
use css::StyledTree;
use css_selectors::ElementAdapter;
use indextree::NodeId;
use log::warn;

impl Document {
    fn is_element_id(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(DomNode::is_element)
    }
}

impl ElementAdapter for Document {
    type Handle = NodeId;

    fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        node.children(&self.arena).find(|child| self.is_element_id(*child))
    }

    fn next_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        element
            .following_siblings(&self.arena)
            .skip(1)
            .find(|sibling| self.is_element_id(*sibling))
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        element
            .preceding_siblings(&self.arena)
            .skip(1)
            .find(|sibling| self.is_element_id(*sibling))
    }

    fn local_name(&self, element: NodeId) -> &str {
        self.node(element).map_or("", DomNode::local_name)
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get_attribute(element, name)
    }
}

impl StyledTree for Document {
    fn search_root(&self) -> NodeId {
        self.root
    }

    fn set_attr(&mut self, element: NodeId, name: &str, value: String) {
        if let Err(err) = self.set_attribute(element, name, value) {
            warn!("skipping attribute '{name}': {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomError;

    #[test]
    fn sibling_navigation_skips_text() -> Result<(), DomError> {
        let mut doc = Document::new();
        let list = doc.append_element(doc.root(), "ul", &[])?;
        let leading = doc.create_text(" ");
        doc.append_child(list, leading)?;
        let first = doc.append_element(list, "li", &[])?;
        let gap = doc.create_text("\n");
        doc.append_child(list, gap)?;
        let second = doc.append_element(list, "li", &[])?;

        assert_eq!(doc.first_element_child(list), Some(first));
        assert_eq!(doc.next_sibling_element(first), Some(second));
        assert_eq!(doc.previous_sibling_element(second), Some(first));
        assert_eq!(doc.previous_sibling_element(first), None);
        assert_eq!(doc.next_sibling_element(second), None);
        Ok(())
    }

    #[test]
    fn local_name_ignores_prefix() -> Result<(), DomError> {
        let mut doc = Document::new();
        let element = doc.create_element_ns("x", "a");
        doc.append_child(doc.root(), element)?;
        assert_eq!(ElementAdapter::local_name(&doc, element), "a");
        assert_eq!(ElementAdapter::local_name(&doc, doc.root()), "");
        Ok(())
    }
}
