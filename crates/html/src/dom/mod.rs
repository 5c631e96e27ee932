mod adapter;
mod printing;

use indextree::{Arena, NodeError, NodeId};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while building a [`Document`].
#[derive(Debug, Error)]
pub enum DomError {
    /// The append would create a cycle or reuse a removed node.
    #[error("cannot append node: {0}")]
    Append(#[from] NodeError),
    /// Attributes only exist on elements.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Doctype {
        name: String,
    },
    Element {
        /// Namespace prefix written in the tag (`x` in `<x:a>`).
        prefix: Option<String>,
        local: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    /// Attributes in source order; names are stored qualified (`xlink:href`).
    pub attrs: SmallVec<(String, String), 4>,
}

impl DomNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: SmallVec::new(),
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Local name of an element, empty for every other kind.
    pub fn local_name(&self) -> &str {
        match &self.kind {
            NodeKind::Element { local, .. } => local,
            _ => "",
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTML document stored in an `indextree` arena.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its root node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        Self {
            root: arena.new_node(DomNode::default()),
            arena,
        }
    }

    /// The document node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.arena.get(id).map(|node| node.get())
    }

    /// Create a detached element without a namespace prefix.
    pub fn create_element(&mut self, local: impl Into<String>) -> NodeId {
        self.arena.new_node(DomNode::new(NodeKind::Element {
            prefix: None,
            local: local.into(),
        }))
    }

    /// Create a detached element written as `prefix:local`.
    pub fn create_element_ns(&mut self, prefix: impl Into<String>, local: impl Into<String>) -> NodeId {
        self.arena.new_node(DomNode::new(NodeKind::Element {
            prefix: Some(prefix.into()),
            local: local.into(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.arena
            .new_node(DomNode::new(NodeKind::Text { text: text.into() }))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.arena
            .new_node(DomNode::new(NodeKind::Comment { text: text.into() }))
    }

    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.arena
            .new_node(DomNode::new(NodeKind::Doctype { name: name.into() }))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Fails when `child` is `parent` or one of its ancestors, or was removed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        parent.checked_append(child, &mut self.arena)?;
        Ok(())
    }

    /// Create an element with the given attributes and append it to `parent`.
    ///
    /// # Errors
    /// See [`Document::append_child`].
    pub fn append_element(
        &mut self,
        parent: NodeId,
        local: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let element = self.create_element(local);
        for (name, value) in attrs {
            self.set_attribute(element, name, *value)?;
        }
        self.append_child(parent, element)?;
        Ok(element)
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// # Errors
    /// Returns [`DomError::NotAnElement`] for non-element nodes.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let node = self
            .arena
            .get_mut(element)
            .map(indextree::Node::get_mut)
            .filter(|node| node.is_element())
            .ok_or(DomError::NotAnElement(element))?;
        let value = value.into();
        match node.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => node.attrs.push((name.to_owned(), value)),
        }
        Ok(())
    }

    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.node(element)?.attr(name)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root
            .descendants(&self.arena)
            .filter(|id| self.node(*id).is_some_and(DomNode::is_element))
    }

    /// Elements with the given local name, in document order.
    pub fn elements_named<'doc>(&'doc self, local: &'doc str) -> impl Iterator<Item = NodeId> + 'doc {
        self.elements()
            .filter(move |id| self.node(*id).is_some_and(|node| node.local_name() == local))
    }

    /// Number of nodes ever created, detached ones included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}
