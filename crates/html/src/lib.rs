//! Arena HTML document used as the target of CSS inlining.
//!
//! Documents come from [`parse_html`] or are built node by node through the
//! [`Document`] builder methods. Either way they implement
//! [`css_selectors::ElementAdapter`] and [`css::StyledTree`], and print back to
//! markup with [`Document::to_html`].

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod dom;
pub mod parser;

pub use dom::{Document, DomError, DomNode, NodeKind};
pub use indextree::NodeId;
pub use parser::parse_html;
