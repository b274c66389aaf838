//! Lumen DOM - Document Object Model
//!
//! Headless, arena-based DOM tree. Nodes are addressed by [`NodeId`]
//! and never own each other, so references held by higher layers
//! (focus tracking, dialog traps) stay cheap and `Copy`.

mod attributes;
mod document;
mod dom_events;
mod focus;
mod node;
mod selector;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use dom_events::{DomEvent, DomEventType};
pub use focus::TabIndex;
pub use node::{ElementData, Node, NodeData};
pub use selector::{Selector, SelectorList};
pub use style::StyleDeclaration;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Invalid node: {0:?}")]
    InvalidNode(NodeId),

    #[error("Hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
