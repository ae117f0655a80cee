//! Node containment tree
//!
//! A minimal mirror of the host's element hierarchy. Widgets only need to
//! answer "is this node inside that one?", so nodes carry a parent link, a
//! child list and an optional debug label.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct NodeId;
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    label: Option<String>,
}

/// Parent/child hierarchy of host nodes
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with no parent
    pub fn create_root(&mut self) -> NodeId {
        self.nodes.insert(Node {
            parent: None,
            children: SmallVec::new(),
            label: None,
        })
    }

    /// Create a child of `parent`. Returns `None` if `parent` does not exist.
    pub fn create_child(&mut self, parent: NodeId) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(Node {
            parent: Some(parent),
            children: SmallVec::new(),
            label: None,
        });
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        Some(id)
    }

    /// Attach a debug label to a node
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = Some(label.into());
        }
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.label.as_deref())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut stack: Vec<NodeId> = node.children.into_vec();
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                stack.extend(removed.children);
            }
        }
    }

    /// Whether `node` is `ancestor` itself or one of its descendants
    ///
    /// Unknown nodes are never contained.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.nodes.contains_key(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
