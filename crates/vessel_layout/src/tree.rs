//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::{AvailableSpace, NodeId, Size, Style, TaffyTree};
use taffy::Layout;

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between document layout node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Option<LayoutNodeId> {
        match self.taffy.new_leaf(style) {
            Ok(taffy_node) => Some(self.node_map.insert(taffy_node)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to create layout node");
                None
            }
        }
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) {
        if let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        {
            let _ = self.taffy.add_child(parent_node, child_node);
        }
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32) {
        if let Some(&taffy_node) = self.node_map.get(root) {
            let available = Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::MaxContent,
            };
            if let Err(err) = self.taffy.compute_layout(taffy_node, available) {
                tracing::warn!(error = %err, "layout computation failed");
            }
        }
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            let _ = self.taffy.remove(taffy_node);
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
