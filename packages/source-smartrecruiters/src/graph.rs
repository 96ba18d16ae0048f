use std::sync::{Mutex, PoisonError};

use crate::error::HostError;
use crate::nodes::Node;
use crate::traits::NodeSink;

/// In-memory content graph. Keeps nodes in registration order.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: Mutex<Vec<Node>>,
    type_defs: Mutex<Vec<String>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn node(&self, id: &str) -> Option<Node> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn nodes_of_type(&self, node_type: &str) -> Vec<Node> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.node_type() == node_type)
            .cloned()
            .collect()
    }

    pub fn children_of(&self, parent_id: &str) -> Vec<Node> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.parent.as_deref() == Some(parent_id))
            .cloned()
            .collect()
    }

    pub fn type_defs(&self) -> Vec<String> {
        self.type_defs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NodeSink for MemoryGraph {
    fn create_node(&self, node: Node) -> Result<(), HostError> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(node);
        Ok(())
    }

    fn create_types(&self, type_defs: &str) -> Result<(), HostError> {
        self.type_defs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(type_defs.to_string());
        Ok(())
    }
}
