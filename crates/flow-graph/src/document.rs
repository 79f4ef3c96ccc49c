//! Editable node/connection collections behind the canvas
//!
//! `WorkflowDocument` is what the editor mutates between saves: the
//! ordered node registry and the connection registry. Every mutation
//! replaces only the element it targets so untouched nodes compare equal
//! before and after.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::NodeConfig;
use crate::error::{GraphError, Result};
use crate::registry::{integration_by_id, Integration};
use crate::types::{NodeId, Position, Workflow, WorkflowConnection, WorkflowNode};

/// Result of attempting to connect two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new connection was appended
    Added,
    /// Source and target were the same node
    SelfConnection,
    /// The ordered pair was already connected
    Duplicate,
}

/// A connection whose endpoints both exist in the document
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConnection<'a> {
    pub connection: &'a WorkflowConnection,
    pub source: &'a WorkflowNode,
    pub target: &'a WorkflowNode,
}

/// The node and connection registries of one workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub nodes: Vec<WorkflowNode>,
    pub connections: Vec<WorkflowConnection>,
}

impl WorkflowDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the graph out of a stored workflow
    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self {
            nodes: workflow.nodes.clone(),
            connections: workflow.connections.clone(),
        }
    }

    /// Place a new, unconfigured node for `integration` at `position`
    pub fn add_node(&mut self, integration: &'static Integration, position: Position) -> Result<NodeId> {
        let id = format!("node-{}", uuid::Uuid::new_v4());
        let node = WorkflowNode::new(id.clone(), integration, position)?;
        log::debug!("Added node '{}' ({}) at ({}, {})", id, integration.id, position.x, position.y);
        self.nodes.push(node);
        Ok(id)
    }

    /// Place a node for an integration dragged in from the palette
    pub fn add_node_from_drop(&mut self, integration_id: &str, position: Position) -> Result<NodeId> {
        let integration = integration_by_id(integration_id)
            .ok_or_else(|| GraphError::UnknownIntegration(integration_id.to_string()))?;
        self.add_node(integration, position)
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn find_node_mut(&mut self, id: &str) -> Result<&mut WorkflowNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Validate and store a node's configuration.
    ///
    /// The node is left untouched if validation fails.
    pub fn update_node_config(&mut self, node_id: &str, fields: &Map<String, Value>) -> Result<()> {
        let node = self.find_node_mut(node_id)?;
        let config = NodeConfig::from_fields(node.data.integration, fields)?;
        node.data.config = config;
        log::debug!("Updated config of node '{}'", node_id);
        Ok(())
    }

    /// Move one node; siblings are not touched
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<()> {
        self.find_node_mut(node_id)?.position = position;
        Ok(())
    }

    /// Remove a node together with every connection touching it
    pub fn delete_node(&mut self, node_id: &str) -> Result<WorkflowNode> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| GraphError::UnknownNode(node_id.to_string()))?;
        let removed = self.nodes.remove(index);
        self.connections.retain(|c| !c.touches(node_id));
        log::debug!("Deleted node '{}'", node_id);
        Ok(removed)
    }

    /// Connect `source` to `target`.
    ///
    /// Self-connections and already-connected ordered pairs are ignored.
    /// Endpoint existence is not checked here.
    pub fn connect(&mut self, source: &str, target: &str) -> ConnectOutcome {
        if source == target {
            log::debug!("Ignoring self-connection on '{}'", source);
            return ConnectOutcome::SelfConnection;
        }
        if self.connections.iter().any(|c| c.joins(source, target)) {
            log::debug!("Connection '{}-{}' already exists", source, target);
            return ConnectOutcome::Duplicate;
        }
        self.connections.push(WorkflowConnection::between(source, target));
        ConnectOutcome::Added
    }

    /// Get connections leaving a node
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a WorkflowConnection> + 'a {
        self.connections.iter().filter(move |c| c.source == node_id)
    }

    /// Get connections entering a node
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a WorkflowConnection> + 'a {
        self.connections.iter().filter(move |c| c.target == node_id)
    }

    /// Connections with both endpoints present; dangling ones are skipped
    pub fn resolved_connections(&self) -> impl Iterator<Item = ResolvedConnection<'_>> + '_ {
        self.connections.iter().filter_map(move |connection| {
            let source = self.find_node(&connection.source)?;
            let target = self.find_node(&connection.target)?;
            Some(ResolvedConnection {
                connection,
                source,
                target,
            })
        })
    }

    /// Write the graph back into a workflow record
    pub fn apply_to(&self, workflow: &mut Workflow) {
        workflow.nodes = self.nodes.clone();
        workflow.connections = self.connections.clone();
    }
}
