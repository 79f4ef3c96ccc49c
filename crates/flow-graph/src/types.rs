//! Core types for workflow graphs
//!
//! These types define the structure of a workflow: placed nodes, the
//! directed connections between them, and the workflow record that owns
//! both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::NodeConfig;
use crate::error::GraphError;
use crate::registry::{integration_by_id, Integration, IntegrationType};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for a connection
pub type ConnectionId = String;

/// Unique identifier for a workflow
pub type WorkflowId = String;

/// A 2D point in canvas (or client) coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Per-instance payload of a node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Display label (defaults to the integration name)
    pub label: String,
    /// Catalog entry this node instantiates
    pub integration: &'static Integration,
    /// Typed configuration for the integration
    pub config: NodeConfig,
}

/// A placed workflow step
///
/// On the wire the integration is embedded as the full catalog object.
/// When decoding only its `id` is read; it must resolve in the catalog and
/// agree with the node's `type`, and the config must fit the integration's
/// field list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawWorkflowNode")]
pub struct WorkflowNode {
    pub id: NodeId,
    pub node_type: IntegrationType,
    pub position: Position,
    pub data: NodeData,
}

impl WorkflowNode {
    /// Create an unconfigured node for a catalog entry
    pub fn new(
        id: impl Into<String>,
        integration: &'static Integration,
        position: Position,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            id: id.into(),
            node_type: integration.integration_type,
            position,
            data: NodeData {
                label: integration.name.clone(),
                integration,
                config: NodeConfig::empty_for(integration)?,
            },
        })
    }

    /// Every required field of the integration has a value
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Required fields still unset
    pub fn missing_fields(&self) -> Vec<String> {
        self.data.config.missing_required(self.data.integration)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeDataRef<'a> {
    label: &'a str,
    integration: &'a Integration,
    config: &'a NodeConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowNodeRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    node_type: IntegrationType,
    position: Position,
    data: NodeDataRef<'a>,
}

impl Serialize for WorkflowNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WorkflowNodeRef {
            id: &self.id,
            node_type: self.node_type,
            position: self.position,
            data: NodeDataRef {
                label: &self.data.label,
                integration: self.data.integration,
                config: &self.data.config,
            },
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct IntegrationRef {
    id: String,
}

#[derive(Deserialize)]
struct RawNodeData {
    label: String,
    integration: IntegrationRef,
    #[serde(default)]
    config: serde_json::Value,
}

#[derive(Deserialize)]
struct RawWorkflowNode {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: IntegrationType,
    position: Position,
    data: RawNodeData,
}

impl TryFrom<RawWorkflowNode> for WorkflowNode {
    type Error = GraphError;

    fn try_from(raw: RawWorkflowNode) -> Result<Self, Self::Error> {
        let integration = integration_by_id(&raw.data.integration.id)
            .ok_or_else(|| GraphError::UnknownIntegration(raw.data.integration.id.clone()))?;

        if integration.integration_type != raw.node_type {
            return Err(GraphError::IntegrationTypeMismatch {
                node_type: raw.node_type.to_string(),
                integration: integration.id.clone(),
            });
        }

        let config = NodeConfig::from_value(integration, &raw.data.config)?;
        Ok(Self {
            id: raw.id,
            node_type: raw.node_type,
            position: raw.position,
            data: NodeData {
                label: raw.data.label,
                integration,
                config,
            },
        })
    }
}

/// A directed edge from one node's output to another node's input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConnection {
    /// Derived as `<source>-<target>`
    pub id: ConnectionId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl WorkflowConnection {
    /// Connection between two nodes with the derived id
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}-{}", source, target),
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }

    /// True if this edge joins the ordered pair `(source, target)`
    pub fn joins(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A stored workflow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Vec<WorkflowConnection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
}

impl Workflow {
    /// Create an empty, inactive workflow stamped with `now`
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            connections: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: false,
        }
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
