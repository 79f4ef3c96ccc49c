//! Flow Graph - workflow model and canvas logic for FlowBuilder
//!
//! This crate holds everything about a workflow that does not need I/O:
//!
//! - The workflow record, its placed nodes and directed connections
//! - The static integration catalog that node types come from
//! - Typed per-integration node configuration, validated against the
//!   catalog's field declarations
//! - `WorkflowDocument`: the editor-side node/connection registries
//! - `CanvasController`: the drag/connect gesture state machine
//! - Bezier connection geometry and the scene the front end draws
//!
//! # Example
//!
//! ```
//! use flow_graph::canvas::{render_scene, CanvasController};
//! use flow_graph::{Position, WorkflowDocument};
//!
//! let mut doc = WorkflowDocument::new();
//! let trigger = doc.add_node_from_drop("trigger-webhook", Position::new(0.0, 0.0)).unwrap();
//! let slack = doc.add_node_from_drop("slack-message", Position::new(400.0, 0.0)).unwrap();
//!
//! let mut canvas = CanvasController::default();
//! canvas.handle_pointer_down(&doc, &trigger);
//! canvas.node_pointer_enter(&mut doc, &slack);
//!
//! let scene = render_scene(&doc, &canvas);
//! assert_eq!(scene.connections.len(), 1);
//! ```

pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod registry;
pub mod types;

// Re-export key types
pub use config::NodeConfig;
pub use document::{ConnectOutcome, WorkflowDocument};
pub use error::{ConfigError, GraphError, Result};
pub use registry::{
    FieldKind, Integration, IntegrationCategory, IntegrationField, IntegrationType, SelectOption,
};
pub use types::{
    ConnectionId, NodeData, NodeId, Position, Workflow, WorkflowConnection, WorkflowId,
    WorkflowNode,
};
