//! Canvas interaction and rendering
//!
//! - **gesture**: the pointer-driven state machine (drag a node, draw a
//!   connection, deselect)
//! - **render**: bezier connection geometry and the scene description the
//!   front end draws
//!
//! Anchors are derived from the node's stored position plus a fixed
//! offset, never from measured card bounds.

pub mod gesture;
pub mod render;

pub use gesture::{CanvasController, GestureState};
pub use render::{
    render_scene, ConnectionStyle, CubicBezier, NodeCard, RenderedConnection, Scene,
};

use crate::types::{Position, WorkflowNode};

/// Nominal width of a node card
pub const NODE_WIDTH: f64 = 300.0;

/// Nominal height of a node card
pub const NODE_HEIGHT: f64 = 80.0;

/// Offset from a node's top-left corner to its connection anchor
pub const ANCHOR_OFFSET: Position = Position::new(NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0);

/// Connection anchor of a node
pub fn anchor(node: &WorkflowNode) -> Position {
    node.position + ANCHOR_OFFSET
}
