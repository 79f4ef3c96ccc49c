//! Canvas gesture state machine
//!
//! One pointer gesture is in flight at a time. Dragging and connecting are
//! variants of a single enum, so a node can never be dragged while a
//! connection is being drawn.
//!
//! ```text
//!            node_pointer_down             pointer_up
//!   Idle ─────────────────────► Dragging ─────────────► Idle
//!     │                          │  ▲ pointer_move
//!     │ handle_pointer_down      └──┘
//!     ▼
//!   Connecting ── node_pointer_enter ──► Idle (connect or ignore)
//!        └─────── background_click ────► Idle
//! ```
//!
//! Pointer coordinates are client coordinates; `canvas_origin` is the
//! client position of the canvas's top-left corner.

use crate::document::{ConnectOutcome, WorkflowDocument};
use crate::types::{NodeId, Position};

use super::anchor;

/// The gesture currently in progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A node follows the pointer
    DraggingNode {
        node_id: NodeId,
        /// Pointer position relative to the node's top-left corner
        offset: Position,
    },
    /// A connection is being drawn from `source_id`
    Connecting {
        source_id: NodeId,
        /// Where the temporary line is drawn from; fixed at the source anchor
        pending_endpoint: Position,
    },
}

/// Tracks the active gesture and the selected node
#[derive(Debug, Clone, Default)]
pub struct CanvasController {
    gesture: GestureState,
    selected: Option<NodeId>,
    canvas_origin: Position,
}

impl CanvasController {
    /// Create a controller for a canvas whose top-left is at `canvas_origin`
    pub fn new(canvas_origin: Position) -> Self {
        Self {
            canvas_origin,
            ..Self::default()
        }
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Currently selected node, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn canvas_origin(&self) -> Position {
        self.canvas_origin
    }

    /// Update the canvas origin (after scrolling or a layout change)
    pub fn set_canvas_origin(&mut self, origin: Position) {
        self.canvas_origin = origin;
    }

    pub fn is_dragging(&self, node_id: &str) -> bool {
        matches!(&self.gesture, GestureState::DraggingNode { node_id: id, .. } if id == node_id)
    }

    /// Pointer pressed on a node body: start dragging and select it.
    ///
    /// Replaces any gesture in progress. Returns false if the node is unknown.
    pub fn node_pointer_down(&mut self, doc: &WorkflowDocument, node_id: &str, pointer: Position) -> bool {
        let Some(node) = doc.find_node(node_id) else {
            return false;
        };

        let offset = pointer - (self.canvas_origin + node.position);
        log::debug!("Drag start on '{}' (offset {}, {})", node_id, offset.x, offset.y);
        self.gesture = GestureState::DraggingNode {
            node_id: node_id.to_string(),
            offset,
        };
        self.selected = Some(node_id.to_string());
        true
    }

    /// Pointer moved over the canvas.
    ///
    /// While dragging, the dragged node is placed at
    /// `pointer - canvas_origin - offset`. Returns true if a node moved.
    /// Movement during a connect gesture is not tracked.
    pub fn pointer_move(&mut self, doc: &mut WorkflowDocument, pointer: Position) -> bool {
        let GestureState::DraggingNode { node_id, offset } = &self.gesture else {
            return false;
        };

        let position = pointer - self.canvas_origin - *offset;
        doc.move_node(node_id, position).is_ok()
    }

    /// Pointer released: ends a drag unconditionally
    pub fn pointer_up(&mut self) {
        if matches!(self.gesture, GestureState::DraggingNode { .. }) {
            log::debug!("Drag end");
            self.gesture = GestureState::Idle;
        }
    }

    /// Pointer pressed on a node's connection handle: start connecting.
    ///
    /// Returns false if the node is unknown.
    pub fn handle_pointer_down(&mut self, doc: &WorkflowDocument, node_id: &str) -> bool {
        let Some(node) = doc.find_node(node_id) else {
            return false;
        };

        log::debug!("Connect start from '{}'", node_id);
        self.gesture = GestureState::Connecting {
            source_id: node_id.to_string(),
            pending_endpoint: anchor(node),
        };
        true
    }

    /// Pointer entered a node body.
    ///
    /// Finishes a connect gesture: the connection is added unless it would
    /// be a self-connection or a duplicate. Returns `None` when no connect
    /// gesture was active.
    pub fn node_pointer_enter(&mut self, doc: &mut WorkflowDocument, node_id: &str) -> Option<ConnectOutcome> {
        if !matches!(self.gesture, GestureState::Connecting { .. }) {
            return None;
        }
        let GestureState::Connecting { source_id, .. } = std::mem::take(&mut self.gesture) else {
            return None;
        };

        let outcome = doc.connect(&source_id, node_id);
        log::debug!("Connect '{}' -> '{}': {:?}", source_id, node_id, outcome);
        Some(outcome)
    }

    /// Click on empty canvas: clear the selection and cancel any gesture
    pub fn background_click(&mut self) {
        self.selected = None;
        self.gesture = GestureState::Idle;
    }

    /// Drop references to a node that was deleted from the document
    pub fn forget_node(&mut self, node_id: &str) {
        if self.selected.as_deref() == Some(node_id) {
            self.selected = None;
        }
        let involved = match &self.gesture {
            GestureState::DraggingNode { node_id: id, .. } => id == node_id,
            GestureState::Connecting { source_id, .. } => source_id == node_id,
            GestureState::Idle => false,
        };
        if involved {
            self.gesture = GestureState::Idle;
        }
    }

    /// Endpoints of the in-progress connection line.
    ///
    /// Both ends sit on the source anchor: the pointer is not tracked
    /// while connecting.
    pub fn temporary_connection(&self) -> Option<(Position, Position)> {
        match &self.gesture {
            GestureState::Connecting { pending_endpoint, .. } => {
                Some((*pending_endpoint, *pending_endpoint))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ANCHOR_OFFSET;

    fn setup() -> (WorkflowDocument, Vec<NodeId>, CanvasController) {
        let mut doc = WorkflowDocument::new();
        let a = doc.add_node_from_drop("trigger-webhook", Position::new(100.0, 100.0)).unwrap();
        let b = doc.add_node_from_drop("slack-message", Position::new(500.0, 100.0)).unwrap();
        let c = doc.add_node_from_drop("gmail-send", Position::new(500.0, 300.0)).unwrap();
        (doc, vec![a, b, c], CanvasController::new(Position::new(20.0, 60.0)))
    }

    #[test]
    fn test_drag_moves_only_dragged_node() {
        let (mut doc, ids, mut ctl) = setup();
        let siblings_before = (doc.nodes[0].clone(), doc.nodes[2].clone());

        // Pointer lands 10,15 inside node b (client = origin + position + offset)
        assert!(ctl.node_pointer_down(&doc, &ids[1], Position::new(530.0, 175.0)));
        assert_eq!(ctl.selected(), Some(ids[1].as_str()));
        assert_eq!(
            ctl.gesture(),
            &GestureState::DraggingNode {
                node_id: ids[1].clone(),
                offset: Position::new(10.0, 15.0),
            }
        );

        assert!(ctl.pointer_move(&mut doc, Position::new(230.0, 475.0)));
        assert_eq!(doc.nodes[1].position, Position::new(200.0, 400.0));
        assert_eq!(doc.nodes[0], siblings_before.0);
        assert_eq!(doc.nodes[2], siblings_before.1);

        ctl.pointer_up();
        assert_eq!(ctl.gesture(), &GestureState::Idle);
        assert!(!ctl.pointer_move(&mut doc, Position::new(0.0, 0.0)));
        assert_eq!(doc.nodes[1].position, Position::new(200.0, 400.0));
    }

    #[test]
    fn test_pointer_down_on_unknown_node_is_ignored() {
        let (doc, _, mut ctl) = setup();
        assert!(!ctl.node_pointer_down(&doc, "nope", Position::default()));
        assert_eq!(ctl.gesture(), &GestureState::Idle);
        assert!(ctl.selected().is_none());
    }

    #[test]
    fn test_connect_commit() {
        let (mut doc, ids, mut ctl) = setup();

        assert!(ctl.handle_pointer_down(&doc, &ids[0]));
        assert_eq!(
            ctl.temporary_connection(),
            Some((Position::new(100.0, 100.0) + ANCHOR_OFFSET, Position::new(250.0, 140.0)))
        );

        // Moving and releasing do not end the connect gesture
        assert!(!ctl.pointer_move(&mut doc, Position::new(700.0, 700.0)));
        ctl.pointer_up();
        assert!(matches!(ctl.gesture(), GestureState::Connecting { .. }));

        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[1]), Some(ConnectOutcome::Added));
        assert_eq!(ctl.gesture(), &GestureState::Idle);
        assert_eq!(doc.connections.len(), 1);
        assert_eq!(doc.connections[0].id, format!("{}-{}", ids[0], ids[1]));
    }

    #[test]
    fn test_connect_duplicate_and_self_are_ignored() {
        let (mut doc, ids, mut ctl) = setup();
        ctl.handle_pointer_down(&doc, &ids[0]);
        ctl.node_pointer_enter(&mut doc, &ids[1]);

        ctl.handle_pointer_down(&doc, &ids[0]);
        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[1]), Some(ConnectOutcome::Duplicate));
        assert_eq!(doc.connections.len(), 1);

        ctl.handle_pointer_down(&doc, &ids[0]);
        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[0]), Some(ConnectOutcome::SelfConnection));
        assert_eq!(doc.connections.len(), 1);
        assert_eq!(ctl.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_pointer_enter_without_gesture() {
        let (mut doc, ids, mut ctl) = setup();
        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[1]), None);

        ctl.node_pointer_down(&doc, &ids[0], Position::new(130.0, 170.0));
        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[1]), None);
        assert!(ctl.is_dragging(&ids[0]));
        assert!(doc.connections.is_empty());
    }

    #[test]
    fn test_background_click_cancels_and_deselects() {
        let (mut doc, ids, mut ctl) = setup();
        ctl.node_pointer_down(&doc, &ids[2], Position::new(530.0, 370.0));
        ctl.pointer_up();
        ctl.handle_pointer_down(&doc, &ids[2]);

        ctl.background_click();
        assert_eq!(ctl.gesture(), &GestureState::Idle);
        assert!(ctl.selected().is_none());
        assert!(ctl.temporary_connection().is_none());
        assert_eq!(ctl.node_pointer_enter(&mut doc, &ids[0]), None);
        assert!(doc.connections.is_empty());
    }

    #[test]
    fn test_drag_replaces_connect_gesture() {
        let (doc, ids, mut ctl) = setup();
        ctl.handle_pointer_down(&doc, &ids[0]);
        ctl.node_pointer_down(&doc, &ids[1], Position::new(520.0, 160.0));
        assert!(ctl.is_dragging(&ids[1]));
        assert!(ctl.temporary_connection().is_none());
    }

    #[test]
    fn test_forget_deleted_node() {
        let (mut doc, ids, mut ctl) = setup();
        ctl.node_pointer_down(&doc, &ids[1], Position::new(520.0, 160.0));

        doc.delete_node(&ids[1]).unwrap();
        ctl.forget_node(&ids[1]);

        assert!(ctl.selected().is_none());
        assert_eq!(ctl.gesture(), &GestureState::Idle);
    }
}
