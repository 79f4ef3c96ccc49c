//! Connection curves and the scene description
//!
//! Connections are cubic bezier S-curves between node anchors. Control
//! points sit horizontally from each endpoint, `min(0.3 × distance, 100)`
//! pixels away, so close nodes get a near-straight line and far nodes a
//! capped bend.

use std::fmt;

use serde::Serialize;

use crate::document::WorkflowDocument;
use crate::types::{ConnectionId, NodeId, Position};

use super::{anchor, CanvasController};

/// Fraction of the endpoint distance used for the control-point offset
pub const CURVE_FACTOR: f64 = 0.3;

/// Upper bound for the control-point offset, in pixels
pub const MAX_CONTROL_OFFSET: f64 = 100.0;

/// Stroke color shared by every connection
pub const CONNECTION_STROKE: &str = "hsl(var(--connection-line))";

/// z-index of the node being dragged
pub const Z_DRAGGING: u32 = 50;
/// z-index of the selected node
pub const Z_SELECTED: u32 = 40;
/// z-index of every other node
pub const Z_DEFAULT: u32 = 30;

/// A cubic bezier segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubicBezier {
    pub start: Position,
    pub control1: Position,
    pub control2: Position,
    pub end: Position,
}

impl CubicBezier {
    /// S-curve from `source` to `target`
    pub fn between(source: Position, target: Position) -> Self {
        let offset = (source.distance_to(target) * CURVE_FACTOR).min(MAX_CONTROL_OFFSET);
        Self {
            start: source,
            control1: Position::new(source.x + offset, source.y),
            control2: Position::new(target.x - offset, target.y),
            end: target,
        }
    }

    /// Horizontal distance between each endpoint and its control point
    pub fn control_offset(&self) -> f64 {
        self.control1.x - self.start.x
    }

    /// Point on the curve at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Position::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// SVG path data: `M sx sy C c1x c1y, c2x c2y, ex ey`
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// How a connection is stroked and decorated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStyle {
    /// SVG dash pattern, `None` for a solid line
    pub dash_array: Option<&'static str>,
    pub arrowhead: bool,
    /// Animated dot looping along the path
    pub flow_marker: bool,
    pub opacity: f64,
}

impl ConnectionStyle {
    /// Solid line with arrowhead and flow marker
    pub fn committed() -> Self {
        Self {
            dash_array: None,
            arrowhead: true,
            flow_marker: true,
            opacity: 1.0,
        }
    }

    /// Dashed, undecorated line for a connection being drawn
    pub fn temporary() -> Self {
        Self {
            dash_array: Some("5,5"),
            arrowhead: false,
            flow_marker: false,
            opacity: 0.5,
        }
    }
}

/// A node as an absolutely positioned card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCard {
    pub id: NodeId,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub left: f64,
    pub top: f64,
    pub selected: bool,
    pub dragging: bool,
    pub configured: bool,
    pub z_index: u32,
}

/// A connection ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedConnection {
    /// `None` for the in-progress connection
    pub id: Option<ConnectionId>,
    pub curve: CubicBezier,
    pub path: String,
    pub style: ConnectionStyle,
}

impl RenderedConnection {
    fn new(id: Option<ConnectionId>, source: Position, target: Position, style: ConnectionStyle) -> Self {
        let curve = CubicBezier::between(source, target);
        Self {
            id,
            path: curve.to_svg_path(),
            curve,
            style,
        }
    }
}

/// Everything the canvas draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<NodeCard>,
    pub connections: Vec<RenderedConnection>,
    pub temporary: Option<RenderedConnection>,
    /// Shown when the canvas has no nodes yet
    pub show_empty_hint: bool,
}

/// Build the scene for a document under the controller's current gesture.
///
/// Connections whose endpoints are missing are skipped.
pub fn render_scene(doc: &WorkflowDocument, controller: &CanvasController) -> Scene {
    let nodes = doc
        .nodes
        .iter()
        .map(|node| {
            let selected = controller.selected() == Some(node.id.as_str());
            let dragging = controller.is_dragging(&node.id);
            let z_index = if dragging {
                Z_DRAGGING
            } else if selected {
                Z_SELECTED
            } else {
                Z_DEFAULT
            };
            NodeCard {
                id: node.id.clone(),
                label: node.data.label.clone(),
                icon: node.data.integration.icon.clone(),
                color: node.data.integration.color.clone(),
                left: node.position.x,
                top: node.position.y,
                selected,
                dragging,
                configured: node.is_configured(),
                z_index,
            }
        })
        .collect();

    let connections = doc
        .resolved_connections()
        .map(|r| {
            RenderedConnection::new(
                Some(r.connection.id.clone()),
                anchor(r.source),
                anchor(r.target),
                ConnectionStyle::committed(),
            )
        })
        .collect();

    let temporary = controller
        .temporary_connection()
        .map(|(from, to)| RenderedConnection::new(None, from, to, ConnectionStyle::temporary()));

    Scene {
        nodes,
        connections,
        temporary,
        show_empty_hint: doc.nodes.is_empty(),
    }
}

impl Scene {
    /// SVG fragment for the connection layer
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"<svg xmlns="http://www.w3.org/2000/svg">"#)?;
        write!(
            f,
            r#"<defs><marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{}"/></marker></defs>"#,
            CONNECTION_STROKE
        )?;
        for connection in self.connections.iter().chain(self.temporary.iter()) {
            write_connection(f, connection)?;
        }
        f.write_str("</svg>")
    }
}

fn write_connection(f: &mut fmt::Formatter<'_>, connection: &RenderedConnection) -> fmt::Result {
    let path = &connection.path;
    let style = &connection.style;

    write!(f, r#"<g opacity="{}">"#, style.opacity)?;
    // glow
    write!(
        f,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="6" opacity="0.2"/>"#,
        path, CONNECTION_STROKE
    )?;
    write!(
        f,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="2""#,
        path, CONNECTION_STROKE
    )?;
    if let Some(dash) = style.dash_array {
        write!(f, r#" stroke-dasharray="{}""#, dash)?;
    }
    if style.arrowhead {
        f.write_str(r#" marker-end="url(#arrowhead)""#)?;
    }
    f.write_str("/>")?;
    if style.flow_marker {
        write!(
            f,
            r#"<circle r="3" fill="{}"><animateMotion dur="2s" repeatCount="indefinite" path="{}"/></circle>"#,
            CONNECTION_STROKE, path
        )?;
    }
    f.write_str("</g>")
}
