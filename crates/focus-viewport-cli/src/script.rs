//! Event scripts
//!
//! A script is the stream of inputs a canvas would feed a viewport: clicks,
//! slider moves, canvas scale changes, node edits and animation frames.
//!
//! ```yaml
//! events:
//!   - zoom: 1.5
//!   - click: "1"
//!   - advance: 1.0
//!   - background
//! ```

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use egui::{Pos2, Vec2};
use focus_viewport::{ClickTarget, DiagramNode, NodeId, RenderFrame, Viewport};
use serde::{Deserialize, Serialize};

/// Frame rate used by `advance`
pub const FRAME_RATE_HZ: f32 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// `- click: "1"` style single-key maps, bare names for unit events
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parsing script {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Slider value
    Zoom(f32),
    /// Click on a node
    Click(NodeId),
    /// Click on empty canvas
    Background,
    /// Programmatic focus
    Select(NodeId),
    /// Programmatic clear
    Clear,
    CanvasScale(f32),
    ScreenSize { width: f32, height: f32 },
    AddNode(DiagramNode),
    RemoveNode(NodeId),
    MoveNode { id: NodeId, x: f32, y: f32 },
    /// One frame of `dt` seconds
    Tick(f32),
    /// Run frames at `FRAME_RATE_HZ` for this many seconds
    Advance(f32),
}

impl fmt::Display for ScriptEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptEvent::Zoom(z) => write!(f, "zoom {z:.2}"),
            ScriptEvent::Click(id) => write!(f, "click {id}"),
            ScriptEvent::Background => f.write_str("background"),
            ScriptEvent::Select(id) => write!(f, "select {id}"),
            ScriptEvent::Clear => f.write_str("clear"),
            ScriptEvent::CanvasScale(s) => write!(f, "canvas_scale {s:.2}"),
            ScriptEvent::ScreenSize { width, height } => write!(f, "screen_size {width}x{height}"),
            ScriptEvent::AddNode(node) => write!(f, "add_node {}", node.id),
            ScriptEvent::RemoveNode(id) => write!(f, "remove_node {id}"),
            ScriptEvent::MoveNode { id, x, y } => write!(f, "move_node {id} ({x}, {y})"),
            ScriptEvent::Tick(dt) => write!(f, "tick {dt:.3}s"),
            ScriptEvent::Advance(secs) => write!(f, "advance {secs:.2}s"),
        }
    }
}

impl ScriptEvent {
    /// Feed this event to the viewport.
    ///
    /// Returns the frames worth reporting: the input's own frame, or for
    /// `advance` every frame that issued a camera command plus the last one.
    pub fn apply(&self, viewport: &mut Viewport) -> Vec<RenderFrame> {
        let frame = match self {
            ScriptEvent::Zoom(z) => viewport.set_global_zoom(*z),
            ScriptEvent::Click(id) => viewport.handle_click(ClickTarget::Node(id.clone())),
            ScriptEvent::Background => viewport.handle_click(ClickTarget::Background),
            ScriptEvent::Select(id) => viewport.select_node(id.clone()),
            ScriptEvent::Clear => viewport.clear_focus(),
            ScriptEvent::CanvasScale(s) => viewport.set_canvas_scale(*s),
            ScriptEvent::ScreenSize { width, height } => {
                viewport.set_screen_size(Vec2::new(*width, *height));
                viewport.frame()
            }
            ScriptEvent::AddNode(node) => {
                let mut nodes = viewport.nodes().to_vec();
                nodes.retain(|n| n.id != node.id);
                nodes.push(node.clone());
                viewport.set_nodes(nodes)
            }
            ScriptEvent::RemoveNode(id) => viewport.remove_node(id),
            ScriptEvent::MoveNode { id, x, y } => {
                let mut nodes = viewport.nodes().to_vec();
                if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                    node.position = Pos2::new(*x, *y);
                }
                viewport.set_nodes(nodes)
            }
            ScriptEvent::Tick(dt) => viewport.tick(*dt),
            ScriptEvent::Advance(secs) => return advance(viewport, *secs),
        };
        vec![frame]
    }
}

fn advance(viewport: &mut Viewport, secs: f32) -> Vec<RenderFrame> {
    let dt = 1.0 / FRAME_RATE_HZ;
    let frames = (secs.max(0.0) * FRAME_RATE_HZ).ceil() as usize;

    let mut reported = Vec::new();
    let mut last = None;
    for _ in 0..frames {
        let frame = viewport.tick(dt);
        if frame.camera.is_some() {
            reported.push(frame);
        } else {
            last = Some(frame);
        }
    }
    // Final settled frame, unless it was already reported
    if let Some(last) = last {
        if reported.last().map(|f| f.revision) < Some(last.revision) {
            reported.push(last);
        }
    }
    reported
}

#[cfg(test)]
mod tests {
    use super::*;
    use focus_viewport::{CameraReason, Edge, NodeContent};
    use pretty_assertions::assert_eq;

    fn viewport() -> Viewport {
        let nodes = vec![
            DiagramNode::new("1", Pos2::new(750.0, 300.0), NodeContent::with_title("heading 1", &["p"])),
            DiagramNode::new("2", Pos2::new(200.0, 100.0), NodeContent::with_title("heading 2", &["p"])),
        ];
        Viewport::with_defaults(nodes, vec![Edge::new("e1-2", "1", "2")])
    }

    #[test]
    fn test_parse_script() {
        let yaml = r#"
events:
  - zoom: 1.5
  - click: "1"
  - background
  - canvas_scale: 1.0
  - screen_size: { width: 1024, height: 768 }
  - move_node: { id: "2", x: 10, y: 20 }
  - remove_node: "2"
  - tick: 0.016
  - advance: 1.0
"#;
        let script = Script::from_yaml(yaml).unwrap();
        assert_eq!(
            script.events,
            vec![
                ScriptEvent::Zoom(1.5),
                ScriptEvent::Click(NodeId::from("1")),
                ScriptEvent::Background,
                ScriptEvent::CanvasScale(1.0),
                ScriptEvent::ScreenSize {
                    width: 1024.0,
                    height: 768.0
                },
                ScriptEvent::MoveNode {
                    id: NodeId::from("2"),
                    x: 10.0,
                    y: 20.0
                },
                ScriptEvent::RemoveNode(NodeId::from("2")),
                ScriptEvent::Tick(0.016),
                ScriptEvent::Advance(1.0),
            ]
        );
    }

    #[test]
    fn test_parse_add_node_with_content() {
        let yaml = r#"
events:
  - add_node:
      id: "7"
      position: { x: 40, y: 60 }
      content:
        - title: heading 7
        - paragraph: This is para 7
  - clear
"#;
        let script = Script::from_yaml(yaml).unwrap();
        assert_eq!(
            script.events,
            vec![
                ScriptEvent::AddNode(DiagramNode::new(
                    "7",
                    Pos2::new(40.0, 60.0),
                    NodeContent::with_title("heading 7", &["This is para 7"]),
                )),
                ScriptEvent::Clear,
            ]
        );
    }

    #[test]
    fn test_unknown_event_rejected() {
        assert!(Script::from_yaml("events:\n  - teleport: 3\n").is_err());
    }

    #[test]
    fn test_move_node_updates_position() {
        let mut vp = viewport();
        let event = ScriptEvent::MoveNode {
            id: NodeId::from("2"),
            x: 10.0,
            y: 20.0,
        };
        let frames = event.apply(&mut vp);
        assert_eq!(frames.len(), 1);
        assert_eq!(vp.nodes()[1].position, Pos2::new(10.0, 20.0));
    }

    #[test]
    fn test_advance_reports_coalesced_retarget_and_final_frame() {
        let mut vp = viewport();
        ScriptEvent::Click(NodeId::from("1")).apply(&mut vp);
        ScriptEvent::Zoom(1.2).apply(&mut vp);
        ScriptEvent::Zoom(1.8).apply(&mut vp);

        let frames = ScriptEvent::Advance(1.5).apply(&mut vp);
        assert_eq!(frames.len(), 2);
        let cmd = frames[0].camera.unwrap();
        assert_eq!(cmd.reason, CameraReason::ZoomRetarget);
        assert_eq!(cmd.target.zoom, 1.8);
        assert!(frames[1].camera.is_none());
        assert!(!vp.camera().is_animating());
    }

    #[test]
    fn test_add_node_replaces_same_id() {
        let mut vp = viewport();
        let node = DiagramNode::new("2", Pos2::new(5.0, 5.0), NodeContent::default());
        ScriptEvent::AddNode(node.clone()).apply(&mut vp);
        assert_eq!(vp.nodes().len(), 2);
        assert_eq!(vp.nodes()[1], node);
    }
}
