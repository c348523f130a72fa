//! Viewport state and session
//!
//! `ViewportState` is the single mutable root: global zoom plus focus.
//! `Viewport` wraps it with the diagram, configuration and camera, and turns
//! every input into a freshly derived `RenderFrame` for the canvas.
//!
//! ```text
//! click / slider / gesture
//!         │
//!         ▼
//! ViewportState (last write wins)
//!         │
//!         ├── attenuation → content tier → style   (per node)
//!         └── CameraController                       (command or coalesced retarget)
//!         │
//!         ▼
//! RenderFrame → canvas
//! ```

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::camera::{CameraCommand, CameraController, CameraPose};
use crate::config::ViewportConfig;
use crate::content::ContentResolver;
use crate::directive::{self, RenderDirective};
use crate::focus::{FocusChange, FocusSelector, FocusState, FocusTransition};
use crate::types::{ClickTarget, DiagramNode, Edge, NodeId};
use crate::viewport_fit::ViewportFit;

/// Global zoom and focus. Everything else is derived from this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub global_zoom: f32,
    pub focus: FocusState,
}

impl ViewportState {
    /// Overview at the configured initial zoom
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            global_zoom: config.normalize_zoom(config.initial_zoom),
            focus: FocusState::Overview,
        }
    }

    pub fn focused_id(&self) -> Option<&NodeId> {
        self.focus.focused_id()
    }
}

/// Node plus what the canvas should do with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNode {
    pub node: DiagramNode,
    pub directive: RenderDirective,
}

/// Everything the canvas needs after one change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Increments with every committed input
    pub revision: u64,
    pub global_zoom: f32,
    pub focus: FocusState,
    pub nodes: Vec<AnnotatedNode>,
    /// Passed through untouched
    pub edges: Vec<Edge>,
    /// Command issued by this change, if any
    pub camera: Option<CameraCommand>,
    pub camera_pose: CameraPose,
}

impl RenderFrame {
    pub fn directive(&self, id: &NodeId) -> Option<&RenderDirective> {
        self.nodes
            .iter()
            .find(|n| &n.node.id == id)
            .map(|n| &n.directive)
    }

    pub fn focused_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.directive.focused).count()
    }
}

/// One view session over one diagram
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    state: ViewportState,
    selector: FocusSelector,
    resolver: ContentResolver,
    camera: CameraController,
    nodes: Vec<DiagramNode>,
    edges: Vec<Edge>,
    /// Scale reported by the canvas; falls back to our own camera zoom
    canvas_scale: Option<f32>,
    revision: u64,
}

impl Viewport {
    /// Start in overview with the camera already framing every node
    pub fn new(config: ViewportConfig, nodes: Vec<DiagramNode>, edges: Vec<Edge>) -> Self {
        let fit = ViewportFit::compute(&nodes, &config);
        let camera = CameraController::new(CameraPose {
            center: fit.optimal_center,
            zoom: fit.optimal_zoom,
        });

        Self {
            state: ViewportState::new(&config),
            selector: FocusSelector::new(config.reclick),
            resolver: ContentResolver::from_config(&config),
            camera,
            nodes,
            edges,
            canvas_scale: None,
            revision: 0,
            config,
        }
    }

    pub fn with_defaults(nodes: Vec<DiagramNode>, edges: Vec<Edge>) -> Self {
        Self::new(ViewportConfig::default(), nodes, edges)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn focused_id(&self) -> Option<&NodeId> {
        self.state.focused_id()
    }

    pub fn global_zoom(&self) -> f32 {
        self.state.global_zoom
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Scale used by the placeholder guard
    pub fn canvas_scale(&self) -> f32 {
        self.canvas_scale.unwrap_or_else(|| self.camera.pose().zoom)
    }

    fn node(&self, id: &NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    // =========================================================================
    // INPUTS
    // =========================================================================

    /// Slider or zoom gesture. Clamped and snapped, never rejected.
    pub fn set_global_zoom(&mut self, raw: f32) -> RenderFrame {
        let zoom = self.config.normalize_zoom(raw);
        if zoom != raw {
            trace!(raw, zoom, "zoom input normalized");
        }
        let changed = zoom != self.state.global_zoom;
        self.state.global_zoom = zoom;

        if changed && !self.state.focus.is_overview() {
            self.camera.on_zoom_change(zoom);
        }
        self.commit(None)
    }

    /// Click from the canvas
    pub fn handle_click(&mut self, target: ClickTarget) -> RenderFrame {
        self.transition(FocusTransition::Click(target))
    }

    /// Focus a node programmatically (idempotent)
    pub fn select_node(&mut self, id: impl Into<NodeId>) -> RenderFrame {
        self.transition(FocusTransition::Select(id.into()))
    }

    pub fn clear_focus(&mut self) -> RenderFrame {
        self.transition(FocusTransition::Clear)
    }

    /// Replace the node list (drag, add, remove). A focus on a removed node
    /// reverts to overview; a moved focused node gets a coalesced retarget.
    pub fn set_nodes(&mut self, nodes: Vec<DiagramNode>) -> RenderFrame {
        let before = self.focused_position();
        self.nodes = nodes;
        let change = FocusSelector::reconcile(&mut self.state.focus, &self.nodes);

        let after = self.focused_position();
        if after.is_some() && after != before {
            debug!("focused node moved, camera retarget pending");
            self.camera.on_zoom_change(self.state.global_zoom);
        }

        let camera = self.camera_for(&change);
        self.commit(camera)
    }

    pub fn remove_node(&mut self, id: &NodeId) -> RenderFrame {
        let mut nodes = std::mem::take(&mut self.nodes);
        nodes.retain(|n| &n.id != id);
        self.set_nodes(nodes)
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) -> RenderFrame {
        self.edges = edges;
        self.commit(None)
    }

    /// Canvas transform scale, read by the placeholder guard
    pub fn set_canvas_scale(&mut self, scale: f32) -> RenderFrame {
        if scale.is_finite() && scale > 0.0 {
            self.canvas_scale = Some(scale);
        } else {
            warn!(scale, "ignoring invalid canvas scale");
        }
        self.commit(None)
    }

    /// Canvas resized; affects the next fit-all
    pub fn set_screen_size(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 && size.is_finite() {
            self.config.screen_size = size;
        } else {
            warn!(width = size.x, height = size.y, "ignoring invalid screen size");
        }
    }

    /// Advance the camera by `dt` seconds. Issues at most one coalesced
    /// retarget per call, centred on the focused node's current position.
    pub fn tick(&mut self, dt: f32) -> RenderFrame {
        let center = self.focused_position();
        let camera = self.camera.tick(dt, center, &self.config);
        self.commit(camera)
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    /// Directive for every node, in node order
    pub fn directives(&self) -> Vec<RenderDirective> {
        let scale = self.canvas_scale();
        self.nodes
            .iter()
            .map(|node| directive::compute(node, &self.state, &self.config, &self.resolver, scale))
            .collect()
    }

    /// Current frame without issuing anything
    pub fn frame(&self) -> RenderFrame {
        self.build_frame(None)
    }

    fn transition(&mut self, transition: FocusTransition) -> RenderFrame {
        let change = match self.selector.apply(&mut self.state.focus, transition, &self.nodes) {
            Ok(change) => change,
            Err(err) => {
                debug!(%err, "focus transition rejected");
                FocusChange::Unchanged
            }
        };
        let camera = self.camera_for(&change);
        self.commit(camera)
    }

    fn camera_for(&mut self, change: &FocusChange) -> Option<CameraCommand> {
        match change {
            FocusChange::Unchanged => None,
            FocusChange::Focused(id) | FocusChange::Refocused { to: id, .. } => {
                let center = self.node(id)?.position;
                Some(
                    self.camera
                        .on_focus_change(center, self.state.global_zoom, &self.config),
                )
            }
            FocusChange::Cleared { .. } => Some(self.camera.on_defocus(&self.nodes, &self.config)),
        }
    }

    fn focused_position(&self) -> Option<Pos2> {
        let id = self.state.focused_id()?;
        self.node(id).map(|n| n.position)
    }

    fn commit(&mut self, camera: Option<CameraCommand>) -> RenderFrame {
        self.revision += 1;
        trace!(revision = self.revision, "viewport recomputed");
        self.build_frame(camera)
    }

    fn build_frame(&self, camera: Option<CameraCommand>) -> RenderFrame {
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .zip(self.directives())
            .map(|(node, directive)| AnnotatedNode { node, directive })
            .collect();

        RenderFrame {
            revision: self.revision,
            global_zoom: self.state.global_zoom,
            focus: self.state.focus.clone(),
            nodes,
            edges: self.edges.clone(),
            camera,
            camera_pose: self.camera.pose(),
        }
    }
}
