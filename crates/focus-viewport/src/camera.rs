//! Camera framing and animation
//!
//! Turns focus and zoom changes into camera commands for the canvas and
//! tracks the interpolated pose between frames.
//!
//! # Rules
//! - Focus a node: center on it at the current global zoom.
//! - Clear focus: fit every node on screen.
//! - A new command replaces whatever is in flight, starting from the current
//!   interpolated pose. Nothing is queued.
//! - Zoom changes and moves of the focused node while focused are coalesced:
//!   one retarget per frame from `tick`, centred on wherever the focused node
//!   is at that moment. Nothing in overview moves the camera except fit-all.
//!
//! # Animation Methods
//! - `on_focus_change(center, zoom, config)` - fly to a node
//! - `on_defocus(nodes, config)` - fly out to fit everything
//! - `on_zoom_change(zoom)` - queue a coalesced retarget
//! - `tick(dt, focus_center, config)` - advance, flushing any pending retarget

use egui::Pos2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::{TweenF32, TweenPos2};
use crate::config::ViewportConfig;
use crate::types::DiagramNode;
use crate::viewport_fit::ViewportFit;

/// Where the canvas should animate to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
    pub duration_ms: u64,
}

impl CameraTarget {
    pub fn center(&self) -> Pos2 {
        Pos2::new(self.center_x, self.center_y)
    }
}

/// Why a camera command was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraReason {
    Focus,
    ZoomRetarget,
    FitAll,
}

/// Camera target tagged with the generation that supersedes all earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCommand {
    pub generation: u64,
    pub reason: CameraReason,
    pub target: CameraTarget,
}

/// Current (interpolated) camera transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub center: Pos2,
    pub zoom: f32,
}

/// Drives the canvas camera from focus/zoom changes
#[derive(Debug, Clone)]
pub struct CameraController {
    position: TweenPos2,
    zoom: TweenF32,
    /// Most recent command; earlier generations are dead
    active: Option<CameraCommand>,
    generation: u64,
    /// Zoom for the next coalesced retarget; the center is resolved at flush
    pending_zoom: Option<f32>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraPose {
            center: Pos2::ZERO,
            zoom: 1.0,
        })
    }
}

impl CameraController {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: TweenPos2::new(pose.center),
            zoom: TweenF32::new(pose.zoom),
            active: None,
            generation: 0,
            pending_zoom: None,
        }
    }

    // =========================================================================
    // CURRENT VALUES
    // =========================================================================

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            center: self.position.get(),
            zoom: self.zoom.get(),
        }
    }

    /// Latest command issued, whether or not it has finished animating
    pub fn active_command(&self) -> Option<&CameraCommand> {
        self.active.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating() || self.zoom.is_animating()
    }

    pub fn has_pending_retarget(&self) -> bool {
        self.pending_zoom.is_some()
    }

    // =========================================================================
    // TRIGGERS
    // =========================================================================

    /// Frame a newly focused node
    pub fn on_focus_change(&mut self, center: Pos2, global_zoom: f32, config: &ViewportConfig) -> CameraCommand {
        self.pending_zoom = None;
        let zoom = global_zoom.clamp(config.zoom_min, config.zoom_max);
        self.issue(CameraReason::Focus, center, zoom, config)
    }

    /// Frame every node
    pub fn on_defocus(&mut self, nodes: &[DiagramNode], config: &ViewportConfig) -> CameraCommand {
        self.pending_zoom = None;
        let fit = ViewportFit::compute(nodes, config);
        self.issue(CameraReason::FitAll, fit.optimal_center, fit.optimal_zoom, config)
    }

    /// Record a zoom change (or a move of the focused node). Only the latest
    /// zoom survives until the next flush.
    pub fn on_zoom_change(&mut self, global_zoom: f32) {
        trace!(global_zoom, "camera retarget pending");
        self.pending_zoom = Some(global_zoom);
    }

    /// Issue the pending retarget at `focus_center`, the focused node's
    /// current position. With no focus the retarget is dropped.
    pub fn flush_pending(&mut self, focus_center: Option<Pos2>, config: &ViewportConfig) -> Option<CameraCommand> {
        let zoom = self.pending_zoom.take()?;
        let center = focus_center?;
        let zoom = zoom.clamp(config.zoom_min, config.zoom_max);
        Some(self.issue(CameraReason::ZoomRetarget, center, zoom, config))
    }

    // =========================================================================
    // ANIMATION UPDATE
    // =========================================================================

    /// Advance by `dt` seconds, then flush the frame's coalesced retarget
    pub fn tick(
        &mut self,
        dt: f32,
        focus_center: Option<Pos2>,
        config: &ViewportConfig,
    ) -> Option<CameraCommand> {
        self.position.tick(dt);
        self.zoom.tick(dt);
        self.flush_pending(focus_center, config)
    }

    /// Jump to the active target immediately
    pub fn snap_to_target(&mut self) {
        self.position.set_immediate(self.position.target());
        self.zoom.set_immediate(self.zoom.target());
    }

    fn issue(&mut self, reason: CameraReason, center: Pos2, zoom: f32, config: &ViewportConfig) -> CameraCommand {
        if self.is_animating() {
            if let Some(previous) = &self.active {
                trace!(superseded = previous.generation, "camera command replaced mid-flight");
            }
        }

        self.generation += 1;
        let duration = config.camera_duration_secs();
        self.position.start(center, duration);
        self.zoom.start(zoom, duration);

        let command = CameraCommand {
            generation: self.generation,
            reason,
            target: CameraTarget {
                center_x: center.x,
                center_y: center.y,
                zoom,
                duration_ms: config.camera_duration_ms,
            },
        };
        self.active = Some(command);
        debug!(
            generation = command.generation,
            ?reason,
            x = center.x,
            y = center.y,
            zoom,
            "camera command"
        );
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeContent;
    use pretty_assertions::assert_eq;

    fn settle(camera: &mut CameraController, config: &ViewportConfig) {
        for _ in 0..120 {
            camera.tick(1.0 / 60.0, None, config);
        }
    }

    #[test]
    fn test_focus_targets_node_at_global_zoom() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();

        let cmd = camera.on_focus_change(Pos2::new(750.0, 300.0), 1.5, &config);
        assert_eq!(
            cmd.target,
            CameraTarget {
                center_x: 750.0,
                center_y: 300.0,
                zoom: 1.5,
                duration_ms: 1000,
            }
        );
        assert_eq!(cmd.reason, CameraReason::Focus);
        assert!(camera.is_animating());

        settle(&mut camera, &config);
        assert_eq!(camera.pose().center, Pos2::new(750.0, 300.0));
        assert_eq!(camera.pose().zoom, 1.5);
    }

    #[test]
    fn test_focus_zoom_is_bounded() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        let cmd = camera.on_focus_change(Pos2::ZERO, 9.0, &config);
        assert_eq!(cmd.target.zoom, config.zoom_max);
    }

    #[test]
    fn test_new_command_replaces_in_flight() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();

        let first = camera.on_focus_change(Pos2::new(100.0, 0.0), 1.0, &config);
        camera.tick(0.1, None, &config);
        let second = camera.on_focus_change(Pos2::new(-100.0, 0.0), 1.0, &config);

        assert!(second.generation > first.generation);
        assert_eq!(camera.active_command(), Some(&second));

        settle(&mut camera, &config);
        assert_eq!(camera.pose().center, Pos2::new(-100.0, 0.0));
    }

    #[test]
    fn test_replacement_starts_from_current_pose() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();

        camera.on_focus_change(Pos2::new(100.0, 0.0), 1.0, &config);
        camera.tick(0.5, None, &config);
        let mid = camera.pose().center;

        camera.on_focus_change(Pos2::new(-100.0, 0.0), 1.0, &config);
        assert_eq!(camera.pose().center, mid);
    }

    #[test]
    fn test_defocus_fits_all() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        let nodes = vec![
            DiagramNode::new("a", Pos2::new(0.0, 0.0), NodeContent::default()),
            DiagramNode::new("b", Pos2::new(200.0, 100.0), NodeContent::default()),
        ];

        let cmd = camera.on_defocus(&nodes, &config);
        assert_eq!(cmd.reason, CameraReason::FitAll);
        assert_eq!(cmd.target.center(), Pos2::new(100.0, 50.0));
        assert_eq!(cmd.target.duration_ms, config.camera_duration_ms);
    }

    #[test]
    fn test_zoom_changes_coalesce_per_frame() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        let focus = camera.on_focus_change(Pos2::new(10.0, 10.0), 1.0, &config);

        for zoom in [1.1, 1.2, 1.3, 1.4] {
            camera.on_zoom_change(zoom);
        }
        assert_eq!(camera.active_command(), Some(&focus));

        let center = Some(Pos2::new(10.0, 10.0));
        let flushed = camera.tick(1.0 / 60.0, center, &config).unwrap();
        assert_eq!(flushed.reason, CameraReason::ZoomRetarget);
        assert_eq!(flushed.target.zoom, 1.4);
        assert_eq!(flushed.target.center(), Pos2::new(10.0, 10.0));
        assert_eq!(flushed.generation, focus.generation + 1);

        // Nothing left for the next frame
        assert!(camera.tick(1.0 / 60.0, center, &config).is_none());
    }

    #[test]
    fn test_retarget_centers_on_position_at_flush_time() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        camera.on_focus_change(Pos2::new(750.0, 300.0), 1.0, &config);
        camera.on_zoom_change(1.5);

        // Node dragged to the origin before the frame
        let flushed = camera.tick(1.0 / 60.0, Some(Pos2::ZERO), &config).unwrap();
        assert_eq!(flushed.target.center(), Pos2::ZERO);
        assert_eq!(flushed.target.zoom, 1.5);
    }

    #[test]
    fn test_retarget_without_focus_is_dropped() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        camera.on_zoom_change(2.0);
        assert!(camera.tick(0.016, None, &config).is_none());
        assert!(!camera.has_pending_retarget());
    }

    #[test]
    fn test_focus_change_discards_pending_retarget() {
        let config = ViewportConfig::default();
        let mut camera = CameraController::default();
        camera.on_zoom_change(2.0);
        camera.on_defocus(&[], &config);
        assert!(!camera.has_pending_retarget());
        assert!(camera.tick(0.016, Some(Pos2::ZERO), &config).is_none());
    }
}
