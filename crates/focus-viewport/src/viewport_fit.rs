//! Fit-all framing
//!
//! Computes the camera center and zoom that show every node at once. Used
//! when focus is cleared.

use egui::{Pos2, Rect, Vec2};

use crate::config::ViewportConfig;
use crate::types::DiagramNode;

/// Box framed when there is nothing to fit
const EMPTY_BOUNDS_SIZE: f32 = 100.0;

/// Center and zoom that frame a set of nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub content_bounds: Rect,
    pub optimal_center: Pos2,
    pub optimal_zoom: f32,
}

impl ViewportFit {
    /// Fit all `nodes` into `config.screen_size`
    pub fn compute(nodes: &[DiagramNode], config: &ViewportConfig) -> Self {
        let bounds = Self::node_bounds(nodes, config.fit_padding);
        Self::compute_from_bounds(bounds, config)
    }

    /// Fit explicit world bounds into `config.screen_size`
    pub fn compute_from_bounds(bounds: Rect, config: &ViewportConfig) -> Self {
        let size = config.screen_size;
        // Degenerate boxes (single node, zero padding) fall back to max zoom
        let zoom_x = (size.x * config.fit_margin) / bounds.width().max(1.0);
        let zoom_y = (size.y * config.fit_margin) / bounds.height().max(1.0);
        let optimal_zoom = zoom_x
            .min(zoom_y)
            .clamp(config.fit_zoom_min, config.fit_zoom_max);

        Self {
            content_bounds: bounds,
            optimal_center: bounds.center(),
            optimal_zoom,
        }
    }

    /// Bounding box of all node positions, padded on every side
    pub fn node_bounds(nodes: &[DiagramNode], padding: f32) -> Rect {
        if nodes.is_empty() {
            return Rect::from_center_size(Pos2::ZERO, Vec2::splat(EMPTY_BOUNDS_SIZE));
        }

        let mut bounds = Rect::NOTHING;
        for node in nodes {
            bounds.extend_with(node.position);
        }
        bounds.expand(padding)
    }
}
