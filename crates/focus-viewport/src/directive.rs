//! Per-node render directive
//!
//! A pure function of one node, the viewport state and the canvas scale.
//! Recomputed on every change, never stored between changes.

use serde::{Deserialize, Serialize};

use crate::attenuation::effective_zoom;
use crate::config::ViewportConfig;
use crate::content::{ContentResolver, ContentTier};
use crate::state::ViewportState;
use crate::style::{self, NodeStyle};
use crate::types::{DiagramNode, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDirective {
    pub node_id: NodeId,
    pub focused: bool,
    pub effective_zoom: f32,
    /// Blocks to draw, title first
    pub visible_block_count: usize,
    pub tier: ContentTier,
    pub style: NodeStyle,
}

impl RenderDirective {
    /// Blocks to draw right now, accounting for the placeholder guard
    pub fn rendered_block_count(&self) -> usize {
        match self.tier {
            ContentTier::Placeholder => 0,
            ContentTier::Detail => self.visible_block_count,
        }
    }
}

/// Derive the directive for `node`. `resolver` is built once per pass from
/// the same `config`.
pub fn compute(
    node: &DiagramNode,
    state: &ViewportState,
    config: &ViewportConfig,
    resolver: &ContentResolver,
    canvas_scale: f32,
) -> RenderDirective {
    let focused = state.focus.is_focused(&node.id);
    let effective_zoom = effective_zoom(&node.id, state.global_zoom, &state.focus, config);

    RenderDirective {
        node_id: node.id.clone(),
        focused,
        effective_zoom,
        visible_block_count: resolver.resolve(&node.content, effective_zoom),
        tier: resolver.tier(canvas_scale),
        style: style::compose(focused, &state.focus, state.global_zoom, config),
    }
}
