//! Content tiering (semantic level of detail)
//!
//! Maps an already computed effective zoom to how many content blocks a node
//! shows. The resolver never looks at focus; attenuation has already folded
//! focus into the effective zoom.
//!
//! A separate placeholder guard watches the canvas' own transform scale:
//! when the whole diagram is zoomed far out, every node renders an inert
//! placeholder. The guard composes with the per-node policy, it does not
//! replace it.

use serde::{Deserialize, Serialize};

use crate::config::{TieringPolicy, ViewportConfig};
use crate::types::NodeContent;

/// Absorbs float noise so a slider value of 1.4999999 lands in the 1.5 tier
const TIER_EPSILON: f32 = 1e-4;

/// Whether a node draws text at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTier {
    /// No text, cheap stand-in shape
    Placeholder,
    /// Draw `visible_block_count` blocks
    Detail,
}

/// Continuous tiering: one extra block per half step of zoom above 1.0
pub fn continuous_block_count(effective_zoom: f32, total_blocks: usize) -> usize {
    if total_blocks == 0 {
        return 0;
    }
    let raw = ((effective_zoom - 0.5) * 2.0 + TIER_EPSILON).floor();
    let count = if raw.is_finite() && raw > 1.0 {
        raw as usize
    } else {
        1
    };
    count.clamp(1, total_blocks)
}

/// Binary tiering: title only when minimized, otherwise everything
pub fn binary_block_count(effective_zoom: f32, total_blocks: usize, minimized_threshold: f32) -> usize {
    if total_blocks == 0 {
        return 0;
    }
    if effective_zoom < minimized_threshold {
        1
    } else {
        total_blocks
    }
}

/// Resolves visible content per node
#[derive(Debug, Clone, Copy)]
pub struct ContentResolver {
    policy: TieringPolicy,
    minimized_threshold: f32,
    placeholder_below_scale: Option<f32>,
}

impl ContentResolver {
    pub fn new(
        policy: TieringPolicy,
        minimized_threshold: f32,
        placeholder_below_scale: Option<f32>,
    ) -> Self {
        Self {
            policy,
            minimized_threshold,
            placeholder_below_scale,
        }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(
            config.tiering_policy,
            config.minimized_threshold,
            config.placeholder_below_scale,
        )
    }

    pub fn policy(&self) -> TieringPolicy {
        self.policy
    }

    /// Number of blocks to show for `content` at `effective_zoom`.
    ///
    /// Always at least 1 and at most `content.len()`, except for empty
    /// content which shows nothing.
    pub fn resolve(&self, content: &NodeContent, effective_zoom: f32) -> usize {
        let total = content.len();
        match self.policy {
            TieringPolicy::Continuous => continuous_block_count(effective_zoom, total),
            TieringPolicy::Binary => binary_block_count(effective_zoom, total, self.minimized_threshold),
        }
    }

    /// Global render-cost guard, driven by the canvas scale only
    pub fn tier(&self, canvas_scale: f32) -> ContentTier {
        match self.placeholder_below_scale {
            Some(threshold) if canvas_scale < threshold => ContentTier::Placeholder,
            _ => ContentTier::Detail,
        }
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}
