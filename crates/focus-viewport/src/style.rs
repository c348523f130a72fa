//! Per-node visual emphasis
//!
//! The focused node is drawn strong and on top. While something is focused,
//! the rest stay normal until global zoom passes the blur threshold, after
//! which they blur so they don't compete with the node being read.

use serde::{Deserialize, Serialize};

use crate::config::{PresentationMode, ViewportConfig};
use crate::focus::FocusState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderEmphasis {
    Normal,
    Strong,
}

impl BorderEmphasis {
    /// Border stroke in screen pixels
    pub fn stroke_width(self) -> f32 {
        match self {
            BorderEmphasis::Normal => 1.0,
            BorderEmphasis::Strong => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blur {
    None,
    Strong,
}

impl Blur {
    pub fn radius_px(self) -> f32 {
        match self {
            Blur::None => 0.0,
            Blur::Strong => 4.0,
        }
    }
}

/// Stacking layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZLayer {
    Base,
    Top,
}

impl ZLayer {
    pub fn z_index(self) -> i32 {
        match self {
            ZLayer::Base => 0,
            ZLayer::Top => 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub border: BorderEmphasis,
    pub opacity: f32,
    pub blur: Blur,
    pub z_layer: ZLayer,
}

impl NodeStyle {
    pub const FOCUSED: NodeStyle = NodeStyle {
        border: BorderEmphasis::Strong,
        opacity: 1.0,
        blur: Blur::None,
        z_layer: ZLayer::Top,
    };

    pub const NEUTRAL: NodeStyle = NodeStyle {
        border: BorderEmphasis::Normal,
        opacity: 1.0,
        blur: Blur::None,
        z_layer: ZLayer::Base,
    };
}

/// Style for one node given focus and global zoom
pub fn compose(is_focused: bool, focus: &FocusState, global_zoom: f32, config: &ViewportConfig) -> NodeStyle {
    if is_focused {
        return NodeStyle::FOCUSED;
    }
    if focus.is_overview() {
        return NodeStyle::NEUTRAL;
    }

    let opacity = match config.presentation {
        PresentationMode::Plain => 1.0,
        PresentationMode::Dimmed => config.dimmed_opacity,
    };
    let blur = if global_zoom >= config.blur_threshold {
        Blur::Strong
    } else {
        Blur::None
    };

    NodeStyle {
        border: BorderEmphasis::Normal,
        opacity,
        blur,
        z_layer: ZLayer::Base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeId;
    use pretty_assertions::assert_eq;

    fn focused() -> FocusState {
        FocusState::Focused(NodeId::from("a"))
    }

    #[test]
    fn test_focused_node_is_strong_and_on_top() {
        let config = ViewportConfig::default();
        let style = compose(true, &focused(), 3.0, &config);
        assert_eq!(style, NodeStyle::FOCUSED);
        assert_eq!(style.border.stroke_width(), 2.0);
        assert!(style.z_layer.z_index() > ZLayer::Base.z_index());
    }

    #[test]
    fn test_unfocused_below_blur_threshold() {
        let config = ViewportConfig::default();
        let style = compose(false, &focused(), 2.6, &config);
        assert_eq!(style, NodeStyle::NEUTRAL);
    }

    #[test]
    fn test_unfocused_at_blur_threshold_blurs() {
        let config = ViewportConfig::default();
        let style = compose(false, &focused(), 2.7, &config);
        assert_eq!(style.blur, Blur::Strong);
        assert_eq!(style.border, BorderEmphasis::Normal);
        assert_eq!(style.z_layer, ZLayer::Base);
    }

    #[test]
    fn test_dimmed_presentation() {
        let config = ViewportConfig {
            presentation: PresentationMode::Dimmed,
            ..ViewportConfig::default()
        };
        let style = compose(false, &focused(), 1.0, &config);
        assert_eq!(style.opacity, 0.7);
        assert_eq!(style.blur, Blur::None);
    }

    #[test]
    fn test_overview_never_blurs_or_dims() {
        let config = ViewportConfig {
            presentation: PresentationMode::Dimmed,
            ..ViewportConfig::default()
        };
        let style = compose(false, &FocusState::Overview, 3.0, &config);
        assert_eq!(style, NodeStyle::NEUTRAL);
    }
}
