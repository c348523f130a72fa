//! Per-node effective zoom
//!
//! The focused node tracks global zoom exactly. Everything else shrinks as
//! the focused node zooms in and recovers toward 1.0 as global zoom returns
//! to 1.0. With no focus there is nothing to attenuate against.

use crate::config::ViewportConfig;
use crate::focus::FocusState;
use crate::types::NodeId;

/// Attenuated zoom shared by every unfocused node
pub fn attenuated_zoom(global_zoom: f32, config: &ViewportConfig) -> f32 {
    let reduced = 1.0 - (global_zoom - 1.0) * config.reduction_factor;
    reduced.max(config.min_attenuated_zoom)
}

/// Effective zoom used for tiering and styling of `node`
pub fn effective_zoom(
    node: &NodeId,
    global_zoom: f32,
    focus: &FocusState,
    config: &ViewportConfig,
) -> f32 {
    match focus {
        FocusState::Overview => global_zoom,
        FocusState::Focused(id) if id == node => global_zoom,
        FocusState::Focused(_) => attenuated_zoom(global_zoom, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn focused(id: &str) -> FocusState {
        FocusState::Focused(NodeId::from(id))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_unfocused_literal_cases() {
        let config = ViewportConfig::default();
        let other = NodeId::from("b");
        let focus = focused("a");

        assert!(approx(effective_zoom(&other, 1.0, &focus, &config), 1.0));
        assert!(approx(effective_zoom(&other, 2.0, &focus, &config), 0.3));
        assert!(approx(effective_zoom(&other, 1.5, &focus, &config), 0.65));
    }

    #[test]
    fn test_overview_is_unattenuated() {
        let config = ViewportConfig::default();
        let node = NodeId::from("a");
        assert_eq!(effective_zoom(&node, 2.0, &FocusState::Overview, &config), 2.0);
    }

    #[test]
    fn test_floor_applies_at_high_zoom() {
        let config = ViewportConfig::default();
        assert!(approx(attenuated_zoom(3.0, &config), 0.3));
    }

    proptest! {
        #[test]
        fn prop_focused_tracks_global(global in 0.5f32..=3.0) {
            let config = ViewportConfig::default();
            let node = NodeId::from("a");
            prop_assert_eq!(effective_zoom(&node, global, &focused("a"), &config), global);
        }

        #[test]
        fn prop_unfocused_never_exceeds_global_above_one(global in 1.0001f32..=3.0) {
            let config = ViewportConfig::default();
            let ez = effective_zoom(&NodeId::from("b"), global, &focused("a"), &config);
            prop_assert!(ez <= global);
            prop_assert!(ez >= config.min_attenuated_zoom);
        }

        #[test]
        fn prop_all_unfocused_share_value(global in 0.5f32..=3.0, a in "[a-z]{1,4}", b in "[a-z]{1,4}") {
            let config = ViewportConfig::default();
            let focus = focused("focused-node");
            prop_assert_eq!(
                effective_zoom(&NodeId::new(a), global, &focus, &config),
                effective_zoom(&NodeId::new(b), global, &focus, &config)
            );
        }
    }
}
