//! Viewport configuration
//!
//! One surface for every tunable the zoom/focus pipeline reads. Defaults
//! live here; `config/viewport.yaml` mirrors them for hosts that want a file.
//!
//! ```yaml
//! zoom_max: 2.0
//! tiering_policy: binary
//! reclick: toggle
//! ```

use std::path::Path;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ViewportError, ViewportResult};

/// How effective zoom maps to visible content blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieringPolicy {
    /// One more block every half zoom step
    #[default]
    Continuous,
    /// Title only below `minimized_threshold`, everything above
    Binary,
}

/// Whether unfocused nodes are dimmed while another node has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    #[default]
    Plain,
    Dimmed,
}

/// What clicking the already focused node does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclickBehavior {
    /// Stay focused
    #[default]
    Ignore,
    /// Return to overview
    Toggle,
}

/// All tunables for zoom attenuation, content tiering, styling and camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Slider lower bound
    pub zoom_min: f32,
    /// Slider upper bound
    pub zoom_max: f32,
    /// Slider granularity; input is snapped to this
    pub zoom_step: f32,
    /// Global zoom at session start
    pub initial_zoom: f32,

    /// How fast unfocused nodes shrink as global zoom rises
    pub reduction_factor: f32,
    /// Floor for attenuated zoom
    pub min_attenuated_zoom: f32,

    pub tiering_policy: TieringPolicy,
    /// Binary tiering: title only below this effective zoom
    pub minimized_threshold: f32,
    /// Canvas scale below which every node is a placeholder. `None` disables.
    pub placeholder_below_scale: Option<f32>,

    /// Global zoom at which unfocused nodes get blurred
    pub blur_threshold: f32,
    pub presentation: PresentationMode,
    /// Opacity of unfocused nodes in `Dimmed` mode
    pub dimmed_opacity: f32,
    pub reclick: ReclickBehavior,

    /// Duration of every camera move (focus, retarget and fit-all)
    pub camera_duration_ms: u64,
    /// Canvas size in screen pixels, used for fit-all
    pub screen_size: Vec2,
    /// World-space padding around the fit-all bounding box
    pub fit_padding: f32,
    /// Fraction of the screen the fit-all box may occupy
    pub fit_margin: f32,
    pub fit_zoom_min: f32,
    pub fit_zoom_max: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 3.0,
            zoom_step: 0.1,
            initial_zoom: 0.5,
            reduction_factor: 0.7,
            min_attenuated_zoom: 0.3,
            tiering_policy: TieringPolicy::Continuous,
            minimized_threshold: 0.8,
            placeholder_below_scale: Some(1.0),
            blur_threshold: 2.7,
            presentation: PresentationMode::Plain,
            dimmed_opacity: 0.7,
            reclick: ReclickBehavior::Ignore,
            camera_duration_ms: 1000,
            screen_size: Vec2::new(800.0, 600.0),
            fit_padding: 50.0,
            fit_margin: 0.9,
            fit_zoom_min: 0.1,
            fit_zoom_max: 2.0,
        }
    }
}

impl ViewportConfig {
    /// Load and validate configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> ViewportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ViewportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> ViewportResult<Self> {
        let config: ViewportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the zoom/tiering invariants
    pub fn validate(&self) -> ViewportResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ViewportResult<()> {
            Err(ViewportError::InvalidConfig {
                field,
                reason: reason.into(),
            })
        }

        if !(self.zoom_min > 0.0) || !(self.zoom_min < self.zoom_max) {
            return invalid(
                "zoom_min",
                format!("need 0 < zoom_min < zoom_max, got {} / {}", self.zoom_min, self.zoom_max),
            );
        }
        if !(self.zoom_step > 0.0) {
            return invalid("zoom_step", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.reduction_factor) {
            return invalid("reduction_factor", "must be within [0, 1]");
        }
        // Above 1.0 the floor would lift unfocused nodes past a zoomed-in focus
        if !(self.min_attenuated_zoom > 0.0 && self.min_attenuated_zoom <= 1.0) {
            return invalid("min_attenuated_zoom", "must be within (0, 1]");
        }
        if !(self.minimized_threshold > 0.0) {
            return invalid("minimized_threshold", "must be positive");
        }
        if !(self.blur_threshold > 0.0) {
            return invalid("blur_threshold", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return invalid("dimmed_opacity", "must be within [0, 1]");
        }
        if self.camera_duration_ms == 0 {
            return invalid("camera_duration_ms", "must be non-zero");
        }
        if !(self.screen_size.x > 0.0 && self.screen_size.y > 0.0) {
            return invalid("screen_size", "both dimensions must be positive");
        }
        if !(self.fit_margin > 0.0 && self.fit_margin <= 1.0) {
            return invalid("fit_margin", "must be within (0, 1]");
        }
        if !(self.fit_zoom_min > 0.0) || !(self.fit_zoom_min <= self.fit_zoom_max) {
            return invalid("fit_zoom_min", "need 0 < fit_zoom_min <= fit_zoom_max");
        }
        if let Some(scale) = self.placeholder_below_scale {
            if !(scale >= 0.0) {
                return invalid("placeholder_below_scale", "must be non-negative");
            }
        }
        Ok(())
    }

    /// Clamp raw slider/gesture input into range and snap it to `zoom_step`
    pub fn normalize_zoom(&self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return self.zoom_min;
        }
        let steps = ((raw - self.zoom_min) / self.zoom_step).round();
        let snapped = self.zoom_min + steps * self.zoom_step;
        // Round away accumulated float error so 1.5 stays 1.5
        let snapped = (snapped * 1000.0).round() / 1000.0;
        snapped.clamp(self.zoom_min, self.zoom_max)
    }

    /// Camera move duration in seconds
    pub fn camera_duration_secs(&self) -> f32 {
        self.camera_duration_ms as f32 / 1000.0
    }
}
