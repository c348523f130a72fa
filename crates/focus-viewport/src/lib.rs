//! Semantic zoom and camera focus for node-link diagrams
//!
//! Decides, for every node on a canvas, how much of its content to show and
//! how to style it, and drives the canvas camera when the user focuses a
//! node or changes the global zoom.
//!
//! # Architecture
//!
//! ```text
//! Canvas input (click, slider, canvas scale)
//!        │
//!        ▼
//! Viewport ──► FocusSelector (Overview ⇄ Focused)
//!        │
//!        ▼
//! ViewportState { global_zoom, focus }
//!        │
//!        ├──► attenuation (effective zoom per node)
//!        │         │
//!        │         ├──► ContentResolver (visible blocks, placeholder tier)
//!        │         └──► style::compose (border, blur, opacity, layer)
//!        │
//!        └──► CameraController (focus / fit-all / coalesced retarget)
//!                    │
//!                    ▼
//!              RenderFrame → canvas
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut viewport = Viewport::new(config, nodes, edges);
//! viewport.set_global_zoom(1.5);
//! let frame = viewport.handle_click(ClickTarget::Node("1".into()));
//! if let Some(cmd) = frame.camera {
//!     canvas.animate_to(cmd.target);
//! }
//! ```

pub mod animation;
pub mod attenuation;
pub mod camera;
pub mod config;
pub mod content;
pub mod directive;
pub mod error;
pub mod focus;
pub mod state;
pub mod style;
pub mod types;
pub mod viewport_fit;

pub use camera::{CameraCommand, CameraController, CameraPose, CameraReason, CameraTarget};
pub use config::{PresentationMode, ReclickBehavior, TieringPolicy, ViewportConfig};
pub use content::{ContentResolver, ContentTier};
pub use directive::RenderDirective;
pub use error::{FocusError, ViewportError, ViewportResult};
pub use focus::{FocusChange, FocusSelector, FocusState, FocusTransition};
pub use state::{AnnotatedNode, RenderFrame, Viewport, ViewportState};
pub use style::{Blur, BorderEmphasis, NodeStyle, ZLayer};
pub use types::*;
pub use viewport_fit::ViewportFit;
