//! Focus state machine
//!
//! Two states: `Overview` (nothing focused) and `Focused(id)`. Clicks and
//! explicit commands are expressed as `FocusTransition`s and applied against
//! the current node set, so a focus can never point at a missing node.
//!
//! ```text
//! Overview   --click(n)-->           Focused(n)
//! Focused(a) --click(b), b != a-->   Focused(b)
//! Focused(a) --click(a)-->           Focused(a) | Overview   (ReclickBehavior)
//! Focused(a) --clear / background--> Overview
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReclickBehavior;
use crate::error::FocusError;
use crate::types::{ClickTarget, DiagramNode, NodeId};

/// Which node, if any, the viewport is framing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    #[default]
    Overview,
    Focused(NodeId),
}

impl FocusState {
    pub fn focused_id(&self) -> Option<&NodeId> {
        match self {
            FocusState::Overview => None,
            FocusState::Focused(id) => Some(id),
        }
    }

    pub fn is_focused(&self, id: &NodeId) -> bool {
        self.focused_id() == Some(id)
    }

    pub fn is_overview(&self) -> bool {
        matches!(self, FocusState::Overview)
    }
}

/// Requested focus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTransition {
    /// Focus a node (idempotent)
    Select(NodeId),
    /// Back to overview
    Clear,
    /// Raw canvas click, resolved against `ReclickBehavior`
    Click(ClickTarget),
}

/// Observable outcome of applying a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    Unchanged,
    /// Overview → Focused
    Focused(NodeId),
    /// Focused(a) → Focused(b), never passing through Overview
    Refocused { from: NodeId, to: NodeId },
    /// Focused → Overview
    Cleared { from: NodeId },
}

impl FocusChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, FocusChange::Unchanged)
    }
}

/// Applies focus transitions to a `FocusState`.
///
/// Holds only the interaction policy; the state itself lives in
/// `ViewportState` so there is a single mutable root.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusSelector {
    reclick: ReclickBehavior,
}

impl FocusSelector {
    pub fn new(reclick: ReclickBehavior) -> Self {
        Self { reclick }
    }

    pub fn reclick_behavior(&self) -> ReclickBehavior {
        self.reclick
    }

    /// Apply a transition against the current node set.
    ///
    /// Selecting an unknown node is rejected and leaves focus untouched.
    pub fn apply(
        &self,
        focus: &mut FocusState,
        transition: FocusTransition,
        nodes: &[DiagramNode],
    ) -> Result<FocusChange, FocusError> {
        match transition {
            FocusTransition::Select(id) => Self::select(focus, id, nodes),
            FocusTransition::Clear => Ok(Self::clear(focus)),
            FocusTransition::Click(ClickTarget::Background) => Ok(Self::clear(focus)),
            FocusTransition::Click(ClickTarget::Node(id)) => {
                let reclicked = focus.is_focused(&id);
                match (reclicked, self.reclick) {
                    (true, ReclickBehavior::Toggle) => Ok(Self::clear(focus)),
                    _ => Self::select(focus, id, nodes),
                }
            }
        }
    }

    /// Focus `id` if it exists in `nodes` (idempotent)
    pub fn select(
        focus: &mut FocusState,
        id: NodeId,
        nodes: &[DiagramNode],
    ) -> Result<FocusChange, FocusError> {
        if !nodes.iter().any(|n| n.id == id) {
            return Err(FocusError::UnknownNode(id));
        }

        let previous = std::mem::replace(focus, FocusState::Focused(id.clone()));
        let change = match previous {
            FocusState::Overview => FocusChange::Focused(id),
            FocusState::Focused(from) if from == id => FocusChange::Unchanged,
            FocusState::Focused(from) => FocusChange::Refocused { from, to: id },
        };
        if change.is_change() {
            debug!(?change, "focus transition");
        }
        Ok(change)
    }

    /// Return to overview
    pub fn clear(focus: &mut FocusState) -> FocusChange {
        match std::mem::take(focus) {
            FocusState::Overview => FocusChange::Unchanged,
            FocusState::Focused(from) => {
                debug!(%from, "focus cleared");
                FocusChange::Cleared { from }
            }
        }
    }

    /// Drop a focus whose node has disappeared from the diagram
    pub fn reconcile(focus: &mut FocusState, nodes: &[DiagramNode]) -> FocusChange {
        let dangling = focus
            .focused_id()
            .is_some_and(|id| !nodes.iter().any(|n| &n.id == id));
        if dangling {
            debug!("focused node removed, reverting to overview");
            Self::clear(focus)
        } else {
            FocusChange::Unchanged
        }
    }
}
