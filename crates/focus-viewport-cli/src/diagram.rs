//! Diagram files and the built-in demo

use std::path::Path;

use anyhow::{Context, Result};
use focus_viewport::{DiagramNode, Edge};
use serde::{Deserialize, Serialize};

use crate::script::Script;

const DEMO_DIAGRAM: &str = include_str!("../../../demos/six_nodes.yaml");
const DEMO_SCRIPT: &str = include_str!("../../../demos/focus_walkthrough.yaml");

/// Nodes and edges as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Diagram {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading diagram {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parsing diagram {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Six nodes around a hub, five edges
    pub fn demo() -> Result<Self> {
        Self::from_yaml(DEMO_DIAGRAM).context("parsing built-in demo diagram")
    }

    /// Edges whose endpoints are not in the node list
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                !self.nodes.iter().any(|n| n.id == e.source)
                    || !self.nodes.iter().any(|n| n.id == e.target)
            })
            .collect()
    }
}

pub fn demo_script() -> Result<Script> {
    Script::from_yaml(DEMO_SCRIPT).context("parsing built-in demo script")
}
