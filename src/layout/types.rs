use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One row per generation.
    #[default]
    Generational,
    /// Vertical position from birth year.
    Temporal,
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generational" | "generation" | "generations" => Ok(Self::Generational),
            "temporal" | "timeline" | "time" => Ok(Self::Temporal),
            other => Err(format!("unknown layout mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Person,
    CoupleMidpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub generation: Option<u32>,
}

impl NodeLayout {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEdgeKind {
    Spouse,
    ParentChild,
    Sibling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: LayoutEdgeKind,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Single,
    Couple,
    MultiCouple,
}

/// Planner output: a person, couple or multi-couple laid out as one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitLayout {
    pub id: String,
    pub kind: UnitKind,
    pub members: Vec<String>,
    pub generation: u32,
    /// Horizontal space the unit and its descendants require.
    pub width: f32,
    pub x: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyLayout {
    pub mode: LayoutMode,
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub units: Vec<UnitLayout>,
    pub width: f32,
    pub height: f32,
}

impl FamilyLayout {
    /// Centre coordinates of every node, persons and couple midpoints alike.
    pub fn node_positions(&self) -> BTreeMap<String, Point> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), Point { x: node.x, y: node.y }))
            .collect()
    }

    pub fn persons(&self) -> impl Iterator<Item = &NodeLayout> {
        self.nodes.values().filter(|n| n.kind == NodeKind::Person)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeLayout> {
        self.edges.iter().find(|e| e.id == id)
    }
}
