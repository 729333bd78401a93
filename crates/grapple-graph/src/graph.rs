//! Derived graph types
//!
//! These are the values handed from derivation to layout and on to
//! presentation. Nothing here knows about colors or styling.

use grapple_domain::{Advantage, PositionId, TechniqueId, TechniqueType};
use std::fmt;

/// A 2D coordinate assigned by layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,

    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// The origin, used when a node could not be placed
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A graph node derived from one position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionNode {
    /// Node identity (the position id)
    pub id: PositionId,

    /// Position name
    pub label: String,

    /// Source position
    pub position_id: PositionId,

    /// Position rating, if any
    pub advantage: Option<Advantage>,

    /// True for variant positions
    pub is_variant: bool,

    /// Layout coordinate; `None` until a layout pass runs
    pub position: Option<Point>,
}

/// Stable identity of an edge
///
/// Two emissions with the same identity describe the same edge; the first one
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeId {
    /// Technique outcome moving from `start` to `end`
    Outcome {
        /// Position the technique starts from
        start: PositionId,
        /// Technique producing the outcome
        technique: TechniqueId,
        /// Position the outcome ends in
        end: PositionId,
        /// Index of the outcome in the technique's outcome list
        outcome_index: usize,
    },

    /// `setup_technique` commonly leads into `technique`
    Setup {
        /// The setting-up technique
        setup_technique: TechniqueId,
        /// The technique being set up
        technique: TechniqueId,
    },
}

impl EdgeId {
    /// True for setup links
    pub fn is_setup(&self) -> bool {
        matches!(self, EdgeId::Setup { .. })
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Outcome {
                start,
                technique,
                end,
                outcome_index,
            } => write!(f, "{}-via-{}-to-{}-{}", start, technique, end, outcome_index),
            EdgeId::Setup {
                setup_technique,
                technique,
            } => write!(f, "setup-{}-to-{}", setup_technique, technique),
        }
    }
}

/// Technique metadata carried by an edge
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueEdgeData {
    /// Technique the edge stands for (the setup technique for setup edges)
    pub technique_id: TechniqueId,

    /// Type of that technique
    pub technique_type: TechniqueType,

    /// Technique name, prefixed with `Setup: ` for setup edges
    pub label: String,

    /// True for setup links
    pub is_setup_edge: bool,
}

/// A directed edge between two included positions
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueEdge {
    /// Edge identity
    pub id: EdgeId,

    /// Start position
    pub source: PositionId,

    /// End position
    pub target: PositionId,

    /// Technique metadata
    pub data: TechniqueEdgeData,
}

/// Nodes and edges produced by [`derive`](crate::derive)
///
/// Nodes appear in knowledge-base order. Edges appear in insertion order:
/// outcome edges first, then setup edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedGraph {
    /// Position nodes
    pub nodes: Vec<PositionNode>,

    /// Technique edges
    pub edges: Vec<TechniqueEdge>,
}

impl DerivedGraph {
    /// Look up a node by position id
    pub fn node(&self, id: &str) -> Option<&PositionNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Look up an edge by identity
    pub fn edge(&self, id: &EdgeId) -> Option<&TechniqueEdge> {
        self.edges.iter().find(|edge| &edge.id == id)
    }

    /// Edges leaving `id`
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TechniqueEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    /// Edges entering `id`
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TechniqueEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.target == id)
    }

    /// Edges produced by technique outcomes
    pub fn outcome_edges(&self) -> impl Iterator<Item = &TechniqueEdge> {
        self.edges.iter().filter(|edge| !edge.data.is_setup_edge)
    }

    /// Edges produced by setup links
    pub fn setup_edges(&self) -> impl Iterator<Item = &TechniqueEdge> {
        self.edges.iter().filter(|edge| edge.data.is_setup_edge)
    }

    /// True when the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when every node carries a layout coordinate
    pub fn is_positioned(&self) -> bool {
        self.nodes.iter().all(|node| node.position.is_some())
    }
}
