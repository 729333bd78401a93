//! The layout oracle seam
//!
//! An oracle receives sized boxes and arcs between them and answers with a
//! placement per box. The wire format is JSON with camelCase field names:
//!
//! ```text
//! request:  { "nodes": [{id, width, height}], "edges": [{id, sources, targets}], "layoutOptions": {...} }
//! response: { "nodes": [{id, x, y}] }
//! ```

use crate::LayoutOptions;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;

/// Box size preset for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// Ordinary position
    Regular,

    /// Variant position, drawn narrower
    Variant,
}

impl SizeClass {
    /// Size class for a node with the given variant flag
    pub fn for_variant(is_variant: bool) -> Self {
        if is_variant {
            SizeClass::Variant
        } else {
            SizeClass::Regular
        }
    }

    /// Box width
    pub fn width(&self) -> f64 {
        match self {
            SizeClass::Regular => 180.0,
            SizeClass::Variant => 150.0,
        }
    }

    /// Box height
    pub fn height(&self) -> f64 {
        60.0
    }
}

/// A sized box to place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleNode {
    /// Node identity
    pub id: String,

    /// Box width
    pub width: f64,

    /// Box height
    pub height: f64,
}

/// A directed arc between boxes, by identity only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleEdge {
    /// Edge identity
    pub id: String,

    /// Source node ids
    pub sources: Vec<String>,

    /// Target node ids
    pub targets: Vec<String>,
}

/// Everything an oracle needs to place a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    /// Boxes to place
    pub nodes: Vec<OracleNode>,

    /// Arcs between boxes
    pub edges: Vec<OracleEdge>,

    /// Strategy for this call
    pub layout_options: LayoutOptions,
}

/// Placement of one box (top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    /// Node identity
    pub id: String,

    /// Horizontal coordinate
    pub x: f64,

    /// Vertical coordinate
    pub y: f64,
}

/// An oracle's answer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResponse {
    /// Placed boxes; may omit ids or contain unknown ones
    pub nodes: Vec<PlacedNode>,
}

/// External layout computation
///
/// Implementations can be in-process algorithms, external programs or test
/// doubles. Errors only need to be displayable: the adapter logs them and
/// carries on.
pub trait LayoutOracle: Send + Sync {
    /// Error type for this oracle
    type Error: Display;

    /// Place the boxes of `request`
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> impl Future<Output = Result<LayoutResponse, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_classes() {
        assert_eq!(SizeClass::for_variant(false).width(), 180.0);
        assert_eq!(SizeClass::for_variant(true).width(), 150.0);
        assert_eq!(SizeClass::Variant.height(), SizeClass::Regular.height());
    }

    #[test]
    fn test_request_wire_format() {
        let request = LayoutRequest {
            nodes: vec![OracleNode {
                id: "mount-top".to_string(),
                width: 180.0,
                height: 60.0,
            }],
            edges: vec![OracleEdge {
                id: "e".to_string(),
                sources: vec!["mount-top".to_string()],
                targets: vec!["mount-top".to_string()],
            }],
            layout_options: LayoutOptions::default(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("layoutOptions").is_some());
        assert_eq!(value["nodes"][0]["width"], 180.0);
        assert_eq!(value["edges"][0]["sources"][0], "mount-top");
    }

    #[test]
    fn test_response_parse() {
        let response: LayoutResponse =
            serde_json::from_str(r#"{"nodes":[{"id":"a","x":10.5,"y":-3}]}"#).unwrap();
        assert_eq!(response.nodes.len(), 1);
        assert_eq!(response.nodes[0].x, 10.5);
        assert_eq!(response.nodes[0].y, -3.0);
    }
}
