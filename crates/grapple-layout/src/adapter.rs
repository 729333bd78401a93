//! Derived graph layout through an oracle
//!
//! The adapter never fails: when the oracle errors the graph comes back
//! exactly as it went in.

use crate::{LayoutOptions, LayoutOracle, LayoutRequest, LayoutResponse, OracleEdge, OracleNode, SizeClass};
use grapple_graph::{DerivedGraph, Point};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Assigns coordinates to derived graphs using a [`LayoutOracle`]
///
/// # Examples
///
/// ```
/// use grapple_graph::DerivedGraph;
/// use grapple_layout::{LayoutAdapter, LayoutOptions, MockOracle};
///
/// # tokio_test::block_on(async {
/// let adapter = LayoutAdapter::new(MockOracle::failing("offline"), LayoutOptions::default());
/// let graph = DerivedGraph::default();
///
/// // Oracle failures are logged and absorbed
/// let laid_out = adapter.layout(graph.clone()).await;
/// assert_eq!(laid_out, graph);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct LayoutAdapter<O> {
    oracle: O,
    options: LayoutOptions,
}

impl<O: LayoutOracle> LayoutAdapter<O> {
    /// Create an adapter with default options for [`layout`](Self::layout)
    pub fn new(oracle: O, options: LayoutOptions) -> Self {
        Self { oracle, options }
    }

    /// The wrapped oracle
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Options used by [`layout`](Self::layout)
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out `graph` with the adapter's options
    pub async fn layout(&self, graph: DerivedGraph) -> DerivedGraph {
        self.layout_with(graph, &self.options).await
    }

    /// Lay out `graph` with explicit options
    ///
    /// Calls the oracle exactly once. Nodes the oracle did not place (or
    /// placed at non-finite coordinates) keep their previous position, or the
    /// origin if they had none. Edges are returned unchanged.
    pub async fn layout_with(&self, graph: DerivedGraph, options: &LayoutOptions) -> DerivedGraph {
        let request = build_request(&graph, options);

        match self.oracle.layout(request).await {
            Ok(response) => apply_response(graph, response),
            Err(e) => {
                error!(error = %e, nodes = graph.nodes.len(), "Layout oracle failed, keeping previous positions");
                graph
            }
        }
    }
}

/// Build the oracle request for `graph`
pub fn build_request(graph: &DerivedGraph, options: &LayoutOptions) -> LayoutRequest {
    LayoutRequest {
        nodes: graph
            .nodes
            .iter()
            .map(|node| {
                let size = SizeClass::for_variant(node.is_variant);
                OracleNode {
                    id: node.id.to_string(),
                    width: size.width(),
                    height: size.height(),
                }
            })
            .collect(),
        edges: graph
            .edges
            .iter()
            .map(|edge| OracleEdge {
                id: edge.id.to_string(),
                sources: vec![edge.source.to_string()],
                targets: vec![edge.target.to_string()],
            })
            .collect(),
        layout_options: options.clone(),
    }
}

fn apply_response(mut graph: DerivedGraph, response: LayoutResponse) -> DerivedGraph {
    let placed: HashMap<&str, Point> = response
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), Point::new(node.x, node.y)))
        .collect();

    let unknown = placed.keys().filter(|id| graph.node(id).is_none()).count();
    if unknown > 0 {
        debug!(unknown, "Ignoring placements for unknown nodes");
    }

    let mut missing = 0;
    for node in &mut graph.nodes {
        match placed.get(node.id.as_str()) {
            Some(point) if point.is_finite() => node.position = Some(*point),
            other => {
                if other.is_some() {
                    warn!(node = %node.id, "Oracle returned non-finite coordinates");
                } else {
                    warn!(node = %node.id, "Oracle returned no placement");
                }
                missing += 1;
                node.position = Some(node.position.unwrap_or(Point::ORIGIN));
            }
        }
    }

    info!(nodes = graph.nodes.len(), missing, "Applied layout");
    graph
}
