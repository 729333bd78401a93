//! Index-based view of a layout request shared by the built-in oracles

use crate::{LayoutRequest, OracleError};
use std::collections::{HashMap, HashSet};

/// Nodes by position in the request, arcs as index pairs
///
/// Self loops and parallel arcs are dropped; they do not influence placement.
pub(crate) struct Topology {
    pub ids: Vec<String>,
    pub sizes: Vec<(f64, f64)>,
    pub arcs: Vec<(usize, usize)>,
}

impl Topology {
    pub fn from_request(request: &LayoutRequest) -> Result<Self, OracleError> {
        let index: HashMap<&str, usize> = request
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let lookup = |edge: &str, node: &str| {
            index
                .get(node)
                .copied()
                .ok_or_else(|| OracleError::UnknownEndpoint {
                    edge: edge.to_string(),
                    node: node.to_string(),
                })
        };

        let mut seen = HashSet::new();
        let mut arcs = Vec::new();
        for edge in &request.edges {
            for source in &edge.sources {
                let from = lookup(&edge.id, source)?;
                for target in &edge.targets {
                    let to = lookup(&edge.id, target)?;
                    if from != to && seen.insert((from, to)) {
                        arcs.push((from, to));
                    }
                }
            }
        }

        Ok(Self {
            ids: request.nodes.iter().map(|node| node.id.clone()).collect(),
            sizes: request
                .nodes
                .iter()
                .map(|node| (node.width, node.height))
                .collect(),
            arcs,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Successor lists, ascending
    pub fn successors(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.len()];
        for &(from, to) in &self.arcs {
            adj[from].push(to);
        }
        for list in &mut adj {
            list.sort_unstable();
        }
        adj
    }
}
