//! Knowledge base to graph derivation

use crate::graph::{DerivedGraph, EdgeId, PositionNode, TechniqueEdge, TechniqueEdgeData};
use grapple_domain::{GraphFilters, KnowledgeBase, Technique};
use std::collections::HashSet;
use tracing::{debug, info};

/// Derive the visible graph for `filters`
///
/// Pure and deterministic: the same knowledge base and filters always give the
/// same nodes and edges in the same order. Identifiers that do not resolve are
/// skipped.
///
/// # Examples
///
/// ```
/// use grapple_domain::{GraphFilters, KnowledgeBase, Position, Technique, TechniqueOutcome, TechniqueType};
/// use grapple_graph::derive;
///
/// let kb = KnowledgeBase::builder()
///     .position(Position::new("guard", "Guard", "guard").with_techniques(["sweep"]))
///     .position(Position::new("mount", "Mount", "mount"))
///     .technique(
///         Technique::new("sweep", "Sweep", TechniqueType::Sweep, "guard")
///             .with_outcome(TechniqueOutcome::position_change("mount", "Swept")),
///     )
///     .build();
///
/// let graph = derive(&kb, GraphFilters::default());
/// assert_eq!(graph.nodes.len(), 2);
/// assert_eq!(graph.edges[0].id.to_string(), "guard-via-sweep-to-mount-0");
/// ```
pub fn derive(kb: &KnowledgeBase, filters: GraphFilters) -> DerivedGraph {
    let nodes: Vec<PositionNode> = kb
        .positions()
        .filter(|position| filters.admits_position(position))
        .map(|position| PositionNode {
            id: position.id.clone(),
            label: position.name.clone(),
            position_id: position.id.clone(),
            advantage: position.advantage,
            is_variant: position.is_variant,
            position: None,
        })
        .collect();

    let included: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut edges = EdgeSet::default();

    for node in &nodes {
        let Some(position) = kb.position(node.id.as_str()) else {
            continue;
        };

        for technique in kb.applicable_techniques(position) {
            if !filters.admits_technique(technique) {
                continue;
            }

            for (outcome_index, end) in technique.positional_outcomes() {
                if !included.contains(end.as_str()) {
                    continue;
                }

                edges.insert(TechniqueEdge {
                    id: EdgeId::Outcome {
                        start: position.id.clone(),
                        technique: technique.id.clone(),
                        end: end.clone(),
                        outcome_index,
                    },
                    source: position.id.clone(),
                    target: end.clone(),
                    data: outcome_data(technique),
                });
            }
        }
    }

    let mut setup_edges = 0;
    for technique in kb.techniques() {
        if !included.contains(technique.origin_position_id.as_str()) {
            continue;
        }

        for setup in kb.setup_techniques(technique) {
            if !included.contains(setup.origin_position_id.as_str()) {
                continue;
            }

            let inserted = edges.insert(TechniqueEdge {
                id: EdgeId::Setup {
                    setup_technique: setup.id.clone(),
                    technique: technique.id.clone(),
                },
                source: setup.origin_position_id.clone(),
                target: technique.origin_position_id.clone(),
                data: setup_data(setup),
            });
            if inserted {
                setup_edges += 1;
            }
        }
    }

    let graph = DerivedGraph {
        nodes,
        edges: edges.into_edges(),
    };

    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        setup_edges,
        "Derived graph"
    );

    graph
}

fn outcome_data(technique: &Technique) -> TechniqueEdgeData {
    TechniqueEdgeData {
        technique_id: technique.id.clone(),
        technique_type: technique.technique_type,
        label: technique.name.clone(),
        is_setup_edge: false,
    }
}

fn setup_data(setup: &Technique) -> TechniqueEdgeData {
    TechniqueEdgeData {
        technique_id: setup.id.clone(),
        technique_type: setup.technique_type,
        label: format!("Setup: {}", setup.name),
        is_setup_edge: true,
    }
}

/// Insertion-ordered edges keyed by identity; the first insert wins
#[derive(Default)]
struct EdgeSet {
    edges: Vec<TechniqueEdge>,
    seen: HashSet<EdgeId>,
}

impl EdgeSet {
    fn insert(&mut self, edge: TechniqueEdge) -> bool {
        if self.seen.contains(&edge.id) {
            debug!(edge = %edge.id, "Skipping duplicate edge");
            return false;
        }

        debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "Emitting edge");
        self.seen.insert(edge.id.clone());
        self.edges.push(edge);
        true
    }

    fn into_edges(self) -> Vec<TechniqueEdge> {
        self.edges
    }
}
