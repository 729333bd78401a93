//! Grapple Graph Derivation
//!
//! Turns a [`KnowledgeBase`](grapple_domain::KnowledgeBase) and a set of
//! [`GraphFilters`](grapple_domain::GraphFilters) into a directed graph of
//! position nodes and technique edges.
//!
//! ## Edges
//!
//! - **Outcome edges**: a technique applicable from an included position whose
//!   outcome ends in another included position
//! - **Setup edges**: from the origin of a setup technique to the origin of the
//!   technique it sets up; these ignore the technique filters
//!
//! Derivation is synchronous and never fails. Dangling identifiers in the
//! knowledge base only make the graph smaller.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod derive;
pub mod graph;

pub use derive::derive;
pub use graph::{DerivedGraph, EdgeId, Point, PositionNode, TechniqueEdge, TechniqueEdgeData};
