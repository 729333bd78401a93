//! Grapple Domain Layer
//!
//! This crate holds the knowledge-base model for GrappleGraph: positions,
//! techniques, their outcomes, and the filter configuration that graph
//! derivation consumes. It has ZERO external dependencies so every other
//! crate can build on it.
//!
//! ## Key Concepts
//!
//! - **Position**: a named configuration of two participants, seen from one of them
//! - **Technique**: an action that starts from exactly one position
//! - **Outcome**: one possible result of a technique, optionally ending in another position
//! - **Knowledge Base**: an immutable arena of positions and techniques
//! - **Graph Filters**: which positions and techniques a derivation includes
//!
//! References between entities are plain identifiers and may dangle; every
//! lookup returns `Option` and consumers skip what does not resolve.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod ids;
pub mod knowledge_base;
pub mod position;
pub mod technique;

mod vocab;

// Re-exports for convenience
pub use filter::{GraphFilters, Selector};
pub use ids::{PositionId, TechniqueId};
pub use knowledge_base::{KnowledgeBase, KnowledgeBaseBuilder, KnowledgeBaseStats};
pub use position::{Advantage, MediaKind, MediaReference, Position};
pub use technique::{
    Applicability, Difficulty, Likelihood, OutcomeKind, Technique, TechniqueOutcome, TechniqueType,
};
