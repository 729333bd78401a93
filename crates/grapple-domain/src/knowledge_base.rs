//! Knowledge base - an immutable arena of positions and techniques
//!
//! Entities keep their insertion order; lookups go through an identifier
//! index and return `Option`, because entries are allowed to reference
//! positions and techniques that have not been written yet.

use crate::{Position, PositionId, Technique, TechniqueId, TechniqueType};
use std::collections::HashMap;

/// Counts shown alongside the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnowledgeBaseStats {
    /// Number of positions
    pub positions: usize,

    /// Number of techniques
    pub techniques: usize,

    /// Number of techniques of type `Submission`
    pub submissions: usize,
}

/// Read-only snapshot of positions and techniques
///
/// Built once through [`KnowledgeBaseBuilder`] and never mutated afterwards,
/// so shared references can be handed to any number of concurrent readers.
///
/// # Examples
///
/// ```
/// use grapple_domain::{KnowledgeBase, Position, Technique, TechniqueType};
///
/// let kb = KnowledgeBase::builder()
///     .position(Position::new("standing", "Standing", "standing"))
///     .technique(Technique::new("guard-pull", "Guard Pull", TechniqueType::Transition, "standing"))
///     .build();
///
/// assert!(kb.position("standing").is_some());
/// assert!(kb.technique("not-written-yet").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    positions: Vec<Position>,
    techniques: Vec<Technique>,
    position_index: HashMap<PositionId, usize>,
    technique_index: HashMap<TechniqueId, usize>,
}

impl KnowledgeBase {
    /// Start building a knowledge base
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Build a knowledge base from entity lists (later duplicates replace earlier ones)
    pub fn new(
        positions: impl IntoIterator<Item = Position>,
        techniques: impl IntoIterator<Item = Technique>,
    ) -> Self {
        let mut builder = Self::builder();
        for position in positions {
            builder.insert_position(position);
        }
        for technique in techniques {
            builder.insert_technique(technique);
        }
        builder.build()
    }

    /// Look up a position
    pub fn position(&self, id: &str) -> Option<&Position> {
        self.position_index.get(id).map(|&index| &self.positions[index])
    }

    /// Look up a technique
    pub fn technique(&self, id: &str) -> Option<&Technique> {
        self.technique_index.get(id).map(|&index| &self.techniques[index])
    }

    /// True if `id` names a position
    pub fn contains_position(&self, id: &str) -> bool {
        self.position_index.contains_key(id)
    }

    /// True if `id` names a technique
    pub fn contains_technique(&self, id: &str) -> bool {
        self.technique_index.contains_key(id)
    }

    /// Positions in insertion order
    pub fn positions(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.positions.iter()
    }

    /// Techniques in insertion order
    pub fn techniques(&self) -> impl ExactSizeIterator<Item = &Technique> {
        self.techniques.iter()
    }

    /// Number of positions
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of techniques
    pub fn technique_count(&self) -> usize {
        self.techniques.len()
    }

    /// True if the knowledge base holds no entities at all
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.techniques.is_empty()
    }

    /// Position, technique and submission counts
    pub fn stats(&self) -> KnowledgeBaseStats {
        KnowledgeBaseStats {
            positions: self.positions.len(),
            techniques: self.techniques.len(),
            submissions: self
                .techniques
                .iter()
                .filter(|technique| technique.technique_type == TechniqueType::Submission)
                .count(),
        }
    }

    /// Techniques applicable from `position`, skipping unresolved ids
    pub fn applicable_techniques<'a>(
        &'a self,
        position: &'a Position,
    ) -> impl Iterator<Item = &'a Technique> + 'a {
        position
            .applicable_technique_ids
            .iter()
            .filter_map(move |id| self.technique(id.as_str()))
    }

    /// Setup techniques of `technique`, skipping unresolved ids
    pub fn setup_techniques<'a>(
        &'a self,
        technique: &'a Technique,
    ) -> impl Iterator<Item = &'a Technique> + 'a {
        technique
            .setup_technique_ids
            .iter()
            .filter_map(move |id| self.technique(id.as_str()))
    }

    /// The same configuration seen by the other participant
    pub fn inverse_of(&self, position: &Position) -> Option<&Position> {
        self.position(position.inverse_position_id.as_str())
    }

    /// The broader position a variant belongs to
    pub fn parent_of(&self, position: &Position) -> Option<&Position> {
        position
            .parent_id
            .as_ref()
            .and_then(|parent| self.position(parent.as_str()))
    }

    /// Declared variants of `position`, skipping unresolved ids
    pub fn variants_of<'a>(
        &'a self,
        position: &'a Position,
    ) -> impl Iterator<Item = &'a Position> + 'a {
        position
            .variant_ids
            .iter()
            .filter_map(move |id| self.position(id.as_str()))
    }
}

/// Accumulates entities before freezing them into a [`KnowledgeBase`]
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    inner: KnowledgeBase,
}

impl KnowledgeBaseBuilder {
    /// Add a position (chainable)
    pub fn position(mut self, position: Position) -> Self {
        self.insert_position(position);
        self
    }

    /// Add a technique (chainable)
    pub fn technique(mut self, technique: Technique) -> Self {
        self.insert_technique(technique);
        self
    }

    /// Add a position; an existing entry with the same id is replaced in place
    pub fn insert_position(&mut self, position: Position) {
        let kb = &mut self.inner;
        match kb.position_index.get(position.id.as_str()) {
            Some(&index) => kb.positions[index] = position,
            None => {
                kb.position_index.insert(position.id.clone(), kb.positions.len());
                kb.positions.push(position);
            }
        }
    }

    /// Add a technique; an existing entry with the same id is replaced in place
    pub fn insert_technique(&mut self, technique: Technique) {
        let kb = &mut self.inner;
        match kb.technique_index.get(technique.id.as_str()) {
            Some(&index) => kb.techniques[index] = technique,
            None => {
                kb.technique_index.insert(technique.id.clone(), kb.techniques.len());
                kb.techniques.push(technique);
            }
        }
    }

    /// Freeze the knowledge base
    pub fn build(self) -> KnowledgeBase {
        self.inner
    }
}
