//! Filter configuration for graph derivation

use crate::{Applicability, Difficulty, Position, Technique, TechniqueType};
use std::fmt;
use std::str::FromStr;

/// Either every value or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selector<T> {
    /// No restriction
    #[default]
    All,

    /// Only the given value
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    /// True when `value` passes the selector
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(selected) => selected == value,
        }
    }

    /// True for [`Selector::All`]
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T> From<T> for Selector<T> {
    fn from(value: T) -> Self {
        Selector::Only(value)
    }
}

impl<T> FromStr for Selector<T>
where
    T: FromStr,
{
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        s.parse().map(Selector::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

/// Which nodes and edges a derivation should include
///
/// Cheap to copy; every derivation call takes its own value, so a caller can
/// change filters between calls without touching shared state.
///
/// # Examples
///
/// ```
/// use grapple_domain::{Difficulty, GraphFilters, Selector};
///
/// let filters = GraphFilters {
///     difficulty: Selector::Only(Difficulty::Beginner),
///     show_variants: false,
///     ..GraphFilters::default()
/// };
/// assert!(filters.technique_type.is_all());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphFilters {
    /// Restrict non-positional techniques to one type
    pub technique_type: Selector<TechniqueType>,

    /// Restrict techniques to one difficulty
    pub difficulty: Selector<Difficulty>,

    /// Restrict techniques to one attire; `Both` always passes
    pub applicability: Selector<Applicability>,

    /// Include variant positions as nodes
    pub show_variants: bool,
}

impl Default for GraphFilters {
    fn default() -> Self {
        Self {
            technique_type: Selector::All,
            difficulty: Selector::All,
            applicability: Selector::All,
            show_variants: true,
        }
    }
}

impl GraphFilters {
    /// True when `position` becomes a node
    pub fn admits_position(&self, position: &Position) -> bool {
        self.show_variants || !position.is_variant
    }

    /// True when outcome edges of `technique` may be emitted
    ///
    /// Positional techniques (sweeps, escapes, transitions, takedowns and
    /// guard work) move the graph and are never hidden by the type filter.
    pub fn admits_technique(&self, technique: &Technique) -> bool {
        if !self.difficulty.matches(&technique.difficulty) {
            return false;
        }

        if technique.applicability != Applicability::Both
            && !self.applicability.matches(&technique.applicability)
        {
            return false;
        }

        technique.technique_type.is_positional()
            || self.technique_type.matches(&technique.technique_type)
    }
}
