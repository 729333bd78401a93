//! Layout strategy configuration
//!
//! Options are passed explicitly with every layout call; nothing here is
//! global state.

use crate::OracleError;
use serde::{Deserialize, Serialize};

/// Placement algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Hierarchical layers following edge direction
    #[default]
    Layered,

    /// Force-directed placement
    Force,
}

impl Algorithm {
    /// Get the lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Layered => "layered",
            Algorithm::Force => "force",
        }
    }
}

/// Main flow direction for layered layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Layers advance along the x axis
    #[default]
    Right,

    /// Layers advance along the y axis
    Down,
}

/// Edge routing style requested from the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRouting {
    /// Straight segments with bends
    #[default]
    Polyline,

    /// Axis-aligned segments
    Orthogonal,

    /// Smooth curves
    Splines,
}

/// Layout strategy for one layout call
///
/// # Examples
///
/// ```
/// use grapple_layout::{Algorithm, Direction, LayoutOptions};
///
/// let options = LayoutOptions::default();
/// assert_eq!(options.algorithm, Algorithm::Layered);
/// assert_eq!(options.node_spacing, 250.0);
///
/// let down = LayoutOptions::layered(Direction::Down);
/// assert_eq!(down.direction, Direction::Down);
///
/// let force = LayoutOptions::force();
/// assert_eq!(force.algorithm, Algorithm::Force);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Placement algorithm
    /// Default: layered
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Flow direction (layered only)
    /// Default: right
    #[serde(default)]
    pub direction: Direction,

    /// Minimum gap between neighbouring boxes
    /// Default: 250
    #[serde(default = "default_spacing")]
    pub node_spacing: f64,

    /// Gap between consecutive layers (layered only)
    /// Default: 250
    #[serde(default = "default_spacing")]
    pub layer_spacing: f64,

    /// Preferred edge length (force only)
    /// Default: 250
    #[serde(default = "default_spacing")]
    pub ideal_edge_length: f64,

    /// Edge routing style
    /// Default: polyline
    #[serde(default)]
    pub edge_routing: EdgeRouting,

    /// Iteration budget (force only)
    /// Default: 300
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_spacing() -> f64 {
    250.0
}

fn default_iterations() -> usize {
    300
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Layered,
            direction: Direction::Right,
            node_spacing: default_spacing(),
            layer_spacing: default_spacing(),
            ideal_edge_length: default_spacing(),
            edge_routing: EdgeRouting::Polyline,
            iterations: default_iterations(),
        }
    }
}

impl LayoutOptions {
    /// Layered layout flowing in `direction`
    pub fn layered(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Force-directed layout
    pub fn force() -> Self {
        Self {
            algorithm: Algorithm::Force,
            ..Self::default()
        }
    }

    /// Check that spacings are usable
    pub fn validate(&self) -> Result<(), OracleError> {
        let spacings = [
            ("node_spacing", self.node_spacing),
            ("layer_spacing", self.layer_spacing),
            ("ideal_edge_length", self.ideal_edge_length),
        ];

        for (name, value) in spacings {
            if !value.is_finite() || value <= 0.0 {
                return Err(OracleError::InvalidOptions(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
