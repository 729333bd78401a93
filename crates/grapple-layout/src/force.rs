//! Force-directed layout oracle
//!
//! Nodes start on a circle with a small per-id jitter, then repel each other,
//! are pulled together along edges and pushed apart when their boxes come too
//! close. Movement per step is capped by a temperature that cools every
//! iteration. The result is shifted so the smallest box corner sits at the
//! origin.

use crate::topology::Topology;
use crate::{LayoutOracle, LayoutRequest, LayoutResponse, OracleError, PlacedNode};
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use tracing::debug;

/// In-process force-directed layout
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceOracle;

impl ForceOracle {
    /// Create a force-directed oracle
    pub fn new() -> Self {
        Self
    }
}

impl LayoutOracle for ForceOracle {
    type Error = OracleError;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        tokio::task::spawn_blocking(move || force_layout(&request))
            .await
            .map_err(|e| OracleError::Task(e.to_string()))?
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

/// Two values in [-1, 1] derived from `id`, stable for a given build
fn stable_pair(id: &str) -> (f64, f64) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = (hash & 0xffff_ffff) as f64 / u32::MAX as f64;
    let y = ((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64;
    (x * 2.0 - 1.0, y * 2.0 - 1.0)
}

/// Compute a force-directed placement synchronously
pub fn force_layout(request: &LayoutRequest) -> Result<LayoutResponse, OracleError> {
    let options = &request.layout_options;
    options.validate()?;

    let topology = Topology::from_request(request)?;
    let n = topology.len();
    if n == 0 {
        return Ok(LayoutResponse::default());
    }

    // Half the longer box side stands in for the box footprint
    let radii: Vec<f64> = topology.sizes.iter().map(|&(w, h)| w.max(h) / 2.0).collect();
    let k = options.ideal_edge_length;

    let base_radius = (n as f64).sqrt() * k;
    let mut positions: Vec<Vec2> = topology
        .ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let angle = index as f64 / n as f64 * TAU;
            let (jx, jy) = stable_pair(id);
            Vec2::new(angle.cos(), angle.sin()) * base_radius + Vec2::new(jx, jy) * (k * 0.4)
        })
        .collect();

    let mut temperature = k * 2.0;
    let mut steps = 0;

    if n > 1 {
        for _ in 0..options.iterations {
            let mut disp = vec![Vec2::ZERO; n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = positions[i] - positions[j];
                    let distance = delta.length().max(0.5);
                    let direction = delta / distance;

                    let force = k * k / distance;
                    disp[i] += direction * force;
                    disp[j] -= direction * force;

                    let min_distance = radii[i] + radii[j] + options.node_spacing;
                    if distance < min_distance {
                        let overlap_push = (min_distance - distance) * 0.5;
                        disp[i] += direction * overlap_push;
                        disp[j] -= direction * overlap_push;
                    }
                }
            }

            for &(from, to) in &topology.arcs {
                let delta = positions[from] - positions[to];
                let distance = delta.length().max(0.5);
                let direction = delta / distance;

                let ideal_length = k + radii[from] + radii[to];
                let force = (distance - ideal_length) * 0.18;
                disp[from] -= direction * force;
                disp[to] += direction * force;
            }

            for (d, p) in disp.iter_mut().zip(&positions) {
                *d -= *p * 0.0012;
            }

            for (p, d) in positions.iter_mut().zip(&disp) {
                let length = d.length();
                if length > 0.0 {
                    *p += *d / length * length.min(temperature);
                }
            }

            steps += 1;
            temperature *= 0.965;
            if temperature < 0.5 {
                break;
            }
        }
    }

    debug!(nodes = n, arcs = topology.arcs.len(), steps, "Force layout computed");

    // Centers to top-left corners, then shift the smallest corner to the origin
    let corners: Vec<Vec2> = positions
        .iter()
        .zip(&topology.sizes)
        .map(|(p, &(w, h))| Vec2::new(p.x - w / 2.0, p.y - h / 2.0))
        .collect();
    let min_x = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let min_y = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);

    Ok(LayoutResponse {
        nodes: topology
            .ids
            .iter()
            .zip(corners)
            .map(|(id, c)| PlacedNode {
                id: id.clone(),
                x: c.x - min_x,
                y: c.y - min_y,
            })
            .collect(),
    })
}
