//! Layered (hierarchical) layout oracle
//!
//! Four phases over the request topology:
//!
//! 1. Cycle breaking: arcs that close a cycle in depth-first order are reversed
//! 2. Layering: longest path from the sources, so every arc points to a later layer
//! 3. Ordering: alternating barycenter sweeps, keeping the order with the fewest crossings
//! 4. Coordinates: layers advance along the flow axis, boxes stack across it and
//!    every layer is centered on the widest one

use crate::topology::Topology;
use crate::{Direction, LayoutOracle, LayoutOptions, LayoutRequest, LayoutResponse, OracleError, PlacedNode};
use tracing::debug;

/// Upper bound on barycenter sweep rounds
const MAX_SWEEPS: usize = 12;

/// In-process hierarchical layout
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredOracle;

impl LayeredOracle {
    /// Create a layered oracle
    pub fn new() -> Self {
        Self
    }
}

impl LayoutOracle for LayeredOracle {
    type Error = OracleError;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        tokio::task::spawn_blocking(move || layered_layout(&request))
            .await
            .map_err(|e| OracleError::Task(e.to_string()))?
    }
}

/// Compute a layered placement synchronously
pub fn layered_layout(request: &LayoutRequest) -> Result<LayoutResponse, OracleError> {
    let options = &request.layout_options;
    options.validate()?;

    let topology = Topology::from_request(request)?;
    if topology.len() == 0 {
        return Ok(LayoutResponse::default());
    }

    let adj = acyclic_successors(&topology);
    let ranks = assign_ranks(&adj);
    let mut layers = build_layers(&ranks);
    let crossings = minimize_crossings(&mut layers, &adj);

    debug!(
        nodes = topology.len(),
        layers = layers.len(),
        crossings,
        "Layered layout computed"
    );

    let positions = assign_coordinates(&layers, &topology.sizes, options);

    Ok(LayoutResponse {
        nodes: topology
            .ids
            .iter()
            .zip(positions)
            .map(|(id, (x, y))| PlacedNode { id: id.clone(), x, y })
            .collect(),
    })
}

// Phase 1: cycle breaking

/// Successor lists with every back arc reversed
fn acyclic_successors(topology: &Topology) -> Vec<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let adj = topology.successors();
    let n = adj.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut result = vec![Vec::new(); n];

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // (node, index of the next successor to visit)
        let mut stack = vec![(root, 0usize)];
        marks[root] = Mark::OnStack;

        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            if let Some(&v) = adj[u].get(next) {
                top.1 += 1;
                match marks[v] {
                    Mark::OnStack => result[v].push(u),
                    Mark::Done => result[u].push(v),
                    Mark::Unvisited => {
                        result[u].push(v);
                        marks[v] = Mark::OnStack;
                        stack.push((v, 0));
                    }
                }
            } else {
                marks[u] = Mark::Done;
                stack.pop();
            }
        }
    }

    for list in &mut result {
        list.sort_unstable();
        list.dedup();
    }
    result
}

// Phase 2: layering

/// Longest-path ranks via Kahn's algorithm on an acyclic graph
fn assign_ranks(adj: &[Vec<usize>]) -> Vec<usize> {
    let n = adj.len();
    let mut in_degree = vec![0usize; n];
    for successors in adj {
        for &v in successors {
            in_degree[v] += 1;
        }
    }

    let mut queue: Vec<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut ranks = vec![0usize; n];

    let mut head = 0;
    while head < queue.len() {
        let u = queue[head];
        head += 1;

        for &v in &adj[u] {
            ranks[v] = ranks[v].max(ranks[u] + 1);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push(v);
            }
        }
    }

    ranks
}

fn build_layers(ranks: &[usize]) -> Vec<Vec<usize>> {
    let max_rank = ranks.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_rank + 1];
    for (v, &rank) in ranks.iter().enumerate() {
        layers[rank].push(v);
    }
    layers
}

// Phase 3: ordering

fn predecessors(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut rev = vec![Vec::new(); adj.len()];
    for (u, successors) in adj.iter().enumerate() {
        for &v in successors {
            rev[v].push(u);
        }
    }
    rev
}

/// Mean position of `neighbors` within `reference`, or `None` if none are there
fn barycenter(reference: &[usize], neighbors: &[usize]) -> Option<f64> {
    let positions: Vec<usize> = neighbors
        .iter()
        .filter_map(|nb| reference.iter().position(|x| x == nb))
        .collect();

    if positions.is_empty() {
        None
    } else {
        Some(positions.iter().sum::<usize>() as f64 / positions.len() as f64)
    }
}

/// Reorder `layer` by barycenter against `reference`; unconnected nodes keep their slot
fn reorder(layer: &mut Vec<usize>, reference: &[usize], neighbors: &[Vec<usize>]) {
    let mut scored: Vec<(usize, f64)> = layer
        .iter()
        .enumerate()
        .map(|(slot, &v)| (v, barycenter(reference, &neighbors[v]).unwrap_or(slot as f64)))
        .collect();

    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    *layer = scored.into_iter().map(|(v, _)| v).collect();
}

fn count_crossings(upper: &[usize], lower: &[usize], adj: &[Vec<usize>]) -> usize {
    let mut arcs: Vec<(usize, usize)> = Vec::new();
    for (i, &u) in upper.iter().enumerate() {
        for &v in &adj[u] {
            if let Some(j) = lower.iter().position(|&x| x == v) {
                arcs.push((i, j));
            }
        }
    }

    let mut crossings = 0;
    for (k, &(a1, b1)) in arcs.iter().enumerate() {
        for &(a2, b2) in &arcs[k + 1..] {
            if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                crossings += 1;
            }
        }
    }
    crossings
}

fn total_crossings(layers: &[Vec<usize>], adj: &[Vec<usize>]) -> usize {
    layers
        .windows(2)
        .map(|pair| count_crossings(&pair[0], &pair[1], adj))
        .sum()
}

/// Alternate forward and backward sweeps until crossings stop improving
fn minimize_crossings(layers: &mut Vec<Vec<usize>>, adj: &[Vec<usize>]) -> usize {
    let mut best = total_crossings(layers, adj);
    if layers.len() <= 1 || best == 0 {
        return best;
    }

    let rev = predecessors(adj);
    let mut best_order = layers.clone();

    for _ in 0..MAX_SWEEPS {
        for r in 1..layers.len() {
            let reference = layers[r - 1].clone();
            reorder(&mut layers[r], &reference, &rev);
        }
        for r in (0..layers.len() - 1).rev() {
            let reference = layers[r + 1].clone();
            reorder(&mut layers[r], &reference, adj);
        }

        let crossings = total_crossings(layers, adj);
        if crossings < best {
            best = crossings;
            best_order = layers.clone();
            if best == 0 {
                break;
            }
        } else {
            break;
        }
    }

    *layers = best_order;
    best
}

// Phase 4: coordinates

/// Top-left corner per node
fn assign_coordinates(
    layers: &[Vec<usize>],
    sizes: &[(f64, f64)],
    options: &LayoutOptions,
) -> Vec<(f64, f64)> {
    // (extent along the flow axis, extent across it)
    let extents = |v: usize| {
        let (width, height) = sizes[v];
        match options.direction {
            Direction::Right => (width, height),
            Direction::Down => (height, width),
        }
    };

    let spans: Vec<f64> = layers
        .iter()
        .map(|layer| {
            let total: f64 = layer.iter().map(|&v| extents(v).1).sum();
            total + options.node_spacing * layer.len().saturating_sub(1) as f64
        })
        .collect();
    let widest = spans.iter().copied().fold(0.0_f64, f64::max);

    let mut positions = vec![(0.0, 0.0); sizes.len()];
    let mut flow = 0.0;

    for (layer, span) in layers.iter().zip(&spans) {
        let depth = layer.iter().map(|&v| extents(v).0).fold(0.0_f64, f64::max);
        let mut across = (widest - span) / 2.0;

        for &v in layer {
            let (along, cross) = extents(v);
            let flow_coord = flow + (depth - along) / 2.0;
            positions[v] = match options.direction {
                Direction::Right => (flow_coord, across),
                Direction::Down => (across, flow_coord),
            };
            across += cross + options.node_spacing;
        }

        flow += depth + options.layer_spacing;
    }

    positions
}
