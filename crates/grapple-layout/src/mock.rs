//! Deterministic oracle for tests

use crate::{LayoutOracle, LayoutRequest, LayoutResponse, OracleError, PlacedNode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Fixed(HashMap<String, (f64, f64)>),
    Grid,
    Fail(String),
}

/// Mock layout oracle for deterministic testing
///
/// Returns preconfigured placements without running any algorithm, and
/// records how often it was called and with what.
///
/// # Examples
///
/// ```
/// use grapple_layout::MockOracle;
///
/// // Only "mount-top" gets a placement; everything else is left out
/// let oracle = MockOracle::with_placements([("mount-top", 10.0, 20.0)]);
/// assert_eq!(oracle.call_count(), 0);
///
/// // Every requested node on a grid
/// let grid = MockOracle::grid();
///
/// // Always fails
/// let broken = MockOracle::failing("engine crashed");
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    behavior: Behavior,
    delay: Option<Duration>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<LayoutRequest>>>,
}

/// Grid cell size used by [`MockOracle::grid`]
pub const GRID_SPACING: f64 = 250.0;

impl MockOracle {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Answer with exactly these placements, whatever the request contains
    pub fn with_placements<I, S>(placements: I) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        Self::new(Behavior::Fixed(
            placements
                .into_iter()
                .map(|(id, x, y)| (id.into(), (x, y)))
                .collect(),
        ))
    }

    /// Place every requested node on a square grid in request order
    pub fn grid() -> Self {
        Self::new(Behavior::Grid)
    }

    /// Fail every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Behavior::Fail(message.into()))
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times layout was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<LayoutRequest> {
        lock(&self.last_request).clone()
    }

    fn respond(&self, request: &LayoutRequest) -> Result<LayoutResponse, OracleError> {
        let nodes = match &self.behavior {
            Behavior::Fail(message) => return Err(OracleError::Mock(message.clone())),
            Behavior::Fixed(placements) => {
                let mut nodes: Vec<PlacedNode> = placements
                    .iter()
                    .map(|(id, &(x, y))| PlacedNode { id: id.clone(), x, y })
                    .collect();
                nodes.sort_by(|a, b| a.id.cmp(&b.id));
                nodes
            }
            Behavior::Grid => {
                let columns = (request.nodes.len() as f64).sqrt().ceil().max(1.0) as usize;
                request
                    .nodes
                    .iter()
                    .enumerate()
                    .map(|(i, node)| PlacedNode {
                        id: node.id.clone(),
                        x: (i % columns) as f64 * GRID_SPACING,
                        y: (i / columns) as f64 * GRID_SPACING,
                    })
                    .collect()
            }
        };

        Ok(LayoutResponse { nodes })
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::grid()
    }
}

/// Lock ignoring poisoning; a panicking test thread must not hide the counters
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl LayoutOracle for MockOracle {
    type Error = OracleError;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        *lock(&self.call_count) += 1;
        let response = self.respond(&request);
        *lock(&self.last_request) = Some(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutOptions, OracleNode};

    fn request(ids: &[&str]) -> LayoutRequest {
        LayoutRequest {
            nodes: ids
                .iter()
                .map(|id| OracleNode {
                    id: id.to_string(),
                    width: 180.0,
                    height: 60.0,
                })
                .collect(),
            edges: vec![],
            layout_options: LayoutOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_fixed_placements() {
        let oracle = MockOracle::with_placements([("b", 1.0, 2.0), ("a", 3.0, 4.0)]);
        let response = oracle.layout(request(&["a"])).await.unwrap();

        assert_eq!(
            response.nodes,
            vec![
                PlacedNode { id: "a".to_string(), x: 3.0, y: 4.0 },
                PlacedNode { id: "b".to_string(), x: 1.0, y: 2.0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_grid() {
        let oracle = MockOracle::grid();
        let response = oracle.layout(request(&["a", "b", "c", "d", "e"])).await.unwrap();

        let coords: Vec<_> = response.nodes.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(
            coords,
            vec![(0.0, 0.0), (250.0, 0.0), (500.0, 0.0), (0.0, 250.0), (250.0, 250.0)]
        );
    }

    #[tokio::test]
    async fn test_failing() {
        let oracle = MockOracle::failing("boom");
        let result = oracle.layout(request(&["a"])).await;
        assert!(matches!(result, Err(OracleError::Mock(ref m)) if m == "boom"));
    }

    #[tokio::test]
    async fn test_call_count_and_last_request() {
        let oracle = MockOracle::grid();
        let shared = oracle.clone();

        assert_eq!(oracle.call_count(), 0);
        assert!(oracle.last_request().is_none());

        oracle.layout(request(&["a"])).await.unwrap();
        oracle.layout(request(&["a", "b"])).await.unwrap();

        // Clones share counters
        assert_eq!(shared.call_count(), 2);
        assert_eq!(shared.last_request().map(|r| r.nodes.len()), Some(2));

        shared.reset_call_count();
        assert_eq!(oracle.call_count(), 0);
    }
}
