//! Deadline wrapper for any oracle

use crate::{LayoutOracle, LayoutRequest, LayoutResponse, TimeoutError};
use std::time::Duration;

/// An oracle that gives up after a fixed duration
///
/// Wrapping keeps the oracle contract, so the adapter treats an elapsed
/// deadline like any other oracle failure.
#[derive(Debug, Clone)]
pub struct WithTimeout<O> {
    inner: O,
    duration: Duration,
}

impl<O> WithTimeout<O> {
    /// Wrap `inner` with a deadline of `duration`
    pub fn new(inner: O, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// The configured deadline
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The wrapped oracle
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: LayoutOracle> LayoutOracle for WithTimeout<O> {
    type Error = TimeoutError<O::Error>;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        match tokio::time::timeout(self.duration, self.inner.layout(request)).await {
            Ok(result) => result.map_err(TimeoutError::Oracle),
            Err(_) => Err(TimeoutError::Elapsed(self.duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutOptions, MockOracle, OracleError};

    fn request() -> LayoutRequest {
        LayoutRequest {
            nodes: vec![],
            edges: vec![],
            layout_options: LayoutOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_passes_through_fast_oracle() {
        let oracle = WithTimeout::new(MockOracle::grid(), Duration::from_secs(5));
        assert!(oracle.layout(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_elapsed() {
        let slow = MockOracle::grid().with_delay(Duration::from_secs(60));
        let oracle = WithTimeout::new(slow, Duration::from_millis(100));

        match oracle.layout(request()).await {
            Err(TimeoutError::Elapsed(d)) => assert_eq!(d, Duration::from_millis(100)),
            other => panic!("expected Elapsed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inner_error_is_wrapped() {
        let oracle = WithTimeout::new(MockOracle::failing("nope"), Duration::from_secs(5));
        let err = oracle.layout(request()).await.unwrap_err();
        assert!(matches!(err, TimeoutError::Oracle(OracleError::Mock(_))));
        assert_eq!(err.to_string(), "Mock oracle failure: nope");
    }
}
