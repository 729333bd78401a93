//! Algorithm selection for the in-process oracles

use crate::{
    Algorithm, ForceOracle, LayeredOracle, LayoutOracle, LayoutRequest, LayoutResponse, OracleError,
};

/// Runs [`LayeredOracle`] or [`ForceOracle`] depending on the request's
/// `algorithm` option
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOracle;

impl BuiltinOracle {
    /// Create a builtin oracle
    pub fn new() -> Self {
        Self
    }
}

impl LayoutOracle for BuiltinOracle {
    type Error = OracleError;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        match request.layout_options.algorithm {
            Algorithm::Layered => LayeredOracle::new().layout(request).await,
            Algorithm::Force => ForceOracle::new().layout(request).await,
        }
    }
}
