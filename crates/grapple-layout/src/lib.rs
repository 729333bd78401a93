//! Grapple Layout Layer
//!
//! Assigns 2D coordinates to a [`DerivedGraph`](grapple_graph::DerivedGraph)
//! through a pluggable [`LayoutOracle`].
//!
//! # Architecture
//!
//! [`LayoutAdapter`] turns the graph into a request of sized boxes and arcs,
//! awaits one oracle call and maps placements back onto the nodes. Oracle
//! failures are logged and the graph is returned unchanged, so layout can
//! degrade but never break the pipeline.
//!
//! # Oracles
//!
//! - [`BuiltinOracle`]: picks layered or force from the request options
//! - [`LayeredOracle`]: hierarchical layers following edge direction
//! - [`ForceOracle`]: force-directed placement
//! - [`ProcessOracle`]: an external program speaking JSON on stdin/stdout
//! - [`WithTimeout`]: deadline wrapper for any oracle
//! - [`MockOracle`]: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use grapple_layout::{LayoutOracle, LayoutOptions, LayoutRequest, MockOracle, OracleNode};
//!
//! # tokio_test::block_on(async {
//! let oracle = MockOracle::with_placements([("standing", 0.0, 0.0)]);
//! let request = LayoutRequest {
//!     nodes: vec![OracleNode { id: "standing".to_string(), width: 180.0, height: 60.0 }],
//!     edges: vec![],
//!     layout_options: LayoutOptions::default(),
//! };
//!
//! let response = oracle.layout(request).await.unwrap();
//! assert_eq!(response.nodes[0].id, "standing");
//! # });
//! ```

#![warn(missing_docs)]

pub mod adapter;
pub mod builtin;
pub mod error;
pub mod force;
pub mod layered;
pub mod mock;
pub mod options;
pub mod oracle;
pub mod process;
pub mod timeout;

mod topology;

pub use adapter::{build_request, LayoutAdapter};
pub use builtin::BuiltinOracle;
pub use error::{OracleError, TimeoutError};
pub use force::ForceOracle;
pub use layered::LayeredOracle;
pub use mock::MockOracle;
pub use options::{Algorithm, Direction, EdgeRouting, LayoutOptions};
pub use oracle::{
    LayoutOracle, LayoutRequest, LayoutResponse, OracleEdge, OracleNode, PlacedNode, SizeClass,
};
pub use process::ProcessOracle;
pub use timeout::WithTimeout;
