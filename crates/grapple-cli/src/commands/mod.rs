//! Command implementations.

pub mod graph;
pub mod stats;

pub use self::graph::{build_graph, execute_graph, layout_options};
pub use self::stats::{execute_stats, StatsReport};
