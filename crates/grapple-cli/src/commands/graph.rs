//! Graph command implementation.

use crate::cli::GraphArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use grapple_domain::KnowledgeBase;
use grapple_graph::{derive, DerivedGraph};
use grapple_layout::{BuiltinOracle, LayoutAdapter, LayoutOptions, LayoutOracle, ProcessOracle, WithTimeout};
use std::time::Duration;
use tracing::debug;

/// Execute the graph command.
pub async fn execute_graph(
    args: GraphArgs,
    kb: &KnowledgeBase,
    layout: &LayoutOptions,
    formatter: &Formatter,
) -> Result<()> {
    let graph = build_graph(&args, kb, layout).await?;
    println!("{}", formatter.format_graph(&graph)?);
    Ok(())
}

/// Derive the filtered graph and, unless `--no-layout` is set, lay it out.
///
/// Oracle failures do not surface here: the graph is returned without
/// positions instead. Invalid options and a zero timeout are errors.
pub async fn build_graph(args: &GraphArgs, kb: &KnowledgeBase, layout: &LayoutOptions) -> Result<DerivedGraph> {
    let graph = derive(kb, args.filters());

    if args.no_layout {
        return Ok(graph);
    }

    let options = layout_options(args, layout)?;
    let timeout = match args.timeout() {
        Some(duration) if duration.is_zero() => {
            return Err(CliError::InvalidInput("--timeout-ms must be greater than zero".to_string()));
        }
        other => other,
    };

    let graph = match &args.oracle_command {
        Some(program) => {
            debug!(program = %program, args = ?args.oracle_args, "Using external layout program");
            let oracle = ProcessOracle::new(program).args(&args.oracle_args);
            lay_out(oracle, graph, options, timeout).await
        }
        None => lay_out(BuiltinOracle::new(), graph, options, timeout).await,
    };

    Ok(graph)
}

/// Configured layout options with command-line overrides applied.
pub fn layout_options(args: &GraphArgs, base: &LayoutOptions) -> Result<LayoutOptions> {
    let mut options = base.clone();
    if let Some(algorithm) = args.algorithm {
        options.algorithm = algorithm.into();
    }
    if let Some(direction) = args.direction {
        options.direction = direction.into();
    }
    options.validate()?;
    Ok(options)
}

pub(crate) async fn lay_out<O: LayoutOracle>(
    oracle: O,
    graph: DerivedGraph,
    options: LayoutOptions,
    timeout: Option<Duration>,
) -> DerivedGraph {
    match timeout {
        Some(duration) => LayoutAdapter::new(WithTimeout::new(oracle, duration), options).layout(graph).await,
        None => LayoutAdapter::new(oracle, options).layout(graph).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use grapple_layout::{Algorithm, Direction, MockOracle};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn graph_args(extra: &[&str]) -> GraphArgs {
        let argv = ["grapple", "graph"].iter().chain(extra.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Graph(args) => args,
            other => panic!("Expected Graph command, got {:?}", other),
        }
    }

    fn sample() -> KnowledgeBase {
        grapple_store::sample_knowledge_base().unwrap()
    }

    #[test]
    fn test_layout_options_overrides() {
        let base = LayoutOptions::default();
        let options = layout_options(&graph_args(&["--algorithm", "force", "--direction", "down"]), &base).unwrap();
        assert_eq!(options.algorithm, Algorithm::Force);
        assert_eq!(options.direction, Direction::Down);
        assert_eq!(options.node_spacing, base.node_spacing);

        let untouched = layout_options(&graph_args(&[]), &base).unwrap();
        assert_eq!(untouched, base);
    }

    #[test]
    fn test_invalid_configured_options_rejected() {
        let base = LayoutOptions {
            node_spacing: -1.0,
            ..LayoutOptions::default()
        };
        assert!(matches!(layout_options(&graph_args(&[]), &base), Err(CliError::Layout(_))));
    }

    #[tokio::test]
    async fn test_no_layout_leaves_nodes_unplaced() {
        let graph = build_graph(&graph_args(&["--no-layout"]), &sample(), &LayoutOptions::default())
            .await
            .unwrap();
        assert!(!graph.is_empty());
        assert!(graph.nodes.iter().all(|n| n.position.is_none()));
    }

    #[tokio::test]
    async fn test_builtin_layout_places_every_node() {
        for algorithm in ["layered", "force"] {
            let graph = build_graph(&graph_args(&["--algorithm", algorithm]), &sample(), &LayoutOptions::default())
                .await
                .unwrap();
            assert!(graph.is_positioned(), "{algorithm} left nodes unplaced");
            assert!(graph.nodes.iter().all(|n| n.position.unwrap().is_finite()));
        }
    }

    #[tokio::test]
    async fn test_filters_applied_before_layout() {
        let graph = build_graph(
            &graph_args(&["--technique-type", "submission", "--no-layout"]),
            &sample(),
            &LayoutOptions::default(),
        )
        .await
        .unwrap();
        assert!(graph
            .outcome_edges()
            .all(|e| e.data.technique_type == grapple_domain::TechniqueType::Submission));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let result = build_graph(&graph_args(&["--timeout-ms", "0"]), &sample(), &LayoutOptions::default()).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_missing_oracle_program_falls_back() {
        let args = graph_args(&["--oracle-command", "/nonexistent/grapple-layout-engine"]);
        let graph = build_graph(&args, &sample(), &LayoutOptions::default()).await.unwrap();
        assert!(!graph.is_empty());
        assert!(graph.nodes.iter().all(|n| n.position.is_none()));
    }

    #[tokio::test]
    async fn test_slow_oracle_times_out() {
        let graph = derive(&sample(), Default::default());
        let oracle = MockOracle::grid().with_delay(Duration::from_millis(200));

        let laid_out = lay_out(
            oracle.clone(),
            graph.clone(),
            LayoutOptions::default(),
            Some(Duration::from_millis(10)),
        )
        .await;

        assert_eq!(laid_out, graph);
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_lay_out_without_timeout() {
        let graph = derive(&sample(), Default::default());
        let laid_out = lay_out(MockOracle::grid(), graph, LayoutOptions::default(), None).await;
        assert!(laid_out.is_positioned());
    }

    #[test]
    fn test_derivation_summary_logged_once() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime
                .block_on(build_graph(&graph_args(&["--no-layout"]), &sample(), &LayoutOptions::default()))
                .unwrap();
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("Derived graph").count(), 1, "{logs}");
    }
}
