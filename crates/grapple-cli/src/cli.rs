//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use grapple_domain::{Applicability, Difficulty, GraphFilters, Selector, TechniqueType};
use grapple_layout::{Algorithm, Direction};
use std::path::PathBuf;
use std::time::Duration;

/// GrappleGraph - Explore a BJJ position and technique graph.
#[derive(Debug, Parser)]
#[command(name = "grapple")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Knowledge base file (.json or .toml); defaults to the bundled sample
    #[arg(short, long, global = true, env = "GRAPPLE_KNOWLEDGE_BASE")]
    pub knowledge_base: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Graphviz DOT
    Dot,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive, lay out and print the position graph
    Graph(GraphArgs),

    /// Summarize the knowledge base
    Stats,
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// Technique type filter (e.g. submission, guard-pass, all)
    #[arg(short, long, default_value = "all")]
    pub technique_type: Selector<TechniqueType>,

    /// Difficulty filter (beginner, intermediate, advanced, all)
    #[arg(short, long, default_value = "all")]
    pub difficulty: Selector<Difficulty>,

    /// Applicability filter (gi, no-gi, both, all)
    #[arg(short, long, default_value = "all")]
    pub applicability: Selector<Applicability>,

    /// Leave variant positions out
    #[arg(long)]
    pub hide_variants: bool,

    /// Layout algorithm (overrides config)
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Layout direction (overrides config)
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Skip layout; nodes have no position
    #[arg(long, conflicts_with_all = ["oracle_command", "timeout_ms"])]
    pub no_layout: bool,

    /// External layout program reading the request JSON on stdin
    #[arg(long)]
    pub oracle_command: Option<String>,

    /// Argument passed to the layout program (repeatable)
    #[arg(long = "oracle-arg", requires = "oracle_command", allow_hyphen_values = true)]
    pub oracle_args: Vec<String>,

    /// Give up on layout after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl GraphArgs {
    /// Filters for graph derivation.
    pub fn filters(&self) -> GraphFilters {
        GraphFilters {
            technique_type: self.technique_type,
            difficulty: self.difficulty,
            applicability: self.applicability,
            show_variants: !self.hide_variants,
        }
    }

    /// Layout deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Layout algorithm argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AlgorithmArg {
    /// Hierarchical layers following edge direction
    Layered,
    /// Force-directed placement
    Force,
}

/// Layout direction argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DirectionArg {
    /// Layers flow left to right
    Right,
    /// Layers flow top to bottom
    Down,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Dot => crate::config::OutputFormat::Dot,
        }
    }
}

impl From<AlgorithmArg> for Algorithm {
    fn from(algorithm: AlgorithmArg) -> Self {
        match algorithm {
            AlgorithmArg::Layered => Algorithm::Layered,
            AlgorithmArg::Force => Algorithm::Force,
        }
    }
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Right => Direction::Right,
            DirectionArg::Down => Direction::Down,
        }
    }
}
