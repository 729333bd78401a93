//! GrappleGraph CLI - explore a BJJ position and technique graph.

use clap::Parser;
use grapple_cli::commands;
use grapple_cli::{knowledge, Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for JSON and DOT output.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> grapple_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let kb = knowledge::load(cli.knowledge_base.as_deref(), &config)?;

    match cli.command {
        Command::Graph(args) => commands::execute_graph(args, &kb, &config.layout, &formatter).await?,
        Command::Stats => commands::execute_stats(&kb, &formatter)?,
    }

    Ok(())
}
