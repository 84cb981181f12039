use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dispatch_cli::config::AppConfig;
use dispatch_cli::error::CliError;
use dispatch_cli::render::OutputFormat;
use dispatch_cli::session::Session;
use dispatch_core::config::NetworkConfig;
use dispatch_core::fleet_store::load_fleet;
use dispatch_core::DispatchEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dispatch", version, about = "Cab dispatch over a weighted road network")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fleet file, overriding the configured one
    #[arg(long, env = "DISPATCH_FLEET_FILE")]
    fleet_file: Option<PathBuf>,

    /// Use a fully connected network of this many nodes instead of the configured one
    #[arg(long)]
    nodes: Option<u32>,

    /// Keep the fleet in memory only
    #[arg(long)]
    no_save: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with command output; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(fleet_file) = cli.fleet_file {
        config.fleet_file = fleet_file;
    }
    if let Some(nodes) = cli.nodes {
        config.network = NetworkConfig::Linear { nodes };
    }

    let network = config.network.build();
    let fleet = load_fleet(&config.fleet_file)?;
    info!(
        nodes = network.node_count(),
        roads = network.road_count(),
        cabs = fleet.len(),
        "starting dispatch session"
    );

    // Rides are not persisted, so every stored cab starts out free.
    let mut engine = DispatchEngine::with_fleet(network, fleet, config.dispatch);
    engine.reset_availability();

    let fleet_file = (!cli.no_save).then_some(config.fleet_file);
    let mut session = Session::new(engine, fleet_file, cli.format);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    session.persist(&mut stdout)?;
    session.run(stdin.lock(), &mut stdout, interactive)?;
    Ok(())
}
