mod simulate;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gantry_core::kernel::Result;
use gantry_core::logging::Severity;
use gantry_core::{LogFacadeSink, Manifest, MemorySink};
use log::debug;

/// Gantry: component lifecycle orchestrator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hold back orchestrator warnings and errors; print only their counts
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the construction plan for a manifest without constructing anything
    Plan {
        /// Manifest file (.json, .yaml, .yml or .toml)
        manifest: PathBuf,
    },
    /// Declare the manifest's components and run the full lifecycle
    Run {
        /// Manifest file (.json, .yaml, .yml or .toml)
        manifest: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let outcome = match args.command {
        Some(Commands::Plan { manifest }) => plan(&manifest),
        Some(Commands::Run { manifest }) => run(&manifest, args.quiet).await,
        None => {
            println!("Nothing to do; see `gantry --help`.");
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize env_logger: {}", e);
    }
}

fn load(path: &Path) -> Result<Manifest> {
    let manifest = Manifest::load(path)?;
    debug!(
        "Loaded {} components and {} bundles from {}",
        manifest.components.len(),
        manifest.bundles.len(),
        path.display()
    );
    Ok(manifest)
}

fn plan(path: &Path) -> Result<()> {
    let app = simulate::application(&load(path)?, Arc::new(LogFacadeSink))?;
    let plan = app.plan()?;
    if plan.is_empty() {
        println!("No components declared.");
        return Ok(());
    }
    println!("Construction plan ({} components):", plan.len());
    print!("{}", plan);
    Ok(())
}

async fn run(path: &Path, quiet: bool) -> Result<()> {
    let sink = Arc::new(if quiet { MemorySink::new() } else { MemorySink::forwarding() });
    let outcome = run_lifecycle(path, sink.clone()).await;
    if quiet {
        println!(
            "Summary: {} warnings, {} errors",
            sink.messages(Severity::Warning).len(),
            sink.messages(Severity::Error).len()
        );
    }
    outcome
}

async fn run_lifecycle(path: &Path, sink: Arc<MemorySink>) -> Result<()> {
    let mut app = simulate::application(&load(path)?, sink)?;
    let report = app.run_lifecycle().await?;

    let order: Vec<&str> = report.construction_order.iter().map(|id| id.as_str()).collect();
    println!("Construction order: {}", order.join(", "));
    let started: Vec<&str> = report.started.iter().map(|id| id.as_str()).collect();
    println!("Started: {}", started.join(", "));
    for failure in &report.start_failures {
        println!("Start failed: {}: {}", failure.id, failure.message);
    }
    if !report.bundles.is_empty() {
        println!("Bundles: {}", report.bundles.join(", "));
    }
    Ok(())
}
