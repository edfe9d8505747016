mod cli;
mod client;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 Mutaplex CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let app_config = config::build_config(
        cli.config.as_deref(),
        config::default_config_path(),
        &cli.set_values,
    )?;
    debug!("Effective configuration: {:?}", &app_config);

    let command_result = match cli.command {
        Commands::Parse(args) => {
            info!("Dispatching to 'parse' command.");
            commands::parse::run(args)
        }
        Commands::Resolve(args) => {
            info!("Dispatching to 'resolve' command.");
            commands::resolve::run(args)
        }
        Commands::Custom(args) => {
            info!("Dispatching to 'custom' command.");
            commands::custom::run(args, &app_config).await
        }
        Commands::Saturation(args) => {
            info!("Dispatching to 'saturation' command.");
            commands::saturation::run(args, &app_config).await
        }
        Commands::Scanning(args) => {
            info!("Dispatching to 'scanning' command.");
            commands::scanning::run(args, &app_config).await
        }
        Commands::Oligos(args) => {
            info!("Dispatching to 'oligos' command.");
            commands::oligos::run(args, &app_config).await
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            eprintln!("✅ Command completed successfully.");
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
        }
    }

    command_result
}
