//! wpsw binary entry point
//!
//! Loads config, sets up logging, and dispatches subcommands.

use clap::Parser;
use color_eyre::eyre::Result;
use wpsw::{cli::Args, cli::Command, commands, config::Config};

/// Initialize logging to stderr
///
/// `RUST_LOG` wins over the configured level so a single run can be traced
/// without editing the config.
fn init_logging(log_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("wpsw={log_level}"))),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let config = Config::load()?;
    init_logging(&config.settings.log_level);
    let wpctl = config.wpctl();

    match args.command {
        None => commands::list_sinks(&wpctl, false),
        Some(Command::List { json }) => commands::list_sinks(&wpctl, json),
        Some(Command::Set { id }) => commands::set_sink(&config, &wpctl, id),
        Some(Command::Status { json }) => commands::status(&wpctl, json),
        Some(Command::Validate) => {
            config.print_summary();
            Ok(())
        }
    }
}
