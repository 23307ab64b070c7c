//! Command-line interface definitions
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Parser, Subcommand};

/// wpsw - WirePlumber Sink Switcher
///
/// List and switch audio sinks using `wpctl`.
#[derive(Parser)]
#[command(name = "wpsw")]
#[command(version)]
#[command(about = "WirePlumber Sink Switcher - List and switch PipeWire audio sinks")]
#[command(after_help = "\
COMMANDS:
  wpsw                     List audio sinks (same as: wpsw list)
  wpsw list --json         Sinks as display records for launchers and menus
  wpsw set ID              Make sink ID the default output
  wpsw status              Show everything parsed from 'wpctl status'
  wpsw validate            Validate config file

SINK IDS:
  Ids are the numbers wpctl prints before each sink. They are assigned by
  PipeWire and can change when devices are reconnected.

CONFIG:
  $XDG_CONFIG_HOME/wpsw/config.toml (optional)")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// List available audio sinks
    List {
        /// Output display records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Switch the default audio sink
    Set {
        /// Sink id as shown by `wpsw list`
        id: u32,
    },

    /// Show the parsed `wpctl status` report
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Validate config file
    Validate,
}
