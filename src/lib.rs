//! `wpsw` - WirePlumber Sink Switcher
//!
//! Lists and switches `PipeWire` audio sinks by parsing the tree printed by
//! `wpctl status` and calling `wpctl set-default`.
//!
//! # Features
//! - Tolerant parser for the `wpctl status` report (sections, categories, entries)
//! - Current-sink detection from the `*` marker
//! - Display records as JSON for launchers and menus
//! - Desktop notification after a switch

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notification;
pub mod report;
pub mod selector;
pub mod style;
pub mod wpctl;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types for convenience
pub use cli::Args;
pub use config::Config;
pub use error::Failure;
pub use report::{ParsedReport, parse};
pub use selector::{DisplayRecord, Listing, SinkPayload, list_sinks, select_sink};
pub use wpctl::{AudioControl, Wpctl};
