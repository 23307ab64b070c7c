//! `wpctl` integration
//!
//! Runs the WirePlumber control tool as a subprocess:
//! - `wpctl status`: the tree-shaped report parsed by [`crate::report`]
//! - `wpctl set-default <id>`: makes a node the default sink
//!
//! Both calls go through [`AudioControl`] so the selector can be driven by a
//! fake in tests. Commands run with [`Command::output`], which waits for the
//! child and drains its pipes on every exit path.

use std::process::{Command, Output};
use tracing::{debug, trace};

use crate::error::Failure;

/// Default command used to reach WirePlumber
pub const DEFAULT_WPCTL_COMMAND: &str = "wpctl";

/// Status query and default-sink control
pub trait AudioControl {
    /// Full standard output of the status report
    ///
    /// # Errors
    /// Returns [`Failure::Query`] if the tool cannot be run, exits non-zero,
    /// or prints something that is not UTF-8.
    fn status_query(&self) -> Result<String, Failure>;

    /// Make the node with this id the default sink
    ///
    /// # Errors
    /// Returns [`Failure::Apply`] with the tool's diagnostic if it cannot be
    /// run or exits non-zero.
    fn set_default(&self, id: u32) -> Result<(), Failure>;
}

/// `wpctl` invoked as a subprocess
///
/// The command is a program followed by leading arguments, so the tool can be
/// reached through a wrapper such as `flatpak-spawn --host wpctl`.
#[derive(Debug, Clone)]
pub struct Wpctl {
    program: String,
    leading_args: Vec<String>,
}

impl Default for Wpctl {
    fn default() -> Self {
        Self {
            program: DEFAULT_WPCTL_COMMAND.to_string(),
            leading_args: Vec::new(),
        }
    }
}

impl Wpctl {
    /// Build from a command vector; an empty vector falls back to `wpctl`
    #[must_use]
    pub fn from_command(command: &[String]) -> Self {
        match command.split_first() {
            Some((program, rest)) if !program.is_empty() => Self {
                program: program.clone(),
                leading_args: rest.to_vec(),
            },
            _ => Self::default(),
        }
    }

    /// Command line as it would be typed, for messages
    #[must_use]
    pub fn display_command(&self, args: &[&str]) -> String {
        let mut parts = Vec::with_capacity(1 + self.leading_args.len() + args.len());
        parts.push(self.program.as_str());
        parts.extend(self.leading_args.iter().map(String::as_str));
        parts.extend_from_slice(args);
        parts.join(" ")
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        trace!("Running: {}", self.display_command(args));
        Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .output()
    }
}

/// Tool diagnostic: stderr, or stdout when stderr is empty
fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if stdout.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stdout.to_string()
    }
}

impl AudioControl for Wpctl {
    fn status_query(&self) -> Result<String, Failure> {
        let command = self.display_command(&["status"]);
        let output = self.run(&["status"]).map_err(|e| Failure::Query {
            detail: format!("'{command}' could not be run: {e}. Is WirePlumber installed?"),
        })?;

        if !output.status.success() {
            return Err(Failure::Query {
                detail: format!("'{command}' failed: {}", diagnostic(&output)),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|e| Failure::Query {
            detail: format!("'{command}' printed invalid UTF-8: {e}"),
        })?;

        trace!("{} returned {} lines", command, text.lines().count());
        Ok(text)
    }

    fn set_default(&self, id: u32) -> Result<(), Failure> {
        let id_arg = id.to_string();
        let args = ["set-default", id_arg.as_str()];
        let command = self.display_command(&args);

        let output = self.run(&args).map_err(|e| Failure::Apply {
            id,
            detail: format!("'{command}' could not be run: {e}"),
        })?;

        if !output.status.success() {
            return Err(Failure::Apply {
                id,
                detail: diagnostic(&output),
            });
        }

        debug!("Set default sink: {}", id);
        Ok(())
    }
}
