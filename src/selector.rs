//! Sink selection
//!
//! Reads the `Audio` → `Sinks` category of a parsed report, dispatches
//! `set-default` requests, and turns both into [`DisplayRecord`]s for a host
//! launcher or the CLI. Every call is one-shot: the report is re-queried and
//! re-parsed each time, nothing is cached.

use serde::Serialize;
use tracing::{error, info};

use crate::error::Failure;
use crate::report::{self, Entry, ParsedReport};
use crate::wpctl::AudioControl;

// ============================================================================
// Sink Listing
// ============================================================================

/// One selectable sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkChoice<'a> {
    pub entry: &'a Entry,
    pub is_current: bool,
}

/// Sinks in the report, in ascending id order
///
/// A report without `Audio` → `Sinks`, or with an empty category, yields an
/// empty list.
#[must_use]
pub fn list_sinks(report: &ParsedReport) -> Vec<SinkChoice<'_>> {
    let Some(sinks) = report.sinks() else {
        return Vec::new();
    };

    sinks
        .entries
        .values()
        .map(|entry| SinkChoice {
            entry,
            is_current: sinks.current_id == Some(entry.id),
        })
        .collect()
}

/// Outcome of one listing request
#[derive(Debug)]
pub enum Listing {
    /// At least one sink was found
    Sinks(ParsedReport),
    /// The tool ran but reported no sinks
    Empty,
    /// The status query failed
    Failed(Failure),
}

impl Listing {
    /// Query the tool and parse its report
    pub fn fetch(control: &impl AudioControl) -> Self {
        match control.status_query() {
            Ok(raw) => {
                let report = report::parse(&raw);
                if list_sinks(&report).is_empty() {
                    info!("No audio sinks in status report");
                    Self::Empty
                } else {
                    Self::Sinks(report)
                }
            }
            Err(e) => {
                error!("Error retrieving sinks: {}", e);
                Self::Failed(e)
            }
        }
    }

    /// Display records for this listing
    #[must_use]
    pub fn records(&self) -> Vec<DisplayRecord> {
        match self {
            Self::Sinks(report) => list_sinks(report)
                .into_iter()
                .map(DisplayRecord::for_sink)
                .collect(),
            Self::Empty => vec![DisplayRecord::info(
                "No audio sinks found",
                "No sinks available to switch",
            )],
            Self::Failed(e) => vec![DisplayRecord::info("Error retrieving sinks", e.to_string())],
        }
    }
}

// ============================================================================
// Sink Selection
// ============================================================================

/// Confirmation text for a successful switch
#[must_use]
pub fn switched_message(id: u32, label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => format!("Switched to {id} → {label}"),
        _ => format!("Switched to {id}"),
    }
}

/// Make `id` the default sink
///
/// `label` is only used in the confirmation message.
///
/// # Errors
/// Returns [`Failure::Apply`] if the tool cannot be run or rejects the id.
pub fn select_sink(
    control: &impl AudioControl,
    id: u32,
    label: Option<&str>,
) -> Result<String, Failure> {
    control.set_default(id)?;
    let message = switched_message(id, label);
    info!("{}", message);
    Ok(message)
}

// ============================================================================
// Display Records
// ============================================================================

/// What a host needs to switch to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkPayload {
    pub id: u32,
    pub label: String,
}

/// One row shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub label: String,
    pub description: String,
    /// Absent for informational rows
    pub payload: Option<SinkPayload>,
}

impl DisplayRecord {
    fn info(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            payload: None,
        }
    }

    fn for_sink(choice: SinkChoice<'_>) -> Self {
        let marker = if choice.is_current { "* " } else { "  " };
        Self {
            label: format!("{marker}{} → {}", choice.entry.id, choice.entry.label),
            description: "Switch to this audio sink".to_string(),
            payload: Some(SinkPayload {
                id: choice.entry.id,
                label: choice.entry.label.clone(),
            }),
        }
    }

    /// Switch to the sink in `payload` and summarize the outcome
    pub fn for_selection(control: &impl AudioControl, payload: &SinkPayload) -> Self {
        match select_sink(control, payload.id, Some(&payload.label)) {
            Ok(message) => Self::info(message, "Audio sink changed successfully"),
            Err(e) => {
                error!("Failed to switch sink: {}", e);
                Self::info("Failed to switch sink", e.to_string())
            }
        }
    }

    /// True if selecting this record switches sinks
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.payload.is_some()
    }
}
