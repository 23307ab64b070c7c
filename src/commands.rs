//! CLI commands
//!
//! Each command runs one query/parse cycle or one `set-default` call through
//! an [`AudioControl`] and prints the result.

use color_eyre::eyre::{self, Result};
use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::config::Config;
use crate::notification::{get_sink_icon, send_notification};
use crate::report::{self, Category, ParsedReport};
use crate::selector::{self, Listing};
use crate::style::WpswStyle;
use crate::wpctl::AudioControl;

/// List audio sinks
///
/// With `json_output`, the display records are printed as-is, including the
/// single informational record for an empty or failed listing.
///
/// # Errors
/// Returns an error if the status query fails (human output only) or JSON
/// serialization fails.
pub fn list_sinks(control: &impl AudioControl, json_output: bool) -> Result<()> {
    let listing = Listing::fetch(control);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&listing.records())?);
        return Ok(());
    }

    match listing {
        Listing::Failed(e) => {
            eprintln!("{}", "Error retrieving sinks".error());
            Err(e.into())
        }
        Listing::Empty => {
            println!("{}", "No audio sinks found".warning());
            Ok(())
        }
        Listing::Sinks(report) => {
            println!("{}", "AUDIO SINKS:".header());
            println!("{}", "-".repeat(12));
            for choice in selector::list_sinks(&report) {
                let id = format!("{:>4}.", choice.entry.id);
                let name = choice.entry.display_name();
                if choice.is_current {
                    println!("{} {} {}", "*".success(), id.technical(), name.bold());
                } else {
                    println!("  {} {}", id.technical(), name);
                }
            }
            println!("\n  {} = current default", "*".dim());
            Ok(())
        }
    }
}

/// Switch the default sink to `id`
///
/// The id is checked against a fresh report when one is available. If the
/// report cannot be fetched the switch is still attempted.
///
/// # Errors
/// Returns an error if the id is not a listed sink or `set-default` fails.
pub fn set_sink(config: &Config, control: &impl AudioControl, id: u32) -> Result<()> {
    let label = match control.status_query() {
        Ok(raw) => {
            let report = report::parse(&raw);
            let sinks = selector::list_sinks(&report);
            if sinks.is_empty() {
                warn!("No sinks in status report, trying id {} anyway", id);
                None
            } else {
                let Some(choice) = sinks.iter().find(|c| c.entry.id == id) else {
                    let available: Vec<_> = sinks
                        .iter()
                        .map(|c| format!("{}. '{}'", c.entry.id, c.entry.display_name()))
                        .collect();
                    eyre::bail!(
                        "Unknown sink id {}. Available: {}",
                        id,
                        available.join(", ")
                    );
                };
                if choice.is_current {
                    println!("Already on: {}", choice.entry.display_name().bold());
                    return Ok(());
                }
                Some(choice.entry.display_name().to_string())
            }
        }
        Err(e) => {
            warn!("Could not verify sink {}: {}", id, e);
            None
        }
    };

    let message = selector::select_sink(control, id, label.as_deref())?;
    println!("{}", message.as_str().success());

    if config.settings.notify_switch {
        let body = label.unwrap_or_else(|| format!("Sink {id}"));
        if let Err(e) = send_notification("Audio Output", &body, Some(get_sink_icon(&body))) {
            warn!("Notification failed: {}", e);
        }
    }

    Ok(())
}

/// Print every section and category parsed from `wpctl status`
///
/// # Errors
/// Returns an error if the status query fails or JSON serialization fails.
pub fn status(control: &impl AudioControl, json_output: bool) -> Result<()> {
    let raw = control.status_query()?;
    let report = report::parse(&raw);
    info!("Parsed {} sections", report.sections.len());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", format_report(&report));
    Ok(())
}

fn format_category(out: &mut String, category: &Category) {
    out.push_str(&format!("  {}\n", category.name.as_str().bold()));
    if category.entries.is_empty() && category.values.is_empty() {
        out.push_str(&format!("    {}\n", "(none)".dim()));
    }
    for entry in category.entries.values() {
        let marker = if entry.is_current { "*" } else { " " };
        out.push_str(&format!(
            "  {} {} {}\n",
            marker.success(),
            format!("{:>4}.", entry.id).technical(),
            entry.label
        ));
    }
    for (index, value) in &category.values {
        out.push_str(&format!("    {} {}\n", format!("{index:>4}.").technical(), value));
    }
}

/// Human-readable dump of a parsed report
#[must_use]
pub fn format_report(report: &ParsedReport) -> String {
    let mut out = String::new();
    if report.is_empty() {
        out.push_str(&format!("{}\n", "Nothing recognized in wpctl status output".warning()));
        return out;
    }

    for section in report.sections.values() {
        out.push_str(&format!("{}\n", section.name.as_str().header()));
        for category in section.categories.values() {
            format_category(&mut out, category);
        }
        out.push('\n');
    }

    if !report.unsectioned.is_empty() {
        out.push_str(&format!("{}\n", "(outside any section)".dim()));
        for category in report.unsectioned.values() {
            format_category(&mut out, category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeControl;

    const REPORT: &str = "\
Audio
 ├─ Sinks:
 │  *   50. Built-in Audio Analog Stereo        [vol: 0.40]
 │      51. HDMI / DisplayPort 1 Output         [vol: 1.00]
";

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.settings.notify_switch = false;
        config
    }

    #[test]
    fn test_set_sink_unknown_id_is_rejected() {
        let control = FakeControl::with_status(REPORT);
        let err = set_sink(&quiet_config(), &control, 99).unwrap_err();
        assert!(err.to_string().contains("Unknown sink id 99"));
        assert!(err.to_string().contains("51. 'HDMI / DisplayPort 1 Output'"));
        assert!(control.applied().is_empty());
    }

    #[test]
    fn test_set_sink_current_is_noop() {
        let control = FakeControl::with_status(REPORT);
        set_sink(&quiet_config(), &control, 50).unwrap();
        assert!(control.applied().is_empty());
    }

    #[test]
    fn test_set_sink_switches() {
        let control = FakeControl::with_status(REPORT);
        set_sink(&quiet_config(), &control, 51).unwrap();
        assert_eq!(control.applied(), vec![51]);
    }

    #[test]
    fn test_set_sink_attempts_when_status_unavailable() {
        let control = FakeControl::failing_status("no daemon");
        set_sink(&quiet_config(), &control, 7).unwrap();
        assert_eq!(control.applied(), vec![7]);
    }

    #[test]
    fn test_set_sink_apply_failure_is_error() {
        let control = FakeControl::rejecting_apply("Object '7' not found");
        let err = set_sink(&quiet_config(), &control, 7).unwrap_err();
        assert!(err.to_string().contains("Object '7' not found"));
    }

    #[test]
    fn test_list_sinks_failure_is_error_in_human_mode() {
        let control = FakeControl::failing_status("no daemon");
        assert!(list_sinks(&control, false).is_err());
        assert!(list_sinks(&control, true).is_ok());
    }

    #[test]
    fn test_format_report_lists_categories() {
        let text = format_report(&report::parse(REPORT));
        assert!(text.contains("Audio"));
        assert!(text.contains("Sinks"));
        assert!(text.contains("HDMI / DisplayPort 1 Output"));
    }

    #[test]
    fn test_format_report_empty() {
        let text = format_report(&ParsedReport::default());
        assert!(text.contains("Nothing recognized"));
    }
}
