//! Desktop notifications
//!
//! Sends notifications via notify-rust, with icons chosen from the sink
//! label using `FreeDesktop` standard icon names.

use color_eyre::eyre::{Context, Result};
use notify_rust::Notification;

/// Send a desktop notification
///
/// # Errors
/// Returns an error if the notification cannot be sent (e.g., no notification daemon running).
pub fn send_notification(summary: &str, body: &str, icon: Option<&str>) -> Result<()> {
    let icon = icon.unwrap_or("audio-card");

    Notification::new()
        .summary(summary)
        .body(body)
        .appname("wpsw")
        .icon(icon)
        .timeout(3000)
        .show()
        .context("Failed to show notification")?;

    Ok(())
}

/// Pick a `FreeDesktop` icon name from a sink label
#[must_use]
pub fn get_sink_icon(label: &str) -> &'static str {
    let label = label.to_lowercase();

    if label.contains("hdmi")
        || label.contains("displayport")
        || label.contains("display")
        || label.split_whitespace().any(|w| w == "tv")
    {
        "video-display"
    } else if label.contains("headphone")
        || label.contains("headset")
        || label.contains("bluetooth")
        || label.contains("bluez")
    {
        "audio-headphones"
    } else {
        // Speakers, optical, digital, etc.
        "audio-speakers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("HDMI / DisplayPort 1 Output", "video-display" ; "hdmi")]
    #[test_case("Living Room TV", "video-display" ; "tv word")]
    #[test_case("USB Headset Analog Stereo", "audio-headphones" ; "headset")]
    #[test_case("WH-1000XM4 (bluez_output)", "audio-headphones" ; "bluez")]
    #[test_case("Built-in Audio Analog Stereo", "audio-speakers" ; "analog")]
    #[test_case("Optical Out", "audio-speakers" ; "optical")]
    fn test_get_sink_icon(label: &str, expected: &str) {
        assert_eq!(get_sink_icon(label), expected);
    }
}
