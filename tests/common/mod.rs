//! Shared fixtures: a fake `wpctl` shell script in a temporary directory
//!
//! The script is run as `sh <script>` rather than executed directly, so no
//! exec permission is needed on the freshly written file.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Status report printed by the fake `wpctl status`
pub const STATUS_REPORT: &str = "\
PipeWire 'pipewire-0' [1.0.5, user@host, cookie:1234]
 └─ Clients:
        33. WirePlumber                         [1.0.5, user@host, pid:1180]

Audio
 ├─ Devices:
 │      42. Built-in Audio                      [alsa]
 │
 ├─ Sinks:
 │  *   50. Built-in Audio Analog Stereo        [vol: 0.40]
 │      51. HDMI / DisplayPort 1 Output         [vol: 1.00]
 │
 ├─ Sources:
 │  *   49. Built-in Audio Analog Stereo        [vol: 1.00]
 │
 └─ Streams:

Settings
 └─ Default Configured Node Names:
         0. Audio/Sink    alsa_output.pci-0000_00_1f.3.analog-stereo
";

/// A temporary directory holding a fake `wpctl`
pub struct FakeWpctl {
    pub dir: TempDir,
    pub script: PathBuf,
}

impl FakeWpctl {
    /// Fake that prints `report` for `status` and accepts only `accepted_id`
    pub fn new(report: &str, accepted_id: u32) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let script = dir.path().join("wpctl.sh");
        let body = format!(
            "case \"$1\" in\n\
             status)\n\
             cat <<'REPORT'\n{report}REPORT\n\
             ;;\n\
             set-default)\n\
             if [ \"$2\" = \"{accepted_id}\" ]; then exit 0; fi\n\
             echo \"Object '$2' not found\" >&2\n\
             exit 1\n\
             ;;\n\
             *) exit 2 ;;\n\
             esac\n"
        );
        fs::write(&script, body).expect("Failed to write fake wpctl");
        Self { dir, script }
    }

    /// Fake whose `status` fails
    pub fn broken() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let script = dir.path().join("wpctl.sh");
        fs::write(&script, "echo 'Could not connect to PipeWire' >&2\nexit 1\n")
            .expect("Failed to write fake wpctl");
        Self { dir, script }
    }

    /// Command vector for `Wpctl::from_command` or the config file
    pub fn command(&self) -> Vec<String> {
        vec!["sh".to_string(), self.script.display().to_string()]
    }

    /// Write `$XDG_CONFIG_HOME/wpsw/config.toml` pointing at this fake
    ///
    /// Returns the directory to use as `XDG_CONFIG_HOME`.
    pub fn write_config(&self) -> PathBuf {
        let config_home = self.dir.path().join("config");
        let config_dir = config_home.join("wpsw");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(
            config_dir.join("config.toml"),
            config_toml(&self.script),
        )
        .expect("Failed to write config");
        config_home
    }
}

fn config_toml(script: &Path) -> String {
    format!(
        "[settings]\nwpctl_command = [\"sh\", \"{}\"]\nnotify_switch = false\nlog_level = \"warn\"\n",
        script.display()
    )
}
