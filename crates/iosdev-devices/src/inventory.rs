//! Simulator inventory model and the source trait.
//!
//! An [`InventorySnapshot`] is the point-in-time list of installed runtimes
//! and their devices. The core never fetches it itself: callers pass a
//! snapshot directly, or an [`InventorySource`] that produces one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::version;

/// Boot state of a simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceState {
    Booted,
    Shutdown,
    /// Transitional states (`Creating`, `Shutting Down`, ...).
    Other,
}

impl DeviceState {
    /// Map the platform's state label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Booted" => DeviceState::Booted,
            "Shutdown" => DeviceState::Shutdown,
            _ => DeviceState::Other,
        }
    }
}

/// An installed OS runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Runtime {
    /// Platform identifier (`com.apple.CoreSimulator.SimRuntime.iOS-18-2`).
    pub identifier: String,
    /// Display name (`iOS 18.2`).
    pub name: String,
    /// Dotted version string (`18.2`).
    pub version: String,
    pub is_available: bool,
    /// Platform name (`iOS`, `watchOS`, ...), when the tool reports it.
    #[serde(default)]
    pub platform: Option<String>,
}

impl Runtime {
    /// The platform name, falling back to the first word of the display name.
    pub fn platform_name(&self) -> &str {
        self.platform
            .as_deref()
            .or_else(|| self.name.split_whitespace().next())
            .unwrap_or("")
    }

    /// Whether iPhone and iPad simulators run on this runtime.
    pub fn is_ios(&self) -> bool {
        self.platform_name().eq_ignore_ascii_case("ios")
    }

    /// The version as a comparable semantic version.
    pub fn parsed_version(&self) -> Option<semver::Version> {
        version::parse_os_version(&self.version)
    }
}

/// A simulated device instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Device {
    pub udid: String,
    pub name: String,
    pub state: DeviceState,
    pub is_available: bool,
}

/// A runtime together with the devices created for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeDevices {
    pub runtime: Runtime,
    pub devices: Vec<Device>,
}

/// Ordered `(runtime, devices)` pairs as enumerated by the platform tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InventorySnapshot {
    pub runtimes: Vec<RuntimeDevices>,
}

impl InventorySnapshot {
    pub fn new(runtimes: Vec<RuntimeDevices>) -> Self {
        Self { runtimes }
    }

    /// Iterate over entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeDevices> {
        self.runtimes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    /// Total number of devices across all runtimes.
    pub fn device_count(&self) -> usize {
        self.runtimes.iter().map(|r| r.devices.len()).sum()
    }
}

/// The inventory could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The simulator-control tool could not be started.
    #[error("failed to run `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure.
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// The tool's output could not be decoded.
    #[error("malformed simulator inventory: {detail}")]
    Malformed { detail: String },

    /// A snapshot file does not exist.
    #[error("inventory snapshot not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// I/O error reading a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can enumerate installed runtimes and devices.
///
/// Implementations block until the snapshot is available. Failures are
/// terminal: callers do not retry or fall back to a partial inventory.
pub trait InventorySource {
    /// Short label for logs (`simctl`, a file path, ...).
    fn describe(&self) -> String;

    /// Take a snapshot of the current inventory.
    fn snapshot(&self) -> Result<InventorySnapshot, InventoryError>;
}

impl InventorySource for InventorySnapshot {
    fn describe(&self) -> String {
        "in-memory snapshot".to_string()
    }

    fn snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(name: &str, version: &str, platform: Option<&str>) -> Runtime {
        Runtime {
            identifier: format!("rt.{name}"),
            name: name.into(),
            version: version.into(),
            is_available: true,
            platform: platform.map(str::to_string),
        }
    }

    #[test]
    fn platform_falls_back_to_display_name() {
        assert!(runtime("iOS 18.2", "18.2", None).is_ios());
        assert!(!runtime("watchOS 11.2", "11.2", None).is_ios());
        assert!(runtime("whatever", "18.2", Some("iOS")).is_ios());
        assert!(!runtime("iOS 18.2", "18.2", Some("tvOS")).is_ios());
    }

    #[test]
    fn state_labels() {
        assert_eq!(DeviceState::from_label("Booted"), DeviceState::Booted);
        assert_eq!(DeviceState::from_label("Shutdown"), DeviceState::Shutdown);
        assert_eq!(DeviceState::from_label("Creating"), DeviceState::Other);
    }

    #[test]
    fn snapshot_is_its_own_source() {
        let snapshot = InventorySnapshot::new(vec![RuntimeDevices {
            runtime: runtime("iOS 18.2", "18.2", Some("iOS")),
            devices: vec![Device {
                udid: "A".into(),
                name: "iPhone 17".into(),
                state: DeviceState::Shutdown,
                is_available: true,
            }],
        }]);
        let taken = snapshot.snapshot().unwrap();
        assert_eq!(taken, snapshot);
        assert_eq!(taken.device_count(), 1);
    }

    #[test]
    fn snapshot_serializes_kebab_case() {
        let snapshot = InventorySnapshot::new(vec![RuntimeDevices {
            runtime: runtime("iOS 18.2", "18.2", Some("iOS")),
            devices: Vec::new(),
        }]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"is-available\":true"));
    }
}
