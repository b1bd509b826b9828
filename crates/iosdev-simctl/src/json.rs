//! Decoding of `xcrun simctl list --json devices runtimes`.
//!
//! simctl prints a `runtimes` array and a `devices` map keyed by runtime
//! identifier. The snapshot follows the order of the `runtimes` array;
//! device lists for identifiers missing from that array (output of a plain
//! `simctl list --json devices`) get a runtime synthesized from the
//! identifier and are appended in identifier order.

use std::collections::BTreeMap;

use iosdev_devices::{Device, DeviceState, InventoryError, InventorySnapshot, Runtime, RuntimeDevices};
use serde::Deserialize;

const RUNTIME_ID_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";

#[derive(Debug, Deserialize)]
struct SimctlList {
    #[serde(default)]
    runtimes: Option<Vec<SimctlRuntime>>,
    #[serde(default)]
    devices: Option<BTreeMap<String, Vec<SimctlDevice>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimctlRuntime {
    identifier: String,
    name: String,
    version: String,
    #[serde(default = "default_available")]
    is_available: bool,
    #[serde(default)]
    platform: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimctlDevice {
    udid: String,
    name: String,
    state: String,
    #[serde(default = "default_available")]
    is_available: bool,
}

fn default_available() -> bool {
    true
}

impl From<SimctlRuntime> for Runtime {
    fn from(r: SimctlRuntime) -> Self {
        Runtime {
            identifier: r.identifier,
            name: r.name,
            version: r.version,
            is_available: r.is_available,
            platform: r.platform,
        }
    }
}

impl From<SimctlDevice> for Device {
    fn from(d: SimctlDevice) -> Self {
        Device {
            state: DeviceState::from_label(&d.state),
            udid: d.udid,
            name: d.name,
            is_available: d.is_available,
        }
    }
}

/// Decode simctl's JSON output into a snapshot.
pub fn parse_list(bytes: &[u8]) -> Result<InventorySnapshot, InventoryError> {
    let list: SimctlList = serde_json::from_slice(bytes).map_err(|e| InventoryError::Malformed {
        detail: e.to_string(),
    })?;
    if list.runtimes.is_none() && list.devices.is_none() {
        return Err(InventoryError::Malformed {
            detail: "neither `runtimes` nor `devices` present".into(),
        });
    }

    let mut devices = list.devices.unwrap_or_default();
    let mut entries = Vec::new();
    for runtime in list.runtimes.unwrap_or_default() {
        let runtime_devices = devices.remove(&runtime.identifier).unwrap_or_default();
        entries.push(RuntimeDevices {
            runtime: runtime.into(),
            devices: runtime_devices.into_iter().map(Device::from).collect(),
        });
    }
    for (identifier, runtime_devices) in devices {
        let Some(runtime) = runtime_from_identifier(&identifier) else {
            tracing::debug!(%identifier, "skipping devices for unrecognized runtime identifier");
            continue;
        };
        entries.push(RuntimeDevices {
            runtime,
            devices: runtime_devices.into_iter().map(Device::from).collect(),
        });
    }
    Ok(InventorySnapshot::new(entries))
}

/// Build a runtime from an identifier like
/// `com.apple.CoreSimulator.SimRuntime.iOS-18-2`.
pub fn runtime_from_identifier(identifier: &str) -> Option<Runtime> {
    let tail = identifier.strip_prefix(RUNTIME_ID_PREFIX)?;
    let (platform, version) = tail.split_once('-')?;
    if platform.is_empty() || version.is_empty() {
        return None;
    }
    let version = version.replace('-', ".");
    Some(Runtime {
        identifier: identifier.to_string(),
        name: format!("{platform} {version}"),
        version,
        is_available: true,
        platform: Some(platform.to_string()),
    })
}
