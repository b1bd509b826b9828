//! Simulator selection.
//!
//! Combines a parsed shorthand (or the default-phone policy) with an
//! inventory snapshot to pick one device and runtime:
//!
//! 1. Parse the shorthand; unrecognized text fails before the inventory is
//!    consulted.
//! 2. Keep available iOS runtimes whose version equals the requested OS, or
//!    the ones sharing the highest version when no OS is requested.
//! 3. Keep available devices on those runtimes whose name satisfies the
//!    pattern structurally.
//! 4. Take the first candidate in inventory order.

use serde::Serialize;
use tracing::debug;

use crate::error::{ResolutionError, Result};
use crate::grammar;
use crate::inventory::{Device, InventorySnapshot, InventorySource, Runtime, RuntimeDevices};
use crate::name;
use crate::pattern::{DeviceFamily, DevicePattern};
use crate::policy;
use crate::version;

/// The resolved device and the runtime it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimulatorSelection {
    pub device: Device,
    pub runtime: Runtime,
}

impl SimulatorSelection {
    /// Destination descriptor for `xcodebuild -destination`.
    pub fn destination(&self) -> String {
        format!("platform=iOS Simulator,id={}", self.device.udid)
    }
}

/// Parse an optional shorthand. `Ok(None)` means the default policy applies.
pub fn parse_request(shorthand: Option<&str>) -> Result<Option<DevicePattern>> {
    match shorthand {
        None => Ok(None),
        Some(input) => grammar::parse(input)
            .map(Some)
            .ok_or_else(|| ResolutionError::InvalidShorthand {
                input: input.to_string(),
                examples: grammar::examples(),
            }),
    }
}

/// Resolve a shorthand (or the default iPhone) against an inventory snapshot.
pub fn resolve(
    shorthand: Option<&str>,
    os_version: Option<&str>,
    inventory: &InventorySnapshot,
) -> Result<SimulatorSelection> {
    let pattern = parse_request(shorthand)?;
    let family = pattern
        .as_ref()
        .map_or(DeviceFamily::Phone, DevicePattern::family);

    let runtimes = candidate_runtimes(inventory, os_version);
    debug!(
        requested = shorthand.unwrap_or("<default>"),
        os = os_version.unwrap_or("<latest>"),
        runtimes = ?runtimes.iter().map(|r| r.runtime.name.as_str()).collect::<Vec<_>>(),
        "selecting simulator"
    );

    let mut candidates = runtimes.iter().flat_map(|entry| {
        entry
            .devices
            .iter()
            .filter(|device| device.is_available && satisfies(pattern.as_ref(), &device.name))
            .map(move |device| (*entry, device))
    });

    match candidates.next() {
        Some((entry, device)) => {
            let others = candidates.count();
            if others > 0 {
                debug!(
                    chosen = %device.name,
                    others,
                    "several simulators match; taking the first in inventory order"
                );
            }
            Ok(SimulatorSelection {
                device: device.clone(),
                runtime: entry.runtime.clone(),
            })
        }
        None => Err(ResolutionError::SimulatorNotFound {
            input: shorthand.map(|s| s.trim().to_string()),
            family,
            os_version: os_version.map(|v| v.trim().to_string()),
            available: available_names(inventory, family),
        }),
    }
}

/// Resolve against a live source. The shorthand is validated before the
/// snapshot is taken; a failed snapshot is returned unchanged.
pub fn resolve_from(
    source: &dyn InventorySource,
    shorthand: Option<&str>,
    os_version: Option<&str>,
) -> Result<SimulatorSelection> {
    parse_request(shorthand)?;
    debug!(source = %source.describe(), "taking inventory snapshot");
    let inventory = source.snapshot()?;
    resolve(shorthand, os_version, &inventory)
}

/// Available device names of `family` across available iOS runtimes,
/// deduplicated, in inventory order.
pub fn available_names(inventory: &InventorySnapshot, family: DeviceFamily) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in inventory
        .iter()
        .filter(|e| e.runtime.is_available && e.runtime.is_ios())
    {
        for device in entry.devices.iter().filter(|d| d.is_available) {
            if DeviceFamily::of_name(&device.name) == Some(family) && !names.contains(&device.name) {
                names.push(device.name.clone());
            }
        }
    }
    names
}

fn satisfies(pattern: Option<&DevicePattern>, device_name: &str) -> bool {
    match pattern {
        Some(pattern) => name::classify(device_name).map_or(false, |d| pattern.matches(&d)),
        None => policy::is_default_phone(device_name),
    }
}

fn candidate_runtimes<'a>(
    inventory: &'a InventorySnapshot,
    os_version: Option<&str>,
) -> Vec<&'a RuntimeDevices> {
    let usable: Vec<&RuntimeDevices> = inventory
        .iter()
        .filter(|e| e.runtime.is_available && e.runtime.is_ios())
        .collect();

    match os_version.map(str::trim) {
        Some(wanted) => usable
            .into_iter()
            .filter(|e| e.runtime.version == wanted)
            .collect(),
        None => {
            let Some(latest) = version::latest(usable.iter().map(|e| e.runtime.version.as_str()))
            else {
                return Vec::new();
            };
            usable
                .into_iter()
                .filter(|e| e.runtime.parsed_version().as_ref() == Some(&latest))
                .collect()
        }
    }
}
