//! `iosdev sim` — simulator resolution, listing, and shorthand derivation.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Result};
use iosdev_devices::{
    derive_shorthand, grammar, resolve_from, DeviceFamily, DeviceState, InventorySnapshot,
    InventorySource, SimulatorSelection,
};
use iosdev_simctl::{Simctl, SnapshotFile};
use serde::Serialize;
use tracing::info;

use crate::manifest::{effective_simulator, IosdevManifest};

/// Pick the inventory source: a saved snapshot when given, else live simctl.
pub fn inventory_source(snapshot: Option<&Path>) -> Box<dyn InventorySource> {
    match snapshot {
        Some(path) => Box::new(SnapshotFile::new(path)),
        None => Box::new(Simctl::default()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SelectionReport<'a> {
    #[serde(flatten)]
    selection: &'a SimulatorSelection,
    shorthand: Option<String>,
    destination: String,
}

/// Resolve the simulator for the given flags and configuration.
pub fn select(
    source: &dyn InventorySource,
    manifest: Option<&IosdevManifest>,
    sim: Option<&str>,
    os: Option<&str>,
) -> Result<SimulatorSelection> {
    let (sim, os) = effective_simulator(manifest, sim, os);
    let selection = resolve_from(source, sim, os)?;
    info!(
        device = %selection.device.name,
        runtime = %selection.runtime.name,
        "resolved simulator"
    );
    Ok(selection)
}

/// `iosdev sim resolve`
pub fn resolve(
    source: &dyn InventorySource,
    manifest: Option<&IosdevManifest>,
    sim: Option<&str>,
    os: Option<&str>,
    json: bool,
) -> Result<()> {
    let selection = select(source, manifest, sim, os)?;
    if json {
        println!("{}", selection_json(&selection)?);
    } else {
        print!("{}", format_selection(&selection));
    }
    Ok(())
}

/// `iosdev sim destination`
pub fn destination(
    source: &dyn InventorySource,
    manifest: Option<&IosdevManifest>,
    sim: Option<&str>,
    os: Option<&str>,
) -> Result<()> {
    let selection = select(source, manifest, sim, os)?;
    println!("{}", selection.destination());
    Ok(())
}

/// `iosdev sim list`
pub fn list(source: &dyn InventorySource, family: Option<&str>) -> Result<()> {
    let family = family.map(parse_family).transpose()?;
    let snapshot = source.snapshot()?;
    print!("{}", format_listing(&snapshot, family));
    Ok(())
}

/// `iosdev sim derive`
pub fn derive(names: &[String]) -> Result<()> {
    for name in names {
        let shorthand = derive_shorthand(name);
        println!("{:<40} {}", name, shorthand.as_deref().unwrap_or("(unsupported)"));
    }
    Ok(())
}

/// `iosdev sim shorthands`
pub fn shorthands() -> Result<()> {
    print!("{}", format_rules());
    Ok(())
}

pub(crate) fn parse_family(s: &str) -> Result<DeviceFamily> {
    match s.to_ascii_lowercase().as_str() {
        "phone" | "iphone" => Ok(DeviceFamily::Phone),
        "pad" | "ipad" => Ok(DeviceFamily::Pad),
        other => bail!("unknown device family '{other}' (expected phone or ipad)"),
    }
}

pub(crate) fn selection_json(selection: &SimulatorSelection) -> Result<String> {
    let report = SelectionReport {
        selection,
        shorthand: derive_shorthand(&selection.device.name),
        destination: selection.destination(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub(crate) fn format_selection(selection: &SimulatorSelection) -> String {
    let device = &selection.device;
    let runtime = &selection.runtime;
    let mut out = String::new();
    let _ = writeln!(out, "Device:      {} ({})", device.name, state_label(device.state));
    let _ = writeln!(out, "UDID:        {}", device.udid);
    if let Some(shorthand) = derive_shorthand(&device.name) {
        let _ = writeln!(out, "Shorthand:   {shorthand}");
    }
    let _ = writeln!(out, "Runtime:     {} ({})", runtime.name, runtime.identifier);
    let _ = writeln!(out, "Destination: {}", selection.destination());
    out
}

pub(crate) fn format_listing(snapshot: &InventorySnapshot, family: Option<DeviceFamily>) -> String {
    let mut out = String::new();
    if snapshot.is_empty() {
        out.push_str("No simulator runtimes installed.\n");
        return out;
    }
    for entry in snapshot.iter() {
        let runtime = &entry.runtime;
        let devices: Vec<_> = entry
            .devices
            .iter()
            .filter(|d| family.map_or(true, |f| DeviceFamily::of_name(&d.name) == Some(f)))
            .collect();
        if family.is_some() && devices.is_empty() {
            continue;
        }
        let marker = if runtime.is_available { "" } else { " (unavailable)" };
        let _ = writeln!(out, "{}{marker}", runtime.name);
        for device in devices {
            let shorthand = derive_shorthand(&device.name);
            let availability = if device.is_available { "" } else { " (unavailable)" };
            let _ = writeln!(
                out,
                "  {:<40} {:<12} {} {}{availability}",
                device.name,
                shorthand.as_deref().unwrap_or("-"),
                device.udid,
                state_label(device.state),
            );
        }
    }
    out
}

pub(crate) fn format_rules() -> String {
    let mut out = String::from("Simulator shorthands (first match wins, case-insensitive):\n\n");
    for rule in grammar::rules() {
        let _ = writeln!(out, "  {:<22} {:<12} {}", rule.name, rule.example, rule.pattern());
    }
    out.push_str("\nWithout --sim, the plain latest iPhone is used.\n");
    out
}

fn state_label(state: DeviceState) -> &'static str {
    match state {
        DeviceState::Booted => "booted",
        DeviceState::Shutdown => "shutdown",
        DeviceState::Other => "other",
    }
}
