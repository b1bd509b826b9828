//! `iosdev doctor` — toolchain and simulator diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use iosdev_devices::{resolve_from, InventorySource};

use crate::manifest::{effective_simulator, IosdevManifest};

/// External tools the repository scripts call, with their version arguments.
const TOOLS: &[(&str, &[&str])] = &[
    ("git", &["--version"]),
    ("npm", &["--version"]),
    ("swift", &["--version"]),
    ("xcodebuild", &["-version"]),
    ("swiftlint", &["version"]),
    ("xcrun", &["--version"]),
];

/// Print toolchain diagnostic information.
///
/// Never fails on a missing tool or simulator; those are reported inline.
pub fn run(project_dir: &Path, source: &dyn InventorySource) -> Result<()> {
    println!("=== iosdev doctor ===");
    println!();
    println!("iosdev version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Tools ---");
    for (name, args) in TOOLS {
        println!("  {name}: {}", tool_status(name, args));
    }
    println!();

    println!("--- Project ---");
    let manifest = match IosdevManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  iosdev.toml: found at {}", dir.display());
            println!("  Project:     {}", manifest.project.name);
            if let Some(scheme) = &manifest.project.scheme {
                println!("  Scheme:      {scheme}");
            }
            if let Some(workspace) = &manifest.project.workspace {
                println!("  Workspace:   {workspace}");
            }
            Some(manifest)
        }
        Ok(None) => {
            println!("  iosdev.toml: not found (run `iosdev init`)");
            None
        }
        Err(e) => {
            println!("  iosdev.toml: error: {e:#}");
            None
        }
    };
    println!();

    println!("--- Simulator ---");
    let (sim, os) = effective_simulator(manifest.as_ref(), None, None);
    println!("  Requested: {} on {}", sim.unwrap_or("default iPhone"), os.unwrap_or("latest iOS"));
    match resolve_from(source, sim, os) {
        Ok(selection) => {
            println!("  Selected:  {} ({})", selection.device.name, selection.runtime.name);
            println!("  Destination: {}", selection.destination());
        }
        Err(e) => println!("  Unavailable: {e}"),
    }

    Ok(())
}

fn tool_status(name: &str, args: &[&str]) -> String {
    match Command::new(name).args(args).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            version
                .lines()
                .next()
                .unwrap_or("(unknown version)")
                .trim()
                .to_string()
        }
        Ok(output) => format!("present but `{name} {}` failed ({})", args.join(" "), output.status),
        Err(_) => "not found".to_string(),
    }
}
