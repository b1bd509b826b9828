//! iosdev — developer tooling CLI for the iOS app repository.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use manifest::IosdevManifest;

#[derive(Parser)]
#[command(name = "iosdev", version, about = "Developer tooling for the iOS app repository")]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace). Defaults to RUST_LOG, then warn
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter iosdev.toml in the current directory
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Check external tools, configuration, and the default simulator
    Doctor {
        /// Read the simulator inventory from a saved `simctl list --json` file
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
    /// Resolve and inspect simulators
    Sim {
        #[command(subcommand)]
        action: SimAction,
    },
}

/// Flags shared by the commands that resolve a simulator.
#[derive(Args)]
struct SelectArgs {
    /// Simulator shorthand (e.g., 17pro, 16e, air, air11, pro13, mini6g, pad10g)
    #[arg(long)]
    sim: Option<String>,
    /// Runtime version, matched exactly (e.g., 18.2). Default: latest installed iOS
    #[arg(long)]
    os: Option<String>,
    /// Read the simulator inventory from a saved `simctl list --json` file
    #[arg(long)]
    inventory: Option<PathBuf>,
}

#[derive(Subcommand)]
enum SimAction {
    /// Print the simulator a build or test run would use
    Resolve {
        #[command(flatten)]
        select: SelectArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print only the xcodebuild -destination descriptor
    Destination {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// List installed runtimes and devices with their shorthands
    List {
        /// Only show one family (phone, ipad)
        #[arg(long)]
        family: Option<String>,
        /// Read the simulator inventory from a saved `simctl list --json` file
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
    /// Derive the shorthand for full device names
    Derive {
        /// Device names as reported by simctl (e.g., "iPhone 17 Pro Max")
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show the shorthand grammar
    Shorthands,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `--log-level` wins over `RUST_LOG`.
fn init_logging(log_level: Option<&str>) {
    fmt()
        .with_env_filter(log_filter(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Filter for `--log-level`, else `RUST_LOG`, else `warn`.
fn log_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("warning: invalid log level '{level}' ({e}), using 'warn'");
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&cwd, name.as_deref()),

        Commands::Doctor { inventory } => {
            let source = commands::sim::inventory_source(inventory.as_deref());
            commands::doctor::run(&cwd, source.as_ref())
        }

        Commands::Sim { action } => match action {
            SimAction::Resolve { select, json } => {
                let (manifest, _) = load_manifest_optional(&cwd)?;
                let source = commands::sim::inventory_source(select.inventory.as_deref());
                commands::sim::resolve(
                    source.as_ref(),
                    manifest.as_ref(),
                    select.sim.as_deref(),
                    select.os.as_deref(),
                    json,
                )
            }
            SimAction::Destination { select } => {
                let (manifest, _) = load_manifest_optional(&cwd)?;
                let source = commands::sim::inventory_source(select.inventory.as_deref());
                commands::sim::destination(
                    source.as_ref(),
                    manifest.as_ref(),
                    select.sim.as_deref(),
                    select.os.as_deref(),
                )
            }
            SimAction::List { family, inventory } => {
                let source = commands::sim::inventory_source(inventory.as_deref());
                commands::sim::list(source.as_ref(), family.as_deref())
            }
            SimAction::Derive { names } => commands::sim::derive(&names),
            SimAction::Shorthands => commands::sim::shorthands(),
        },
    }
}

/// Try to load iosdev.toml from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<IosdevManifest>, Option<PathBuf>)> {
    match IosdevManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    const INVENTORY: &str = r#"{
  "runtimes": [
    {"identifier": "com.apple.CoreSimulator.SimRuntime.iOS-17-5", "name": "iOS 17.5", "version": "17.5", "isAvailable": true, "platform": "iOS"},
    {"identifier": "com.apple.CoreSimulator.SimRuntime.iOS-18-2", "name": "iOS 18.2", "version": "18.2", "isAvailable": true, "platform": "iOS"}
  ],
  "devices": {
    "com.apple.CoreSimulator.SimRuntime.iOS-17-5": [
      {"udid": "OLD-PRO", "name": "iPhone 17 Pro", "state": "Shutdown", "isAvailable": true}
    ],
    "com.apple.CoreSimulator.SimRuntime.iOS-18-2": [
      {"udid": "NEW-PLAIN", "name": "iPhone 17", "state": "Shutdown", "isAvailable": true},
      {"udid": "NEW-PRO", "name": "iPhone 17 Pro", "state": "Booted", "isAvailable": true},
      {"udid": "NEW-SE", "name": "iPhone SE (3rd generation)", "state": "Shutdown", "isAvailable": true},
      {"udid": "NEW-AIR11", "name": "iPad Air 11-inch (M2)", "state": "Shutdown", "isAvailable": true}
    ]
  }
}"#;

    fn write_inventory(dir: &Path) -> PathBuf {
        let path = dir.join("inventory.json");
        std::fs::write(&path, INVENTORY).unwrap();
        path
    }

    /// init → configured default → resolve from a saved inventory.
    #[test]
    fn init_configure_resolve_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Storefront");
        std::fs::create_dir(&project).unwrap();
        let inventory = write_inventory(dir.path());

        commands::init::create_config(&project, None).unwrap();
        let (manifest, _) = load_manifest_optional(&project).unwrap();
        let manifest = manifest.unwrap();
        assert_eq!(manifest.project.name, "Storefront");

        let source = commands::sim::inventory_source(Some(inventory.as_path()));
        let selection =
            commands::sim::select(source.as_ref(), Some(&manifest), None, None).unwrap();
        assert_eq!(selection.device.udid, "NEW-PLAIN");

        std::fs::write(
            project.join("iosdev.toml"),
            "[project]\nname = \"Storefront\"\n\n[simulator]\ndefault = \"17pro\"\nos = \"17.5\"\n",
        )
        .unwrap();
        let (manifest, _) = load_manifest_optional(&project).unwrap();
        let selection =
            commands::sim::select(source.as_ref(), manifest.as_ref(), None, None).unwrap();
        assert_eq!(selection.device.udid, "OLD-PRO");
        assert_eq!(selection.runtime.version, "17.5");
    }

    /// Latest runtime wins when no OS is given.
    #[test]
    fn resolve_prefers_latest_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = write_inventory(dir.path());
        let source = commands::sim::inventory_source(Some(inventory.as_path()));

        let selection = commands::sim::select(source.as_ref(), None, Some("17pro"), None).unwrap();
        assert_eq!(selection.device.udid, "NEW-PRO");
        assert_eq!(selection.destination(), "platform=iOS Simulator,id=NEW-PRO");

        commands::sim::resolve(source.as_ref(), None, Some("17pro"), None, true).unwrap();
        commands::sim::destination(source.as_ref(), None, Some("AIR11"), None).unwrap();
    }

    /// Bad input and missing inventory both fail with their own messages.
    #[test]
    fn resolve_errors() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = write_inventory(dir.path());
        let source = commands::sim::inventory_source(Some(inventory.as_path()));

        let err = commands::sim::select(source.as_ref(), None, Some("promax"), None).unwrap_err();
        assert!(err.to_string().starts_with("invalid simulator shorthand 'promax'"));

        let err = commands::sim::select(source.as_ref(), None, Some("mini6g"), None).unwrap_err();
        assert!(err.to_string().ends_with("available iPad simulators: iPad Air 11-inch (M2)"));

        let missing = dir.path().join("missing.json");
        let source = commands::sim::inventory_source(Some(missing.as_path()));
        let err = commands::sim::select(source.as_ref(), None, None, None).unwrap_err();
        assert!(err.to_string().starts_with("inventory snapshot not found"));
    }

    /// Listing, derivation, and grammar output run end to end.
    #[test]
    fn inspection_commands() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = write_inventory(dir.path());
        let source = commands::sim::inventory_source(Some(inventory.as_path()));

        commands::sim::list(source.as_ref(), None).unwrap();
        commands::sim::list(source.as_ref(), Some("ipad")).unwrap();
        assert!(commands::sim::list(source.as_ref(), Some("watch")).is_err());
        commands::sim::derive(&["iPad mini (A17 Pro)".to_string()]).unwrap();
        commands::sim::shorthands().unwrap();
    }

    /// Doctor reports rather than fails on a broken inventory.
    #[test]
    fn doctor_with_missing_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let source = commands::sim::inventory_source(Some(dir.path().join("missing.json").as_path()));
        commands::doctor::run(dir.path(), source.as_ref()).unwrap();
    }

    #[test]
    fn log_filter_accepts_directives() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(Some("iosdev_devices=trace")).to_string(),
            "iosdev_devices=trace"
        );
        assert_eq!(log_filter(Some("iosdev=loud")).to_string(), "warn");
    }

    #[test]
    fn cli_parses_sim_flags() {
        let cli = Cli::try_parse_from([
            "iosdev", "sim", "resolve", "--sim", "17pro", "--os", "18.2", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Sim {
                action: SimAction::Resolve { select, json },
            } => {
                assert_eq!(select.sim.as_deref(), Some("17pro"));
                assert_eq!(select.os.as_deref(), Some("18.2"));
                assert!(select.inventory.is_none());
                assert!(json);
            }
            _ => panic!("expected sim resolve"),
        }

        assert!(Cli::try_parse_from(["iosdev", "sim", "derive"]).is_err());
        let cli = Cli::try_parse_from(["iosdev", "--log-level", "debug", "sim", "shorthands"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
