//! `iosdev.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "iosdev.toml";

/// The top-level configuration for an iOS app repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosdevManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Simulator defaults.
    #[serde(default)]
    pub simulator: Option<SimulatorConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// App name (required).
    pub name: String,
    /// Xcode scheme used for builds and tests.
    #[serde(default)]
    pub scheme: Option<String>,
    /// Path to the `.xcworkspace`, relative to the manifest.
    #[serde(default)]
    pub workspace: Option<String>,
}

/// Simulator defaults applied when `--sim` / `--os` are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Shorthand of the preferred simulator (e.g. `17pro`).
    #[serde(default)]
    pub default: Option<String>,
    /// Preferred runtime version (e.g. `18.2`).
    #[serde(default)]
    pub os: Option<String>,
}

impl IosdevManifest {
    /// Search upward from `start_dir` for `iosdev.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: IosdevManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                debug!(path = %candidate.display(), "loaded project configuration");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing iosdev.toml")
    }

    /// The configured default simulator shorthand.
    pub fn default_simulator(&self) -> Option<&str> {
        self.simulator.as_ref().and_then(|s| s.default.as_deref())
    }

    /// The configured default runtime version.
    pub fn default_os(&self) -> Option<&str> {
        self.simulator.as_ref().and_then(|s| s.os.as_deref())
    }

    /// Generate the template written by `iosdev init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
scheme = "{name}"

[simulator]
# Shorthand such as "17pro", "air11", "mini6g". Omit for the plain latest iPhone.
# default = "17pro"
# Runtime version. Omit for the latest installed iOS runtime.
# os = "18.2"
"#
        )
    }
}

/// Pick the simulator shorthand and OS version: flags first, then the manifest.
pub fn effective_simulator<'a>(
    manifest: Option<&'a IosdevManifest>,
    sim: Option<&'a str>,
    os: Option<&'a str>,
) -> (Option<&'a str>, Option<&'a str>) {
    let sim = sim.or_else(|| manifest.and_then(IosdevManifest::default_simulator));
    let os = os.or_else(|| manifest.and_then(IosdevManifest::default_os));
    (sim, os)
}
