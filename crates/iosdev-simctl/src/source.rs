//! Inventory sources backed by the simctl tool and by snapshot files.

use std::path::{Path, PathBuf};
use std::process::Command;

use iosdev_devices::{InventoryError, InventorySnapshot, InventorySource};
use tracing::debug;

use crate::json::parse_list;

/// Arguments passed after the program name.
const LIST_ARGS: &[&str] = &["simctl", "list", "--json", "devices", "runtimes"];

/// Live inventory from `xcrun simctl`.
#[derive(Debug, Clone)]
pub struct Simctl {
    program: PathBuf,
}

impl Default for Simctl {
    fn default() -> Self {
        Simctl {
            program: PathBuf::from("xcrun"),
        }
    }
}

impl Simctl {
    /// Use a different launcher than `xcrun` (a wrapper script, a full path).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Simctl {
            program: program.into(),
        }
    }

    fn tool_label(&self) -> String {
        format!("{} simctl", self.program.display())
    }
}

impl InventorySource for Simctl {
    fn describe(&self) -> String {
        self.tool_label()
    }

    fn snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        debug!(program = %self.program.display(), args = ?LIST_ARGS, "listing simulators");
        let output = Command::new(&self.program)
            .args(LIST_ARGS)
            .output()
            .map_err(|source| InventoryError::Spawn {
                tool: self.tool_label(),
                source,
            })?;

        if !output.status.success() {
            return Err(InventoryError::ToolFailed {
                tool: self.tool_label(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let snapshot = parse_list(&output.stdout)?;
        debug!(
            runtimes = snapshot.runtimes.len(),
            devices = snapshot.device_count(),
            "simulator inventory loaded"
        );
        Ok(snapshot)
    }
}

/// Inventory read from a file holding saved simctl JSON output.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventorySource for SnapshotFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        if !self.path.is_file() {
            return Err(InventoryError::NotFound {
                path: self.path.clone(),
            });
        }
        let bytes = std::fs::read(&self.path)?;
        parse_list(&bytes)
    }
}
