//! `iosdev init` — write a starter `iosdev.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::manifest::{IosdevManifest, MANIFEST_FILE};

/// Write `iosdev.toml` into `dir`.
///
/// `name` defaults to the directory name.
pub fn run(dir: &Path, name: Option<&str>) -> Result<()> {
    let path = create_config(dir, name)?;
    println!("Created {}", path.display());
    println!("Set [simulator] default / os to pin a simulator for this repository.");
    Ok(())
}

pub(crate) fn create_config(dir: &Path, name: Option<&str>) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .context("cannot infer a project name; pass --name")?,
    };

    fs::write(&path, IosdevManifest::template(&name))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
