//! Simulator shorthand resolution for the iosdev tooling.
//!
//! Turns a short device code typed on the command line (`17pro`, `mini6g`,
//! `pro13`) into a concrete simulator and runtime from the installed
//! inventory, and derives the canonical code back from a platform device
//! name.
//!
//! - **Size:** inch markers normalized to precise and whole-inch tokens
//! - **Grammar:** the ordered shorthand rule table, shared by both directions
//! - **Name:** platform device names classified into patterns
//! - **Select:** runtime filtering, structural device matching, errors
//!
//! Everything here is pure except [`InventorySource::snapshot`], which is
//! implemented outside this crate.

pub mod error;
pub mod grammar;
pub mod inventory;
pub mod name;
pub mod pattern;
pub mod policy;
pub mod select;
pub mod size;
pub mod version;

pub use error::{ResolutionError, Result};
pub use grammar::parse as parse_shorthand;
pub use inventory::{
    Device, DeviceState, InventoryError, InventorySnapshot, InventorySource, Runtime,
    RuntimeDevices,
};
pub use name::derive_shorthand;
pub use pattern::{DeviceFamily, DevicePattern, PadFamily, PhoneKind};
pub use select::{resolve, resolve_from, SimulatorSelection};
pub use size::{normalize as normalize_size, SizeSpec};
