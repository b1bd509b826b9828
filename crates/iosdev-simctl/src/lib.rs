//! Simulator inventory snapshots for iosdev.
//!
//! Provides the [`InventorySource`](iosdev_devices::InventorySource)
//! implementations used by the CLI: [`Simctl`] runs
//! `xcrun simctl list --json devices runtimes`, and [`SnapshotFile`] reads
//! the same JSON from disk for offline use.

pub mod json;
pub mod source;

pub use json::{parse_list, runtime_from_identifier};
pub use source::{Simctl, SnapshotFile};
