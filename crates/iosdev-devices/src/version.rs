//! Runtime version ordering.
//!
//! Runtime versions are dotted numbers with one to three components
//! (`18`, `18.2`, `17.0.1`). They are padded to three components and compared
//! as semantic versions.

/// A parsed runtime version.
pub type Version = semver::Version;

/// Parse a dotted runtime version. Returns `None` for non-numeric components
/// or more than three components.
pub fn parse_os_version(s: &str) -> Option<Version> {
    let mut parts = [0u64; 3];
    let mut count = 0;
    for component in s.trim().split('.') {
        if count == parts.len() || component.is_empty() {
            return None;
        }
        parts[count] = component.parse().ok()?;
        count += 1;
    }
    Some(Version::new(parts[0], parts[1], parts[2]))
}

/// The highest version among `versions`, ignoring unparseable entries.
pub fn latest<'a>(versions: impl IntoIterator<Item = &'a str>) -> Option<Version> {
    versions.into_iter().filter_map(parse_os_version).max()
}
