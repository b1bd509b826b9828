//! Error types for simulator resolution.

use crate::inventory::InventoryError;
use crate::pattern::DeviceFamily;

/// How many suggestions a not-found message lists before summarizing.
pub const MAX_LISTED_NAMES: usize = 10;

/// Errors that can occur while resolving a simulator.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The text matches no shorthand rule.
    #[error("invalid simulator shorthand '{input}' (examples: {})", .examples.join(", "))]
    InvalidShorthand {
        input: String,
        examples: Vec<&'static str>,
    },

    /// The shorthand parsed but no installed device/runtime satisfies it.
    #[error(
        "no simulator matches '{}'{}; available {family} simulators: {}",
        .input.as_deref().unwrap_or("default iPhone"),
        .os_version.as_deref().map(|v| format!(" on iOS {v}")).unwrap_or_default(),
        format_available(.available)
    )]
    SimulatorNotFound {
        /// The requested shorthand, `None` for the default policy.
        input: Option<String>,
        family: DeviceFamily,
        os_version: Option<String>,
        /// Installed, available device names of `family`.
        available: Vec<String>,
    },

    /// The inventory could not be obtained.
    #[error(transparent)]
    InventoryUnavailable(#[from] InventoryError),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolutionError>;

/// Render a suggestion list: at most [`MAX_LISTED_NAMES`] entries, then a count.
pub fn format_available(names: &[String]) -> String {
    if names.is_empty() {
        return "(none installed)".to_string();
    }
    let shown = names.iter().take(MAX_LISTED_NAMES).cloned().collect::<Vec<_>>();
    let mut out = shown.join(", ");
    if names.len() > MAX_LISTED_NAMES {
        out.push_str(&format!(" ... and {} more", names.len() - MAX_LISTED_NAMES));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_says_none_installed() {
        assert_eq!(format_available(&[]), "(none installed)");
    }

    #[test]
    fn long_list_is_truncated() {
        let names: Vec<String> = (1..=13).map(|i| format!("iPhone {i}")).collect();
        let rendered = format_available(&names);
        assert!(rendered.starts_with("iPhone 1, iPhone 2"));
        assert!(rendered.contains("iPhone 10"));
        assert!(!rendered.contains("iPhone 11"));
        assert!(rendered.ends_with("... and 3 more"));
    }

    #[test]
    fn exactly_ten_has_no_suffix() {
        let names: Vec<String> = (1..=10).map(|i| format!("iPad {i}")).collect();
        assert!(!format_available(&names).contains("more"));
    }

    #[test]
    fn not_found_message() {
        let err = ResolutionError::SimulatorNotFound {
            input: Some("mini6g".into()),
            family: DeviceFamily::Pad,
            os_version: None,
            available: vec!["iPad Air 11-inch (M2)".into()],
        };
        assert_eq!(
            err.to_string(),
            "no simulator matches 'mini6g'; available iPad simulators: iPad Air 11-inch (M2)"
        );
    }

    #[test]
    fn not_found_message_for_default() {
        let err = ResolutionError::SimulatorNotFound {
            input: None,
            family: DeviceFamily::Phone,
            os_version: Some("17.5".into()),
            available: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "no simulator matches 'default iPhone' on iOS 17.5; available iPhone simulators: (none installed)"
        );
    }

    #[test]
    fn invalid_shorthand_lists_examples() {
        let err = ResolutionError::InvalidShorthand {
            input: "xyz".into(),
            examples: vec!["17pro", "mini6g", "pro13"],
        };
        assert_eq!(
            err.to_string(),
            "invalid simulator shorthand 'xyz' (examples: 17pro, mini6g, pro13)"
        );
    }

    #[test]
    fn inventory_error_is_transparent() {
        let inner = InventoryError::Malformed {
            detail: "missing runtimes".into(),
        };
        let expected = inner.to_string();
        let err = ResolutionError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
