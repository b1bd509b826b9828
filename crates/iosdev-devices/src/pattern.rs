//! Structural device patterns.
//!
//! A [`DevicePattern`] is what a shorthand means once the text is gone. The
//! same type describes a concrete device name (see [`crate::name`]), so a
//! request is satisfied by comparing two patterns field by field.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::size::SizeSpec;

/// Broad device family, used for suggestion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceFamily {
    Phone,
    Pad,
}

impl DeviceFamily {
    /// Classify a platform device name by its marketing prefix.
    pub fn of_name(name: &str) -> Option<Self> {
        let lower = name.trim_start().to_ascii_lowercase();
        if lower.starts_with("iphone") {
            Some(DeviceFamily::Phone)
        } else if lower.starts_with("ipad") {
            Some(DeviceFamily::Pad)
        } else {
            None
        }
    }

    /// Human label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceFamily::Phone => "iPhone",
            DeviceFamily::Pad => "iPad",
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// iPhone variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneKind {
    Plain,
    Pro,
    ProMax,
    Plus,
    /// The budget `e` model (`iPhone 16e`).
    EVariant,
    Se,
    Air,
}

/// iPad product lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PadFamily {
    Air,
    Pro,
    Mini,
    Plain,
}

/// The normalized meaning of a shorthand or a device name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DevicePattern {
    Phone {
        /// Model number digits (`"17"`), absent for SE and Air.
        base_model: Option<String>,
        kind: PhoneKind,
    },
    Pad {
        family: PadFamily,
        size: Option<SizeSpec>,
        generation: Option<u32>,
        /// Chip code, lowercased with whitespace removed (`"a17pro"`).
        chip: Option<String>,
    },
}

impl DevicePattern {
    pub fn phone(base_model: Option<&str>, kind: PhoneKind) -> Self {
        DevicePattern::Phone {
            base_model: base_model.map(str::to_string),
            kind,
        }
    }

    pub fn pad(family: PadFamily) -> Self {
        DevicePattern::Pad {
            family,
            size: None,
            generation: None,
            chip: None,
        }
    }

    pub fn with_size(mut self, spec: SizeSpec) -> Self {
        if let DevicePattern::Pad { size, .. } = &mut self {
            *size = Some(spec);
        }
        self
    }

    pub fn with_generation(mut self, ordinal: u32) -> Self {
        if let DevicePattern::Pad { generation, .. } = &mut self {
            *generation = Some(ordinal);
        }
        self
    }

    pub fn with_chip(mut self, code: &str) -> Self {
        if let DevicePattern::Pad { chip, .. } = &mut self {
            *chip = Some(normalize_chip(code));
        }
        self
    }

    /// The family this pattern selects from.
    pub fn family(&self) -> DeviceFamily {
        match self {
            DevicePattern::Phone { .. } => DeviceFamily::Phone,
            DevicePattern::Pad { .. } => DeviceFamily::Pad,
        }
    }

    /// Whether a device described by `device` satisfies this request.
    ///
    /// Fields left unset in the request are wildcards.
    pub fn matches(&self, device: &DevicePattern) -> bool {
        match (self, device) {
            (
                DevicePattern::Phone {
                    base_model: want_model,
                    kind: want_kind,
                },
                DevicePattern::Phone {
                    base_model: have_model,
                    kind: have_kind,
                },
            ) => {
                want_kind == have_kind
                    && want_model
                        .as_ref()
                        .map_or(true, |m| have_model.as_ref() == Some(m))
            }
            (
                DevicePattern::Pad {
                    family: want_family,
                    size: want_size,
                    generation: want_gen,
                    chip: want_chip,
                },
                DevicePattern::Pad {
                    family: have_family,
                    size: have_size,
                    generation: have_gen,
                    chip: have_chip,
                },
            ) => {
                want_family == have_family
                    && want_size.map_or(true, |w| have_size.map_or(false, |h| w.selects(&h)))
                    && want_gen.map_or(true, |w| *have_gen == Some(w))
                    && want_chip
                        .as_deref()
                        .map_or(true, |w| have_chip.as_deref().map_or(false, |h| chip_selects(w, h)))
            }
            _ => false,
        }
    }
}

/// Lowercase a chip code and drop whitespace (`"A17 Pro"` → `"a17pro"`).
pub fn normalize_chip(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A bare chip also selects its `Pro` edition.
fn chip_selects(want: &str, have: &str) -> bool {
    want == have || have.strip_suffix("pro") == Some(want)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_from_name() {
        assert_eq!(DeviceFamily::of_name("iPhone 17"), Some(DeviceFamily::Phone));
        assert_eq!(
            DeviceFamily::of_name("iPad Pro (11-inch) (4th generation)"),
            Some(DeviceFamily::Pad)
        );
        assert_eq!(DeviceFamily::of_name("Apple Watch Ultra 2 (49mm)"), None);
    }

    #[test]
    fn phone_model_is_wildcard_when_absent() {
        let want = DevicePattern::phone(None, PhoneKind::Air);
        assert!(want.matches(&DevicePattern::phone(None, PhoneKind::Air)));

        let want = DevicePattern::phone(Some("17"), PhoneKind::Pro);
        assert!(want.matches(&DevicePattern::phone(Some("17"), PhoneKind::Pro)));
        assert!(!want.matches(&DevicePattern::phone(Some("16"), PhoneKind::Pro)));
        assert!(!want.matches(&DevicePattern::phone(Some("17"), PhoneKind::ProMax)));
    }

    #[test]
    fn pad_fields_must_agree() {
        let device = DevicePattern::pad(PadFamily::Mini).with_generation(6);
        assert!(DevicePattern::pad(PadFamily::Mini).matches(&device));
        assert!(DevicePattern::pad(PadFamily::Mini)
            .with_generation(6)
            .matches(&device));
        assert!(!DevicePattern::pad(PadFamily::Mini)
            .with_generation(5)
            .matches(&device));
        assert!(!DevicePattern::pad(PadFamily::Plain)
            .with_generation(6)
            .matches(&device));
    }

    #[test]
    fn size_request_needs_device_size() {
        let want = DevicePattern::pad(PadFamily::Pro).with_size(SizeSpec::from_whole(13));
        let sized = DevicePattern::pad(PadFamily::Pro).with_size(SizeSpec::from_tenths(129));
        assert!(want.matches(&sized));
        assert!(!want.matches(&DevicePattern::pad(PadFamily::Pro)));
    }

    #[test]
    fn chip_codes_compare_loosely() {
        let device = DevicePattern::pad(PadFamily::Mini).with_chip("A17 Pro");
        assert!(DevicePattern::pad(PadFamily::Mini)
            .with_chip("a17")
            .matches(&device));
        assert!(DevicePattern::pad(PadFamily::Mini)
            .with_chip("A17Pro")
            .matches(&device));
        assert!(!DevicePattern::pad(PadFamily::Mini)
            .with_chip("a16")
            .matches(&device));
    }

    #[test]
    fn families_never_cross() {
        let phone = DevicePattern::phone(None, PhoneKind::Air);
        let pad = DevicePattern::pad(PadFamily::Air).with_size(SizeSpec::from_whole(11));
        assert!(!phone.matches(&pad));
        assert!(!pad.matches(&phone));
    }
}
