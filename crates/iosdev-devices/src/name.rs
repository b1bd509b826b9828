//! Device-name classification and shorthand derivation.
//!
//! Platform names such as `iPhone 17 Pro Max` or `iPad Pro 12.9-inch (6th
//! generation)` are described as a [`DevicePattern`] by stripping a known
//! family prefix and reading the remainder. Derivation renders that pattern
//! through the shared grammar, so any derived shorthand parses back.
//!
//! Unsupported on purpose: the older parenthesized iPad Pro naming
//! (`iPad Pro (11-inch) (4th generation)`), watches, TVs, and anything else
//! outside the families listed in [`FAMILY_PREFIXES`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::grammar;
use crate::pattern::{DevicePattern, PadFamily, PhoneKind};
use crate::size;

/// Family prefixes, longest first so `iPad mini` wins over `iPad`.
const FAMILY_PREFIXES: &[(&str, NameFamily)] = &[
    ("iPad mini", NameFamily::Pad(PadFamily::Mini)),
    ("iPad Air", NameFamily::Pad(PadFamily::Air)),
    ("iPad Pro", NameFamily::Pad(PadFamily::Pro)),
    ("iPad", NameFamily::Pad(PadFamily::Plain)),
    ("iPhone", NameFamily::Phone),
];

#[derive(Debug, Clone, Copy)]
enum NameFamily {
    Phone,
    Pad(PadFamily),
}

static PHONE_NUMBERED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)(e)?(?:\s+(pro\s+max|pro|plus))?$").expect("valid regex")
});
static PHONE_SE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^se(?:\s*\([^)]*\))?$").expect("valid regex"));
static PHONE_AIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^air$").expect("valid regex"));
static INCH_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d)?)-inch(?:\s*\(([^)]*)\))?$").expect("valid regex")
});
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([^)]*)\)$").expect("valid regex"));
static GENERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(?:st|nd|rd|th)\s+generation$").expect("valid regex")
});
static CHIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z]\d+(?:\s*[a-z]+)?$").expect("valid regex"));

/// Describe a platform device name as a pattern, if its family is supported.
pub fn classify(name: &str) -> Option<DevicePattern> {
    let name = name.trim();
    let (family, rest) = FAMILY_PREFIXES.iter().find_map(|(prefix, family)| {
        let rest = strip_word_prefix(name, prefix)?;
        Some((*family, rest))
    })?;

    match family {
        NameFamily::Phone => classify_phone(rest),
        NameFamily::Pad(pad @ (PadFamily::Air | PadFamily::Pro)) => classify_sized_pad(pad, rest),
        NameFamily::Pad(pad) => classify_qualified_pad(pad, rest),
    }
}

/// Derive the canonical shorthand for a platform device name.
pub fn derive_shorthand(name: &str) -> Option<String> {
    classify(name).and_then(|pattern| grammar::render(&pattern))
}

/// Read the leading integer of an `(Nth generation)` parenthetical.
pub fn generation_ordinal(text: &str) -> Option<u32> {
    let text = text.trim();
    let inner = PARENTHETICAL
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str());
    GENERATION
        .captures(inner.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Strip `prefix` when it is followed by whitespace or the end of the name.
fn strip_word_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn classify_phone(rest: &str) -> Option<DevicePattern> {
    if PHONE_SE.is_match(rest) {
        return Some(DevicePattern::phone(None, PhoneKind::Se));
    }
    if PHONE_AIR.is_match(rest) {
        return Some(DevicePattern::phone(None, PhoneKind::Air));
    }
    let caps = PHONE_NUMBERED.captures(rest)?;
    let model = caps.get(1)?.as_str();
    let e_variant = caps.get(2).is_some();
    let suffix = caps
        .get(3)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase());
    let kind = match (e_variant, suffix.as_deref()) {
        (true, None) => PhoneKind::EVariant,
        (true, Some(_)) => return None,
        (false, None) => PhoneKind::Plain,
        (false, Some("pro")) => PhoneKind::Pro,
        (false, Some("pro max")) => PhoneKind::ProMax,
        (false, Some("plus")) => PhoneKind::Plus,
        (false, Some(_)) => return None,
    };
    Some(DevicePattern::phone(Some(model), kind))
}

fn classify_sized_pad(family: PadFamily, rest: &str) -> Option<DevicePattern> {
    let caps = INCH_MARKER.captures(rest)?;
    let spec = size::normalize(caps.get(1)?.as_str())?;
    let pattern = DevicePattern::pad(family).with_size(spec);
    Some(match caps.get(2) {
        Some(qualifier) => apply_qualifier(pattern, qualifier.as_str()),
        None => pattern,
    })
}

fn classify_qualified_pad(family: PadFamily, rest: &str) -> Option<DevicePattern> {
    let pattern = DevicePattern::pad(family);
    if rest.is_empty() {
        return Some(pattern);
    }
    let inner = PARENTHETICAL.captures(rest)?.get(1)?.as_str().trim();
    let qualified = apply_qualifier(pattern.clone(), inner);
    (qualified != pattern).then_some(qualified)
}

/// Attach a generation or chip code read from a parenthetical.
fn apply_qualifier(pattern: DevicePattern, qualifier: &str) -> DevicePattern {
    let qualifier = qualifier.trim();
    if let Some(ordinal) = generation_ordinal(qualifier) {
        pattern.with_generation(ordinal)
    } else if CHIP.is_match(qualifier) {
        pattern.with_chip(qualifier)
    } else {
        pattern
    }
}
