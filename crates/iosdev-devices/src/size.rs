//! Screen-size normalization.
//!
//! Device names carry inch markers such as `12.9-inch` or `11-inch`. A marker
//! is kept at tenth-inch resolution (the *precise* token, `129`) alongside a
//! whole-inch bucket (the *guessed* token, `13`) so that both the exact and
//! the coarse shorthand forms select the same hardware.

use serde::{Deserialize, Serialize};

/// Fractional sizes whose whole-inch bucket is not simply the rounded value.
///
/// Extend by adding rows; every bucket must itself be a whole-inch size token.
const GUESS_TABLE: &[(u32, u32)] = &[(129, 13), (109, 10), (105, 10), (102, 10)];

/// Largest bucket a whole-inch token can name.
const MAX_WHOLE_TOKEN: u32 = 99;

/// A normalized screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizeSpec {
    /// Size in tenths of an inch (`129` for 12.9").
    pub precise_tenths: u32,
    /// Whole-inch bucket (`13` for 12.9").
    pub guessed_whole: u32,
}

impl SizeSpec {
    /// Build a size from its tenth-inch value, looking up its bucket.
    pub fn from_tenths(precise_tenths: u32) -> Self {
        let guessed_whole = GUESS_TABLE
            .iter()
            .find(|(tenths, _)| *tenths == precise_tenths)
            .map(|(_, whole)| *whole)
            .unwrap_or(precise_tenths.saturating_add(5) / 10);
        Self {
            precise_tenths,
            guessed_whole,
        }
    }

    /// Build a size from a whole number of inches.
    pub fn from_whole(inches: u32) -> Self {
        Self {
            precise_tenths: inches.saturating_mul(10),
            guessed_whole: inches,
        }
    }

    /// The whole-inch shorthand token (`"13"`), if the bucket has one.
    ///
    /// Only `1..=99` are expressible: a three-digit token reads as tenths.
    pub fn whole_token(&self) -> Option<String> {
        (1..=MAX_WHOLE_TOKEN)
            .contains(&self.guessed_whole)
            .then(|| self.guessed_whole.to_string())
    }

    /// Whether this size names a whole number of inches.
    pub fn is_whole(&self) -> bool {
        self.precise_tenths % 10 == 0
    }

    /// Whether a requested size selects a device of size `actual`.
    ///
    /// Whole-inch requests match on the bucket, fractional requests only
    /// match the exact tenth-inch value.
    pub fn selects(&self, actual: &SizeSpec) -> bool {
        if self.is_whole() {
            self.guessed_whole == actual.guessed_whole
        } else {
            self.precise_tenths == actual.precise_tenths
        }
    }

    /// Every bucket that can appear as a guessed size.
    pub fn known_buckets() -> impl Iterator<Item = u32> {
        GUESS_TABLE.iter().map(|(_, whole)| *whole)
    }
}

/// Normalize an inch marker such as `"12.9"` or `"11"`.
///
/// Returns `None` only when the text is not a decimal number with at most one
/// fractional digit.
pub fn normalize(marker: &str) -> Option<SizeSpec> {
    let marker = marker.trim();
    let (whole, frac) = match marker.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (marker, None),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u32 = whole.parse().ok()?;
    let tenths = match frac {
        None => 0,
        Some(f) if f.len() == 1 && f.bytes().all(|b| b.is_ascii_digit()) => f.parse().ok()?,
        Some(_) => return None,
    };
    let precise = whole.checked_mul(10)?.checked_add(tenths)?;
    Some(SizeSpec::from_tenths(precise))
}

/// Interpret a shorthand size token: one or two digits are whole inches,
/// three are tenths.
pub fn from_token(token: &str) -> Option<SizeSpec> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = token.parse().ok()?;
    match token.len() {
        1 | 2 if value > 0 => Some(SizeSpec::from_whole(value)),
        3 if value > 0 => Some(SizeSpec::from_tenths(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_marker_maps_to_itself() {
        assert_eq!(
            normalize("13"),
            Some(SizeSpec {
                precise_tenths: 130,
                guessed_whole: 13
            })
        );
        assert_eq!(normalize("11").unwrap().guessed_whole, 11);
    }

    #[test]
    fn fractional_markers_use_table() {
        assert_eq!(
            normalize("12.9"),
            Some(SizeSpec {
                precise_tenths: 129,
                guessed_whole: 13
            })
        );
        assert_eq!(normalize("10.9").unwrap().guessed_whole, 10);
        assert_eq!(normalize("10.5").unwrap().guessed_whole, 10);
        assert_eq!(normalize("10.2").unwrap().guessed_whole, 10);
    }

    #[test]
    fn unknown_fraction_rounds() {
        let s = normalize("8.3").unwrap();
        assert_eq!(s.precise_tenths, 83);
        assert_eq!(s.guessed_whole, 8);
        assert_eq!(normalize("7.9").unwrap().guessed_whole, 8);
    }

    #[test]
    fn rounded_buckets_are_valid_tokens() {
        for marker in ["8.3", "9", "7.9", "11", "12.9", "99"] {
            let spec = normalize(marker).unwrap();
            let token = spec.whole_token().unwrap_or_else(|| panic!("{marker} has no token"));
            assert_eq!(from_token(&token).unwrap().guessed_whole, spec.guessed_whole);
        }
    }

    #[test]
    fn oversized_buckets_have_no_token() {
        assert_eq!(normalize("150").unwrap().whole_token(), None);
        assert_eq!(normalize("0.2").unwrap().whole_token(), None);
    }

    #[test]
    fn huge_markers_do_not_overflow() {
        assert_eq!(normalize("4294967295"), None);
        assert_eq!(normalize("429496729.6"), None);
        assert_eq!(normalize("99999999999999"), None);
        assert_eq!(SizeSpec::from_tenths(u32::MAX).guessed_whole, u32::MAX / 10);
        assert_eq!(normalize("99999999").unwrap().guessed_whole, 99_999_999);
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(normalize("abc"), None);
        assert_eq!(normalize("12.95"), None);
        assert_eq!(normalize(".5"), None);
    }

    #[test]
    fn buckets_are_valid_tokens() {
        for bucket in SizeSpec::known_buckets() {
            let token = bucket.to_string();
            let parsed = from_token(&token).unwrap();
            assert_eq!(parsed.guessed_whole, bucket);
        }
    }

    #[test]
    fn token_digit_count_decides_precision() {
        assert_eq!(from_token("13"), Some(SizeSpec::from_whole(13)));
        assert_eq!(from_token("129"), Some(SizeSpec::from_tenths(129)));
        assert_eq!(from_token("9"), Some(SizeSpec::from_whole(9)));
        assert_eq!(from_token("0"), None);
        assert_eq!(from_token("000"), None);
        assert_eq!(from_token("1290"), None);
    }

    #[test]
    fn whole_request_matches_bucket() {
        let request = from_token("13").unwrap();
        assert!(request.selects(&normalize("12.9").unwrap()));
        assert!(request.selects(&normalize("13").unwrap()));
        assert!(!request.selects(&normalize("11").unwrap()));
    }

    #[test]
    fn precise_request_matches_exactly() {
        let request = from_token("129").unwrap();
        assert!(request.selects(&normalize("12.9").unwrap()));
        assert!(!request.selects(&normalize("13").unwrap()));
    }
}
