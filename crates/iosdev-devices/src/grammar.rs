//! Shorthand grammar.
//!
//! The grammar is a single ordered rule table. Each rule carries the pattern
//! that recognizes a shorthand, the constructor that turns captures into a
//! [`DevicePattern`], and the renderer that turns a pattern back into its
//! canonical shorthand. Parsing and derivation both walk this table, so the
//! two directions cannot drift apart.
//!
//! Input is lowercased before matching. The first matching rule wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::pattern::{DevicePattern, PadFamily, PhoneKind};
use crate::size;

/// One entry of the shorthand grammar.
pub struct ShorthandRule {
    /// Stable rule name, shown by `iosdev sim shorthands`.
    pub name: &'static str,
    /// A shorthand this rule accepts.
    pub example: &'static str,
    regex: Regex,
    build: fn(&Captures<'_>) -> Option<DevicePattern>,
    render: fn(&DevicePattern) -> Option<String>,
}

impl ShorthandRule {
    fn new(
        name: &'static str,
        example: &'static str,
        pattern: &str,
        build: fn(&Captures<'_>) -> Option<DevicePattern>,
        render: fn(&DevicePattern) -> Option<String>,
    ) -> Self {
        Self {
            name,
            example,
            regex: Regex::new(pattern).expect("shorthand rule regex is valid"),
            build,
            render,
        }
    }

    /// The anchored regular expression this rule matches against.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    fn parse(&self, normalized: &str) -> Option<DevicePattern> {
        let caps = self.regex.captures(normalized)?;
        (self.build)(&caps)
    }
}

static RULES: Lazy<Vec<ShorthandRule>> = Lazy::new(|| {
    vec![
        ShorthandRule::new("phone", "17", r"^(\d+)$", |c| phone(c, PhoneKind::Plain), |p| {
            render_phone(p, PhoneKind::Plain, "")
        }),
        ShorthandRule::new("phone-pro", "17pro", r"^(\d+)pro$", |c| phone(c, PhoneKind::Pro), |p| {
            render_phone(p, PhoneKind::Pro, "pro")
        }),
        ShorthandRule::new(
            "phone-pro-max",
            "17max",
            r"^(\d+)max$",
            |c| phone(c, PhoneKind::ProMax),
            |p| render_phone(p, PhoneKind::ProMax, "max"),
        ),
        ShorthandRule::new("phone-plus", "15plus", r"^(\d+)plus$", |c| phone(c, PhoneKind::Plus), |p| {
            render_phone(p, PhoneKind::Plus, "plus")
        }),
        ShorthandRule::new("phone-e", "16e", r"^(\d+)e$", |c| phone(c, PhoneKind::EVariant), |p| {
            render_phone(p, PhoneKind::EVariant, "e")
        }),
        ShorthandRule::new(
            "phone-se",
            "se",
            r"^se$",
            |_| Some(DevicePattern::phone(None, PhoneKind::Se)),
            |p| render_bare_phone(p, PhoneKind::Se, "se"),
        ),
        // A bare `air` is the phone; `air` followed by a size is the iPad.
        ShorthandRule::new(
            "phone-air",
            "air",
            r"^air$",
            |_| Some(DevicePattern::phone(None, PhoneKind::Air)),
            |p| render_bare_phone(p, PhoneKind::Air, "air"),
        ),
        ShorthandRule::new(
            "ipad-air",
            "air11",
            r"^air(\d{1,3})$",
            |c| sized_pad(c, PadFamily::Air),
            |p| render_sized_pad(p, PadFamily::Air, "air"),
        ),
        ShorthandRule::new(
            "ipad-pro",
            "pro13",
            r"^pro(\d{1,3})$",
            |c| sized_pad(c, PadFamily::Pro),
            |p| render_sized_pad(p, PadFamily::Pro, "pro"),
        ),
        ShorthandRule::new(
            "ipad-mini-generation",
            "mini6g",
            r"^mini(\d+)g$",
            |c| generation_pad(c, PadFamily::Mini),
            |p| render_generation_pad(p, PadFamily::Mini, "mini"),
        ),
        ShorthandRule::new(
            "ipad-mini-chip",
            "miniA17Pro",
            r"^mini([a-z]\d+[a-z]*)$",
            |c| chip_pad(c, PadFamily::Mini),
            |p| render_chip_pad(p, PadFamily::Mini, "mini"),
        ),
        ShorthandRule::new(
            "ipad-mini",
            "mini",
            r"^mini$",
            |_| Some(DevicePattern::pad(PadFamily::Mini)),
            |p| match p {
                DevicePattern::Pad {
                    family: PadFamily::Mini,
                    generation: None,
                    chip: None,
                    ..
                } => Some("mini".to_string()),
                _ => None,
            },
        ),
        ShorthandRule::new(
            "ipad-generation",
            "pad10g",
            r"^pad(\d+)g$",
            |c| generation_pad(c, PadFamily::Plain),
            |p| render_generation_pad(p, PadFamily::Plain, "pad"),
        ),
        ShorthandRule::new(
            "ipad-chip",
            "padA16",
            r"^pad([a-z]\d+[a-z]*)$",
            |c| chip_pad(c, PadFamily::Plain),
            |p| render_chip_pad(p, PadFamily::Plain, "pad"),
        ),
    ]
});

/// The grammar, in match order.
pub fn rules() -> &'static [ShorthandRule] {
    &RULES
}

/// Example shorthands, one per rule, for error messages and help.
pub fn examples() -> Vec<&'static str> {
    RULES.iter().map(|r| r.example).collect()
}

/// Parse a shorthand into a pattern. Returns `None` for unrecognized shapes.
pub fn parse(input: &str) -> Option<DevicePattern> {
    let normalized = input.trim().to_lowercase();
    RULES.iter().find_map(|rule| rule.parse(&normalized))
}

/// Render the canonical shorthand for a pattern, if the grammar has one.
///
/// Sizes are always rendered in their whole-inch form; a size whose bucket has
/// no token renders as `None`.
pub fn render(pattern: &DevicePattern) -> Option<String> {
    RULES.iter().find_map(|rule| (rule.render)(pattern))
}

fn digits(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| m.as_str().to_string())
}

fn phone(caps: &Captures<'_>, kind: PhoneKind) -> Option<DevicePattern> {
    let model = digits(caps)?;
    Some(DevicePattern::phone(Some(&model), kind))
}

fn sized_pad(caps: &Captures<'_>, family: PadFamily) -> Option<DevicePattern> {
    let spec = size::from_token(caps.get(1)?.as_str())?;
    Some(DevicePattern::pad(family).with_size(spec))
}

fn generation_pad(caps: &Captures<'_>, family: PadFamily) -> Option<DevicePattern> {
    let ordinal: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(DevicePattern::pad(family).with_generation(ordinal))
}

fn chip_pad(caps: &Captures<'_>, family: PadFamily) -> Option<DevicePattern> {
    Some(DevicePattern::pad(family).with_chip(caps.get(1)?.as_str()))
}

fn render_phone(pattern: &DevicePattern, want: PhoneKind, suffix: &str) -> Option<String> {
    match pattern {
        DevicePattern::Phone {
            base_model: Some(model),
            kind,
        } if *kind == want => Some(format!("{model}{suffix}")),
        _ => None,
    }
}

fn render_bare_phone(pattern: &DevicePattern, want: PhoneKind, token: &str) -> Option<String> {
    match pattern {
        DevicePattern::Phone { kind, .. } if *kind == want => Some(token.to_string()),
        _ => None,
    }
}

fn render_sized_pad(pattern: &DevicePattern, want: PadFamily, prefix: &str) -> Option<String> {
    match pattern {
        DevicePattern::Pad {
            family,
            size: Some(spec),
            ..
        } if *family == want => Some(format!("{prefix}{}", spec.whole_token()?)),
        _ => None,
    }
}

fn render_generation_pad(pattern: &DevicePattern, want: PadFamily, prefix: &str) -> Option<String> {
    match pattern {
        DevicePattern::Pad {
            family,
            generation: Some(ordinal),
            ..
        } if *family == want => Some(format!("{prefix}{ordinal}g")),
        _ => None,
    }
}

fn render_chip_pad(pattern: &DevicePattern, want: PadFamily, prefix: &str) -> Option<String> {
    match pattern {
        DevicePattern::Pad {
            family,
            chip: Some(chip),
            ..
        } if *family == want => Some(format!("{prefix}{}", display_chip(chip))),
        _ => None,
    }
}

/// `"a17pro"` → `"A17Pro"`.
fn display_chip(chip: &str) -> String {
    let mut out = String::with_capacity(chip.len());
    let mut upper_next = true;
    for c in chip.chars() {
        if c.is_ascii_digit() {
            out.push(c);
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
