//! Default device policy.
//!
//! With no shorthand, the selector takes the plain current-generation iPhone.
//! That is decided on the device name with an allow/deny word list rather
//! than the grammar, because "plain" is defined by what the name lacks.
//!
//! New marketing words (a future "Ultra", say) need a row in
//! [`DEFAULT_PHONE_DENY`] or they will be treated as plain phones.

/// First word a default device name must start with.
pub const DEFAULT_PHONE_ALLOW: &str = "iphone";

/// Words that disqualify a name from being the default phone.
pub const DEFAULT_PHONE_DENY: &[&str] = &["pro", "max", "plus", "se", "mini", "air"];

/// Whether `name` is a plain iPhone eligible as the default device.
pub fn is_default_phone(name: &str) -> bool {
    let mut words = name
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase);

    if words.next().as_deref() != Some(DEFAULT_PHONE_ALLOW) {
        return false;
    }
    words.all(|w| !DEFAULT_PHONE_DENY.contains(&w.as_str()))
}
