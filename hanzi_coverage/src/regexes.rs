use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// One CJK Unified Ideograph.
pub(crate) fn regex_ideograph() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"[\x{4E00}-\x{9FFF}]"))
}

/// Stroke-data entry `"<key>": {`, key in group 1.
pub(crate) fn regex_entry_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#""([^"]*)":\s*\{"#))
}
