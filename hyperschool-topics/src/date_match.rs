use regex::Regex;

lazy_static::lazy_static! {
    static ref DATE: Regex =
        Regex::new(r"^(?:\d{1,2}/\d{1,2}/\d{4}|\d{1,2}\.\d{1,2}\.\d{4})").unwrap();
}

/// Checks whether `line` starts with a `d/m/yyyy` or `d.m.yyyy` shaped
/// date. On a match the line comes back with surrounding `a` characters
/// trimmed.
pub fn check(line: &str) -> Option<&str> {
    if DATE.is_match(line) {
        Some(line.trim_matches('a'))
    } else {
        None
    }
}
