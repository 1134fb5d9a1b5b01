//! Identifier validation: rejects malformed or injection-shaped class and
//! method names before any class lookup is attempted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a dotted, fully-qualified class name built entirely out of Java
/// identifier characters.
///
/// This already excludes `/`, `<`, and `..` (an empty segment, which this
/// pattern cannot produce since every segment must start with an identifier
/// character) without needing to special-case them.
static CLASS_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("static regex is valid")
});

/// Matches a bare method identifier.
static METHOD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex is valid"));

/// True if `name` is a well-formed, dotted fully-qualified class name.
pub fn is_valid_class_name(name: &str) -> bool {
    CLASS_NAME_RE.is_match(name)
}

/// True if `name` is a well-formed bare method identifier.
pub fn is_valid_method_name(name: &str) -> bool {
    METHOD_NAME_RE.is_match(name)
}
