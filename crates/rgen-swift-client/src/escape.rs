//! Escaping rules for values interpolated into generated Swift.
//!
//! Each kind of value gets its own rule. Anything a rule has to change is
//! reported at `warn`: the spec carried a value the generated code could
//! not hold verbatim.

use log::warn;

/// Escape a value for use inside a Swift `"..."` literal.
pub fn swift_string(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    if out != value {
        warn!("escaped string literal {value:?}");
    }
    out
}

/// Fold line breaks so a value stays inside a single `//` comment.
pub fn swift_comment(value: String) -> String {
    let out = value.replace("\r\n", " ").replace(['\n', '\r'], " ");
    if out != value {
        warn!("folded line breaks in comment text {value:?}");
    }
    out
}

const KEYWORDS: &[&str] = &[
    "associatedtype", "case", "class", "default", "defer", "deinit", "do", "else", "enum",
    "extension", "fallthrough", "false", "for", "func", "guard", "if", "import", "in", "init",
    "inout", "internal", "is", "let", "nil", "operator", "private", "protocol", "public",
    "repeat", "return", "self", "Self", "static", "struct", "subscript", "super", "switch",
    "throw", "throws", "true", "try", "typealias", "var", "where", "while",
];

/// Whether `name` can be used as a bare Swift identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    starts_well && chars.all(|c| c == '_' || c.is_alphanumeric()) && !KEYWORDS.contains(&name)
}

/// Report a name that will not compile as an identifier. The name is still
/// emitted as is.
pub fn flag_identifier(kind: &str, name: &str) {
    if !is_identifier(name) {
        warn!("{kind} name {name:?} is not a valid Swift identifier");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swift_string_passthrough() {
        assert_eq!(
            swift_string("https://api.example.com/v1".to_string()),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_swift_string_escapes() {
        assert_eq!(swift_string(r#"a"b"#.to_string()), r#"a\"b"#);
        assert_eq!(swift_string(r"a\(b)".to_string()), r"a\\(b)");
        assert_eq!(swift_string("a\nb".to_string()), "a\\nb");
    }

    #[test]
    fn test_swift_comment() {
        assert_eq!(swift_comment("Jane Doe".to_string()), "Jane Doe");
        assert_eq!(swift_comment("Jane\nDoe\r\nJr".to_string()), "Jane Doe Jr");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("petId"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("PetStore2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("pet-id"));
        assert!(!is_identifier("Pet Store"));
        assert!(!is_identifier("default"));
        assert!(!is_identifier("in"));
    }
}
