//! Identifier casing used for generated type names.
//!
//! Unlike `heck`, these only touch the first character of each segment:
//! `getUserByID` stays `getUserByID` in camel case and becomes
//! `GetUserByID` in pascal case. Segments are split on runs of
//! non-alphanumeric characters; empty segments are dropped, so `"---"`
//! yields `""` and `"-pet store"` yields `petStore`.

/// Lowercase the first character, leave the rest untouched.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split on runs of non-alphanumeric characters, dropping empty segments.
pub fn segments(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|seg| !seg.is_empty())
}

/// `pet store` → `petStore`, `Pet-Store` → `petStore`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, seg) in segments(s).enumerate() {
        if i == 0 {
            out.push_str(&lowercase_first(seg));
        } else {
            out.push_str(&uppercase_first(seg));
        }
    }
    out
}

/// `pet store` → `PetStore`, `string` → `String`.
pub fn pascal_case(s: &str) -> String {
    segments(s).map(uppercase_first).collect()
}
