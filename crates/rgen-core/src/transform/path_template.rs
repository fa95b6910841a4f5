/// Rewrite a brace-style path template (`/pets/{id}`) into a target
/// language's interpolation syntax: every `{` becomes `open`, every `}`
/// becomes `close`. Swift uses `open = "\\("`, `close = ")"`.
///
/// Placeholder names are not checked against the operation's parameters;
/// see [`placeholders`] for that.
pub fn rewrite_path_template(path: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    for ch in path.chars() {
        match ch {
            '{' => out.push_str(open),
            '}' => out.push_str(close),
            other => out.push(other),
        }
    }
    out
}

/// Names of the `{placeholder}`s in a path template, in order.
pub fn placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}
