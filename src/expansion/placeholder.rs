// Placeholder resolver - finds `{name}` tokens and fills them with user values
//
// Formatting applied while a shortcut was being edited can split a token
// (`{<b>loc</b>ation}`), so tags inside braces are stripped before tokens
// are read.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::html;

static BRACED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("braced pattern is valid"));
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}<>]*)\}").expect("token pattern is valid"));

/// What the caller must do with a shortcut's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No placeholders: insert this content as-is
    Ready(String),
    /// Values are needed for `names` (unique, first-occurrence order)
    /// before `content` can be inserted
    NeedsValues { content: String, names: Vec<String> },
}

/// Strip any tags found strictly inside `{...}`
pub fn sanitize(content: &str) -> String {
    BRACED_RE
        .replace_all(content, |caps: &Captures| html::strip_tags(&caps[0]))
        .into_owned()
}

/// Unique placeholder names in first-occurrence order
pub fn extract_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN_RE.captures_iter(content) {
        let name = caps[1].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Decide whether content needs placeholder values.
///
/// Content with brace pairs that yield no names (e.g. `{}` or `{ }`) is
/// treated as having no placeholders and returned unmodified.
pub fn resolve(content: &str) -> Resolution {
    if !content.contains('{') {
        return Resolution::Ready(content.to_string());
    }
    let sanitized = sanitize(content);
    let names = extract_names(&sanitized);
    if names.is_empty() {
        crate::debug!("Braces present but no placeholder names, inserting content as-is");
        return Resolution::Ready(content.to_string());
    }
    Resolution::NeedsValues {
        content: sanitized,
        names,
    }
}

/// Replace every `{name}` whose name has a value, for rich content.
///
/// Substitution is global per name: all occurrences get the same value.
/// Values are escaped so they land as text inside rich content. Tokens
/// without a value are left in place.
pub fn substitute(content: &str, values: &HashMap<String, String>) -> String {
    substitute_with(content, values, |value| html_escape::encode_text(value).into_owned())
}

/// Same as [`substitute`] for plain text: values are inserted verbatim
pub fn substitute_text(content: &str, values: &HashMap<String, String>) -> String {
    substitute_with(content, values, str::to_string)
}

fn substitute_with(
    content: &str,
    values: &HashMap<String, String>,
    render: impl Fn(&str) -> String,
) -> String {
    TOKEN_RE
        .replace_all(content, |caps: &Captures| match values.get(caps[1].trim()) {
            Some(value) => render(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;
