// Text normalizer - strips rich markup to plain text, keeping line structure
//
// Content is only treated as markup when it holds a recognised tag. Plain
// text, including text with stray `<`, `>` or `&amp;`, passes through as is.

use crate::html;

/// Convert rich content to plain text.
///
/// - `<br>` becomes a single newline
/// - `</p>` becomes a blank line (two newlines)
/// - `span` wrappers and every other recognised tag are dropped, keeping text
/// - entities are decoded
///
/// Content without a recognised tag is plain text and is returned unchanged.
pub fn normalize(content: &str) -> String {
    if !html::contains_markup(content) {
        return content.to_string();
    }
    markup_to_text(content)
}

/// Convert content known to be markup (e.g. rendered surface HTML), where
/// entities must be decoded even if no tag is present
pub(crate) fn markup_to_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut last = 0;
    for tag in html::tags(markup) {
        text.push_str(&markup[last..tag.span.start]);
        match (tag.closing, tag.name.as_str()) {
            (false, "br") => text.push('\n'),
            (true, "p") => text.push_str("\n\n"),
            _ => {}
        }
        last = tag.span.end;
    }
    text.push_str(&markup[last..]);
    html_escape::decode_html_entities(&text).into_owned()
}

#[cfg(test)]
#[path = "normalizer_test.rs"]
mod tests;
