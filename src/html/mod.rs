// HTML helpers shared by the normalizer, the placeholder resolver and the
// structured surface
//
// Only the small dialect rich editors serialize is recognised as markup: a
// known element name with attribute values in quotes. Anything else that
// merely looks like a tag (`a<b and c>d`, `<notatag>`) is literal text.
// Entity encoding and decoding go through `html_escape`.

mod fragment;

pub use fragment::{parse_fragment, render_fragment, FragmentNode};

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Start or end tag with quoted attributes
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(/?)([A-Za-z][A-Za-z0-9]*)((?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#,
    )
    .expect("tag pattern is valid")
});

/// Elements treated as markup
const KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "article", "b", "bdi", "bdo", "big", "blockquote", "br", "caption", "cite",
    "code", "col", "colgroup", "dd", "del", "dfn", "div", "dl", "dt", "em", "font", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "i", "img", "ins", "kbd", "li", "mark",
    "ol", "p", "pre", "q", "s", "samp", "section", "small", "span", "strike", "strong", "sub",
    "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "tt", "u", "ul", "var", "wbr",
];

/// One recognised tag in a piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Byte range of the whole tag
    pub span: Range<usize>,
    pub closing: bool,
    /// Lowercase element name
    pub name: String,
    /// Raw attribute text, leading whitespace included
    pub attrs: &'a str,
    pub self_closing: bool,
}

pub fn is_known_tag(name: &str) -> bool {
    KNOWN_TAGS.contains(&name.to_ascii_lowercase().as_str())
}

/// Recognised tags in document order
pub fn tags(html: &str) -> impl Iterator<Item = Tag<'_>> + '_ {
    TAG_RE.captures_iter(html).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(2)?.as_str();
        if !is_known_tag(name) {
            return None;
        }
        Some(Tag {
            span: whole.range(),
            closing: !caps[1].is_empty(),
            name: name.to_ascii_lowercase(),
            attrs: caps.get(3).map_or("", |m| m.as_str()),
            self_closing: !caps[4].is_empty(),
        })
    })
}

/// True if `text` holds at least one recognised tag
pub fn contains_markup(text: &str) -> bool {
    tags(text).next().is_some()
}

/// Remove recognised tags, keeping everything else verbatim
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for tag in tags(html) {
        out.push_str(&html[last..tag.span.start]);
        last = tag.span.end;
    }
    out.push_str(&html[last..]);
    out
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
