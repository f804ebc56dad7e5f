// Fragment parser - turns shortcut content into a node list for rich surfaces
//
// Newlines in text become explicit line breaks, so content authored as
// plain text keeps its lines when inserted into a rich region.

use super::tags;

/// Elements that never have children
const VOID_TAGS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// A parsed piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    /// Decoded text, never containing '\n'
    Text(String),
    /// Explicit line break (`<br>` or a newline in source text)
    LineBreak,
    /// Element with its raw attribute string (leading whitespace included)
    Element {
        tag: String,
        attrs: String,
        children: Vec<FragmentNode>,
    },
}

/// Open element while parsing
struct OpenElement {
    tag: String,
    attrs: String,
    children: Vec<FragmentNode>,
}

/// Append text, splitting on newlines into LineBreak nodes
fn push_text(target: &mut Vec<FragmentNode>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = html_escape::decode_html_entities(raw);
    for (i, line) in decoded.split('\n').enumerate() {
        if i > 0 {
            target.push(FragmentNode::LineBreak);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        // Merge with a preceding text node so leaves stay contiguous
        if let Some(FragmentNode::Text(prev)) = target.last_mut() {
            prev.push_str(line);
        } else {
            target.push(FragmentNode::Text(line.to_string()));
        }
    }
}

/// Pop the top open element and attach it to its parent (or the root list)
fn close_top(stack: &mut Vec<OpenElement>, root: &mut Vec<FragmentNode>) {
    if let Some(open) = stack.pop() {
        let node = FragmentNode::Element {
            tag: open.tag,
            attrs: open.attrs,
            children: open.children,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root.push(node),
        }
    }
}

/// Parse an HTML fragment into nodes.
///
/// Text that only looks like a tag stays text. Unmatched closing tags are ignored; elements left open at the end are
/// closed implicitly. Never fails.
pub fn parse_fragment(html: &str) -> Vec<FragmentNode> {
    let mut root = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut last_end = 0;

    for found in tags(html) {
        {
            let target = stack.last_mut().map(|e| &mut e.children).unwrap_or(&mut root);
            push_text(target, &html[last_end..found.span.start]);
        }
        last_end = found.span.end;

        let tag = found.name;
        let attrs = found.attrs.to_string();

        if found.closing {
            if let Some(depth) = stack.iter().rposition(|e| e.tag == tag) {
                while stack.len() > depth {
                    close_top(&mut stack, &mut root);
                }
            }
            continue;
        }

        let target = stack.last_mut().map(|e| &mut e.children).unwrap_or(&mut root);
        if tag == "br" {
            target.push(FragmentNode::LineBreak);
        } else if found.self_closing || VOID_TAGS.contains(&tag.as_str()) {
            target.push(FragmentNode::Element {
                tag,
                attrs,
                children: Vec::new(),
            });
        } else {
            stack.push(OpenElement {
                tag,
                attrs,
                children: Vec::new(),
            });
        }
    }

    {
        let target = stack.last_mut().map(|e| &mut e.children).unwrap_or(&mut root);
        push_text(target, &html[last_end..]);
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }
    root
}

/// Render nodes back to HTML
pub fn render_fragment(nodes: &[FragmentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out
}

fn render_node(node: &FragmentNode, out: &mut String) {
    match node {
        FragmentNode::Text(text) => out.push_str(&html_escape::encode_text(text)),
        FragmentNode::LineBreak => out.push_str("<br>"),
        FragmentNode::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            out.push_str(attrs);
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            for child in children {
                render_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
#[path = "fragment_test.rs"]
mod tests;
