// Structured surface - arena-backed node tree for rich editable regions
//
// Nodes are never freed; detached nodes simply lose their parent. Positions
// inside text nodes count chars, positions inside elements count children.

use std::collections::HashSet;

use super::{byte_index, SurfaceId};
use crate::expansion::TextTree;
use crate::html::{parse_fragment, render_fragment, FragmentNode};

/// Elements that bound the trigger scan scope
const BLOCK_TAGS: &[&str] = &[
    "article", "blockquote", "div", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Handle to a node in a StructuredSurface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String, attrs: String },
    Text(String),
    LineBreak,
}

/// A caret or range boundary.
/// For text nodes `offset` is a char offset, for elements a child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Rich editable region
#[derive(Debug, Clone)]
pub struct StructuredSurface {
    id: SurfaceId,
    nodes: Vec<Node>,
    root: NodeId,
    caret: Option<Position>,
    /// Caret move queued by the last insertion, applied on flush
    pending_caret: Option<Position>,
}

impl Default for StructuredSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredSurface {
    /// Create an empty region (a root `div`)
    pub fn new() -> Self {
        Self {
            id: SurfaceId::new(),
            nodes: vec![Node {
                kind: NodeKind::Element {
                    tag: "div".to_string(),
                    attrs: String::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
            caret: None,
            pending_caret: None,
        }
    }

    /// Build a region from an HTML fragment; caret at the end
    pub fn from_html(html: &str) -> Self {
        let mut surface = Self::new();
        let root = surface.root;
        surface.append_fragment(root, &parse_fragment(html));
        surface.place_caret_at_end();
        surface
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn caret(&self) -> Option<Position> {
        self.caret
    }

    pub fn set_caret(&mut self, position: Position) {
        self.caret = Some(position);
    }

    /// Caret position waiting for the next flush
    pub fn pending_caret(&self) -> Option<Position> {
        self.pending_caret
    }

    /// Put the caret after the last text leaf (or at the end of the root)
    pub fn place_caret_at_end(&mut self) {
        let last_text = self
            .descendants(self.root)
            .into_iter()
            .filter(|&n| matches!(self.kind(n), NodeKind::Text(_)))
            .last();
        self.caret = Some(match last_text {
            Some(node) => Position::new(node, self.char_len(node)),
            None => Position::new(self.root, self.children(self.root).len()),
        });
    }

    /// Queue a caret move for the next tick
    pub fn queue_caret(&mut self, position: Position) {
        self.pending_caret = Some(position);
    }

    /// Apply the queued caret move, if any
    pub fn flush_pending(&mut self) -> bool {
        match self.pending_caret.take() {
            Some(position) => {
                self.caret = Some(position);
                true
            }
            None => false,
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Insert `child` under `parent` at `index` (clamped)
    fn attach(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Remove a node (and so its subtree) from its parent
    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Create nodes for a fragment, returning the new top-level node ids
    fn build(&mut self, fragment: &[FragmentNode]) -> Vec<NodeId> {
        fragment
            .iter()
            .map(|node| match node {
                FragmentNode::Text(text) => self.alloc(NodeKind::Text(text.clone())),
                FragmentNode::LineBreak => self.alloc(NodeKind::LineBreak),
                FragmentNode::Element {
                    tag,
                    attrs,
                    children,
                } => {
                    let id = self.alloc(NodeKind::Element {
                        tag: tag.clone(),
                        attrs: attrs.clone(),
                    });
                    for (i, child) in self.build(children).into_iter().enumerate() {
                        self.attach(id, i, child);
                    }
                    id
                }
            })
            .collect()
    }

    /// Append fragment nodes as the last children of `parent`
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &[FragmentNode]) -> Vec<NodeId> {
        let ids = self.build(fragment);
        for &id in &ids {
            let end = self.children(parent).len();
            self.attach(parent, end, id);
        }
        ids
    }

    fn index_in_parent(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(node)?;
        let index = self.children(parent).iter().position(|&c| c == node)?;
        Some((parent, index))
    }

    fn char_len(&self, node: NodeId) -> usize {
        match self.kind(node) {
            NodeKind::Text(text) => text.chars().count(),
            _ => 0,
        }
    }

    fn text_mut(&mut self, node: NodeId) -> Option<&mut String> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `node`, nearest first
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            out.push(parent);
            current = self.parent(parent);
        }
        out
    }

    /// True if `node` is the root or hangs off it
    pub fn is_attached(&self, node: NodeId) -> bool {
        node == self.root || self.ancestors(node).contains(&self.root)
    }

    /// Concatenated text of all text leaves under `node`
    pub fn text_content(&self, node: NodeId) -> String {
        match self.kind(node) {
            NodeKind::Text(text) => text.clone(),
            NodeKind::LineBreak => String::new(),
            NodeKind::Element { .. } => self
                .text_leaves(node)
                .into_iter()
                .map(|leaf| self.leaf_text(leaf))
                .collect(),
        }
    }

    /// Nearest block-level element containing `node` (or the root)
    pub fn block_scope(&self, node: NodeId) -> NodeId {
        let mut candidates = Vec::with_capacity(4);
        if matches!(self.kind(node), NodeKind::Element { .. }) {
            candidates.push(node);
        }
        candidates.extend(self.ancestors(node));
        candidates
            .into_iter()
            .find(|&n| match self.kind(n) {
                NodeKind::Element { tag, .. } => n == self.root || BLOCK_TAGS.contains(&tag.as_str()),
                _ => false,
            })
            .unwrap_or(self.root)
    }

    /// Scan scope for the current caret
    pub fn caret_scope(&self) -> Option<NodeId> {
        self.caret.map(|caret| self.block_scope(caret.node))
    }

    /// Delete the content between two boundaries, like a DOM range delete.
    ///
    /// Boundary text nodes are truncated; nodes lying entirely between them
    /// are detached. Returns the collapsed position where content was removed.
    pub fn delete_range(&mut self, start: Position, end: Position) -> Position {
        if start.node == end.node {
            if let Some(text) = self.text_mut(start.node) {
                let from = byte_index(text, start.offset);
                let to = byte_index(text, end.offset);
                text.replace_range(from..to, "");
            }
            return start;
        }

        let order = self.descendants(self.root);
        let start_index = order.iter().position(|&n| n == start.node);
        let end_index = order.iter().position(|&n| n == end.node);
        if let (Some(start_index), Some(end_index)) = (start_index, end_index) {
            let end_ancestors: HashSet<NodeId> = self.ancestors(end.node).into_iter().collect();
            let contained: HashSet<NodeId> = order[start_index + 1..end_index]
                .iter()
                .copied()
                .filter(|n| !end_ancestors.contains(n))
                .collect();
            // Detach only the outermost contained nodes; their subtrees go with them
            let outermost: Vec<NodeId> = contained
                .iter()
                .copied()
                .filter(|&n| self.parent(n).map_or(true, |p| !contained.contains(&p)))
                .collect();
            for node in outermost {
                self.detach(node);
            }
        }

        if let Some(text) = self.text_mut(start.node) {
            let from = byte_index(text, start.offset);
            text.truncate(from);
        }
        if let Some(text) = self.text_mut(end.node) {
            let to = byte_index(text, end.offset);
            text.replace_range(..to, "");
        }
        start
    }

    /// Insert fragment nodes at `at`, splitting a text node if needed.
    ///
    /// Returns the position immediately after the inserted content. That
    /// position is expressed in the parent element, so it stays valid no
    /// matter how many nodes the fragment produced.
    pub fn insert_fragment(&mut self, at: Position, fragment: &[FragmentNode]) -> Position {
        let (parent, index) = match self.kind(at.node) {
            NodeKind::Element { .. } => (at.node, at.offset),
            NodeKind::Text(_) => {
                let Some((parent, index)) = self.index_in_parent(at.node) else {
                    crate::warn!("Insert position is detached, appending to root");
                    let root = self.root;
                    return self.insert_at(root, self.children(root).len(), fragment);
                };
                let tail = match self.text_mut(at.node) {
                    Some(text) => {
                        let split = byte_index(text, at.offset);
                        text.split_off(split)
                    }
                    None => String::new(),
                };
                if !tail.is_empty() {
                    let tail_node = self.alloc(NodeKind::Text(tail));
                    self.attach(parent, index + 1, tail_node);
                }
                (parent, index + 1)
            }
            NodeKind::LineBreak => match self.index_in_parent(at.node) {
                Some((parent, index)) => (parent, index + at.offset.min(1)),
                None => (self.root, self.children(self.root).len()),
            },
        };
        self.insert_at(parent, index, fragment)
    }

    fn insert_at(&mut self, parent: NodeId, index: usize, fragment: &[FragmentNode]) -> Position {
        let index = index.min(self.children(parent).len());
        let ids = self.build(fragment);
        let count = ids.len();
        for (i, id) in ids.into_iter().enumerate() {
            self.attach(parent, index + i, id);
        }
        Position::new(parent, index + count)
    }

    /// Insert typed text at the caret, as a keystroke would
    pub fn type_text(&mut self, typed: &str) {
        if typed.is_empty() {
            return;
        }
        if self.caret.is_none() {
            self.place_caret_at_end();
        }
        let Some(caret) = self.caret else { return };
        let typed_len = typed.chars().count();

        if let Some(text) = self.text_mut(caret.node) {
            let at = byte_index(text, caret.offset);
            text.insert_str(at, typed);
            self.caret = Some(Position::new(caret.node, caret.offset + typed_len));
            return;
        }

        let (parent, index) = match self.kind(caret.node) {
            NodeKind::Element { .. } => (caret.node, caret.offset),
            _ => match self.index_in_parent(caret.node) {
                Some((parent, index)) => (parent, index + caret.offset.min(1)),
                None => (self.root, self.children(self.root).len()),
            },
        };
        // Extend the text node just before the caret rather than fragmenting
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
            .filter(|&n| matches!(self.kind(n), NodeKind::Text(_)));
        let node = match previous {
            Some(node) => {
                if let Some(text) = self.text_mut(node) {
                    text.push_str(typed);
                }
                node
            }
            None => {
                let node = self.alloc(NodeKind::Text(typed.to_string()));
                self.attach(parent, index, node);
                node
            }
        };
        self.caret = Some(Position::new(node, self.char_len(node)));
    }

    /// Text in document order before `position` (line breaks as '\n')
    pub fn text_before(&self, position: Position) -> String {
        let mut out = String::new();
        self.collect_before(self.root, position, &mut out);
        out
    }

    /// Returns true once `position` has been reached
    fn collect_before(&self, node: NodeId, position: Position, out: &mut String) -> bool {
        match self.kind(node) {
            NodeKind::Text(text) => {
                if node == position.node {
                    out.push_str(&text[..byte_index(text, position.offset)]);
                    return true;
                }
                out.push_str(text);
                false
            }
            NodeKind::LineBreak => {
                if node == position.node && position.offset == 0 {
                    return true;
                }
                out.push('\n');
                node == position.node
            }
            NodeKind::Element { .. } => {
                for (i, &child) in self.children(node).iter().enumerate() {
                    if node == position.node && i == position.offset {
                        return true;
                    }
                    if self.collect_before(child, position, out) {
                        return true;
                    }
                }
                node == position.node
            }
        }
    }

    fn to_fragment(&self, node: NodeId) -> FragmentNode {
        match self.kind(node) {
            NodeKind::Text(text) => FragmentNode::Text(text.clone()),
            NodeKind::LineBreak => FragmentNode::LineBreak,
            NodeKind::Element { tag, attrs } => FragmentNode::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: self
                    .children(node)
                    .iter()
                    .map(|&c| self.to_fragment(c))
                    .collect(),
            },
        }
    }

    /// Inner HTML of the region
    pub fn to_html(&self) -> String {
        let nodes: Vec<FragmentNode> = self
            .children(self.root)
            .iter()
            .map(|&c| self.to_fragment(c))
            .collect();
        render_fragment(&nodes)
    }

    /// Region content as plain text
    pub fn plain_text(&self) -> String {
        crate::expansion::markup_to_text(&self.to_html())
    }
}

impl TextTree for StructuredSurface {
    type Node = NodeId;

    fn text_leaves(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| matches!(self.kind(n), NodeKind::Text(_)))
            .collect()
    }

    fn leaf_text(&self, leaf: NodeId) -> &str {
        match self.kind(leaf) {
            NodeKind::Text(text) => text,
            _ => "",
        }
    }
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
