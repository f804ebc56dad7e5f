// Replacers - swap a located trigger for its resolved content
//
// `locate_range` is the ordered-leaf walk used by rich surfaces. It only
// needs the text of each leaf in document order, so it works over any tree
// implementing `TextTree`.

mod flat;
mod structured;

pub use flat::replace_flat;
pub use structured::replace_structured;

/// A tree whose text lives in ordered leaves
pub trait TextTree {
    type Node: Copy + Eq + std::fmt::Debug;

    /// Text-bearing leaves under `scope`, in document order
    fn text_leaves(&self, scope: Self::Node) -> Vec<Self::Node>;

    /// Text of one leaf
    fn leaf_text(&self, leaf: Self::Node) -> &str;
}

/// Contiguous text range across leaves; offsets are char offsets in the leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange<N> {
    pub start_leaf: N,
    pub start_offset: usize,
    pub end_leaf: N,
    pub end_offset: usize,
}

/// Find the first occurrence of `needle` under `scope`.
///
/// Leaf text is accumulated left to right until `needle` appears as a
/// substring. The range starts in the leaf holding the needle's first char
/// and ends in the first leaf where the accumulated length reaches the
/// needle's end, so a needle split across several leaves is found.
pub fn locate_range<T: TextTree>(
    tree: &T,
    scope: T::Node,
    needle: &str,
) -> Option<TextRange<T::Node>> {
    if needle.is_empty() {
        return None;
    }

    let leaves = tree.text_leaves(scope);
    let mut accumulated = String::new();
    let mut last_needed = None;
    for (i, &leaf) in leaves.iter().enumerate() {
        accumulated.push_str(tree.leaf_text(leaf));
        if accumulated.contains(needle) {
            last_needed = Some(i);
            break;
        }
    }
    let last_needed = last_needed?;

    let byte_start = accumulated.find(needle)?;
    let start = accumulated[..byte_start].chars().count();
    let end = start + needle.chars().count();

    let mut consumed = 0;
    let mut start_at = None;
    for &leaf in &leaves[..=last_needed] {
        let len = tree.leaf_text(leaf).chars().count();
        if start_at.is_none() && start < consumed + len {
            start_at = Some((leaf, start - consumed));
        }
        if let Some((start_leaf, start_offset)) = start_at {
            if end <= consumed + len {
                return Some(TextRange {
                    start_leaf,
                    start_offset,
                    end_leaf: leaf,
                    end_offset: end - consumed,
                });
            }
        }
        consumed += len;
    }
    None
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
