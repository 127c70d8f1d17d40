//! Markup tree built from cue payload text
//!
//! The builder assembles nodes in an index arena and hands the caller an
//! owned [`CueTree`] with plain child lists, so the tree has no parent links
//! and is freely cloneable and sendable.

use alloc::{string::String, vec::Vec};
use core::fmt;

use super::timestamp::Timestamp;

/// Element names recognized in cue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagName {
    /// `<c>` class span
    Class,
    /// `<i>` italics
    Italic,
    /// `<b>` bold
    Bold,
    /// `<u>` underline
    Underline,
    /// `<ruby>` ruby container
    Ruby,
    /// `<rt>` ruby text, only directly inside `<ruby>`
    RubyText,
    /// `<v>` voice span, annotated with the speaker
    Voice,
    /// `<lang>` language span, annotated with the language tag
    Lang,
}

impl TagName {
    /// Look up a tag name as written in cue text
    #[must_use]
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "c" => Some(Self::Class),
            "i" => Some(Self::Italic),
            "b" => Some(Self::Bold),
            "u" => Some(Self::Underline),
            "ruby" => Some(Self::Ruby),
            "rt" => Some(Self::RubyText),
            "v" => Some(Self::Voice),
            "lang" => Some(Self::Lang),
            _ => None,
        }
    }

    /// Tag name as written in cue text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "c",
            Self::Italic => "i",
            Self::Bold => "b",
            Self::Underline => "u",
            Self::Ruby => "ruby",
            Self::RubyText => "rt",
            Self::Voice => "v",
            Self::Lang => "lang",
        }
    }

    /// Check if the element carries an annotation
    #[must_use]
    pub const fn takes_annotation(self) -> bool {
        matches!(self, Self::Voice | Self::Lang)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element node with its children
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectNode {
    /// Element name
    pub name: TagName,

    /// Classes from `.class` suffixes, in source order
    pub classes: Vec<String>,

    /// Speaker for `<v>`, language for `<lang>`
    pub annotation: Option<String>,

    /// Child nodes in source order
    pub children: Vec<MarkupNode>,
}

impl ObjectNode {
    /// Create an element without classes, annotation or children
    #[must_use]
    pub const fn new(name: TagName) -> Self {
        Self {
            name,
            classes: Vec::new(),
            annotation: None,
            children: Vec::new(),
        }
    }
}

/// Node of a cue markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkupNode {
    /// Text with escapes already resolved
    Text(String),
    /// Element such as `<c.yellow>` or `<v Esme>`
    Object(ObjectNode),
    /// In-cue timestamp such as `<00:01.500>`
    Timestamp(Timestamp),
}

impl MarkupNode {
    /// Child nodes, empty for leaves
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Object(node) => &node.children,
            Self::Text(_) | Self::Timestamp(_) => &[],
        }
    }
}

/// Root of a parsed cue payload
///
/// # Examples
///
/// ```rust
/// use vtt_core::parser::ast::{MarkupNode, TagName};
///
/// let doc = vtt_core::parse("WEBVTT\n\n00:01.000 --> 00:02.000\n<b>bold</b> text\n");
/// let tree = &doc.cues()[0].tree;
///
/// assert_eq!(tree.plain_text(), "bold text");
/// assert!(matches!(&tree.children[0], MarkupNode::Object(node) if node.name == TagName::Bold));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueTree {
    /// Top-level nodes in source order
    pub children: Vec<MarkupNode>,
}

impl CueTree {
    /// Check if the payload produced no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of every text node, markup and timestamps removed
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in self.nodes() {
            if let MarkupNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Count nodes in the whole tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Every node in document order, depth first
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Depth-first iterator over a [`CueTree`]
///
/// Keeps pending nodes on a heap stack instead of recursing.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<&'a MarkupNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a MarkupNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    fn sample_tree() -> CueTree {
        CueTree {
            children: vec![
                MarkupNode::Object(ObjectNode {
                    name: TagName::Voice,
                    classes: vec![],
                    annotation: Some("Esme".to_string()),
                    children: vec![
                        MarkupNode::Text("Hi ".to_string()),
                        MarkupNode::Timestamp(Timestamp::from_millis(1_500)),
                        MarkupNode::Object(ObjectNode {
                            children: vec![MarkupNode::Text("there".to_string())],
                            ..ObjectNode::new(TagName::Italic)
                        }),
                    ],
                }),
                MarkupNode::Text("!".to_string()),
            ],
        }
    }

    #[test]
    fn nodes_walk_depth_first() {
        let tree = sample_tree();
        let kinds: Vec<&str> = tree
            .nodes()
            .map(|node| match node {
                MarkupNode::Text(text) => text.as_str(),
                MarkupNode::Object(object) => object.name.as_str(),
                MarkupNode::Timestamp(_) => "ts",
            })
            .collect();
        assert_eq!(kinds, ["v", "Hi ", "ts", "i", "there", "!"]);
    }

    #[test]
    fn plain_text_skips_markup_and_timestamps() {
        assert_eq!(sample_tree().plain_text(), "Hi there!");
    }

    #[test]
    fn node_count_includes_nested_nodes() {
        assert_eq!(sample_tree().node_count(), 6);
        assert_eq!(CueTree::default().node_count(), 0);
    }

    #[test]
    fn tag_names_roundtrip() {
        for name in ["c", "i", "b", "u", "ruby", "rt", "v", "lang"] {
            let tag = TagName::from_tag(name).unwrap();
            assert_eq!(tag.as_str(), name);
        }
        assert_eq!(TagName::from_tag("span"), None);
        assert!(TagName::Lang.takes_annotation());
        assert!(!TagName::Ruby.takes_annotation());
    }
}
