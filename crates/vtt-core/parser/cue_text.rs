//! Cue-text tree builder
//!
//! Consumes the token stream of one payload and assembles the markup tree.
//! Nodes live in an index arena while the payload is scanned; the stack of
//! open elements holds arena indices, so no node ever points at its parent.
//! The owned [`CueTree`] is materialized once the payload is exhausted.

use alloc::{string::String, vec, vec::Vec};

use super::{
    ast::{CueTree, MarkupNode, ObjectNode, TagName, Timestamp},
    errors::ErrorKind,
    session::ParseSession,
    timing::parse_timestamp,
    ParseMode,
};
use crate::tokenizer::{CueTextTokenizer, CueToken, EntityMap, StartTag};

/// Index of the implicit root in the arena
const ROOT: usize = 0;

/// Most elements that may be open at once
///
/// Start tags past this depth are reported and dropped together with their
/// end tags, which keeps every tree shallow enough to walk recursively.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug)]
enum ArenaKind {
    Root,
    Text(String),
    Object {
        name: TagName,
        classes: Vec<String>,
        annotation: Option<String>,
    },
    Timestamp(Timestamp),
}

#[derive(Debug)]
struct ArenaNode {
    kind: ArenaKind,
    children: Vec<usize>,
}

/// Builds the markup tree for one cue payload
pub struct CueTextBuilder<'s> {
    session: &'s mut ParseSession,
    mode: ParseMode,
    start: Timestamp,
    end: Timestamp,
    nodes: Vec<ArenaNode>,
    /// Open elements, innermost last; the root is implicit
    open: Vec<usize>,
    /// Start tags dropped past the depth limit and not yet closed
    dropped: usize,
    last_timestamp: Option<Timestamp>,
    line: usize,
}

impl<'s> CueTextBuilder<'s> {
    /// Create a builder for a cue spanning `start..end`
    pub fn new(
        session: &'s mut ParseSession,
        mode: ParseMode,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        let line = session.line();
        Self {
            session,
            mode,
            start,
            end,
            nodes: vec![ArenaNode {
                kind: ArenaKind::Root,
                children: Vec::new(),
            }],
            open: Vec::new(),
            dropped: 0,
            last_timestamp: None,
            line,
        }
    }

    /// Tokenize `text` and build its tree
    ///
    /// `first_line` is the document line of the first payload line.
    pub fn build(mut self, text: &str, entities: &EntityMap, first_line: usize) -> CueTree {
        let was_muted = self.session.mute(self.session.is_muted() || self.mode == ParseMode::Metadata);

        let mut tokenizer = CueTextTokenizer::new(text, entities).with_base_line(first_line);
        self.line = first_line;
        while let Some(token) = tokenizer.next_token() {
            self.session.absorb(tokenizer.take_issues());
            self.line = tokenizer.line();
            self.handle(token);
        }

        self.close_remaining();
        self.session.mute(was_muted);
        self.finish()
    }

    fn handle(&mut self, token: CueToken) {
        match token {
            CueToken::Text(text) => self.append(ArenaKind::Text(text)),
            CueToken::StartTag(tag) => self.start_tag(tag),
            CueToken::EndTag(name) => self.end_tag(&name),
            CueToken::Timestamp(text) => self.timestamp(&text),
        }
    }

    fn start_tag(&mut self, tag: StartTag) {
        if self.mode == ParseMode::Chapters {
            self.report(ErrorKind::StartTagInChapters);
        }

        let name = TagName::from_tag(&tag.name);
        if !tag.annotation.is_empty() && !name.is_some_and(TagName::takes_annotation) {
            self.report(ErrorKind::AnnotationNotAllowed);
        }

        let annotation = (!tag.annotation.is_empty()).then_some(tag.annotation);
        match name {
            Some(
                name @ (TagName::Class
                | TagName::Italic
                | TagName::Bold
                | TagName::Underline
                | TagName::Ruby),
            ) => self.attach(name, tag.classes, None),
            Some(TagName::RubyText) if self.current_name() == Some(TagName::Ruby) => {
                self.attach(TagName::RubyText, tag.classes, None);
            }
            Some(TagName::Voice) => {
                if self.in_scope(TagName::Voice) {
                    self.report(ErrorKind::NestedVoice);
                }
                let missing = annotation.is_none();
                self.attach(TagName::Voice, tag.classes, annotation);
                if missing {
                    self.report(ErrorKind::VoiceWithoutAnnotation);
                }
            }
            Some(TagName::Lang) => self.attach(TagName::Lang, tag.classes, annotation),
            Some(TagName::RubyText) | None => self.report(ErrorKind::IncorrectStartTag),
        }
    }

    fn end_tag(&mut self, name: &str) {
        if self.mode == ParseMode::Chapters {
            self.report(ErrorKind::EndTagInChapters);
        }

        if self.dropped > 0 {
            self.dropped -= 1;
            return;
        }

        let current = self.current_name();
        if current.map(TagName::as_str) == Some(name) {
            self.open.pop();
        } else if name == TagName::Ruby.as_str() && current == Some(TagName::RubyText) {
            self.open.pop();
            self.open.pop();
        } else {
            self.report(ErrorKind::IncorrectEndTag);
        }
    }

    fn timestamp(&mut self, text: &str) {
        if self.mode == ParseMode::Chapters {
            self.report(ErrorKind::TimestampInChapters);
        }

        let parsed = parse_timestamp(text);
        let line = self.line;
        self.session.absorb(parsed.issues.into_iter().map(|mut issue| {
            issue.line = line;
            issue.column = None;
            issue
        }));

        let Some(timestamp) = parsed.value else {
            return;
        };
        if timestamp <= self.start || timestamp >= self.end {
            self.report(ErrorKind::TimestampOutsideCue);
        }
        if self.last_timestamp.is_some_and(|last| last >= timestamp) {
            self.report(ErrorKind::TimestampNotIncreasing);
        }
        self.append(ArenaKind::Timestamp(timestamp));
        self.last_timestamp = Some(timestamp);
    }

    fn close_remaining(&mut self) {
        while let Some(index) = self.open.pop() {
            if self.name_of(index) != Some(TagName::Voice) {
                self.report(ErrorKind::MissingEndTag);
            }
        }
    }

    fn current(&self) -> usize {
        self.open.last().copied().unwrap_or(ROOT)
    }

    fn name_of(&self, index: usize) -> Option<TagName> {
        match self.nodes.get(index)?.kind {
            ArenaKind::Object { name, .. } => Some(name),
            _ => None,
        }
    }

    fn current_name(&self) -> Option<TagName> {
        self.name_of(self.current())
    }

    fn in_scope(&self, name: TagName) -> bool {
        self.open
            .iter()
            .any(|&index| self.name_of(index) == Some(name))
    }

    fn push_node(&mut self, kind: ArenaKind) -> usize {
        let index = self.nodes.len();
        let parent = self.current();
        self.nodes.push(ArenaNode {
            kind,
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(index);
        }
        index
    }

    fn append(&mut self, kind: ArenaKind) {
        self.push_node(kind);
    }

    fn attach(&mut self, name: TagName, classes: Vec<String>, annotation: Option<String>) {
        if self.open.len() >= MAX_NESTING_DEPTH {
            self.report(ErrorKind::NestingTooDeep);
            self.dropped += 1;
            return;
        }
        let index = self.push_node(ArenaKind::Object {
            name,
            classes,
            annotation,
        });
        self.open.push(index);
    }

    fn report(&mut self, kind: ErrorKind) {
        self.session.report_at(self.line, None, kind);
    }

    /// Turn the arena into an owned tree
    ///
    /// Children always have higher indices than their parent, so building
    /// from the last index down finds every child already built.
    fn finish(self) -> CueTree {
        let mut built: Vec<Option<MarkupNode>> = Vec::new();
        built.resize_with(self.nodes.len(), || None);
        let mut root_children = Vec::new();

        for (index, node) in self.nodes.into_iter().enumerate().rev() {
            let children: Vec<MarkupNode> = node
                .children
                .iter()
                .filter_map(|&child| built.get_mut(child).and_then(Option::take))
                .collect();

            let built_node = match node.kind {
                ArenaKind::Root => {
                    root_children = children;
                    continue;
                }
                ArenaKind::Text(text) => MarkupNode::Text(text),
                ArenaKind::Timestamp(timestamp) => MarkupNode::Timestamp(timestamp),
                ArenaKind::Object {
                    name,
                    classes,
                    annotation,
                } => MarkupNode::Object(ObjectNode {
                    name,
                    classes,
                    annotation,
                    children,
                }),
            };
            if let Some(slot) = built.get_mut(index) {
                *slot = Some(built_node);
            }
        }

        CueTree {
            children: root_children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ParseError;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    fn build(text: &str, mode: ParseMode) -> (CueTree, Vec<ParseError>) {
        let mut session = ParseSession::new();
        let entities = EntityMap::default();
        let tree = CueTextBuilder::new(
            &mut session,
            mode,
            Timestamp::from_millis(1_000),
            Timestamp::from_millis(5_000),
        )
        .build(text, &entities, 1);
        (tree, session.into_issues())
    }

    fn kinds(issues: &[ParseError]) -> Vec<ErrorKind> {
        issues.iter().map(|issue| issue.kind).collect()
    }

    fn object(name: TagName, children: Vec<MarkupNode>) -> MarkupNode {
        MarkupNode::Object(ObjectNode {
            children,
            ..ObjectNode::new(name)
        })
    }

    fn text(value: &str) -> MarkupNode {
        MarkupNode::Text(value.to_string())
    }

    #[test]
    fn nested_elements() {
        let (tree, issues) = build("<b>bold <i>both</i></b> plain", ParseMode::Standard);
        assert!(issues.is_empty());
        assert_eq!(
            tree.children,
            vec![
                object(
                    TagName::Bold,
                    vec![text("bold "), object(TagName::Italic, vec![text("both")])]
                ),
                text(" plain"),
            ]
        );
    }

    #[test]
    fn ruby_text_only_inside_ruby() {
        let (tree, issues) = build("<ruby>漢<rt>kan</ruby>", ParseMode::Standard);
        assert!(issues.is_empty());
        assert_eq!(
            tree.children,
            vec![object(
                TagName::Ruby,
                vec![text("漢"), object(TagName::RubyText, vec![text("kan")])]
            )]
        );

        let (_, issues) = build("<rt>x</rt>", ParseMode::Standard);
        assert_eq!(
            kinds(&issues),
            [ErrorKind::IncorrectStartTag, ErrorKind::IncorrectEndTag]
        );
    }

    #[test]
    fn nested_voice_is_reported_but_opened() {
        let (tree, issues) = build("<v A>one <v B>two", ParseMode::Standard);
        assert_eq!(kinds(&issues), [ErrorKind::NestedVoice]);

        let MarkupNode::Object(outer) = &tree.children[0] else {
            panic!("expected voice element");
        };
        assert_eq!(outer.annotation.as_deref(), Some("A"));
        assert!(matches!(
            &outer.children[1],
            MarkupNode::Object(inner) if inner.annotation.as_deref() == Some("B")
        ));
    }

    #[test]
    fn voice_requires_annotation() {
        let (_, issues) = build("<v>hi</v>", ParseMode::Standard);
        assert_eq!(kinds(&issues), [ErrorKind::VoiceWithoutAnnotation]);
    }

    #[test]
    fn annotation_only_on_voice_and_lang() {
        let (tree, issues) = build("<b loud>x</b><lang en>y</lang>", ParseMode::Standard);
        assert_eq!(kinds(&issues), [ErrorKind::AnnotationNotAllowed]);
        let MarkupNode::Object(lang) = &tree.children[1] else {
            panic!("expected lang element");
        };
        assert_eq!(lang.annotation.as_deref(), Some("en"));
    }

    #[test]
    fn unclosed_elements_except_voice() {
        let (_, issues) = build("<v Esme>hi", ParseMode::Standard);
        assert!(issues.is_empty());

        let (_, issues) = build("<b><i>x", ParseMode::Standard);
        assert_eq!(
            kinds(&issues),
            [ErrorKind::MissingEndTag, ErrorKind::MissingEndTag]
        );
    }

    #[test]
    fn timestamps_checked_against_cue_and_each_other() {
        let (tree, issues) = build(
            "a<00:02.000>b<00:01.500>c<00:06.000>d<00:03.0>",
            ParseMode::Standard,
        );
        assert_eq!(
            kinds(&issues),
            [
                ErrorKind::TimestampNotIncreasing,
                ErrorKind::TimestampOutsideCue,
                ErrorKind::MillisecondsNotThreeDigits,
            ]
        );
        let timestamps = tree
            .children
            .iter()
            .filter(|node| matches!(node, MarkupNode::Timestamp(_)))
            .count();
        assert_eq!(timestamps, 3);
        assert_eq!(tree.plain_text(), "abcd");
    }

    #[test]
    fn chapters_mode_reports_markup() {
        let (tree, issues) = build("<b>Intro</b><00:02.000>", ParseMode::Chapters);
        assert_eq!(
            kinds(&issues),
            [
                ErrorKind::StartTagInChapters,
                ErrorKind::EndTagInChapters,
                ErrorKind::TimestampInChapters,
            ]
        );
        assert_eq!(tree.plain_text(), "Intro");
    }

    #[test]
    fn metadata_mode_is_silent_with_same_tree() {
        let source = "<v>&bogus; <b>x";
        let (standard, standard_issues) = build(source, ParseMode::Standard);
        let (metadata, metadata_issues) = build(source, ParseMode::Metadata);
        assert!(!standard_issues.is_empty());
        assert!(metadata_issues.is_empty());
        assert_eq!(standard, metadata);
    }

    #[test]
    fn incorrect_end_tag_keeps_element_open() {
        let (tree, issues) = build("<i>a</b>c</i>", ParseMode::Standard);
        assert_eq!(kinds(&issues), [ErrorKind::IncorrectEndTag]);
        assert_eq!(
            tree.children,
            vec![object(TagName::Italic, vec![text("a"), text("c")])]
        );
    }
}
