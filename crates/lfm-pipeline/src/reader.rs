//! Bridges pulldown-cmark events into the document tree.
//!
//! The registered syntax extensions decide which pulldown-cmark `Options`
//! get enabled; the event stream is then folded into nodes with a frame
//! stack (Start pushes, End pops and attaches to the parent frame).
//! Parsing is infallible: pulldown-cmark accepts any input.

use lfm_ast::node::{
    AlignKind, Blockquote, Code, Delete, Emphasis, FootnoteDefinition, FootnoteReference, Heading,
    Html, Image, InlineCode, Link, List, ListItem, Node, Paragraph, Root, Strong, Table, TableCell,
    TableRow, Text,
};
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};

use crate::autolink;
use crate::data::PipelineData;
use crate::extension::{FromSyntaxExtension, SyntaxExtension};

/// Parse markdown source into a tree, honoring the registered extensions.
pub fn parse(source: &str, data: &PipelineData) -> Node {
    let options = options_for(data.syntax());
    let mut builder = TreeBuilder::new();

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(_) => builder.finish_frame(),
            Event::Text(text) => builder.text(&text),
            Event::Code(code) => builder.attach(Node::InlineCode(InlineCode {
                value: code.to_string(),
            })),
            Event::Html(html) | Event::InlineHtml(html) => builder.attach(Node::Html(Html {
                value: html.to_string(),
            })),
            Event::FootnoteReference(identifier) => {
                builder.attach(Node::FootnoteReference(FootnoteReference {
                    identifier: identifier.to_string(),
                }))
            }
            Event::SoftBreak => builder.text("\n"),
            Event::HardBreak => builder.attach(Node::Break),
            Event::Rule => builder.attach(Node::ThematicBreak),
            Event::TaskListMarker(checked) => builder.task_marker(checked),
            _ => {}
        }
    }

    let mut tree = builder.into_tree();

    if data
        .from_syntax()
        .contains(&FromSyntaxExtension::GfmAutolinkLiteral)
    {
        autolink::link_literals(&mut tree);
    }

    tree
}

/// Map registered syntax extensions to pulldown-cmark options.
///
/// Autolink literals have no pulldown flag; they are handled by the
/// post-parse pass instead.
fn options_for(syntax: &[SyntaxExtension]) -> Options {
    let mut options = Options::empty();
    for extension in syntax {
        match extension {
            SyntaxExtension::GfmFootnote => options.insert(Options::ENABLE_FOOTNOTES),
            SyntaxExtension::GfmStrikethrough(_) => options.insert(Options::ENABLE_STRIKETHROUGH),
            SyntaxExtension::GfmTable => options.insert(Options::ENABLE_TABLES),
            SyntaxExtension::GfmAutolinkLiteral => {}
        }
    }
    options
}

/// An open container on the builder stack.
enum Frame {
    Root { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    Heading { depth: u8, children: Vec<Node> },
    Blockquote { children: Vec<Node> },
    List { ordered: bool, start: Option<u64>, children: Vec<Node> },
    Item { checked: Option<bool>, children: Vec<Node> },
    CodeBlock { lang: Option<String>, value: String },
    FootnoteDefinition { identifier: String, children: Vec<Node> },
    Table { align: Vec<AlignKind>, children: Vec<Node> },
    Row { children: Vec<Node> },
    Cell { children: Vec<Node> },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Strikethrough { children: Vec<Node> },
    Link { url: String, title: Option<String>, children: Vec<Node> },
    Image { url: String, title: Option<String>, alt: String },
    /// Wrapper tags with no node of their own; children pass through.
    Transparent { children: Vec<Node> },
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root {
                children: Vec::new(),
            }],
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph {
                children: Vec::new(),
            },
            Tag::Heading { level, .. } => Frame::Heading {
                depth: level as u8,
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::Blockquote {
                children: Vec::new(),
            },
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|token| !token.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                Frame::CodeBlock {
                    lang,
                    value: String::new(),
                }
            }
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start,
                children: Vec::new(),
            },
            Tag::Item => Frame::Item {
                checked: None,
                children: Vec::new(),
            },
            Tag::FootnoteDefinition(identifier) => Frame::FootnoteDefinition {
                identifier: identifier.to_string(),
                children: Vec::new(),
            },
            Tag::Table(alignments) => Frame::Table {
                align: alignments.iter().map(align_kind).collect(),
                children: Vec::new(),
            },
            // The head row comes first, so it lands as the first TableRow.
            Tag::TableHead | Tag::TableRow => Frame::Row {
                children: Vec::new(),
            },
            Tag::TableCell => Frame::Cell {
                children: Vec::new(),
            },
            Tag::Emphasis => Frame::Emphasis {
                children: Vec::new(),
            },
            Tag::Strong => Frame::Strong {
                children: Vec::new(),
            },
            Tag::Strikethrough => Frame::Strikethrough {
                children: Vec::new(),
            },
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(&title),
                children: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.to_string(),
                title: non_empty(&title),
                alt: String::new(),
            },
            _ => Frame::Transparent {
                children: Vec::new(),
            },
        };
        self.stack.push(frame);
    }

    /// Close the current frame and attach its node to the parent.
    fn finish_frame(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if self.stack.is_empty() {
            // Unbalanced End; restore so the tree still has a root.
            self.stack.push(frame);
            return;
        }
        match frame {
            Frame::Root { children } => self.attach(Node::Root(Root { children })),
            Frame::Paragraph { children } => {
                self.attach(Node::Paragraph(Paragraph { children }))
            }
            Frame::Heading { depth, children } => {
                self.attach(Node::Heading(Heading { depth, children }))
            }
            Frame::Blockquote { children } => {
                self.attach(Node::Blockquote(Blockquote { children }))
            }
            Frame::List {
                ordered,
                start,
                children,
            } => self.attach(Node::List(List {
                ordered,
                start,
                children,
            })),
            Frame::Item { checked, children } => {
                self.attach(Node::ListItem(ListItem { checked, children }))
            }
            Frame::CodeBlock { lang, mut value } => {
                if value.ends_with('\n') {
                    value.pop();
                }
                self.attach(Node::Code(Code { lang, value }));
            }
            Frame::FootnoteDefinition {
                identifier,
                children,
            } => self.attach(Node::FootnoteDefinition(FootnoteDefinition {
                identifier,
                children,
            })),
            Frame::Table { align, children } => {
                self.attach(Node::Table(Table { align, children }))
            }
            Frame::Row { children } => self.attach(Node::TableRow(TableRow { children })),
            Frame::Cell { children } => self.attach(Node::TableCell(TableCell { children })),
            Frame::Emphasis { children } => self.attach(Node::Emphasis(Emphasis { children })),
            Frame::Strong { children } => self.attach(Node::Strong(Strong { children })),
            Frame::Strikethrough { children } => self.attach(Node::Delete(Delete { children })),
            Frame::Link {
                url,
                title,
                children,
            } => self.attach(Node::Link(Link {
                url,
                title,
                children,
            })),
            Frame::Image { url, title, alt } => {
                self.attach(Node::Image(Image { url, title, alt }))
            }
            Frame::Transparent { children } => {
                for child in children {
                    self.attach(child);
                }
            }
        }
    }

    /// Attach a finished node to the current frame.
    fn attach(&mut self, node: Node) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        match top {
            Frame::CodeBlock { value, .. } => flatten_text(&node, value),
            Frame::Image { alt, .. } => flatten_text(&node, alt),
            Frame::Root { children }
            | Frame::Paragraph { children }
            | Frame::Heading { children, .. }
            | Frame::Blockquote { children }
            | Frame::List { children, .. }
            | Frame::Item { children, .. }
            | Frame::FootnoteDefinition { children, .. }
            | Frame::Table { children, .. }
            | Frame::Row { children }
            | Frame::Cell { children }
            | Frame::Emphasis { children }
            | Frame::Strong { children }
            | Frame::Strikethrough { children }
            | Frame::Link { children, .. }
            | Frame::Transparent { children } => push_merged(children, node),
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { value, .. }) => value.push_str(text),
            Some(Frame::Image { alt, .. }) => alt.push_str(text),
            _ => self.attach(Node::Text(Text {
                value: text.to_string(),
            })),
        }
    }

    fn task_marker(&mut self, checked: bool) {
        if let Some(Frame::Item {
            checked: slot, ..
        }) = self.stack.last_mut()
        {
            *slot = Some(checked);
        }
    }

    fn into_tree(mut self) -> Node {
        while self.stack.len() > 1 {
            self.finish_frame();
        }
        match self.stack.pop() {
            Some(Frame::Root { children }) => Node::Root(Root { children }),
            _ => Node::Root(Root {
                children: Vec::new(),
            }),
        }
    }
}

/// Append `node` to `children`, merging adjacent text nodes.
///
/// pulldown-cmark may split a run of text into several events; the tree
/// keeps each run as a single node so that adjacency checks downstream see
/// the full preceding text.
fn push_merged(children: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(last)), Node::Text(text)) = (children.last_mut(), &node) {
        last.value.push_str(&text.value);
        return;
    }
    children.push(node);
}

/// Collect the plain-text content of `node` into `out` (for image alt text).
fn flatten_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        Node::Break => out.push(' '),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    flatten_text(child, out);
                }
            }
        }
    }
}

fn align_kind(alignment: &Alignment) -> AlignKind {
    match alignment {
        Alignment::None => AlignKind::None,
        Alignment::Left => AlignKind::Left,
        Alignment::Center => AlignKind::Center,
        Alignment::Right => AlignKind::Right,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
