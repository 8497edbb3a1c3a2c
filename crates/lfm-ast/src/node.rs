//! Node kinds of the document tree.
//!
//! The tree is an ordered, rooted structure; container kinds own their
//! children and insertion order is significant. Serialization is internally
//! tagged by a `type` field with camelCase kind names, so a dumped tree
//! reads like an mdast document.

use serde::{Deserialize, Serialize};

/// A node in the document tree.
///
/// The union is closed: downstream consumers match exhaustively instead of
/// comparing kind strings at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),
    Paragraph(Paragraph),
    Heading(Heading),
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    Delete(Delete),
    InlineCode(InlineCode),
    Code(Code),
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    Link(Link),
    Image(Image),
    Break,
    ThematicBreak,
    Html(Html),
    FootnoteReference(FootnoteReference),
    FootnoteDefinition(FootnoteDefinition),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    UserMention(UserMention),
    BilibiliVideo(BilibiliVideo),
}

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// A paragraph of phrasing content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// A heading with depth 1 through 6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

/// Literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Emphasized (`*x*`) phrasing content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong (`**x**`) phrasing content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Struck-through (`~~x~~`) phrasing content (GFM strikethrough).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub children: Vec<Node>,
}

/// Inline code span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

/// A fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub lang: Option<String>,
    pub value: String,
}

/// A block quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    pub children: Vec<Node>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u64>,
    pub children: Vec<Node>,
}

/// A list item; `checked` is set for GFM task-list items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub children: Vec<Node>,
}

/// A hyperlink with phrasing children as its display content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// An image reference; `alt` is the flattened alternative text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

/// A block or inline run of raw HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

/// A footnote reference (`[^id]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootnoteReference {
    pub identifier: String,
}

/// A footnote definition (`[^id]: ...`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootnoteDefinition {
    pub identifier: String,
    pub children: Vec<Node>,
}

/// A GFM table. The first row is the header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub align: Vec<AlignKind>,
    pub children: Vec<Node>,
}

/// A table row of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<Node>,
}

/// A user mention derived from a link of the form `@[name](/user/123)`.
///
/// Carries the numeric uid and the original link's display children. The
/// preceding `@` stays in the adjacent text node; it is not folded in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMention {
    pub uid: u64,
    pub children: Vec<Node>,
}

/// An embedded Bilibili video derived from a `bilibili:` image.
///
/// `video_id` is normalized: legacy numeric ids get an `av` prefix, modern
/// `BV`-style ids pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BilibiliVideo {
    pub video_id: String,
}

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignKind {
    None,
    Left,
    Center,
    Right,
}

impl Node {
    /// Literal text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    /// Root node over the given children.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root { children })
    }

    /// Paragraph over the given children.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    /// Heading at the given depth.
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { depth, children })
    }

    /// Link without a title.
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }

    /// Image without a title or alt text.
    pub fn image(url: impl Into<String>) -> Self {
        Node::Image(Image {
            url: url.into(),
            title: None,
            alt: String::new(),
        })
    }

    /// Borrow this node's children, if it is a container kind.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::FootnoteDefinition(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::UserMention(n) => Some(&n.children),
            Node::Text(_)
            | Node::InlineCode(_)
            | Node::Code(_)
            | Node::Image(_)
            | Node::Break
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::FootnoteReference(_)
            | Node::BilibiliVideo(_) => None,
        }
    }

    /// Mutably borrow this node's children, if it is a container kind.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::FootnoteDefinition(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::UserMention(n) => Some(&mut n.children),
            Node::Text(_)
            | Node::InlineCode(_)
            | Node::Code(_)
            | Node::Image(_)
            | Node::Break
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::FootnoteReference(_)
            | Node::BilibiliVideo(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_type_tags() {
        let node = Node::paragraph(vec![
            Node::text("Hi @"),
            Node::UserMention(UserMention {
                uid: 42,
                children: vec![Node::text("bob")],
            }),
        ]);

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["children"][0]["type"], "text");
        assert_eq!(json["children"][1]["type"], "userMention");
        assert_eq!(json["children"][1]["uid"], 42);
    }

    #[test]
    fn video_id_uses_camel_case_key() {
        let node = Node::BilibiliVideo(BilibiliVideo {
            video_id: "av123".to_string(),
        });

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "bilibiliVideo");
        assert_eq!(json["videoId"], "av123");
    }

    #[test]
    fn round_trips_through_json() {
        let node = Node::root(vec![Node::heading(2, vec![Node::text("Title")])]);

        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();

        assert_eq!(back, node);
    }

    #[test]
    fn leaves_have_no_children() {
        assert!(Node::text("x").children().is_none());
        assert!(Node::image("a.png").children().is_none());
        assert!(Node::Break.children().is_none());
    }

    #[test]
    fn containers_expose_children() {
        let mut node = Node::paragraph(vec![Node::text("x")]);

        assert_eq!(node.children().unwrap().len(), 1);
        node.children_mut().unwrap().push(Node::text("y"));
        assert_eq!(node.children().unwrap().len(), 2);
    }
}
