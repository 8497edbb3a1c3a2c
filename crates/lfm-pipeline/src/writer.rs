//! Serializes a document tree back to markdown.
//!
//! GFM constructs are only serialized when their to-syntax extension is
//! registered; hitting a `delete`, table, or footnote node without one is
//! an error rather than silently emitting syntax the pipeline was never
//! configured for. With the autolink-literal extension registered, links
//! that are literal autolinks come out as bare URLs instead of bracket
//! syntax. The flavor's derived kinds serialize back to their source forms
//! (`[name](/user/123)`, `![](bilibili:...)`).

use lfm_ast::node::{AlignKind, List, Node, Table};

use crate::data::PipelineData;
use crate::extension::ToSyntaxExtension;

/// Errors raised while serializing a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("cannot serialize `{0}` nodes: to-syntax extension not registered")]
    MissingExtension(&'static str),
}

/// Serialize `tree` to markdown, honoring the registered to-syntax
/// extensions.
pub fn to_markdown(tree: &Node, data: &PipelineData) -> Result<String, WriteError> {
    let writer = Writer::new(data);
    let mut out = writer.block(tree)?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

struct Writer {
    strikethrough: bool,
    table: bool,
    footnote: bool,
    autolink: bool,
}

impl Writer {
    fn new(data: &PipelineData) -> Self {
        let registered =
            |ext: ToSyntaxExtension| data.to_syntax().contains(&ext);
        Self {
            strikethrough: registered(ToSyntaxExtension::GfmStrikethrough),
            table: registered(ToSyntaxExtension::GfmTable),
            footnote: registered(ToSyntaxExtension::GfmFootnote),
            autolink: registered(ToSyntaxExtension::GfmAutolinkLiteral),
        }
    }

    fn blocks(&self, nodes: &[Node]) -> Result<String, WriteError> {
        let rendered = nodes
            .iter()
            .map(|node| self.block(node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join("\n\n"))
    }

    fn block(&self, node: &Node) -> Result<String, WriteError> {
        match node {
            Node::Root(root) => self.blocks(&root.children),
            Node::Paragraph(paragraph) => self.phrasing(&paragraph.children),
            Node::Heading(heading) => Ok(format!(
                "{} {}",
                "#".repeat(usize::from(heading.depth)),
                self.phrasing(&heading.children)?
            )),
            Node::Code(code) => {
                let fence = if code.value.contains("```") {
                    "````"
                } else {
                    "```"
                };
                let lang = code.lang.as_deref().unwrap_or("");
                Ok(format!("{fence}{lang}\n{}\n{fence}", code.value))
            }
            Node::Blockquote(quote) => {
                let inner = self.blocks(&quote.children)?;
                Ok(inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Node::List(list) => self.list(list),
            Node::ThematicBreak => Ok("---".to_string()),
            Node::Html(html) => Ok(html.value.clone()),
            Node::FootnoteDefinition(def) => {
                self.require(self.footnote, "footnoteDefinition")?;
                let body = self.blocks(&def.children)?;
                let mut lines = body.lines();
                let mut out = match lines.next() {
                    Some(first) => format!("[^{}]: {first}", def.identifier),
                    None => format!("[^{}]:", def.identifier),
                };
                for line in lines {
                    out.push('\n');
                    if !line.is_empty() {
                        out.push_str("    ");
                    }
                    out.push_str(line);
                }
                Ok(out)
            }
            Node::Table(table) => self.table(table),
            other => self.phrasing(std::slice::from_ref(other)),
        }
    }

    fn phrasing(&self, nodes: &[Node]) -> Result<String, WriteError> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.inline(node)?);
        }
        Ok(out)
    }

    fn inline(&self, node: &Node) -> Result<String, WriteError> {
        match node {
            Node::Text(text) => Ok(escape_text(&text.value)),
            Node::Emphasis(emphasis) => {
                Ok(format!("*{}*", self.phrasing(&emphasis.children)?))
            }
            Node::Strong(strong) => Ok(format!("**{}**", self.phrasing(&strong.children)?)),
            Node::Delete(delete) => {
                self.require(self.strikethrough, "delete")?;
                Ok(format!("~~{}~~", self.phrasing(&delete.children)?))
            }
            Node::InlineCode(code) => Ok(code_span(&code.value)),
            Node::Link(link) => {
                if self.autolink {
                    if let Some(literal) = autolink_literal(link) {
                        return Ok(literal);
                    }
                }
                Ok(format!(
                    "[{}]({})",
                    self.phrasing(&link.children)?,
                    target(&link.url, link.title.as_deref())
                ))
            }
            Node::Image(image) => Ok(format!(
                "![{}]({})",
                image.alt,
                target(&image.url, image.title.as_deref())
            )),
            Node::Break => Ok("\\\n".to_string()),
            Node::FootnoteReference(reference) => {
                self.require(self.footnote, "footnoteReference")?;
                Ok(format!("[^{}]", reference.identifier))
            }
            Node::UserMention(mention) => Ok(format!(
                "[{}](/user/{})",
                self.phrasing(&mention.children)?,
                mention.uid
            )),
            Node::BilibiliVideo(video) => Ok(format!("![](bilibili:{})", video.video_id)),
            Node::Html(html) => Ok(html.value.clone()),
            other => match other.children() {
                Some(children) => self.phrasing(children),
                None => Ok(String::new()),
            },
        }
    }

    fn list(&self, list: &List) -> Result<String, WriteError> {
        let mut lines = Vec::new();
        let mut number = list.start.unwrap_or(1);

        for child in &list.children {
            let Node::ListItem(item) = child else {
                continue;
            };
            let marker = if list.ordered {
                format!("{number}. ")
            } else {
                "- ".to_string()
            };
            let checkbox = match item.checked {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            let indent = " ".repeat(marker.len());
            let body = self.blocks(&item.children)?;

            let mut first = true;
            for line in body.lines() {
                if first {
                    lines.push(format!("{marker}{checkbox}{line}"));
                    first = false;
                } else if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
            if first {
                lines.push(format!("{marker}{checkbox}"));
            }

            if list.ordered {
                number += 1;
            }
        }

        Ok(lines.join("\n"))
    }

    fn table(&self, table: &Table) -> Result<String, WriteError> {
        self.require(self.table, "table")?;

        let mut rows = Vec::new();
        for child in &table.children {
            let Node::TableRow(row) = child else {
                continue;
            };
            let cells = row
                .children
                .iter()
                .map(|cell| {
                    let content = match cell {
                        Node::TableCell(cell) => self.phrasing(&cell.children)?,
                        other => self.inline(other)?,
                    };
                    Ok(content.replace('|', "\\|"))
                })
                .collect::<Result<Vec<_>, WriteError>>()?;
            rows.push(format!("| {} |", cells.join(" | ")));
        }

        let delimiter = table
            .align
            .iter()
            .map(|align| match align {
                AlignKind::None => "---",
                AlignKind::Left => ":--",
                AlignKind::Center => ":-:",
                AlignKind::Right => "--:",
            })
            .collect::<Vec<_>>()
            .join(" | ");

        let mut out = Vec::new();
        let mut body = rows.into_iter();
        if let Some(head) = body.next() {
            out.push(head);
        }
        out.push(format!("| {delimiter} |"));
        out.extend(body);
        Ok(out.join("\n"))
    }

    fn require(&self, registered: bool, kind: &'static str) -> Result<(), WriteError> {
        if registered {
            Ok(())
        } else {
            Err(WriteError::MissingExtension(kind))
        }
    }
}

/// The bare form of `link` if it is a literal autolink: no title, a single
/// text child, and a target that is the text itself (or the text plus the
/// `http://` scheme a `www.` literal gets).
fn autolink_literal(link: &lfm_ast::node::Link) -> Option<String> {
    if link.title.is_some() {
        return None;
    }
    let [Node::Text(text)] = link.children.as_slice() else {
        return None;
    };
    let value = &text.value;
    let literal = (link.url == *value
        && (value.starts_with("http://") || value.starts_with("https://")))
        || (value.starts_with("www.") && link.url == format!("http://{value}"));
    if literal {
        Some(value.clone())
    } else {
        None
    }
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '*' | '_' | '[' | ']' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn code_span(value: &str) -> String {
    if value.contains('`') {
        format!("`` {value} ``")
    } else {
        format!("`{value}`")
    }
}

fn target(url: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{url} \"{}\"", title.replace('"', "\\\"")),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader;
    use lfm_ast::node::{BilibiliVideo, Delete, UserMention};
    use pretty_assertions::assert_eq;

    fn gfm_data() -> PipelineData {
        use crate::extension::{
            FromSyntaxExtension, StrikethroughOptions, SyntaxExtension,
        };
        let mut data = PipelineData::default();
        data.syntax_mut().extend([
            SyntaxExtension::GfmFootnote,
            SyntaxExtension::GfmStrikethrough(StrikethroughOptions {
                single_tilde: false,
            }),
            SyntaxExtension::GfmTable,
            SyntaxExtension::GfmAutolinkLiteral,
        ]);
        data.from_syntax_mut().extend([
            FromSyntaxExtension::GfmFootnote,
            FromSyntaxExtension::GfmStrikethrough,
            FromSyntaxExtension::GfmTable,
            FromSyntaxExtension::GfmAutolinkLiteral,
        ]);
        data.to_syntax_mut().extend([
            ToSyntaxExtension::GfmFootnote,
            ToSyntaxExtension::GfmTable,
            ToSyntaxExtension::GfmStrikethrough,
            ToSyntaxExtension::GfmAutolinkLiteral,
        ]);
        data
    }

    #[test]
    fn writes_heading_and_paragraph() {
        let tree = Node::root(vec![
            Node::heading(2, vec![Node::text("Title")]),
            Node::paragraph(vec![Node::text("Body text.")]),
        ]);

        let out = to_markdown(&tree, &PipelineData::default()).unwrap();

        assert_eq!(out, "## Title\n\nBody text.\n");
    }

    #[test]
    fn delete_requires_registration() {
        let tree = Node::root(vec![Node::paragraph(vec![Node::Delete(Delete {
            children: vec![Node::text("gone")],
        })])]);

        let err = to_markdown(&tree, &PipelineData::default()).unwrap_err();
        assert_eq!(err, WriteError::MissingExtension("delete"));

        let out = to_markdown(&tree, &gfm_data()).unwrap();
        assert_eq!(out, "~~gone~~\n");
    }

    #[test]
    fn writes_derived_kinds() {
        let tree = Node::root(vec![
            Node::paragraph(vec![
                Node::text("Hi @"),
                Node::UserMention(UserMention {
                    uid: 42,
                    children: vec![Node::text("bob")],
                }),
            ]),
            Node::paragraph(vec![Node::BilibiliVideo(BilibiliVideo {
                video_id: "av123456".to_string(),
            })]),
        ]);

        let out = to_markdown(&tree, &PipelineData::default()).unwrap();

        assert_eq!(out, "Hi @[bob](/user/42)\n\n![](bilibili:av123456)\n");
    }

    #[test]
    fn round_trips_gfm_document() {
        let data = gfm_data();
        let source = "# Title\n\nplain ~~gone~~ text[^1]\n\n| a | b |\n| --- | --- |\n| 1 | 2 |\n\n[^1]: a note\n";

        let tree = reader::parse(source, &data);
        let out = to_markdown(&tree, &data).unwrap();
        let reparsed = reader::parse(&out, &data);

        assert_eq!(reparsed, tree);
    }

    #[test]
    fn autolinked_literal_written_bare() {
        let tree = Node::root(vec![Node::paragraph(vec![
            Node::text("see "),
            Node::link(
                "https://example.com",
                vec![Node::text("https://example.com")],
            ),
        ])]);

        let bare = to_markdown(&tree, &gfm_data()).unwrap();
        assert_eq!(bare, "see https://example.com\n");

        let bracketed = to_markdown(&tree, &PipelineData::default()).unwrap();
        assert_eq!(bracketed, "see [https://example.com](https://example.com)\n");
    }

    #[test]
    fn www_literal_round_trips() {
        let data = gfm_data();
        let tree = reader::parse("go to www.example.com now", &data);

        let out = to_markdown(&tree, &data).unwrap();

        assert_eq!(out, "go to www.example.com now\n");
        assert_eq!(reader::parse(&out, &data), tree);
    }

    #[test]
    fn writes_task_list() {
        let tree = Node::root(vec![Node::List(List {
            ordered: false,
            start: None,
            children: vec![
                Node::ListItem(lfm_ast::node::ListItem {
                    checked: Some(true),
                    children: vec![Node::paragraph(vec![Node::text("done")])],
                }),
                Node::ListItem(lfm_ast::node::ListItem {
                    checked: None,
                    children: vec![Node::paragraph(vec![Node::text("plain")])],
                }),
            ],
        })]);

        let out = to_markdown(&tree, &PipelineData::default()).unwrap();

        assert_eq!(out, "- [x] done\n- plain\n");
    }

    #[test]
    fn escapes_markup_in_text() {
        let tree = Node::root(vec![Node::paragraph(vec![Node::text("a *b* [c]")])]);

        let out = to_markdown(&tree, &PipelineData::default()).unwrap();

        assert_eq!(out, "a \\*b\\* \\[c\\]\n");
    }
}
