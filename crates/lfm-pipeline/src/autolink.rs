//! Post-parse pass that turns URL literals in plain text into links.
//!
//! pulldown-cmark has no flag for GFM literal autolinks, so the registered
//! extension is honored here: text children of phrasing containers are
//! scanned for `http(s)://` and `www.` runs and split into link nodes.
//! Existing links are never descended into.

use std::sync::LazyLock;

use lfm_ast::node::{Node, Text};
use regex::Regex;

static URL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)[^\s<]+").unwrap());

/// Characters GFM does not allow an autolink to end with.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', ')', '\'', '"'];

/// A literal only counts at a word boundary: start of the run, after
/// whitespace, or after one of the delimiter characters GFM allows.
fn at_word_boundary(value: &str, start: usize) -> bool {
    match value[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '*' | '_' | '~' | '('),
    }
}

/// Rewrite every phrasing container in `tree`, splitting URL literals out
/// of its text children.
pub fn link_literals(tree: &mut Node) {
    // Links keep their display text as-is; everything else recurses.
    if matches!(tree, Node::Link(_)) {
        return;
    }

    if is_phrasing_container(tree) {
        if let Some(children) = tree.children_mut() {
            let original = std::mem::take(children);
            let mut rewritten = Vec::with_capacity(original.len());
            for child in original {
                match child {
                    Node::Text(text) => split_text(text, &mut rewritten),
                    other => rewritten.push(other),
                }
            }
            *children = rewritten;
        }
    }

    if let Some(children) = tree.children_mut() {
        for child in children {
            link_literals(child);
        }
    }
}

fn is_phrasing_container(node: &Node) -> bool {
    matches!(
        node,
        Node::Paragraph(_)
            | Node::Heading(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::TableCell(_)
    )
}

/// Split one text node into text and link nodes.
fn split_text(text: Text, out: &mut Vec<Node>) {
    let value = &text.value;
    let mut cursor = 0;

    for found in URL_LITERAL.find_iter(value) {
        if !at_word_boundary(value, found.start()) {
            continue;
        }
        let literal = trim_trailing(found.as_str());
        if literal.is_empty() {
            continue;
        }
        let end = found.start() + literal.len();

        if found.start() > cursor {
            out.push(Node::text(&value[cursor..found.start()]));
        }

        // GFM gives `www.` literals an http scheme in the target while the
        // display text stays verbatim.
        let url = if literal.starts_with("www.") {
            format!("http://{literal}")
        } else {
            literal.to_string()
        };
        out.push(Node::link(url, vec![Node::text(literal)]));
        cursor = end;
    }

    if cursor == 0 {
        out.push(Node::Text(text));
    } else if cursor < value.len() {
        out.push(Node::text(&value[cursor..]));
    }
}

fn trim_trailing(literal: &str) -> &str {
    literal.trim_end_matches(TRAILING_PUNCTUATION)
}
