//! The mention/video tree rewrite.
//!
//! Runs once per parsed document. Every paragraph's children are rebuilt
//! with a map-with-lookback over the original sequence: a link preceded by
//! a text node ending in `@` and pointing at a user page becomes a
//! `userMention`, and a `bilibili:` image becomes a `bilibiliVideo`. Each
//! replacement swaps exactly one node at its index; sibling count and
//! order never change, and anything that does not match is left alone.

use std::sync::LazyLock;

use lfm_ast::node::{BilibiliVideo, Image, Link, Node, UserMention};
use lfm_ast::visit_mut;
use regex::Regex;

static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/user/(\d+)$").unwrap());
static LEGACY_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/space/show\?uid=(\d+)$").unwrap());

/// Rewrite mention links and video images in place, in every paragraph of
/// the tree (nested ones included).
pub fn rewrite(tree: &mut Node) {
    visit_mut(tree, &mut |node| {
        if let Node::Paragraph(paragraph) = node {
            rewrite_children(&mut paragraph.children);
        }
    });
}

fn rewrite_children(children: &mut Vec<Node>) {
    let original = std::mem::take(children);
    let mut rewritten = Vec::with_capacity(original.len());
    // Lookback carries the original previous sibling's shape, not the
    // rewritten one.
    let mut after_at_text = false;

    for child in original {
        let ends_with_at = matches!(&child, Node::Text(text) if text.value.ends_with('@'));
        let replacement = match &child {
            Node::Link(link) if after_at_text => classify_mention(link),
            Node::Image(image) => classify_video(image),
            _ => None,
        };
        rewritten.push(replacement.unwrap_or(child));
        after_at_text = ends_with_at;
    }

    *children = rewritten;
}

/// A mention replacement for `link`, if its url is a user page.
///
/// The preceding `@` text node stays where it is; the mention keeps the
/// link's display children verbatim. A uid too large for `u64` is treated
/// as no match.
fn classify_mention(link: &Link) -> Option<Node> {
    let captures = MENTION
        .captures(&link.url)
        .or_else(|| LEGACY_MENTION.captures(&link.url))?;
    let uid = captures[1].parse().ok()?;
    Some(Node::UserMention(UserMention {
        uid,
        children: link.children.clone(),
    }))
}

/// A video replacement for `image`, if its url uses the `bilibili:` scheme.
///
/// Legacy numeric ids are normalized to the `av`-prefixed form; anything
/// else (`BV...` ids included) passes through unchanged.
fn classify_video(image: &Image) -> Option<Node> {
    let raw = image.url.strip_prefix("bilibili:")?;
    let video_id = if raw.starts_with(|c: char| c.is_ascii_digit()) {
        format!("av{raw}")
    } else {
        raw.to_string()
    };
    Some(Node::BilibiliVideo(BilibiliVideo { video_id }))
}
