//! Pre-order traversal over the document tree.

use crate::node::Node;

/// Visit `node` and every descendant in pre-order, calling `f` on each.
///
/// The node itself is visited before its children, so a callback that
/// replaces children sees them before recursion descends into the
/// replacements' own children.
pub fn visit_mut<F>(node: &mut Node, f: &mut F)
where
    F: FnMut(&mut Node),
{
    f(node);
    if let Some(children) = node.children_mut() {
        for child in children {
            visit_mut(child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Blockquote, Node};
    use pretty_assertions::assert_eq;

    fn kind_name(node: &Node) -> &'static str {
        match node {
            Node::Root(_) => "root",
            Node::Paragraph(_) => "paragraph",
            Node::Blockquote(_) => "blockquote",
            Node::Text(_) => "text",
            _ => "other",
        }
    }

    #[test]
    fn visits_in_pre_order() {
        let mut tree = Node::root(vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ]);

        let mut seen = Vec::new();
        visit_mut(&mut tree, &mut |node| seen.push(kind_name(node)));

        assert_eq!(
            seen,
            vec!["root", "paragraph", "text", "paragraph", "text"]
        );
    }

    #[test]
    fn reaches_nested_paragraphs() {
        let mut tree = Node::root(vec![Node::Blockquote(Blockquote {
            children: vec![Node::paragraph(vec![Node::text("quoted")])],
        })]);

        let mut paragraphs = 0;
        visit_mut(&mut tree, &mut |node| {
            if matches!(node, Node::Paragraph(_)) {
                paragraphs += 1;
            }
        });

        assert_eq!(paragraphs, 1);
    }

    #[test]
    fn callback_can_mutate_nodes() {
        let mut tree = Node::root(vec![Node::paragraph(vec![Node::text("a")])]);

        visit_mut(&mut tree, &mut |node| {
            if let Node::Text(text) = node {
                text.value.push('!');
            }
        });

        assert_eq!(
            tree,
            Node::root(vec![Node::paragraph(vec![Node::text("a!")])])
        );
    }
}
