//! Markdown syntax tree types for Luogu-flavored markdown.
//!
//! This crate provides the document tree shared by the whole pipeline: a
//! closed set of node kinds covering the CommonMark/GFM constructs the
//! reader produces, plus the two site-specific kinds (`userMention` and
//! `bilibiliVideo`) that the flavor plugin derives from links and images.

pub mod node;
pub mod visit;

pub use node::{
    AlignKind, BilibiliVideo, Blockquote, Code, Delete, Emphasis, FootnoteDefinition,
    FootnoteReference, Heading, Html, Image, InlineCode, Link, List, ListItem, Node, Paragraph,
    Root, Strong, Table, TableCell, TableRow, Text, UserMention,
};
pub use visit::visit_mut;
