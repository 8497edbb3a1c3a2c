//! Extension descriptors held by the three pipeline registries.
//!
//! Each registry stores an ordered sequence of descriptors; plugins append
//! during setup and the reader/writer consume them afterward. Append order
//! is preserved and duplicates are kept as-is.

/// A tokenizer-level construct the reader should enable while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxExtension {
    /// GFM footnotes (`[^id]` references and definitions).
    GfmFootnote,
    /// GFM strikethrough (`~~x~~`).
    GfmStrikethrough(StrikethroughOptions),
    /// GFM tables.
    GfmTable,
    /// GFM literal autolinks (`www.` and `http(s)://` runs in plain text).
    GfmAutolinkLiteral,
}

/// Options for the strikethrough syntax extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikethroughOptions {
    /// Whether a single `~` delimits strikethrough as well as `~~`.
    pub single_tilde: bool,
}

impl Default for StrikethroughOptions {
    fn default() -> Self {
        // GFM's own default; the flavor plugin overrides it.
        Self { single_tilde: true }
    }
}

/// A construct whose source-format fragments are built into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromSyntaxExtension {
    GfmFootnote,
    GfmStrikethrough,
    GfmTable,
    /// Drives the post-parse pass that splits URL literals out of text.
    GfmAutolinkLiteral,
}

/// A construct the writer knows how to serialize back to markdown.
///
/// Serializing a node kind whose extension is missing from the registry is
/// a [`crate::WriteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToSyntaxExtension {
    GfmFootnote,
    GfmTable,
    GfmStrikethrough,
    GfmAutolinkLiteral,
}
