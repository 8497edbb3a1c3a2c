//! Per-processor registry storage.

use crate::extension::{FromSyntaxExtension, SyntaxExtension, ToSyntaxExtension};

/// The extension registries owned by a [`crate::Processor`].
///
/// Each list is created lazily on first mutable access and lives for the
/// processor's lifetime. Mutation is meant to happen during the setup phase
/// only; the reader and writer take shared references afterward.
///
/// Appends are never deduplicated: attaching the same plugin twice registers
/// its extensions twice, matching the registration semantics of the plugin
/// ecosystem this models.
#[derive(Debug, Default)]
pub struct PipelineData {
    syntax: Option<Vec<SyntaxExtension>>,
    from_syntax: Option<Vec<FromSyntaxExtension>>,
    to_syntax: Option<Vec<ToSyntaxExtension>>,
}

impl PipelineData {
    /// Registered syntax extensions, in append order.
    pub fn syntax(&self) -> &[SyntaxExtension] {
        self.syntax.as_deref().unwrap_or(&[])
    }

    /// Registered from-syntax extensions, in append order.
    pub fn from_syntax(&self) -> &[FromSyntaxExtension] {
        self.from_syntax.as_deref().unwrap_or(&[])
    }

    /// Registered to-syntax extensions, in append order.
    pub fn to_syntax(&self) -> &[ToSyntaxExtension] {
        self.to_syntax.as_deref().unwrap_or(&[])
    }

    /// The syntax registry, created if absent.
    pub fn syntax_mut(&mut self) -> &mut Vec<SyntaxExtension> {
        self.syntax.get_or_insert_with(Vec::new)
    }

    /// The from-syntax registry, created if absent.
    pub fn from_syntax_mut(&mut self) -> &mut Vec<FromSyntaxExtension> {
        self.from_syntax.get_or_insert_with(Vec::new)
    }

    /// The to-syntax registry, created if absent.
    pub fn to_syntax_mut(&mut self) -> &mut Vec<ToSyntaxExtension> {
        self.to_syntax.get_or_insert_with(Vec::new)
    }
}
