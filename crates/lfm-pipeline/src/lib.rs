//! Pluggable markdown pipeline.
//!
//! A [`Processor`] owns three extension registries (syntax, from-syntax,
//! to-syntax) that plugins populate at configuration time, a reader that
//! turns source text into an [`lfm_ast::Node`] tree according to the
//! registered syntax extensions, and a writer that serializes a tree back
//! to markdown according to the registered to-syntax extensions.
//!
//! The low-level tokenizer/parser is pulldown-cmark; this crate only
//! composes it and bridges its events into the common tree.

pub mod autolink;
pub mod data;
pub mod extension;
pub mod processor;
pub mod reader;
pub mod writer;

pub use data::PipelineData;
pub use extension::{
    FromSyntaxExtension, StrikethroughOptions, SyntaxExtension, ToSyntaxExtension,
};
pub use processor::{Plugin, Processor, SourceFile, Transform};
pub use writer::{to_markdown, WriteError};
