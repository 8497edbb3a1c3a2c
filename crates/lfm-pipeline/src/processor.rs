//! The processor and its plugin contract.

use std::path::PathBuf;

use lfm_ast::Node;

use crate::data::PipelineData;
use crate::reader;

/// The file context handed to transforms alongside the tree.
///
/// The flavor logic does not consume it; it exists so transforms that care
/// about provenance (diagnostics, source maps) have somewhere to look.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Originating path, if the contents came from disk.
    pub path: Option<PathBuf>,
    /// Raw markdown source.
    pub contents: String,
}

impl SourceFile {
    /// A file from in-memory contents with no path.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            path: None,
            contents: contents.into(),
        }
    }

    /// Attach an originating path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A tree transform run once per parsed document.
pub type Transform = Box<dyn Fn(&mut Node, &mut SourceFile)>;

/// A pipeline plugin.
///
/// `attach` runs once at configuration time with mutable access to the
/// registries, and may hand back a transform to run on every parsed tree.
pub trait Plugin {
    fn attach(&self, data: &mut PipelineData) -> Option<Transform>;
}

/// A configured markdown processor.
///
/// Setup is builder-style: [`Processor::with`] attaches plugins in order.
/// Processing a document is synchronous and single-threaded: parse the
/// source into a tree, then run each transform in attachment order.
#[derive(Default)]
pub struct Processor {
    data: PipelineData,
    transforms: Vec<Transform>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a plugin, letting it register extensions and transforms.
    pub fn with(mut self, plugin: &dyn Plugin) -> Self {
        if let Some(transform) = plugin.attach(&mut self.data) {
            self.transforms.push(transform);
        }
        self
    }

    /// The extension registries.
    pub fn data(&self) -> &PipelineData {
        &self.data
    }

    /// Mutable registry access for setup-phase callers.
    pub fn data_mut(&mut self) -> &mut PipelineData {
        &mut self.data
    }

    /// Parse a file into a tree without running transforms.
    pub fn parse(&self, file: &SourceFile) -> Node {
        reader::parse(&file.contents, &self.data)
    }

    /// Run every attached transform over `tree`, in attachment order.
    pub fn run(&self, tree: &mut Node, file: &mut SourceFile) {
        for transform in &self.transforms {
            transform(tree, file);
        }
    }

    /// Parse `file` and run the transforms; returns the finished tree.
    pub fn process(&self, file: &mut SourceFile) -> Node {
        tracing::debug!(
            path = ?file.path,
            bytes = file.contents.len(),
            "processing document"
        );
        let mut tree = self.parse(file);
        self.run(&mut tree, file);
        tree
    }
}
