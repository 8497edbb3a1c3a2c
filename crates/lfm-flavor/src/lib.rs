//! Luogu-flavored markdown plugin.
//!
//! Attaching [`LuoguFlavor`] to a processor does two things:
//!
//! 1. registers the GFM extension set (footnotes, strikethrough, tables,
//!    autolink literals) into the three pipeline registries, and
//! 2. returns a transform that rewrites mention links (`@[name](/user/123)`)
//!    into `userMention` nodes and `bilibili:` images into `bilibiliVideo`
//!    nodes.
//!
//! Registration is append-only and not idempotent: attaching the plugin
//! twice registers everything twice.

pub mod options;
pub mod rewrite;

use lfm_pipeline::{
    FromSyntaxExtension, PipelineData, Plugin, StrikethroughOptions, SyntaxExtension,
    ToSyntaxExtension, Transform,
};

pub use options::FlavorOptions;
pub use rewrite::rewrite;

/// The Luogu flavor plugin.
#[derive(Debug, Clone, Default)]
pub struct LuoguFlavor {
    options: FlavorOptions,
}

impl LuoguFlavor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FlavorOptions) -> Self {
        Self { options }
    }

    /// The options this plugin was constructed with.
    pub fn options(&self) -> &FlavorOptions {
        &self.options
    }
}

impl Plugin for LuoguFlavor {
    fn attach(&self, data: &mut PipelineData) -> Option<Transform> {
        data.syntax_mut().extend([
            SyntaxExtension::GfmFootnote,
            // Single tilde never delimits strikethrough here, whatever the
            // caller asked for.
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

        // To-syntax order differs from the other two lists; keep it.
        data.to_syntax_mut().extend([
            ToSyntaxExtension::GfmFootnote,
            ToSyntaxExtension::GfmTable,
            ToSyntaxExtension::GfmStrikethrough,
            ToSyntaxExtension::GfmAutolinkLiteral,
        ]);

        Some(Box::new(|tree, _file| rewrite(tree)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lfm_ast::node::{BilibiliVideo, Node, UserMention};
    use lfm_pipeline::{Processor, SourceFile};
    use pretty_assertions::assert_eq;

    #[test]
    fn registers_four_extensions_per_registry_in_order() {
        let mut data = PipelineData::default();
        let _ = LuoguFlavor::new().attach(&mut data);

        assert_eq!(
            data.syntax(),
            &[
                SyntaxExtension::GfmFootnote,
                SyntaxExtension::GfmStrikethrough(StrikethroughOptions {
                    single_tilde: false,
                }),
                SyntaxExtension::GfmTable,
                SyntaxExtension::GfmAutolinkLiteral,
            ]
        );
        assert_eq!(
            data.from_syntax(),
            &[
                FromSyntaxExtension::GfmFootnote,
                FromSyntaxExtension::GfmStrikethrough,
                FromSyntaxExtension::GfmTable,
                FromSyntaxExtension::GfmAutolinkLiteral,
            ]
        );
        assert_eq!(
            data.to_syntax(),
            &[
                ToSyntaxExtension::GfmFootnote,
                ToSyntaxExtension::GfmTable,
                ToSyntaxExtension::GfmStrikethrough,
                ToSyntaxExtension::GfmAutolinkLiteral,
            ]
        );
    }

    #[test]
    fn single_tilde_request_is_overridden() {
        let mut data = PipelineData::default();
        let _ = LuoguFlavor::with_options(FlavorOptions {
            single_tilde: true,
            ..FlavorOptions::default()
        })
        .attach(&mut data);

        assert_eq!(
            data.syntax()[1],
            SyntaxExtension::GfmStrikethrough(StrikethroughOptions {
                single_tilde: false,
            })
        );
    }

    #[test]
    fn attaching_twice_appends_duplicates() {
        let plugin = LuoguFlavor::new();
        let processor = Processor::new().with(&plugin).with(&plugin);

        assert_eq!(processor.data().syntax().len(), 8);
        assert_eq!(processor.data().from_syntax().len(), 8);
        assert_eq!(processor.data().to_syntax().len(), 8);
    }

    #[test]
    fn processes_mentions_and_videos_end_to_end() {
        let plugin = LuoguFlavor::new();
        let processor = Processor::new().with(&plugin);

        let mut file = SourceFile::new("Hi @[bob](/user/42)\n\n![](bilibili:123456)\n");
        let tree = processor.process(&mut file);

        assert_eq!(
            tree,
            Node::root(vec![
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
            ])
        );
    }
}
