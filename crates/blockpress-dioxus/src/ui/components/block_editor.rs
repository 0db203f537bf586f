use super::{CodeEditor, HeadingEditor, ImageEditor, ImageRowEditor, TextEditor};
use blockpress_engine::{Block, BlockCmd, BlockId, BlockKind, BlockPatch, BlockType};
use dioxus::prelude::*;

const ADDABLE_TYPES: [BlockType; 6] = [
    BlockType::Text,
    BlockType::Heading,
    BlockType::Image,
    BlockType::ImageRow,
    BlockType::Code,
    BlockType::CodeDisplay,
];

/// The editable block list: one editor per block, HTML5 drag handles for
/// reordering, and an add-block toolbar for every variant.
///
/// Dropping block A on block B emits `Reorder { source: A, target: B }`;
/// the store decides what that means for the sequence. Deletion is
/// requested upward so the view can run its media confirmation first.
#[component]
pub fn BlockEditor(
    blocks: Vec<Block>,
    post_slug: Option<String>,
    on_command: Callback<BlockCmd>,
    on_delete_requested: Callback<BlockId>,
) -> Element {
    let mut dragging = use_signal(|| None::<BlockId>);

    rsx! {
        div {
            class: "block-editor",
            for block in blocks.iter().cloned() {
                {
                    let id = block.id;
                    rsx! {
                        div {
                            key: "{id}",
                            class: "sortable-block",
                            draggable: "true",
                            ondragstart: move |_| dragging.set(Some(id)),
                            ondragover: move |evt| evt.prevent_default(),
                            ondrop: move |evt| {
                                evt.prevent_default();
                                let source = *dragging.peek();
                                dragging.set(None);
                                if let Some(source) = source
                                    && source != id
                                {
                                    on_command.call(BlockCmd::Reorder { source, target: id });
                                }
                            },
                            div { class: "drag-handle", "⠿" }
                            div {
                                class: "block-body",
                                {editor_for(block, post_slug.clone(), on_command, on_delete_requested)}
                            }
                        }
                    }
                }
            }
            div {
                class: "add-block",
                span { "Add block: " }
                for block_type in ADDABLE_TYPES {
                    button {
                        key: "{block_type.label()}",
                        onclick: move |_| on_command.call(BlockCmd::Append(block_type)),
                        "{block_type.label()}"
                    }
                }
            }
        }
    }
}

/// Per-variant editor dispatch. Exhaustive: a new block variant fails to
/// compile until it gets an editor case.
fn editor_for(
    block: Block,
    post_slug: Option<String>,
    on_command: Callback<BlockCmd>,
    on_delete_requested: Callback<BlockId>,
) -> Element {
    let id = block.id;
    let on_patch = Callback::new(move |patch: BlockPatch| {
        on_command.call(BlockCmd::Update(id, patch));
    });
    let on_delete = Callback::new(move |_: ()| on_delete_requested.call(id));

    match block.kind {
        BlockKind::Text { content } => rsx! {
            TextEditor { content, on_patch, on_delete }
        },
        BlockKind::Heading { content, level } => rsx! {
            HeadingEditor { content, level, on_patch, on_delete }
        },
        BlockKind::Image {
            src,
            caption,
            position,
            size,
        } => rsx! {
            ImageEditor { src, caption, position, size, post_slug, on_patch, on_delete }
        },
        BlockKind::ImageRow { images, columns } => rsx! {
            ImageRowEditor { images, columns, post_slug, on_patch, on_delete }
        },
        BlockKind::Code { content, language } => rsx! {
            CodeEditor { content, language, display_only: false, on_patch, on_delete }
        },
        BlockKind::CodeDisplay { content, language } => rsx! {
            CodeEditor { content, language, display_only: true, on_patch, on_delete }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_editor(blocks: Vec<Block>) -> String {
        let mut dom = VirtualDom::new_with_props(
            BlockEditor,
            BlockEditorProps {
                blocks,
                post_slug: None,
                on_command: Callback::new(|_: BlockCmd| {}),
                on_delete_requested: Callback::new(|_: BlockId| {}),
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_add_toolbar_offers_every_block_variant() {
        let html = render_editor(Vec::new());
        for block_type in ADDABLE_TYPES {
            assert!(
                html.contains(block_type.label()),
                "missing add button for {}",
                block_type.label()
            );
        }
    }

    #[test]
    fn test_each_block_gets_a_draggable_wrapper() {
        let blocks = vec![Block::new(BlockType::Text), Block::new(BlockType::Heading)];
        let html = render_editor(blocks);
        assert_eq!(html.matches("sortable-block").count(), 2);
        assert_eq!(html.matches("draggable=\"true\"").count(), 2);
    }
}
