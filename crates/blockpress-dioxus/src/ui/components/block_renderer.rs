use super::{CollapsibleCode, HeadingBlock, ImageFigure, ImageRow, TextBlock};
use blockpress_engine::view;
use blockpress_engine::{Block, BlockKind};
use dioxus::prelude::*;

/// Read-only renderer for a block sequence, in order.
///
/// Page-code blocks (CSS/JavaScript/HTML `code` blocks) are skipped —
/// the post view applies those to the page instead. `code-display`
/// blocks always render. The match below is exhaustive so a new block
/// variant fails to compile until it gets a renderer case.
#[component]
pub fn BlockRenderer(blocks: Vec<Block>) -> Element {
    rsx! {
        div {
            class: "blocks",
            for block in blocks.iter().filter(|b| !view::is_page_code(&b.kind)).cloned() {
                {render_block(block)}
            }
        }
    }
}

fn render_block(block: Block) -> Element {
    let id = block.id;
    match block.kind {
        BlockKind::Text { content } => rsx! {
            TextBlock { key: "{id}", content }
        },
        BlockKind::Heading { content, level } => rsx! {
            HeadingBlock { key: "{id}", content, level }
        },
        BlockKind::Image {
            src,
            caption,
            position,
            size,
        } => rsx! {
            ImageFigure { key: "{id}", src, caption, position, size }
        },
        BlockKind::ImageRow { images, columns } => rsx! {
            ImageRow { key: "{id}", images, columns }
        },
        BlockKind::Code { content, language } => rsx! {
            CollapsibleCode { key: "{id}", content, language }
        },
        BlockKind::CodeDisplay { content, language } => rsx! {
            CollapsibleCode { key: "{id}", content, language }
        },
    }
}
