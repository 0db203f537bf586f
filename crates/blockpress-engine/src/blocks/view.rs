//! Pure render policy for the block renderer.
//!
//! The Dioxus components stay thin by delegating every fallback and
//! classification decision here, where it can be unit tested without a
//! DOM. Documented defaults: heading level 2, image position center,
//! image size medium, image-row columns 2.

use crate::blocks::types::{Block, BlockKind, ImagePosition, ImageSize};

/// Rendered height (px) past which a code block collapses behind a toggle.
pub const CODE_COLLAPSE_MAX_HEIGHT: f64 = 300.0;

/// Languages of `code` blocks that are applied to the published page
/// (injected as styles, markup or scripts) instead of being displayed.
const PAGE_CODE_LANGUAGES: [&str; 3] = ["css", "javascript", "html"];

/// Clamp a persisted heading level into the supported 1..=4 range,
/// falling back to the default level 2 for anything outside it.
pub fn clamp_heading_level(level: u8) -> u8 {
    if (1..=4).contains(&level) { level } else { 2 }
}

/// CSS class string for an image figure, position/size as styling hints.
pub fn image_classes(position: ImagePosition, size: ImageSize) -> String {
    format!(
        "block-image position-{} size-{}",
        position.as_str(),
        size.as_str()
    )
}

/// CSS class string for an image row; out-of-range column counts fall
/// back to the default of 2. Column count only affects layout grouping.
pub fn image_row_classes(columns: u8) -> String {
    let columns = if (2..=4).contains(&columns) { columns } else { 2 };
    format!("block-image-row columns-{columns}")
}

/// An image block with an empty source is incomplete: it renders as an
/// upload affordance, never as an `<img>` pointing at nothing.
pub fn is_incomplete_image(kind: &BlockKind) -> bool {
    matches!(kind, BlockKind::Image { src, .. } if src.is_empty())
}

/// True for `code` blocks whose content is applied to the published page
/// rather than displayed. `code-display` blocks are never page code.
pub fn is_page_code(kind: &BlockKind) -> bool {
    match kind {
        BlockKind::Code { language, .. } => PAGE_CODE_LANGUAGES.contains(&language.as_str()),
        _ => false,
    }
}

/// Combined stylesheet for a published post: author CSS code blocks in
/// order, then the post-level custom CSS override.
pub fn page_styles(blocks: &[Block], custom_css: Option<&str>) -> String {
    let mut sheets: Vec<&str> = blocks
        .iter()
        .filter_map(|b| match &b.kind {
            BlockKind::Code { content, language } if language == "css" => Some(content.as_str()),
            _ => None,
        })
        .collect();
    if let Some(css) = custom_css
        && !css.is_empty()
    {
        sheets.push(css);
    }
    sheets.join("\n\n")
}

/// Raw HTML fragments to append after the rendered content, in order.
pub fn page_html(blocks: &[Block]) -> Vec<&str> {
    blocks
        .iter()
        .filter_map(|b| match &b.kind {
            BlockKind::Code { content, language } if language == "html" => Some(content.as_str()),
            _ => None,
        })
        .collect()
}

/// Script bodies to run on the published page, in order.
pub fn page_scripts(blocks: &[Block]) -> Vec<&str> {
    blocks
        .iter()
        .filter_map(|b| match &b.kind {
            BlockKind::Code { content, language } if language == "javascript" => {
                Some(content.as_str())
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::types::{BlockId, BlockType};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn code_block(language: &str, content: &str) -> Block {
        Block {
            id: BlockId::new(),
            kind: BlockKind::Code {
                content: content.to_string(),
                language: language.to_string(),
            },
        }
    }

    #[rstest]
    #[case(1, 1)]
    #[case(4, 4)]
    #[case(0, 2)]
    #[case(5, 2)]
    #[case(255, 2)]
    fn heading_level_clamps_to_supported_range(#[case] input: u8, #[case] expected: u8) {
        assert_eq!(clamp_heading_level(input), expected);
    }

    #[rstest]
    #[case(2, "block-image-row columns-2")]
    #[case(4, "block-image-row columns-4")]
    #[case(0, "block-image-row columns-2")]
    #[case(7, "block-image-row columns-2")]
    fn image_row_columns_fall_back_to_default(#[case] columns: u8, #[case] expected: &str) {
        assert_eq!(image_row_classes(columns), expected);
    }

    #[test]
    fn image_classes_carry_position_and_size() {
        assert_eq!(
            image_classes(ImagePosition::Left, ImageSize::Full),
            "block-image position-left size-full"
        );
    }

    #[test]
    fn empty_src_image_is_incomplete() {
        let block = Block::new(BlockType::Image);
        assert!(is_incomplete_image(&block.kind));

        let complete = BlockKind::Image {
            src: "https://example.com/a.png".to_string(),
            caption: String::new(),
            position: ImagePosition::Center,
            size: ImageSize::Medium,
        };
        assert!(!is_incomplete_image(&complete));
        assert!(!is_incomplete_image(&Block::new(BlockType::Text).kind));
    }

    #[rstest]
    #[case("css", true)]
    #[case("javascript", true)]
    #[case("html", true)]
    #[case("rust", false)]
    #[case("python", false)]
    fn page_code_covers_css_js_html(#[case] language: &str, #[case] expected: bool) {
        assert_eq!(is_page_code(&code_block(language, "").kind), expected);
    }

    #[test]
    fn code_display_is_never_page_code() {
        let kind = BlockKind::CodeDisplay {
            content: String::new(),
            language: "css".to_string(),
        };
        assert!(!is_page_code(&kind));
    }

    #[test]
    fn page_styles_joins_css_blocks_then_custom_css() {
        let blocks = vec![
            code_block("css", "body { color: red; }"),
            code_block("javascript", "alert(1)"),
            code_block("css", ".post { margin: 0; }"),
        ];
        assert_eq!(
            page_styles(&blocks, Some("h1 { font-size: 2rem; }")),
            "body { color: red; }\n\n.post { margin: 0; }\n\nh1 { font-size: 2rem; }"
        );
        assert_eq!(page_styles(&blocks[1..2], None), "");
    }

    #[test]
    fn page_scripts_and_html_keep_block_order() {
        let blocks = vec![
            code_block("javascript", "first()"),
            code_block("html", "<div>one</div>"),
            code_block("javascript", "second()"),
        ];
        assert_eq!(page_scripts(&blocks), vec!["first()", "second()"]);
        assert_eq!(page_html(&blocks), vec!["<div>one</div>"]);
    }
}
