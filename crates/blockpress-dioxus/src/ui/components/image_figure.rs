use blockpress_engine::view;
use blockpress_engine::{BlockKind, ImagePosition, ImageSize};
use dioxus::prelude::*;

/// Single-image block. An empty source renders as a placeholder, never
/// as an `<img>` pointing at nothing.
#[component]
pub fn ImageFigure(src: String, caption: String, position: ImagePosition, size: ImageSize) -> Element {
    let kind = BlockKind::Image {
        src: src.clone(),
        caption: caption.clone(),
        position,
        size,
    };
    if view::is_incomplete_image(&kind) {
        return rsx! {
            div { class: "image-placeholder", "Image pending upload" }
        };
    }

    let classes = view::image_classes(position, size);
    rsx! {
        figure {
            class: "{classes}",
            img { src: "{src}", alt: "{caption}" }
            if !caption.is_empty() {
                figcaption { "{caption}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_figure(src: &str, caption: &str, position: ImagePosition, size: ImageSize) -> String {
        let mut dom = VirtualDom::new_with_props(
            ImageFigure,
            ImageFigureProps {
                src: src.to_string(),
                caption: caption.to_string(),
                position,
                size,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_empty_source_renders_placeholder_without_img_element() {
        let html = render_figure("", "", ImagePosition::Center, ImageSize::Medium);
        assert!(html.contains("image-placeholder"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_position_and_size_become_css_classes() {
        let html = render_figure(
            "https://example.com/a.png",
            "",
            ImagePosition::Left,
            ImageSize::Full,
        );
        assert!(html.contains("position-left"));
        assert!(html.contains("size-full"));
    }

    #[test]
    fn test_caption_renders_only_when_present() {
        let with = render_figure(
            "https://example.com/a.png",
            "A caption",
            ImagePosition::Center,
            ImageSize::Medium,
        );
        assert!(with.contains("figcaption"));
        assert!(with.contains("A caption"));

        let without = render_figure(
            "https://example.com/a.png",
            "",
            ImagePosition::Center,
            ImageSize::Medium,
        );
        assert!(!without.contains("figcaption"));
    }
}
