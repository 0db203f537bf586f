use blockpress_engine::RowImage;
use blockpress_engine::view;
use dioxus::prelude::*;

/// Multi-image row laid out on a column grid. Images with no source yet
/// show a placeholder in their grid slot.
#[component]
pub fn ImageRow(images: Vec<RowImage>, columns: u8) -> Element {
    let classes = view::image_row_classes(columns);
    rsx! {
        div {
            class: "{classes}",
            for (i, image) in images.iter().enumerate() {
                if image.src.is_empty() {
                    div { key: "{i}", class: "image-placeholder", "Image pending upload" }
                } else {
                    figure {
                        key: "{i}",
                        class: "image-row-item",
                        img { src: "{image.src}", alt: "{image.caption}" }
                        if !image.caption.is_empty() {
                            figcaption { "{image.caption}" }
                        }
                    }
                }
            }
        }
    }
}
