use blockpress_engine::view;
use dioxus::prelude::*;

/// Heading block. Persisted levels outside 1..=4 clamp to the default.
#[component]
pub fn HeadingBlock(content: String, level: u8) -> Element {
    match view::clamp_heading_level(level) {
        1 => rsx! {
            h1 { class: "block-heading", "{content}" }
        },
        3 => rsx! {
            h3 { class: "block-heading", "{content}" }
        },
        4 => rsx! {
            h4 { class: "block-heading", "{content}" }
        },
        _ => rsx! {
            h2 { class: "block-heading", "{content}" }
        },
    }
}
