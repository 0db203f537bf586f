use blockpress_engine::BlockPatch;
use dioxus::prelude::*;

/// Heading block editor: level select (1..=4) plus the heading text.
#[component]
pub fn HeadingEditor(
    content: String,
    level: u8,
    on_patch: Callback<BlockPatch>,
    on_delete: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "heading-block-editor",
            div {
                class: "block-toolbar",
                span { "Heading" }
                select {
                    value: "{level}",
                    onchange: move |evt| {
                        if let Ok(level) = evt.value().parse::<u8>() {
                            on_patch.call(BlockPatch::Level(level));
                        }
                    },
                    for option_level in 1..=4u8 {
                        option { value: "{option_level}", "H{option_level}" }
                    }
                }
                button { class: "delete", onclick: move |_| on_delete.call(()), "Delete" }
            }
            input {
                r#type: "text",
                class: "heading-input",
                placeholder: "Heading text",
                value: "{content}",
                oninput: move |evt| on_patch.call(BlockPatch::Content(evt.value())),
            }
        }
    }
}
