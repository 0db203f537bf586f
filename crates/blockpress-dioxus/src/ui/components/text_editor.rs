use blockpress_engine::BlockPatch;
use dioxus::prelude::*;

/// Rich-text block editor. Plain textarea over the block's HTML; every
/// keystroke commits a content patch so a save mid-edit loses nothing.
#[component]
pub fn TextEditor(content: String, on_patch: Callback<BlockPatch>, on_delete: Callback<()>) -> Element {
    rsx! {
        div {
            class: "text-block-editor",
            div {
                class: "block-toolbar",
                span { "Text" }
                button { class: "delete", onclick: move |_| on_delete.call(()), "Delete" }
            }
            textarea {
                class: "text-editor",
                placeholder: "Write something…",
                rows: textarea_rows(&content),
                value: "{content}",
                oninput: move |evt| on_patch.call(BlockPatch::Content(evt.value())),
            }
        }
    }
}

/// Rows for a content textarea, capped so long blocks stay manageable.
pub(super) fn textarea_rows(content: &str) -> u32 {
    (content.lines().count().max(2) as u32).min(20)
}
