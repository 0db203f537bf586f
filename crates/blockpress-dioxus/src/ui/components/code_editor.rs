use blockpress_engine::BlockPatch;
use blockpress_engine::view;
use dioxus::prelude::*;

const LANGUAGES: [&str; 7] = ["javascript", "css", "html", "rust", "python", "bash", "json"];

/// Shared editor for `code` and `code-display` blocks.
///
/// The only difference is the hint: a `code` block in a page language
/// runs on the published page instead of rendering, and the editor says
/// so; `code-display` blocks always just display.
#[component]
pub fn CodeEditor(
    content: String,
    language: String,
    display_only: bool,
    on_patch: Callback<BlockPatch>,
    on_delete: Callback<()>,
) -> Element {
    let applied_to_page = !display_only
        && view::is_page_code(&blockpress_engine::BlockKind::Code {
            content: String::new(),
            language: language.clone(),
        });

    rsx! {
        div {
            class: "code-block-editor",
            div {
                class: "block-toolbar",
                span { if display_only { "Code display" } else { "Code" } }
                select {
                    value: "{language}",
                    onchange: move |evt| on_patch.call(BlockPatch::Language(evt.value())),
                    for lang in LANGUAGES {
                        option { value: "{lang}", "{lang}" }
                    }
                }
                if applied_to_page {
                    span { class: "page-code-hint", "runs on the published page" }
                }
                button { class: "delete", onclick: move |_| on_delete.call(()), "Delete" }
            }
            textarea {
                class: "code-input",
                spellcheck: false,
                placeholder: if display_only { "Code to display" } else { "Code" },
                rows: super::text_editor::textarea_rows(&content),
                value: "{content}",
                oninput: move |evt| on_patch.call(BlockPatch::Content(evt.value())),
            }
        }
    }
}
