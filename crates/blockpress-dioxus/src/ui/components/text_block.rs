use dioxus::prelude::*;

/// Rich-text block content, rendered as raw HTML.
///
/// Content is authored HTML from the post's own author; this app trusts
/// it the same way the page-code blocks are trusted, so it goes in via
/// `dangerous_inner_html` without sanitization.
#[component]
pub fn TextBlock(content: String) -> Element {
    rsx! {
        div { class: "block-text", dangerous_inner_html: "{content}" }
    }
}
