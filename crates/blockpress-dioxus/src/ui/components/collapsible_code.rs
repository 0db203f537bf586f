use blockpress_engine::view::CODE_COLLAPSE_MAX_HEIGHT;
use dioxus::prelude::*;

/// Displayed code block that collapses behind a toggle when its
/// rendered height exceeds [`CODE_COLLAPSE_MAX_HEIGHT`].
///
/// The height is measured from the mounted `<pre>` (which is never
/// clipped by the wrapper), so short snippets get no toggle at all and
/// long ones start collapsed.
#[component]
pub fn CollapsibleCode(content: String, language: String) -> Element {
    let mut expanded = use_signal(|| false);
    let mut overflows = use_signal(|| false);

    let code_class = format!("language-{language}");
    let wrapper_class = if expanded() || !overflows() {
        "code-wrapper"
    } else {
        "code-wrapper collapsed"
    };
    let wrapper_style = if expanded() || !overflows() {
        String::new()
    } else {
        format!("max-height: {CODE_COLLAPSE_MAX_HEIGHT}px; overflow: hidden;")
    };

    rsx! {
        div {
            class: "collapsible-code-block",
            div {
                class: "{wrapper_class}",
                style: "{wrapper_style}",
                pre {
                    onmounted: move |evt| async move {
                        if let Ok(rect) = evt.data().get_client_rect().await {
                            overflows.set(rect.size.height > CODE_COLLAPSE_MAX_HEIGHT);
                        }
                    },
                    code { class: "{code_class}", "{content}" }
                }
                if !expanded() && overflows() {
                    div { class: "code-fade" }
                }
            }
            if overflows() {
                button {
                    class: "toggle-code-btn",
                    onclick: move |_| expanded.set(!expanded()),
                    if expanded() { "Show less" } else { "Show more" }
                }
            }
        }
    }
}
