use crate::ui::Route;
use crate::ui::app::{ForceLogin, session_expired};
use crate::ui::components::ErrorScreen;
use blockpress_api::{ApiClient, CurrentUser};
use dioxus::prelude::*;

/// The logged-in author's unpublished posts, opened into the editor.
#[component]
pub fn Drafts() -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();
    let current_user = use_context::<Signal<Option<CurrentUser>>>();

    let force_login = use_context::<ForceLogin>();

    let drafts = use_resource(move || {
        let client = client.clone();
        async move { client.drafts().await }
    });

    // A rejected refresh lands here as Unauthorized; route through the
    // shared forced-login path instead of rendering it as an error.
    use_effect(move || {
        if let Some(Err(e)) = &*drafts.read()
            && session_expired(e)
        {
            force_login.0.call(());
        }
    });

    if current_user.read().is_none() {
        return rsx! {
            p { "Log in to see your drafts." }
        };
    }

    rsx! {
        div {
            class: "post-list",
            h1 { "Drafts" }
            {match &*drafts.read() {
                Some(Ok(drafts)) if drafts.is_empty() => rsx! {
                    p { "No drafts. Start a new post from the header." }
                },
                Some(Ok(drafts)) => rsx! {
                    for draft in drafts.clone() {
                        article {
                            key: "{draft.slug}",
                            class: "post-card",
                            onclick: {
                                let slug = draft.slug.clone();
                                move |_| route.set(Route::Editor { slug: Some(slug.clone()) })
                            },
                            h2 { "{draft.title}" }
                            if !draft.description.is_empty() {
                                p { "{draft.description}" }
                            }
                            div {
                                class: "meta",
                                if let Some(updated) = &draft.updated_at {
                                    span { "updated {updated}" }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorScreen {
                        title: "Could not load drafts".to_string(),
                        message: e.to_string(),
                    }
                },
                None => rsx! {
                    p { class: "loading", "Loading…" }
                },
            }}
        }
    }
}
