use crate::ui::Route;
use crate::ui::components::ErrorScreen;
use blockpress_api::ApiClient;
use dioxus::prelude::*;

/// Published posts, newest first, as the backend orders them.
#[component]
pub fn Home() -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();

    let posts = use_resource(move || {
        let client = client.clone();
        async move { client.list_posts().await }
    });

    rsx! {
        div {
            class: "post-list",
            h1 { "Posts" }
            {match &*posts.read() {
                Some(Ok(posts)) if posts.is_empty() => rsx! {
                    p { "Nothing published yet." }
                },
                Some(Ok(posts)) => rsx! {
                    for post in posts.clone() {
                        article {
                            key: "{post.slug}",
                            class: "post-card",
                            onclick: {
                                let slug = post.slug.clone();
                                move |_| route.set(Route::Post { slug: slug.clone() })
                            },
                            h2 { "{post.title}" }
                            if !post.description.is_empty() {
                                p { "{post.description}" }
                            }
                            div {
                                class: "meta",
                                if let Some(author) = &post.author {
                                    span { "by {author.username}" }
                                }
                                if let Some(published) = &post.published_at {
                                    span { "{published}" }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorScreen {
                        title: "Could not load posts".to_string(),
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
