use crate::ui::Route;
use crate::ui::components::ErrorScreen;
use blockpress_api::{ApiClient, ApiError};
use dioxus::prelude::*;

/// One author's published posts, reachable from any byline.
#[component]
pub fn AuthorPosts(username: String) -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();

    let heading = format!("{username}'s posts");
    let posts = use_resource(move || {
        let client = client.clone();
        let username = username.clone();
        async move { client.user_posts(&username).await }
    });

    rsx! {
        div {
            class: "post-list",
            h1 { "{heading}" }
            {match &*posts.read() {
                Some(Ok(posts)) if posts.is_empty() => rsx! {
                    p { "No posts yet." }
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
                                if let Some(published) = &post.published_at {
                                    span { "{published}" }
                                }
                            }
                        }
                    }
                },
                Some(Err(ApiError::NotFound)) => rsx! {
                    ErrorScreen {
                        title: "User not found".to_string(),
                        message: "No author with that name.".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use blockpress_api::Session;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    // Context the view pulls in; nothing is fetched during a plain
    // rebuild, so the page renders its loading state.
    #[component]
    fn Harness(username: String) -> Element {
        use_context_provider(|| ApiClient::new(Session::new("http://localhost:8000/blog/api")));
        use_context_provider(|| Signal::new(Route::Home));
        rsx! {
            AuthorPosts { username }
        }
    }

    #[test]
    fn test_author_page_is_titled_by_username() {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                username: "ada".to_string(),
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("ada's posts"));
        assert!(html.contains("Loading"));
    }
}
