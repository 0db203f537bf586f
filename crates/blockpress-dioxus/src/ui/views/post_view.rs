use crate::ui::Route;
use crate::ui::components::{BlockRenderer, ErrorScreen};
use blockpress_api::{ApiClient, ApiError, CurrentUser};
use blockpress_engine::view;
use dioxus::prelude::*;

/// A published post (or the author's own draft) rendered read-only.
///
/// Page-code blocks never render as content here: CSS blocks land in a
/// `<style>` element, HTML blocks are appended as raw fragments after
/// the content, and JavaScript blocks become `<script>` bodies.
#[component]
pub fn PostView(slug: String) -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();
    let current_user = use_context::<Signal<Option<CurrentUser>>>();

    let post = use_resource(move || {
        let client = client.clone();
        let slug = slug.clone();
        async move { client.get_post(&slug).await }
    });

    match &*post.read() {
        Some(Ok(post)) => {
            let styles = view::page_styles(&post.blocks, post.custom_css.as_deref());
            let html_fragments: Vec<String> =
                view::page_html(&post.blocks).into_iter().map(str::to_string).collect();
            let scripts: Vec<String> =
                view::page_scripts(&post.blocks).into_iter().map(str::to_string).collect();
            let is_author = match (current_user.read().as_ref(), post.author.as_ref()) {
                (Some(user), Some(author)) => user.id == author.id,
                _ => false,
            };
            let edit_slug = post.slug.clone();

            rsx! {
                article {
                    class: "post",
                    if !styles.is_empty() {
                        style { "{styles}" }
                    }
                    header {
                        h1 { "{post.title}" }
                        if !post.description.is_empty() {
                            p { class: "description", "{post.description}" }
                        }
                        div {
                            class: "meta",
                            if let Some(author) = &post.author {
                                button {
                                    class: "author-link",
                                    onclick: {
                                        let username = author.username.clone();
                                        move |_| route.set(Route::Author { username: username.clone() })
                                    },
                                    "by {author.username}"
                                }
                            }
                            if let Some(published) = &post.published_at {
                                span { "{published}" }
                            }
                            if is_author {
                                button {
                                    onclick: move |_| {
                                        route.set(Route::Editor { slug: edit_slug.clone() })
                                    },
                                    "Edit"
                                }
                            }
                        }
                        if let Some(cover) = &post.cover_image_url {
                            img { class: "cover-image", src: "{cover}" }
                        }
                    }
                    div {
                        class: "content",
                        BlockRenderer { blocks: post.blocks.clone() }
                    }
                    for (i, fragment) in html_fragments.iter().enumerate() {
                        div { key: "{i}", dangerous_inner_html: "{fragment}" }
                    }
                    for (i, body) in scripts.iter().enumerate() {
                        script { key: "{i}", "{body}" }
                    }
                }
            }
        }
        Some(Err(ApiError::NotFound)) => rsx! {
            ErrorScreen {
                title: "Post not found".to_string(),
                message: "This post does not exist or has been removed.".to_string(),
            }
        },
        Some(Err(e)) => rsx! {
            ErrorScreen {
                title: "Could not load post".to_string(),
                message: e.to_string(),
            }
        },
        None => rsx! {
            p { class: "loading", "Loading…" }
        },
    }
}
