use crate::ui::Route;
use crate::ui::app::{ForceLogin, session_expired};
use crate::ui::components::{AssetManager, BlockEditor, ErrorScreen};
use blockpress_api::{ApiClient, CoverImage, PostSession, PostSessionError, mime_for_filename};
use blockpress_engine::{BlockCmd, BlockId, BlockStore, Post, PostStatus};
use dioxus::prelude::*;

/// Whether a session error means the login screen, not an error line.
fn expired(error: &PostSessionError) -> bool {
    matches!(error, PostSessionError::Api(api) if session_expired(api))
}

#[derive(Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// The post editor, for a fresh draft (no slug) or an existing post.
///
/// All edits go through the [`PostSession`]; the components render from
/// a snapshot signal that is refreshed after every mutation, so the
/// session stays the single source of truth while the UI stays plain
/// Dioxus state.
#[component]
pub fn EditorView(slug: Option<String>) -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();
    let force_login = use_context::<ForceLogin>();
    let session = use_hook({
        let client = client.clone();
        move || PostSession::new_draft(client)
    });

    let mut snapshot = use_signal(|| (Post::new(), BlockStore::new()));
    let mut load_state = use_signal(|| {
        if slug.is_some() {
            LoadState::Loading
        } else {
            LoadState::Ready
        }
    });
    let mut busy = use_signal(|| false);
    let mut status_line = use_signal(|| None::<String>);
    let mut cover = use_signal(|| None::<CoverImage>);
    let mut pending_block_delete = use_signal(|| None::<(BlockId, Vec<String>)>);
    let mut confirm_post_delete = use_signal(|| false);

    // Pull the session state into the render snapshot.
    let sync = {
        let session = session.clone();
        move || {
            let state = session.read(|post, store| (post.clone(), store.clone()));
            snapshot.set(state);
        }
    };

    use_future({
        let session = session.clone();
        let slug = slug.clone();
        let sync = sync.clone();
        move || {
            let session = session.clone();
            let slug = slug.clone();
            let mut sync = sync.clone();
            async move {
                if let Some(slug) = slug {
                    match session.load(&slug).await {
                        Ok(()) => {
                            sync();
                            load_state.set(LoadState::Ready);
                        }
                        Err(e) if expired(&e) => force_login.0.call(()),
                        Err(e) => load_state.set(LoadState::Failed(e.to_string())),
                    }
                }
            }
        }
    });

    let on_command = {
        let session = session.clone();
        let mut sync = sync.clone();
        Callback::new(move |cmd: BlockCmd| {
            session.edit_blocks(|store| store.apply(cmd));
            sync();
        })
    };

    // Removing a block that references uploaded media goes through a
    // confirmation offering to delete the assets as well.
    let on_delete_requested = {
        let session = session.clone();
        let mut sync = sync.clone();
        Callback::new(move |id: BlockId| {
            let urls = session.read(|_, store| store.media_urls(id));
            if urls.is_empty() {
                session.edit_blocks(|store| store.remove(id));
                sync();
            } else {
                pending_block_delete.set(Some((id, urls)));
            }
        })
    };

    let on_save = {
        let session = session.clone();
        let sync = sync.clone();
        move |_| {
            let title = session.read(|post, _| post.title.trim().to_string());
            if title.is_empty() {
                status_line.set(Some("Title is required".to_string()));
                return;
            }
            busy.set(true);
            status_line.set(None);
            let session = session.clone();
            let mut sync = sync.clone();
            spawn(async move {
                let cover_file = cover.peek().clone();
                match session.save(cover_file.as_ref()).await {
                    Ok(saved) => {
                        cover.set(None);
                        sync();
                        status_line.set(Some(match saved.slug {
                            Some(slug) => format!("Saved as {slug}"),
                            None => "Saved".to_string(),
                        }));
                    }
                    Err(e) if expired(&e) => force_login.0.call(()),
                    Err(e) => {
                        log::error!("save failed: {e}");
                        status_line.set(Some(format!("Save failed: {e}")));
                    }
                }
                busy.set(false);
            });
        }
    };

    // Publishing an unsaved draft saves it first; the backend only
    // transitions persisted posts.
    let on_publish = {
        let session = session.clone();
        let sync = sync.clone();
        move |_| {
            let title = session.read(|post, _| post.title.trim().to_string());
            if title.is_empty() {
                status_line.set(Some("Title is required".to_string()));
                return;
            }
            busy.set(true);
            status_line.set(None);
            let session = session.clone();
            let mut sync = sync.clone();
            spawn(async move {
                let result = async {
                    if session.slug().is_none() {
                        let cover_file = cover.peek().clone();
                        session.save(cover_file.as_ref()).await?;
                        cover.set(None);
                    }
                    session.publish().await
                }
                .await;
                match result {
                    Ok(_) => {
                        sync();
                        status_line.set(Some("Published".to_string()));
                    }
                    Err(e) if expired(&e) => force_login.0.call(()),
                    Err(e) => {
                        log::error!("publish failed: {e}");
                        status_line.set(Some(format!("Publish failed: {e}")));
                    }
                }
                busy.set(false);
            });
        }
    };

    let on_unpublish = {
        let session = session.clone();
        let sync = sync.clone();
        move |_| {
            busy.set(true);
            status_line.set(None);
            let session = session.clone();
            let mut sync = sync.clone();
            spawn(async move {
                match session.unpublish().await {
                    Ok(_) => {
                        sync();
                        status_line.set(Some("Back to draft".to_string()));
                    }
                    Err(e) if expired(&e) => force_login.0.call(()),
                    Err(e) => {
                        log::error!("unpublish failed: {e}");
                        status_line.set(Some(format!("Unpublish failed: {e}")));
                    }
                }
                busy.set(false);
            });
        }
    };

    let on_delete_post = {
        let session = session.clone();
        move |_| {
            busy.set(true);
            confirm_post_delete.set(false);
            let session = session.clone();
            spawn(async move {
                match session.delete().await {
                    Ok(()) => route.set(Route::Drafts),
                    Err(e) if expired(&e) => force_login.0.call(()),
                    Err(e) => {
                        log::error!("post delete failed: {e}");
                        status_line.set(Some(format!("Delete failed: {e}")));
                    }
                }
                busy.set(false);
            });
        }
    };

    let on_cover_pick = move |evt: FormEvent| {
        if let Some(file_engine) = evt.files() {
            let Some(name) = file_engine.files().first().cloned() else {
                return;
            };
            spawn(async move {
                match file_engine.read_file(&name).await {
                    Some(bytes) => {
                        cover.set(Some(CoverImage {
                            mime: mime_for_filename(&name).to_string(),
                            filename: name,
                            bytes,
                        }));
                    }
                    None => status_line.set(Some("Could not read cover image".to_string())),
                }
            });
        }
    };

    match load_state() {
        LoadState::Loading => {
            return rsx! {
                p { class: "loading", "Loading…" }
            };
        }
        LoadState::Failed(message) => {
            return rsx! {
                ErrorScreen {
                    title: "Could not open post".to_string(),
                    message,
                }
            };
        }
        LoadState::Ready => {}
    }

    let (post, store) = snapshot();
    let persisted = post.is_persisted();
    let custom_css = post.custom_css.clone().unwrap_or_default();

    rsx! {
        div {
            class: "editor",
            if let Some(message) = status_line() {
                p { class: "status-line", "{message}" }
            }
            input {
                class: "title-input",
                r#type: "text",
                placeholder: "Title",
                value: "{post.title}",
                oninput: {
                    let session = session.clone();
                    let mut sync = sync.clone();
                    move |evt: FormEvent| {
                        session.edit_post(|p| p.title = evt.value());
                        sync();
                    }
                },
            }
            input {
                class: "description-input",
                r#type: "text",
                placeholder: "Short description",
                value: "{post.description}",
                oninput: {
                    let session = session.clone();
                    let mut sync = sync.clone();
                    move |evt: FormEvent| {
                        session.edit_post(|p| p.description = evt.value());
                        sync();
                    }
                },
            }
            div {
                class: "cover-picker",
                label { "Cover image: " }
                input { r#type: "file", accept: "image/*", onchange: on_cover_pick }
                if let Some(file) = cover.read().as_ref() {
                    span { "{file.filename} (uploads on save)" }
                } else if let Some(url) = &post.cover_image_url {
                    img { class: "cover-thumb", src: "{url}", width: "120" }
                }
            }
            textarea {
                class: "css-input",
                placeholder: "Custom CSS (optional)",
                value: "{custom_css}",
                oninput: {
                    let session = session.clone();
                    let mut sync = sync.clone();
                    move |evt: FormEvent| {
                        let value = evt.value();
                        session.edit_post(|p| {
                            p.custom_css = if value.is_empty() { None } else { Some(value.clone()) };
                        });
                        sync();
                    }
                },
            }
            div {
                class: "editor-actions",
                button { disabled: busy(), onclick: on_save, "Save" }
                if post.status == PostStatus::Draft {
                    button { disabled: busy(), onclick: on_publish, "Publish" }
                } else {
                    button { disabled: busy(), onclick: on_unpublish, "Unpublish" }
                }
                if persisted {
                    if confirm_post_delete() {
                        span { "Really delete this post?" }
                        button { class: "danger", disabled: busy(), onclick: on_delete_post, "Yes, delete" }
                        button { onclick: move |_| confirm_post_delete.set(false), "Cancel" }
                    } else {
                        button {
                            class: "danger",
                            disabled: busy(),
                            onclick: move |_| confirm_post_delete.set(true),
                            "Delete"
                        }
                    }
                }
            }
            AssetManager { post_slug: post.slug.clone() }
            if let Some((id, urls)) = pending_block_delete() {
                div {
                    class: "confirm-bar",
                    p { "This block references {urls.len()} uploaded file(s). Delete them from the server too?" }
                    button {
                        onclick: {
                            let client = client.clone();
                            let session = session.clone();
                            let sync = sync.clone();
                            let urls = urls.clone();
                            move |_| {
                                pending_block_delete.set(None);
                                let client = client.clone();
                                let session = session.clone();
                                let mut sync = sync.clone();
                                let urls = urls.clone();
                                spawn(async move {
                                    for url in &urls {
                                        // Best-effort: a failed asset delete never
                                        // blocks the block removal.
                                        if let Err(e) = client.delete_media_by_url(url).await {
                                            log::warn!("media delete for {url} failed: {e}");
                                        }
                                    }
                                    session.edit_blocks(|store| store.remove(id));
                                    sync();
                                });
                            }
                        },
                        "Delete block and media"
                    }
                    button {
                        onclick: {
                            let session = session.clone();
                            let mut sync = sync.clone();
                            move |_| {
                                pending_block_delete.set(None);
                                session.edit_blocks(|store| store.remove(id));
                                sync();
                            }
                        },
                        "Delete block only"
                    }
                    button { onclick: move |_| pending_block_delete.set(None), "Cancel" }
                }
            }
            BlockEditor {
                blocks: store.blocks().to_vec(),
                post_slug: post.slug.clone(),
                on_command,
                on_delete_requested,
            }
        }
    }
}
