use crate::ui::app::{ForceLogin, session_expired};
use blockpress_api::{ApiClient, MediaFile, mime_for_filename};
use blockpress_engine::{BlockPatch, RowImage};
use dioxus::prelude::*;

/// Image-row block editor: column count, per-image caption and removal,
/// and an upload slot that appends to the row.
///
/// Removing one image from the row deletes its server asset best-effort
/// before patching the shortened list; the row block itself stays.
#[component]
pub fn ImageRowEditor(
    images: Vec<RowImage>,
    columns: u8,
    post_slug: Option<String>,
    on_patch: Callback<BlockPatch>,
    on_delete: Callback<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let force_login = use_context::<ForceLogin>();
    let mut uploading = use_signal(|| false);
    let mut upload_error = use_signal(|| None::<String>);

    let on_add = {
        let client = client.clone();
        let post_slug = post_slug.clone();
        let images = images.clone();
        move |evt: FormEvent| {
            let Some(file_engine) = evt.files() else {
                return;
            };
            let Some(name) = file_engine.files().first().cloned() else {
                return;
            };
            uploading.set(true);
            upload_error.set(None);
            let client = client.clone();
            let post_slug = post_slug.clone();
            let images = images.clone();
            spawn(async move {
                match file_engine.read_file(&name).await {
                    Some(bytes) => {
                        let file = MediaFile {
                            mime: mime_for_filename(&name).to_string(),
                            filename: name,
                            bytes,
                        };
                        match client.upload_media(&file, "", post_slug.as_deref()).await {
                            Ok(asset) => match asset.url {
                                Some(url) => {
                                    let mut next = images.clone();
                                    next.push(RowImage {
                                        src: url,
                                        caption: String::new(),
                                    });
                                    on_patch.call(BlockPatch::Images(next));
                                }
                                None => upload_error.set(Some("Upload returned no URL".to_string())),
                            },
                            Err(e) if session_expired(&e) => force_login.0.call(()),
                            Err(e) => {
                                log::error!("media upload failed: {e}");
                                upload_error.set(Some(e.to_string()));
                            }
                        }
                    }
                    None => upload_error.set(Some("Could not read file".to_string())),
                }
                uploading.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "image-row-editor",
            div {
                class: "block-toolbar",
                span { "Image row" }
                select {
                    value: "{columns}",
                    onchange: move |evt| {
                        if let Ok(columns) = evt.value().parse::<u8>() {
                            on_patch.call(BlockPatch::Columns(columns));
                        }
                    },
                    for option_columns in 2..=4u8 {
                        option { value: "{option_columns}", "{option_columns} columns" }
                    }
                }
                button { class: "delete", onclick: move |_| on_delete.call(()), "Delete" }
            }
            div {
                class: "row-images",
                for (i, image) in images.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: "row-image-editor",
                        img { src: "{image.src}", width: "120" }
                        input {
                            r#type: "text",
                            placeholder: "Caption",
                            value: "{image.caption}",
                            oninput: {
                                let images = images.clone();
                                move |evt: FormEvent| {
                                    let mut next = images.clone();
                                    next[i].caption = evt.value();
                                    on_patch.call(BlockPatch::Images(next));
                                }
                            },
                        }
                        button {
                            onclick: {
                                let client = client.clone();
                                let images = images.clone();
                                move |_| {
                                    let client = client.clone();
                                    let url = images[i].src.clone();
                                    let mut next = images.clone();
                                    next.remove(i);
                                    spawn(async move {
                                        if !url.is_empty()
                                            && let Err(e) = client.delete_media_by_url(&url).await
                                        {
                                            log::warn!("media delete for {url} failed: {e}");
                                        }
                                        on_patch.call(BlockPatch::Images(next));
                                    });
                                }
                            },
                            "Remove"
                        }
                    }
                }
            }
            div {
                class: "image-upload",
                input { r#type: "file", accept: "image/*,video/*", onchange: on_add }
                if uploading() {
                    span { "Uploading…" }
                }
                if let Some(message) = upload_error() {
                    span { class: "error", "{message}" }
                }
            }
        }
    }
}
