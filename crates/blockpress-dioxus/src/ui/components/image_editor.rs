use crate::ui::app::{ForceLogin, session_expired};
use blockpress_api::{ApiClient, MediaFile, mime_for_filename};
use blockpress_engine::{BlockPatch, ImagePosition, ImageSize};
use dioxus::prelude::*;

/// Single-image block editor.
///
/// With no source yet it is an upload affordance: picking a file uploads
/// it and patches the returned URL in. Once uploaded it shows the
/// preview with caption, position and size controls. "Remove image"
/// only clears the source; deleting the server asset is the view's
/// confirmation flow, triggered through block deletion.
#[component]
pub fn ImageEditor(
    src: String,
    caption: String,
    position: ImagePosition,
    size: ImageSize,
    post_slug: Option<String>,
    on_patch: Callback<BlockPatch>,
    on_delete: Callback<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let force_login = use_context::<ForceLogin>();
    let mut uploading = use_signal(|| false);
    let mut upload_error = use_signal(|| None::<String>);

    let on_pick = {
        let client = client.clone();
        let post_slug = post_slug.clone();
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
                                Some(url) => on_patch.call(BlockPatch::Src(url)),
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
            class: "image-block-editor",
            div {
                class: "block-toolbar",
                span { "Image" }
                select {
                    value: "{position.as_str()}",
                    onchange: move |evt| {
                        on_patch.call(BlockPatch::Position(parse_position(&evt.value())));
                    },
                    option { value: "left", "Left" }
                    option { value: "center", "Center" }
                    option { value: "right", "Right" }
                }
                select {
                    value: "{size.as_str()}",
                    onchange: move |evt| {
                        on_patch.call(BlockPatch::Size(parse_size(&evt.value())));
                    },
                    option { value: "small", "Small" }
                    option { value: "medium", "Medium" }
                    option { value: "large", "Large" }
                    option { value: "full", "Full width" }
                }
                button { class: "delete", onclick: move |_| on_delete.call(()), "Delete" }
            }
            if src.is_empty() {
                div {
                    class: "image-upload",
                    input { r#type: "file", accept: "image/*,video/*", onchange: on_pick }
                    if uploading() {
                        span { "Uploading…" }
                    }
                    if let Some(message) = upload_error() {
                        span { class: "error", "{message}" }
                    }
                }
            } else {
                div {
                    class: "image-preview",
                    img { src: "{src}", width: "240" }
                    input {
                        r#type: "text",
                        placeholder: "Caption (optional)",
                        value: "{caption}",
                        oninput: move |evt| on_patch.call(BlockPatch::Caption(evt.value())),
                    }
                    button {
                        onclick: move |_| on_patch.call(BlockPatch::Src(String::new())),
                        "Remove image"
                    }
                }
            }
        }
    }
}

fn parse_position(value: &str) -> ImagePosition {
    match value {
        "left" => ImagePosition::Left,
        "right" => ImagePosition::Right,
        _ => ImagePosition::Center,
    }
}

fn parse_size(value: &str) -> ImageSize {
    match value {
        "small" => ImageSize::Small,
        "large" => ImageSize::Large,
        "full" => ImageSize::Full,
        _ => ImageSize::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_values_map_back_to_variants() {
        assert_eq!(parse_position("left"), ImagePosition::Left);
        assert_eq!(parse_position("bogus"), ImagePosition::Center);
        assert_eq!(parse_size("full"), ImageSize::Full);
        assert_eq!(parse_size("bogus"), ImageSize::Medium);
    }
}
