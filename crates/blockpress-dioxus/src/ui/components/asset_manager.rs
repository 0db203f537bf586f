use crate::ui::app::{ForceLogin, session_expired};
use blockpress_api::{ApiClient, MediaFile, mime_for_filename};
use blockpress_engine::MediaAsset;
use dioxus::prelude::*;

/// Collapsible media library for the post being edited: the post's
/// uploaded assets with upload, copy-URL and delete controls. Copying a
/// URL is what makes an asset usable from HTML/CSS page-code blocks,
/// where nothing else would ever surface it.
///
/// The media listing is account-wide, so it is filtered down to assets
/// stored under the current post's slug; an unsaved draft has no slug
/// and therefore no assets yet.
#[component]
pub fn AssetManager(post_slug: Option<String>) -> Element {
    let client = use_context::<ApiClient>();
    let force_login = use_context::<ForceLogin>();
    let mut expanded = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut error_line = use_signal(|| None::<String>);
    let mut copied_url = use_signal(|| None::<String>);
    let mut pending_delete = use_signal(|| None::<i64>);

    let mut assets = use_resource({
        let client = client.clone();
        let post_slug = post_slug.clone();
        move || {
            let client = client.clone();
            let post_slug = post_slug.clone();
            async move {
                client
                    .list_media()
                    .await
                    .map(|all| assets_for_post(all, post_slug.as_deref()))
            }
        }
    });

    let on_upload = {
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
            error_line.set(None);
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
                            Ok(_) => assets.restart(),
                            Err(e) if session_expired(&e) => force_login.0.call(()),
                            Err(e) => {
                                log::error!("asset upload failed: {e}");
                                error_line.set(Some(format!("Upload failed: {e}")));
                            }
                        }
                    }
                    None => error_line.set(Some("Could not read file".to_string())),
                }
                uploading.set(false);
            });
        }
    };

    let asset_count = match &*assets.read() {
        Some(Ok(list)) => list.len(),
        _ => 0,
    };

    rsx! {
        div {
            class: "asset-manager",
            button {
                class: "asset-manager-toggle",
                onclick: move |_| {
                    let open = !expanded();
                    expanded.set(open);
                    if open {
                        assets.restart();
                    }
                },
                if expanded() { "▼ Assets ({asset_count})" } else { "▶ Assets ({asset_count})" }
            }
            if expanded() {
                div {
                    class: "asset-manager-content",
                    div {
                        class: "asset-upload",
                        input { r#type: "file", accept: "image/*", onchange: on_upload }
                        if uploading() {
                            span { "Uploading…" }
                        }
                        p {
                            class: "asset-help",
                            "Upload images to use in your HTML/CSS code blocks"
                        }
                    }
                    if let Some(message) = error_line() {
                        p { class: "error", "{message}" }
                    }
                    {match &*assets.read() {
                        Some(Ok(list)) if list.is_empty() => rsx! {
                            p { "No assets yet. Upload images to get started." }
                        },
                        Some(Ok(list)) => rsx! {
                            for asset in list.clone() {
                                {
                                    let id = asset.id;
                                    let filename = asset.filename.clone();
                                    let url = asset.url.clone();
                                    let client = client.clone();
                                    rsx! {
                                        div {
                                            key: "{id}",
                                            class: "asset-item",
                                            if let Some(url) = url.clone() {
                                                img { class: "asset-thumbnail", src: "{url}", width: "64" }
                                                div {
                                                    class: "asset-info",
                                                    div { class: "asset-filename", "{filename}" }
                                                    div { class: "asset-url", "{url}" }
                                                }
                                                button {
                                                    onclick: {
                                                        let url = url.clone();
                                                        move |_| {
                                                            copy_to_clipboard(&url);
                                                            copied_url.set(Some(url.clone()));
                                                        }
                                                    },
                                                    if copied_url() == Some(url.clone()) { "✓ Copied" } else { "Copy URL" }
                                                }
                                            } else {
                                                div {
                                                    class: "asset-info",
                                                    div { class: "asset-filename", "{filename}" }
                                                }
                                            }
                                            if pending_delete() == Some(id) {
                                                span { "Delete this asset? This cannot be undone." }
                                                button {
                                                    class: "danger",
                                                    onclick: move |_| {
                                                        pending_delete.set(None);
                                                        let client = client.clone();
                                                        spawn(async move {
                                                            match client.delete_media(id).await {
                                                                Ok(()) => assets.restart(),
                                                                Err(e) if session_expired(&e) => {
                                                                    force_login.0.call(())
                                                                }
                                                                Err(e) => {
                                                                    log::error!("asset delete failed: {e}");
                                                                    error_line.set(Some(format!(
                                                                        "Delete failed: {e}"
                                                                    )));
                                                                }
                                                            }
                                                        });
                                                    },
                                                    "Yes, delete"
                                                }
                                                button {
                                                    onclick: move |_| pending_delete.set(None),
                                                    "Cancel"
                                                }
                                            } else {
                                                button {
                                                    class: "delete",
                                                    onclick: move |_| pending_delete.set(Some(id)),
                                                    "×"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "error", "Could not load assets: {e}" }
                        },
                        None => rsx! {
                            p { class: "loading", "Loading…" }
                        },
                    }}
                }
            }
        }
    }
}

/// Narrow the account-wide media listing down to the current post's
/// assets. The backend stores uploads under `…/posts/{slug}/…`, so the
/// URL path is the ownership signal; with no slug yet nothing matches.
fn assets_for_post(assets: Vec<MediaAsset>, post_slug: Option<&str>) -> Vec<MediaAsset> {
    let Some(slug) = post_slug else {
        return Vec::new();
    };
    let marker = format!("/posts/{slug}/");
    assets
        .into_iter()
        .filter(|asset| asset.url.as_deref().is_some_and(|url| url.contains(&marker)))
        .collect()
}

fn copy_to_clipboard(url: &str) {
    let js = format!("navigator.clipboard.writeText({url:?});");
    document::eval(&js);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn asset(id: i64, url: Option<&str>) -> MediaAsset {
        MediaAsset {
            id,
            url: url.map(str::to_string),
            media_type: "image".to_string(),
            filename: format!("file-{id}.png"),
            file_size: 1024,
            alt_text: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_listing_is_filtered_to_the_current_post() {
        let all = vec![
            asset(1, Some("https://cdn.example.com/posts/my-post/a.png")),
            asset(2, Some("https://cdn.example.com/posts/other-post/b.png")),
            asset(3, None),
        ];
        let mine = assets_for_post(all, Some("my-post"));
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, 1);
    }

    #[test]
    fn test_unsaved_draft_has_no_assets() {
        let all = vec![asset(1, Some("https://cdn.example.com/posts/my-post/a.png"))];
        assert!(assets_for_post(all, None).is_empty());
    }

    #[test]
    fn test_slug_match_is_a_path_segment_not_a_prefix() {
        let all = vec![asset(1, Some("https://cdn.example.com/posts/my-post-two/a.png"))];
        assert!(assets_for_post(all, Some("my-post")).is_empty());
    }
}
