//! Media resource: upload, list and delete of binary assets.
//!
//! Assets are addressed by opaque id on this API but referenced from
//! blocks only by URL, so deletion by URL resolves the id via the
//! listing first. Media cleanup is best-effort: callers log failures and
//! carry on with the primary mutation.

use crate::client::ApiClient;
use crate::error::ApiError;
use blockpress_engine::MediaAsset;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// MIME type for an upload, guessed from the filename extension.
///
/// The backend accepts the image and video types below and rejects the
/// rest, so the fallback only matters for the error message it produces.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or_default().to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

fn upload_form(file: &MediaFile, alt_text: &str, post_slug: Option<&str>) -> Result<Form, ApiError> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.filename.clone())
        .mime_str(&file.mime)
        .map_err(ApiError::Network)?;
    let mut form = Form::new().part("file", part).text("alt_text", alt_text.to_string());
    if let Some(slug) = post_slug {
        form = form.text("post_slug", slug.to_string());
    }
    Ok(form)
}

impl ApiClient {
    /// `GET /media/` — the caller's uploaded assets.
    pub async fn list_media(&self) -> Result<Vec<MediaAsset>, ApiError> {
        self.get_json("/media/").await
    }

    /// `POST /media/` (multipart) — upload one file, optionally tied to a
    /// post by slug. Returns the stored asset with its URL.
    pub async fn upload_media(
        &self,
        file: &MediaFile,
        alt_text: &str,
        post_slug: Option<&str>,
    ) -> Result<MediaAsset, ApiError> {
        upload_form(file, alt_text, post_slug)?; // validate before sending
        self.send_multipart(Method::POST, "/media/", || {
            upload_form(file, alt_text, post_slug).expect("form already validated")
        })
        .await
    }

    /// `DELETE /media/{id}/`.
    pub async fn delete_media(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/media/{id}/")).await
    }

    /// Delete the asset whose URL matches, if the caller owns one.
    ///
    /// Returns whether an asset was found and deleted. Blocks reference
    /// media by URL only, so this is the cleanup path the editor uses
    /// when an image block (or one of its row images) is removed.
    pub async fn delete_media_by_url(&self, url: &str) -> Result<bool, ApiError> {
        let assets = self.list_media().await?;
        let Some(asset) = assets.iter().find(|a| a.url.as_deref() == Some(url)) else {
            log::debug!("no owned media asset matches {url}, skipping delete");
            return Ok(false);
        };
        self.delete_media(asset.id).await?;
        Ok(true)
    }
}
