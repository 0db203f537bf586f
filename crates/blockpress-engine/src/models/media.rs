use serde::{Deserialize, Serialize};

/// An uploaded binary asset, addressed by opaque id on the media API but
/// referenced from blocks only by URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: i64,
    pub url: Option<String>,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
