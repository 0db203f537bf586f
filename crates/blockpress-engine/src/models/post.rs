use crate::blocks::types::Block;
use serde::{Deserialize, Serialize};

/// Publication status of a post. Draft and published are the only two
/// states; the transition between them is a backend call, not a field
/// edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Post author as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Full post: metadata plus the ordered block sequence.
///
/// `slug` is None until the backend assigns one on first save; slug,
/// author, cover_image_url and the timestamps are server-derived and
/// read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub custom_css: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Post {
    /// A new post starts as an empty draft with zero blocks and no slug.
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            slug: None,
            description: String::new(),
            cover_image_url: None,
            blocks: Vec::new(),
            status: PostStatus::Draft,
            custom_css: None,
            author: None,
            created_at: None,
            updated_at: None,
            published_at: None,
        }
    }

    /// Whether the post has been persisted at least once.
    pub fn is_persisted(&self) -> bool {
        self.slug.is_some()
    }
}

impl Default for Post {
    fn default() -> Self {
        Self::new()
    }
}

/// List-shape post as returned by `GET /posts/` and `GET /posts/drafts/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}
