pub mod media;
pub mod post;

pub use media::MediaAsset;
pub use post::{Author, Post, PostStatus, PostSummary};
