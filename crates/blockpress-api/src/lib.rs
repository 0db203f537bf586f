pub mod client;
pub mod error;
pub mod media;
pub mod post_session;
pub mod posts;
pub mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use media::{MediaFile, mime_for_filename};
pub use post_session::{PostSession, PostSessionError};
pub use posts::{CoverImage, PostDraft};
pub use session::{CurrentUser, Session, TokenPair};
