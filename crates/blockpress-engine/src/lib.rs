pub mod blocks;
pub mod models;

// Re-export key types for easier usage
pub use blocks::{store::*, types::*, view};
pub use models::{media::*, post::*};
