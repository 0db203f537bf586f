pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
mod wire_tests;

pub use store::{BlockCmd, BlockPatch, BlockStore};
pub use types::{Block, BlockId, BlockKind, BlockType, ImagePosition, ImageSize, RowImage};
