mod asset_manager;
mod block_editor;
mod block_renderer;
mod code_editor;
mod collapsible_code;
mod error_screen;
mod heading_block;
mod heading_editor;
mod image_editor;
mod image_figure;
mod image_row;
mod image_row_editor;
mod text_block;
mod text_editor;

pub use asset_manager::AssetManager;
pub use block_editor::BlockEditor;
pub use block_renderer::BlockRenderer;
pub use code_editor::CodeEditor;
pub use collapsible_code::CollapsibleCode;
pub use error_screen::ErrorScreen;
pub use heading_block::HeadingBlock;
pub use heading_editor::HeadingEditor;
pub use image_editor::ImageEditor;
pub use image_figure::ImageFigure;
pub use image_row::ImageRow;
pub use image_row_editor::ImageRowEditor;
pub use text_block::TextBlock;
pub use text_editor::TextEditor;
