use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one block within a post.
///
/// Generated client-side when the block is created and kept for the
/// block's whole lifetime, so the editor can address update/remove/reorder
/// operations at it. It round-trips through the backend unchanged but
/// carries no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Horizontal placement hint for an image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Left,
    #[default]
    Center,
    Right,
}

impl ImagePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Left => "left",
            ImagePosition::Center => "center",
            ImagePosition::Right => "right",
        }
    }
}

/// Display size hint for an image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Full => "full",
        }
    }
}

/// One image inside an image-row block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub caption: String,
}

fn default_heading_level() -> u8 {
    2
}

fn default_columns() -> u8 {
    2
}

fn default_language() -> String {
    "javascript".to_string()
}

/// Variant-specific content of a block.
///
/// Closed set: adding a variant means extending this enum plus one
/// editor-case and one renderer-case in the UI crate, which the
/// exhaustive matches there enforce. A block's variant is fixed at
/// creation; changing type means delete and recreate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockKind {
    Text {
        #[serde(default)]
        content: String,
    },
    Heading {
        #[serde(default)]
        content: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        caption: String,
        #[serde(default)]
        position: ImagePosition,
        #[serde(default)]
        size: ImageSize,
    },
    ImageRow {
        #[serde(default)]
        images: Vec<RowImage>,
        #[serde(default = "default_columns")]
        columns: u8,
    },
    Code {
        #[serde(default)]
        content: String,
        #[serde(default = "default_language")]
        language: String,
    },
    CodeDisplay {
        #[serde(default)]
        content: String,
        #[serde(default = "default_language")]
        language: String,
    },
}

/// Tag used to create a new block of a given variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Text,
    Heading,
    Image,
    ImageRow,
    Code,
    CodeDisplay,
}

impl BlockType {
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::Heading => "Heading",
            BlockType::Image => "Image",
            BlockType::ImageRow => "Image Row",
            BlockType::Code => "Code",
            BlockType::CodeDisplay => "Code Display",
        }
    }
}

/// One atomic unit of post content, wire shape `{id, type, ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Create a block of the given variant with that variant's default
    /// field values and a freshly generated id.
    pub fn new(block_type: BlockType) -> Self {
        let kind = match block_type {
            BlockType::Text => BlockKind::Text {
                content: String::new(),
            },
            BlockType::Heading => BlockKind::Heading {
                content: String::new(),
                level: default_heading_level(),
            },
            BlockType::Image => BlockKind::Image {
                src: String::new(),
                caption: String::new(),
                position: ImagePosition::default(),
                size: ImageSize::default(),
            },
            BlockType::ImageRow => BlockKind::ImageRow {
                images: Vec::new(),
                columns: default_columns(),
            },
            BlockType::Code => BlockKind::Code {
                content: String::new(),
                language: default_language(),
            },
            BlockType::CodeDisplay => BlockKind::CodeDisplay {
                content: String::new(),
                language: default_language(),
            },
        };
        Self {
            id: BlockId::new(),
            kind,
        }
    }

    /// Non-empty media URLs referenced by this block, if any.
    ///
    /// Drives the delete-asset confirmation the editor offers before the
    /// block is removed from the store.
    pub fn media_urls(&self) -> Vec<&str> {
        match &self.kind {
            BlockKind::Image { src, .. } if !src.is_empty() => vec![src.as_str()],
            BlockKind::ImageRow { images, .. } => images
                .iter()
                .filter(|img| !img.src.is_empty())
                .map(|img| img.src.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Encode a block list as a JSON string.
///
/// Used on the multipart save path where form fields are flat strings;
/// the JSON path transmits the same list as a native array. Both paths
/// must round-trip identically.
pub fn blocks_to_json(blocks: &[Block]) -> serde_json::Result<String> {
    serde_json::to_string(blocks)
}

/// Decode a block list from its JSON string form.
pub fn blocks_from_json(json: &str) -> serde_json::Result<Vec<Block>> {
    serde_json::from_str(json)
}
