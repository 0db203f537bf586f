use crate::blocks::types::{Block, BlockId, BlockKind, BlockType, ImagePosition, ImageSize, RowImage};

/// Single-field edit applied to a block through [`BlockStore::update`].
///
/// Each patch names one field; a patch only takes effect on variants that
/// carry that field, everything else is a silent no-op. The editor
/// components emit these one event at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockPatch {
    Content(String),
    Level(u8),
    Src(String),
    Caption(String),
    Position(ImagePosition),
    Size(ImageSize),
    Columns(u8),
    Images(Vec<RowImage>),
    Language(String),
}

/// Editing command against the block store, as emitted by the editor UI.
///
/// Reorder is the whole drag-and-drop contract: whatever gesture the UI
/// uses ends up as `Reorder { source, target }`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockCmd {
    Append(BlockType),
    Update(BlockId, BlockPatch),
    Remove(BlockId),
    Reorder { source: BlockId, target: BlockId },
}

/// The ordered block sequence for one post, held in memory while editing.
///
/// Single source of truth between load and save: the editor UI mutates it
/// through the operations below, the post session serializes it back to
/// the backend as one unit. Vec order is the sole ordering signal —
/// insertion order is display order. All operations are synchronous and
/// infallible; an unknown id is a silent no-op and never corrupts the
/// sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an already-persisted block list, e.g. on load.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Append a new block of the given variant with default field values
    /// and a fresh id. Always succeeds; returns the new block's id.
    pub fn append(&mut self, block_type: BlockType) -> BlockId {
        let block = Block::new(block_type);
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Apply a single-field patch to the block with the matching id.
    ///
    /// Other fields and the block's position are untouched. Unknown id,
    /// or a field the variant doesn't carry, is a silent no-op.
    pub fn update(&mut self, id: BlockId, patch: BlockPatch) {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return;
        };
        match (&mut block.kind, patch) {
            (BlockKind::Text { content }, BlockPatch::Content(value)) => *content = value,
            (BlockKind::Heading { content, .. }, BlockPatch::Content(value)) => *content = value,
            (BlockKind::Heading { level, .. }, BlockPatch::Level(value)) => *level = value,
            (BlockKind::Image { src, .. }, BlockPatch::Src(value)) => *src = value,
            (BlockKind::Image { caption, .. }, BlockPatch::Caption(value)) => *caption = value,
            (BlockKind::Image { position, .. }, BlockPatch::Position(value)) => *position = value,
            (BlockKind::Image { size, .. }, BlockPatch::Size(value)) => *size = value,
            (BlockKind::ImageRow { columns, .. }, BlockPatch::Columns(value)) => *columns = value,
            (BlockKind::ImageRow { images, .. }, BlockPatch::Images(value)) => *images = value,
            (BlockKind::Code { content, .. }, BlockPatch::Content(value)) => *content = value,
            (BlockKind::Code { language, .. }, BlockPatch::Language(value)) => *language = value,
            (BlockKind::CodeDisplay { content, .. }, BlockPatch::Content(value)) => {
                *content = value
            }
            (BlockKind::CodeDisplay { language, .. }, BlockPatch::Language(value)) => {
                *language = value
            }
            _ => {}
        }
    }

    /// Remove the block with the matching id; following blocks shift up.
    ///
    /// Any media-cleanup confirmation happens at the UI level before this
    /// is called (ask first, then mutate). Unknown id is a silent no-op.
    pub fn remove(&mut self, id: BlockId) {
        if let Some(index) = self.index_of(id) {
            self.blocks.remove(index);
        }
    }

    /// Move the source block to the position where the target currently
    /// sits, shifting the blocks in between (insert before target, not a
    /// swap). No-op when source equals target or either id is unknown.
    pub fn reorder(&mut self, source_id: BlockId, target_id: BlockId) {
        if source_id == target_id {
            return;
        }
        let (Some(from), Some(to)) = (self.index_of(source_id), self.index_of(target_id)) else {
            return;
        };
        // Both indices are taken before the removal: the source lands at
        // the slot the target occupied in the original sequence.
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
    }

    /// Apply one editing command.
    pub fn apply(&mut self, cmd: BlockCmd) {
        match cmd {
            BlockCmd::Append(block_type) => {
                self.append(block_type);
            }
            BlockCmd::Update(id, patch) => self.update(id, patch),
            BlockCmd::Remove(id) => self.remove(id),
            BlockCmd::Reorder { source, target } => self.reorder(source, target),
        }
    }

    /// Non-empty media URLs referenced by one block (empty vec on unknown id).
    pub fn media_urls(&self, id: BlockId) -> Vec<String> {
        self.get(id)
            .map(|b| b.media_urls().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn store_with(types: &[BlockType]) -> (BlockStore, Vec<BlockId>) {
        let mut store = BlockStore::new();
        let ids = types.iter().map(|t| store.append(*t)).collect();
        (store, ids)
    }

    #[test]
    fn append_grows_sequence_in_order() {
        let (store, ids) = store_with(&[BlockType::Text, BlockType::Heading, BlockType::Code]);
        assert_eq!(store.len(), 3);
        let stored: Vec<BlockId> = store.blocks().iter().map(|b| b.id).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn ids_stay_unique_across_op_sequences() {
        let (mut store, ids) = store_with(&[
            BlockType::Text,
            BlockType::Image,
            BlockType::Code,
            BlockType::Heading,
        ]);
        store.remove(ids[1]);
        store.append(BlockType::ImageRow);
        store.reorder(ids[3], ids[0]);
        store.append(BlockType::Text);
        store.remove(ids[0]);

        // Net: 4 appends + 2 appends - 2 removes.
        assert_eq!(store.len(), 4);
        let unique: HashSet<BlockId> = store.blocks().iter().map(|b| b.id).collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn reorder_inserts_before_target_rather_than_swapping() {
        // [A, B, C], reorder(A, C) => [B, C, A]
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Text, BlockType::Text]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        store.reorder(a, c);
        let order: Vec<BlockId> = store.blocks().iter().map(|bl| bl.id).collect();
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn reorder_back_is_not_an_identity() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Text, BlockType::Text]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        store.reorder(a, c); // [B, C, A]
        store.reorder(c, a); // C moves to A's slot (index 2): [B, A, C]
        let order: Vec<BlockId> = store.blocks().iter().map(|bl| bl.id).collect();
        assert_eq!(order, vec![b, a, c]);
    }

    #[test]
    fn reorder_moving_later_block_earlier() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Text, BlockType::Text]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        store.reorder(c, a);
        let order: Vec<BlockId> = store.blocks().iter().map(|bl| bl.id).collect();
        assert_eq!(order, vec![c, a, b]);
    }

    #[test]
    fn reorder_same_id_is_noop() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Heading]);
        let before = store.clone();
        store.reorder(ids[0], ids[0]);
        assert_eq!(store, before);
    }

    #[test]
    fn reorder_unknown_id_is_noop() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Heading]);
        let before = store.clone();
        store.reorder(ids[0], BlockId::new());
        store.reorder(BlockId::new(), ids[1]);
        assert_eq!(store, before);
    }

    #[test]
    fn update_replaces_only_the_named_field() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Heading, BlockType::Text]);

        store.update(ids[1], BlockPatch::Content("Title".to_string()));

        // Position unchanged, level untouched.
        assert_eq!(store.blocks()[1].id, ids[1]);
        assert_eq!(
            store.blocks()[1].kind,
            BlockKind::Heading {
                content: "Title".to_string(),
                level: 2,
            }
        );
    }

    #[test]
    fn update_ignores_field_the_variant_does_not_carry() {
        let (mut store, ids) = store_with(&[BlockType::Text]);
        let before = store.clone();
        store.update(ids[0], BlockPatch::Level(3));
        store.update(ids[0], BlockPatch::Columns(4));
        assert_eq!(store, before);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let (mut store, _) = store_with(&[BlockType::Text]);
        let before = store.clone();
        store.update(BlockId::new(), BlockPatch::Content("x".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_shifts_rest_up_preserving_order() {
        let (mut store, ids) = store_with(&[BlockType::Text, BlockType::Image, BlockType::Code]);
        store.remove(ids[1]);
        let order: Vec<BlockId> = store.blocks().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![ids[0], ids[2]]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (mut store, _) = store_with(&[BlockType::Text]);
        let before = store.clone();
        store.remove(BlockId::new());
        assert_eq!(store, before);
    }

    #[test]
    fn apply_routes_commands_to_the_operations() {
        let mut store = BlockStore::new();
        store.apply(BlockCmd::Append(BlockType::Heading));
        store.apply(BlockCmd::Append(BlockType::Text));
        let ids: Vec<BlockId> = store.blocks().iter().map(|b| b.id).collect();

        store.apply(BlockCmd::Update(ids[0], BlockPatch::Level(4)));
        store.apply(BlockCmd::Reorder {
            source: ids[0],
            target: ids[1],
        });
        store.apply(BlockCmd::Remove(ids[1]));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.blocks()[0].kind,
            BlockKind::Heading {
                content: String::new(),
                level: 4,
            }
        );
    }

    #[test]
    fn media_urls_reports_image_sources() {
        let (mut store, ids) = store_with(&[BlockType::Image]);
        assert!(store.media_urls(ids[0]).is_empty());

        store.update(ids[0], BlockPatch::Src("https://example.com/a.png".to_string()));
        assert_eq!(
            store.media_urls(ids[0]),
            vec!["https://example.com/a.png".to_string()]
        );
    }
}
