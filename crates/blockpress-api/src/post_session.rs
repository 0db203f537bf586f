//! Persistence orchestration for one post being edited.
//!
//! Bridges the in-memory block store plus metadata to the posts
//! resource: load populates them, save serializes the full sequence and
//! metadata back as one unit (no partial block API). The first save is a
//! create — the backend assigns the slug — and every later save targets
//! that slug. A `saving` flag gates re-entrant network operations while
//! one is in flight; beyond that gate overlapping responses are
//! last-response-wins, as the backend offers no version check.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::posts::{CoverImage, PostDraft};
use blockpress_engine::{BlockStore, Post, PostStatus};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum PostSessionError {
    /// A save/publish/delete is already in flight; the UI disables the
    /// triggering controls but the gate holds regardless.
    #[error("an operation is already in flight for this post")]
    OperationInFlight,
    /// Publish, unpublish and delete only apply to a persisted post.
    #[error("post has never been saved")]
    NeverSaved,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Where the next save goes: create (no slug yet) or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SaveTarget {
    Create,
    Update(String),
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// Post metadata; its `blocks` field stays empty while editing — the
    /// store below is authoritative until save reassembles the payload.
    pub(crate) post: Post,
    pub(crate) store: BlockStore,
    pub(crate) saving: bool,
}

impl SessionState {
    pub(crate) fn save_target(&self) -> SaveTarget {
        match &self.post.slug {
            Some(slug) => SaveTarget::Update(slug.clone()),
            None => SaveTarget::Create,
        }
    }

    pub(crate) fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.post.title.clone(),
            description: self.post.description.clone(),
            blocks: self.store.blocks().to_vec(),
            status: self.post.status,
            custom_css: self.post.custom_css.clone(),
        }
    }

    /// Mark an operation in flight; errors if one already is.
    pub(crate) fn begin(&mut self) -> Result<(), PostSessionError> {
        if self.saving {
            return Err(PostSessionError::OperationInFlight);
        }
        self.saving = true;
        Ok(())
    }

    pub(crate) fn finish(&mut self) {
        self.saving = false;
    }

    /// Take the server's canonical copy after a save.
    ///
    /// Server-derived fields are absorbed; the locally edited fields
    /// (title, description, custom CSS, block sequence) are kept as they
    /// are, since the user may have typed during the round trip.
    pub(crate) fn absorb_saved(&mut self, saved: Post) {
        self.post.id = saved.id;
        self.post.slug = saved.slug;
        self.post.status = saved.status;
        self.post.cover_image_url = saved.cover_image_url;
        self.post.author = saved.author;
        self.post.created_at = saved.created_at;
        self.post.updated_at = saved.updated_at;
        self.post.published_at = saved.published_at;
    }

    /// Replace everything with a freshly loaded post.
    pub(crate) fn absorb_loaded(&mut self, mut loaded: Post) {
        self.store = BlockStore::from_blocks(std::mem::take(&mut loaded.blocks));
        self.post = loaded;
    }
}

/// One post's editing session, cloneable into async UI tasks.
#[derive(Clone)]
pub struct PostSession {
    client: ApiClient,
    state: Arc<Mutex<SessionState>>,
}

impl PostSession {
    /// Start a new, never-persisted empty draft.
    pub fn new_draft(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().expect("post session lock poisoned")
    }

    /// Read the current metadata and block sequence.
    pub fn read<R>(&self, f: impl FnOnce(&Post, &BlockStore) -> R) -> R {
        let state = self.lock();
        f(&state.post, &state.store)
    }

    /// Edit post metadata (title, description, custom CSS).
    pub fn edit_post(&self, f: impl FnOnce(&mut Post)) {
        f(&mut self.lock().post);
    }

    /// Mutate the block sequence through the store operations.
    pub fn edit_blocks(&self, f: impl FnOnce(&mut BlockStore)) {
        f(&mut self.lock().store);
    }

    pub fn is_saving(&self) -> bool {
        self.lock().saving
    }

    pub fn slug(&self) -> Option<String> {
        self.lock().post.slug.clone()
    }

    pub fn status(&self) -> PostStatus {
        self.lock().post.status
    }

    /// Fetch one persisted post by slug and take it over as the session
    /// content. A missing slug surfaces as `ApiError::NotFound`, which
    /// the caller renders as an error state rather than aborting.
    pub async fn load(&self, slug: &str) -> Result<(), PostSessionError> {
        let loaded = self.client.get_post(slug).await?;
        self.lock().absorb_loaded(loaded);
        Ok(())
    }

    /// Serialize the full metadata and block sequence to the backend.
    ///
    /// Creates on first save (absorbing the assigned slug), updates
    /// against the existing slug afterwards. A cover image file switches
    /// the whole submission to multipart.
    pub async fn save(&self, cover: Option<&CoverImage>) -> Result<Post, PostSessionError> {
        let (draft, target) = {
            let mut state = self.lock();
            state.begin()?;
            (state.draft(), state.save_target())
        };
        let result = match &target {
            SaveTarget::Create => self.client.create_post(&draft, cover).await,
            SaveTarget::Update(slug) => self.client.update_post(slug, &draft, cover).await,
        };
        let mut state = self.lock();
        state.finish();
        let saved = result?;
        state.absorb_saved(saved.clone());
        Ok(saved)
    }

    /// Transition draft → published. Only meaningful once persisted.
    pub async fn publish(&self) -> Result<PostStatus, PostSessionError> {
        self.transition(true).await
    }

    /// Transition published → draft.
    pub async fn unpublish(&self) -> Result<PostStatus, PostSessionError> {
        self.transition(false).await
    }

    async fn transition(&self, publish: bool) -> Result<PostStatus, PostSessionError> {
        let slug = {
            let mut state = self.lock();
            let Some(slug) = state.post.slug.clone() else {
                return Err(PostSessionError::NeverSaved);
            };
            state.begin()?;
            slug
        };
        let result = if publish {
            self.client.publish_post(&slug).await
        } else {
            self.client.unpublish_post(&slug).await
        };
        let mut state = self.lock();
        state.finish();
        let post = result?;
        state.post.status = post.status;
        state.post.published_at = post.published_at;
        Ok(state.post.status)
    }

    /// Remove the persisted post. The caller confirms destructively
    /// before invoking; media cleanup is a separate, best-effort concern.
    pub async fn delete(&self) -> Result<(), PostSessionError> {
        let slug = {
            let mut state = self.lock();
            let Some(slug) = state.post.slug.clone() else {
                return Err(PostSessionError::NeverSaved);
            };
            state.begin()?;
            slug
        };
        let result = self.client.delete_post(&slug).await;
        self.lock().finish();
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpress_engine::BlockType;
    use pretty_assertions::assert_eq;

    fn saved_copy(slug: &str) -> Post {
        let mut post = Post::new();
        post.id = Some(1);
        post.slug = Some(slug.to_string());
        post.created_at = Some("2025-01-01T00:00:00Z".to_string());
        post.updated_at = Some("2025-01-01T00:00:00Z".to_string());
        post
    }

    #[test]
    fn first_save_creates_then_targets_the_assigned_slug() {
        let mut state = SessionState::default();
        state.post.title = "My first post".to_string();
        assert_eq!(state.save_target(), SaveTarget::Create);

        // Backend assigns the slug on first save.
        state.absorb_saved(saved_copy("my-first-post"));
        assert_eq!(
            state.save_target(),
            SaveTarget::Update("my-first-post".to_string())
        );

        // A later save keeps targeting it, never re-creates.
        state.absorb_saved(saved_copy("my-first-post"));
        assert_eq!(
            state.save_target(),
            SaveTarget::Update("my-first-post".to_string())
        );
    }

    #[test]
    fn absorb_saved_keeps_local_edits() {
        let mut state = SessionState::default();
        state.post.title = "Edited while saving".to_string();
        state.store.append(BlockType::Text);

        state.absorb_saved(saved_copy("my-first-post"));

        assert_eq!(state.post.title, "Edited while saving");
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.post.slug.as_deref(), Some("my-first-post"));
    }

    #[test]
    fn saving_gate_rejects_reentrant_operations() {
        let mut state = SessionState::default();
        state.begin().unwrap();
        assert!(matches!(
            state.begin(),
            Err(PostSessionError::OperationInFlight)
        ));

        state.finish();
        state.begin().unwrap();
    }

    #[test]
    fn draft_serializes_store_blocks_not_post_blocks() {
        let mut state = SessionState::default();
        state.post.title = "t".to_string();
        state.store.append(BlockType::Heading);
        state.store.append(BlockType::Text);

        let draft = state.draft();
        assert_eq!(draft.blocks.len(), 2);
        assert_eq!(draft.title, "t");
    }

    #[test]
    fn absorb_loaded_moves_blocks_into_the_store() {
        let mut loaded = saved_copy("hello");
        loaded.blocks = vec![
            blockpress_engine::Block::new(BlockType::Text),
            blockpress_engine::Block::new(BlockType::Code),
        ];
        let mut state = SessionState::default();
        state.absorb_loaded(loaded);

        assert_eq!(state.store.len(), 2);
        assert!(state.post.blocks.is_empty());
        assert_eq!(state.post.slug.as_deref(), Some("hello"));
    }
}
