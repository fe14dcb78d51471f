use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Note, NoteId, NoteInput};

/// Identifier-keyed access to the notes collection.
///
/// Every method is a single round trip to the backing store. `update` and `remove`
/// return `None` when no note has the identifier.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes in storage order.
    async fn find(&self) -> Result<Vec<Note>>;

    async fn create(&self, input: NoteInput) -> Result<Note>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Overwrites the fields present in `input`; absent fields keep their stored value.
    async fn update(&self, id: &NoteId, input: NoteInput) -> Result<Option<Note>>;

    async fn remove(&self, id: &NoteId) -> Result<Option<Note>>;
}
