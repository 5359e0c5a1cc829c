use std::sync::Arc;
use log::{debug, error, info, trace, warn};

use crate::data::{NewNote, Note, NotePatch};
use crate::kv_store::{FileKeyValueStore, KeyValueStore, KeyValueStoreExt};
use crate::note_store::NoteStoreError;
use crate::read_outcome::ReadOutcome;
use crate::username_string::UsernameStr;
use env_trait::{NoteStoreEnv, ProductionNoteStoreEnv};
use partition_locks::PartitionLocks;

pub mod env_trait;
mod partition_locks;

pub type NoteStore = NoteStoreImpl<FileKeyValueStore, ProductionNoteStoreEnv>;

/// Per-user note collections, one stored JSON array per user.
///
/// Every mutation loads the whole collection, changes it in memory and
/// writes it back under that user's partition lock. Which user a call acts
/// for is entirely up to the caller.
pub struct NoteStoreImpl<S: KeyValueStore, E: NoteStoreEnv> {
    store: Arc<S>,
    env: E,
    locks: PartitionLocks,
}

impl<S: KeyValueStore> NoteStoreImpl<S, ProductionNoteStoreEnv> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_env(store, ProductionNoteStoreEnv)
    }
}

impl<S: KeyValueStore, E: NoteStoreEnv> NoteStoreImpl<S, E> {
    pub fn with_env(store: Arc<S>, env: E) -> Self {
        NoteStoreImpl {
            store,
            env,
            locks: PartitionLocks::default(),
        }
    }

    pub async fn load_notes(&self, username: &UsernameStr) -> ReadOutcome<Vec<Note>> {
        trace!("loading notes of user \"{username}\"");
        self.store.get_json(&username.notes_key()).await
    }

    /// Unreadable collections list as empty.
    pub async fn list_notes(&self, username: &UsernameStr) -> Vec<Note> {
        debug!("listing notes for user \"{username}\"");
        self.load_notes(username)
            .await
            .unwrap_or_degraded("note collection")
    }

    pub async fn get_note(&self, username: &UsernameStr, id: &str) -> Option<Note> {
        debug!("reading note {id} for user \"{username}\"");
        self.list_notes(username)
            .await
            .into_iter()
            .find(|n| n.id == id)
    }

    pub async fn create_note(
        &self,
        username: &UsernameStr,
        fields: NewNote,
    ) -> Result<Note, NoteStoreError> {
        debug!("creating note for user \"{username}\"");
        let _guard = self.locks.lock(username).await;
        let mut notes = self.load_for_write(username).await?;
        let now = self.env.now_millis();
        let mut id = self.env.generate_note_id(now);
        while notes.iter().any(|n| n.id == id) {
            warn!("generated note id {id} is already taken, retrying");
            id = self.env.generate_note_id(now);
        }
        let note = Note {
            id,
            title: fields.title,
            body: fields.body,
            image_uri: fields.image_uri,
            created_at: now,
            updated_at: now,
        };
        notes.push(note.clone());
        self.persist(username, &notes).await?;
        info!("created note {} for user \"{username}\"", note.id);
        Ok(note)
    }

    /// `id` and `created_at` never change; `updated_at` always moves
    /// forward, short of a stored value already at `Millis::MAX`.
    pub async fn update_note(
        &self,
        username: &UsernameStr,
        id: &str,
        patch: NotePatch,
    ) -> Result<Note, NoteStoreError> {
        debug!("updating note {id} for user \"{username}\"");
        let _guard = self.locks.lock(username).await;
        let mut notes = self.load_for_write(username).await?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NoteStoreError::NotFound)?;
        let previous_update = note.updated_at;
        patch.apply_to(note);
        note.updated_at = self.env.now_millis().max(previous_update.saturating_add(1));
        let updated = note.clone();
        self.persist(username, &notes).await?;
        info!("updated note {id} for user \"{username}\"");
        Ok(updated)
    }

    /// Deleting a missing note succeeds.
    pub async fn delete_note(
        &self,
        username: &UsernameStr,
        id: &str,
    ) -> Result<(), NoteStoreError> {
        debug!("deleting note {id} for user \"{username}\"");
        let _guard = self.locks.lock(username).await;
        let mut notes = self.load_for_write(username).await?;
        let count_before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == count_before {
            debug!("note {id} of user \"{username}\" was already absent");
        }
        self.persist(username, &notes).await?;
        info!("deleted note {id} for user \"{username}\"");
        Ok(())
    }

    async fn load_for_write(
        &self,
        username: &UsernameStr,
    ) -> Result<Vec<Note>, NoteStoreError> {
        match self.load_notes(username).await {
            ReadOutcome::Absent => Ok(Vec::new()),
            ReadOutcome::Found(notes) => Ok(notes),
            ReadOutcome::Fault(e) if e.is_malformed() => {
                warn!(
                    "note collection of user \"{username}\" is unreadable \
                        and will be replaced: {e}"
                );
                Ok(Vec::new())
            },
            ReadOutcome::Fault(e) => {
                error!("failed to load notes of user \"{username}\": {e}");
                Err(NoteStoreError::PersistFailed(e))
            },
        }
    }

    async fn persist(
        &self,
        username: &UsernameStr,
        notes: &[Note],
    ) -> Result<(), NoteStoreError> {
        trace!("writing {} notes for user \"{username}\"", notes.len());
        self.store
            .set_json(&username.notes_key(), notes)
            .await
            .map_err(|e| {
                error!("failed to write notes of user \"{username}\": {e}");
                NoteStoreError::PersistFailed(e)
            })
    }
}
