//! Ownership-checked note operations.
//!
//! The service never looks at sessions; callers pass the owner id they
//! already resolved. Mutations take the note as fetched by
//! [`NoteService::get_by_id`] and compare its owner with the caller, so a note
//! that exists but belongs to someone else is [`Error::Forbidden`], while a
//! note that does not exist is [`Error::NotFound`].

use chrono::Utc;

use crate::entity::note;
use crate::error::{Error, Result};
use crate::store::{CredentialStore, Timestamp};

#[derive(Debug, Clone)]
pub struct NoteService {
    store: CredentialStore,
}

impl NoteService {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Notes owned by `owner_id` in insertion order.
    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<note::Model>> {
        self.store.notes_by_owner(owner_id).await
    }

    pub async fn create(&self, owner_id: i32, title: &str, content: &str) -> Result<note::Model> {
        let note = self
            .store
            .insert_note(owner_id, title, content, now())
            .await?;

        tracing::info!(note_id = note.id, user_id = owner_id, "note created");
        Ok(note)
    }

    /// Fetches a note regardless of owner. Ownership is the caller's check.
    pub async fn get_by_id(&self, id: i32) -> Result<note::Model> {
        self.store.note_by_id(id).await?.ok_or(Error::NotFound)
    }

    /// Fetches a note and verifies `owner_id` owns it.
    pub async fn get_owned(&self, id: i32, owner_id: i32) -> Result<note::Model> {
        let note = self.get_by_id(id).await?;
        ensure_owner(&note, owner_id)?;
        Ok(note)
    }

    /// Replaces title and content as submitted. `updated_at` moves forward,
    /// never back; `created_at` is untouched.
    pub async fn update(
        &self,
        note: &note::Model,
        owner_id: i32,
        title: &str,
        content: &str,
    ) -> Result<note::Model> {
        ensure_owner(note, owner_id)?;
        let updated_at = now().max(note.updated_at);

        let updated = self
            .store
            .update_note(note.id, title, content, updated_at)
            .await?;

        tracing::info!(note_id = note.id, user_id = owner_id, "note updated");
        Ok(updated)
    }

    pub async fn delete(&self, note: &note::Model, owner_id: i32) -> Result<()> {
        ensure_owner(note, owner_id)?;
        self.store.delete_note(note.id).await?;

        tracing::info!(note_id = note.id, user_id = owner_id, "note deleted");
        Ok(())
    }
}

fn ensure_owner(note: &note::Model, owner_id: i32) -> Result<()> {
    if note.user_id != owner_id {
        tracing::warn!(
            user_id = owner_id,
            note_id = note.id,
            owner_id = note.user_id,
            "user tried to modify a note they do not own"
        );
        return Err(Error::Forbidden);
    }
    Ok(())
}

fn now() -> Timestamp {
    Utc::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_owned_by(user_id: i32) -> note::Model {
        let at = now();
        note::Model {
            id: 1,
            title: "T".into(),
            content: "C".into(),
            user_id,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn owner_passes_check() {
        assert!(ensure_owner(&note_owned_by(1), 1).is_ok());
    }

    #[test]
    fn other_user_is_forbidden() {
        assert!(matches!(
            ensure_owner(&note_owned_by(1), 2),
            Err(Error::Forbidden)
        ));
    }
}
