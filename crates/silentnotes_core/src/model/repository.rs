//! Note repository aggregate.
//!
//! # Responsibility
//! - Own notes (in user-visible order), tombstones, safes and tags.
//! - Provide the mutation entry points which keep order and deletion
//!   timestamps attributable.
//!
//! # Invariants
//! - `notes` order is the user-visible order; changing it refreshes
//!   `order_modified_at`.
//! - A deleted note leaves exactly one tombstone id in `deleted_notes`.
//! - Safes and tags are only destroyed by the maintenance sweeps.
//!
//! Fingerprinting and maintenance live in `crate::fingerprint` and
//! `crate::maintenance`.

use crate::model::collection::FindById;
use crate::model::id::{get_or_create_id, EntityId};
use crate::model::note::NoteModel;
use crate::model::safe::SafeModel;
use crate::model::tag::TagModel;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable aggregate root of one user's note collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRepositoryModel {
    /// Nil when absent from the serialized form; filled by `ensure_id()`.
    #[serde(default)]
    pub id: EntityId,
    /// Structural revision this instance was produced under. `0` when absent.
    #[serde(default)]
    pub revision: i32,
    /// Last time the order of `notes` changed. The Unix epoch when absent.
    #[serde(default)]
    pub order_modified_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Vec<NoteModel>,
    /// Tombstones of deleted notes.
    #[serde(default)]
    pub deleted_notes: Vec<EntityId>,
    #[serde(default)]
    pub safes: Vec<SafeModel>,
    #[serde(default)]
    pub tags: Vec<TagModel>,
}

impl Default for NoteRepositoryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepositoryModel {
    /// Highest revision this crate can read and write.
    ///
    /// Bump it whenever the serialized shape changes.
    pub const NEWEST_SUPPORTED_REVISION: i32 = 4;

    /// Creates an empty repository at the newest revision.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            revision: Self::NEWEST_SUPPORTED_REVISION,
            order_modified_at: Utc::now(),
            notes: Vec::new(),
            deleted_notes: Vec::new(),
            safes: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Returns the repository id, generating one first if it is still nil.
    pub fn ensure_id(&mut self) -> EntityId {
        get_or_create_id(&mut self.id)
    }

    /// Fills every nil id of the repository and its entities.
    ///
    /// Run once after deserialization, before the repository is used.
    pub fn ensure_ids(&mut self) {
        self.ensure_id();
        self.notes.iter_mut().for_each(|note| {
            note.ensure_id();
        });
        self.safes.iter_mut().for_each(|safe| {
            safe.ensure_id();
        });
        self.tags.iter_mut().for_each(|tag| {
            tag.ensure_id();
        });
    }

    /// Sets `order_modified_at` to the current UTC time.
    pub fn refresh_order_modified_at(&mut self) {
        self.order_modified_at = Utc::now();
    }

    pub fn find_note(&self, id: EntityId) -> Option<&NoteModel> {
        self.notes.find_by_id(id)
    }

    pub fn find_note_mut(&mut self, id: EntityId) -> Option<&mut NoteModel> {
        self.notes.find_by_id_mut(id)
    }

    pub fn find_safe(&self, id: EntityId) -> Option<&SafeModel> {
        self.safes.find_by_id(id)
    }

    pub fn find_tag(&self, id: EntityId) -> Option<&TagModel> {
        self.tags.find_by_id(id)
    }

    /// Appends a note at the end of the user order and returns its id.
    pub fn add_note(&mut self, mut note: NoteModel) -> EntityId {
        let id = note.ensure_id();
        self.notes.push(note);
        id
    }

    /// Removes a note and records its tombstone.
    ///
    /// Returns the removed note, or `None` if no note has this id.
    pub fn delete_note(&mut self, id: EntityId) -> Option<NoteModel> {
        let index = self.notes.position_of(id)?;
        let note = self.notes.remove(index);
        if !self.deleted_notes.contains(&id) {
            self.deleted_notes.push(id);
        }
        debug!("event=note_deleted module=model status=ok note_id={id}");
        Some(note)
    }

    /// Moves the note at `old_index` to `new_index`.
    ///
    /// Returns `false` without mutation when an index is out of range or both
    /// are equal.
    pub fn move_note(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.notes.len();
        if old_index >= len || new_index >= len || old_index == new_index {
            return false;
        }
        let note = self.notes.remove(old_index);
        self.notes.insert(new_index, note);
        self.refresh_order_modified_at();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::NoteRepositoryModel;
    use crate::model::note::NoteModel;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn new_repository_uses_newest_revision() {
        let repository = NoteRepositoryModel::new();
        assert_eq!(
            repository.revision,
            NoteRepositoryModel::NEWEST_SUPPORTED_REVISION
        );
        assert!(!repository.id.is_nil());
    }

    #[test]
    fn delete_note_leaves_single_tombstone() {
        let mut repository = NoteRepositoryModel::new();
        let id = repository.add_note(NoteModel::new());

        assert!(repository.delete_note(id).is_some());
        assert!(repository.delete_note(id).is_none());
        assert!(repository.notes.is_empty());
        assert_eq!(repository.deleted_notes, vec![id]);
    }

    #[test]
    fn move_note_reorders_and_refreshes_order_timestamp() {
        let mut repository = NoteRepositoryModel::new();
        let first = repository.add_note(NoteModel::new());
        let second = repository.add_note(NoteModel::new());
        let old_stamp = Utc.with_ymd_and_hms(2018, 2, 21, 0, 0, 0).unwrap();
        repository.order_modified_at = old_stamp;

        assert!(!repository.move_note(0, 5));
        assert_eq!(repository.order_modified_at, old_stamp);

        assert!(repository.move_note(0, 1));
        assert_eq!(repository.notes[0].id, second);
        assert_eq!(repository.notes[1].id, first);
        assert!(repository.order_modified_at > old_stamp);
    }

    #[test]
    fn ensure_ids_fills_nil_entities() {
        let mut repository = NoteRepositoryModel::with_id(Uuid::nil());
        repository.notes.push(NoteModel::with_id(Uuid::nil()));

        repository.ensure_ids();
        assert!(!repository.id.is_nil());
        assert!(!repository.notes[0].id.is_nil());
    }
}
