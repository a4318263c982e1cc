//! Note domain model.
//!
//! # Responsibility
//! - Define the note record as it is persisted and merged.
//! - Provide the touch/clone/obsolescence helpers used by edit and sync paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `tags == None` (no tags specified) is distinct from `Some(vec![])`.
//! - `maintained_at` is meaningless once `modified_at` is newer.

use crate::model::id::{get_or_create_id, EntityId};
use crate::model::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Background color given to notes created without an explicit color.
pub const DEFAULT_BACKGROUND_COLOR_HEX: &str = "#fbf4c1";

/// Kind of content stored in a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    /// Free-form rich text.
    #[default]
    Text,
    /// List of checkable items.
    Checklist,
}

/// One note of the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteModel {
    /// Nil when absent from the serialized form; filled by `ensure_id()`.
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub note_type: NoteType,
    /// HTML body; encrypted when `safe_id` is set.
    #[serde(default)]
    pub html_content: String,
    #[serde(default = "default_background_color")]
    pub background_color_hex: String,
    #[serde(default)]
    pub in_recycling_bin: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Last time the merge process validated this note. May be stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintained_at: Option<DateTime<Utc>>,
    /// Safe whose key encrypts `html_content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_id: Option<EntityId>,
    /// Ordered tag ids. `None` means no tags were ever specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<EntityId>>,
}

impl Default for NoteModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteModel {
    /// Creates an empty text note with a generated id and current timestamps.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty text note adopting an existing id.
    ///
    /// Used by import/sync paths where identity already exists elsewhere.
    pub fn with_id(id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id,
            note_type: NoteType::Text,
            html_content: String::new(),
            background_color_hex: default_background_color(),
            in_recycling_bin: false,
            created_at: now,
            modified_at: now,
            maintained_at: None,
            safe_id: None,
            tags: None,
        }
    }

    /// Returns the id, generating one first if it is still nil.
    pub fn ensure_id(&mut self) -> EntityId {
        get_or_create_id(&mut self.id)
    }

    /// Sets `modified_at` to the current UTC time.
    pub fn refresh_modified_at(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Clears `maintained_at` when the note was modified after it.
    ///
    /// Returns whether a marker was cleared.
    pub fn clear_maintained_at_if_obsolete(&mut self) -> bool {
        match self.maintained_at {
            Some(maintained_at) if self.modified_at > maintained_at => {
                self.maintained_at = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the content is encrypted by a safe.
    pub fn is_in_safe(&self) -> bool {
        self.safe_id.is_some()
    }

    /// Whether a tag list exists, even an empty one.
    pub fn tags_specified(&self) -> bool {
        self.tags.is_some()
    }

    /// Returns the tag list, materializing an empty one when absent.
    pub fn tags_mut(&mut self) -> &mut Vec<EntityId> {
        self.tags.get_or_insert_with(Vec::new)
    }

    /// Appends a tag reference. Returns `false` if it was already present.
    pub fn add_tag(&mut self, tag_id: EntityId) -> bool {
        let tags = self.tags_mut();
        if tags.contains(&tag_id) {
            return false;
        }
        tags.push(tag_id);
        true
    }

    /// Removes a tag reference. Returns `false` if it was not present.
    ///
    /// The list stays specified (possibly empty) afterwards.
    pub fn remove_tag(&mut self, tag_id: EntityId) -> bool {
        let Some(tags) = self.tags.as_mut() else {
            return false;
        };
        let before = tags.len();
        tags.retain(|id| *id != tag_id);
        tags.len() != before
    }

    /// Copies every field, including identity, into `target`.
    ///
    /// # Errors
    /// - `ModelError::InvalidArgument` when `target` is `None`.
    pub fn clone_to(&self, target: Option<&mut NoteModel>) -> Result<(), ModelError> {
        let target = target.ok_or(ModelError::InvalidArgument("target"))?;
        target.clone_from(self);
        Ok(())
    }
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR_HEX.to_string()
}
