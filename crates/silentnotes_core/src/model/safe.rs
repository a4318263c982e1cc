//! Safe domain model.
//!
//! A safe holds the key material which encrypts the notes assigned to it.
//! Because several devices can create safes independently, a repository may
//! temporarily own more than one.

use crate::model::id::{get_or_create_id, EntityId};
use crate::model::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeModel {
    /// Nil when absent from the serialized form; filled by `ensure_id()`.
    #[serde(default)]
    pub id: EntityId,
    /// Opaque, already encrypted key material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializeable_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintained_at: Option<DateTime<Utc>>,
}

impl Default for SafeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeModel {
    /// Creates a safe without key material, with a generated id and current
    /// timestamps.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a safe adopting an existing id.
    pub fn with_id(id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id,
            serializeable_key: None,
            created_at: now,
            modified_at: now,
            maintained_at: None,
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

    /// Clears `maintained_at` when the safe was modified after it.
    pub fn clear_maintained_at_if_obsolete(&mut self) -> bool {
        match self.maintained_at {
            Some(maintained_at) if self.modified_at > maintained_at => {
                self.maintained_at = None;
                true
            }
            _ => false,
        }
    }

    /// Copies every field, including identity, into `target`.
    ///
    /// # Errors
    /// - `ModelError::InvalidArgument` when `target` is `None`.
    pub fn clone_to(&self, target: Option<&mut SafeModel>) -> Result<(), ModelError> {
        let target = target.ok_or(ModelError::InvalidArgument("target"))?;
        target.clone_from(self);
        Ok(())
    }
}
