//! Tag domain model.
//!
//! Tags group notes in an m:n relation. A tag is an entity of its own, so a
//! rename reaches every note referencing it, even across devices.

use crate::model::id::{get_or_create_id, EntityId};
use crate::model::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagModel {
    /// Nil when absent from the serialized form; filled by `ensure_id()`.
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    pub modified_at: DateTime<Utc>,
}

impl TagModel {
    /// Creates a tag with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a tag adopting an existing id.
    pub fn with_id(id: EntityId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            modified_at: Utc::now(),
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

    /// Copies every field, including identity, into `target`.
    pub fn clone_to(&self, target: Option<&mut TagModel>) -> Result<(), ModelError> {
        let target = target.ok_or(ModelError::InvalidArgument("target"))?;
        target.clone_from(self);
        Ok(())
    }
}
