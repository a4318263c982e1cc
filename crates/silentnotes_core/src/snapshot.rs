//! Serialized form of a note repository.
//!
//! # Responsibility
//! - Convert between `NoteRepositoryModel` and its persisted text form.
//! - Reject invalid repositories before they reach the model.
//!
//! # Invariants
//! - The document has exactly one root key, `silentnotes`.
//! - Absent optional fields stay absent; an empty tag list stays present.
//! - A parsed repository has no nil ids and no duplicate ids per entity kind.
//! - This module performs no file or network I/O.

use crate::model::id::EntityId;
use crate::model::repository::NoteRepositoryModel;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors raised while reading or writing the serialized form.
#[derive(Debug)]
pub enum SnapshotError {
    /// The text is not a well-formed repository.
    InvalidRepository(String),
    /// The repository was written by a newer application.
    UnsupportedRevision {
        revision: i32,
        newest_supported: i32,
    },
    /// Rendering the repository failed.
    Serialize(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRepository(message) => write!(f, "invalid repository: {message}"),
            Self::UnsupportedRevision {
                revision,
                newest_supported,
            } => write!(
                f,
                "repository revision {revision} is newer than supported {newest_supported}"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize repository: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::InvalidRepository(_) | Self::UnsupportedRevision { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidRepository(value.to_string())
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    silentnotes: &'a NoteRepositoryModel,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    silentnotes: NoteRepositoryModel,
}

/// Parses a serialized repository.
///
/// Nil or missing ids are generated before the repository is returned.
///
/// # Errors
/// - `InvalidRepository` for malformed text, unparseable timestamps or
///   duplicate ids.
/// - `UnsupportedRevision` when the revision is newer than this crate.
pub fn parse_repository(text: &str) -> SnapshotResult<NoteRepositoryModel> {
    let document: Document = serde_json::from_str(text).map_err(|err| {
        warn!(
            "event=snapshot_parse module=snapshot status=error line={} column={}",
            err.line(),
            err.column()
        );
        SnapshotError::from(err)
    })?;
    let mut repository = document.silentnotes;

    if repository.revision > NoteRepositoryModel::NEWEST_SUPPORTED_REVISION {
        return Err(SnapshotError::UnsupportedRevision {
            revision: repository.revision,
            newest_supported: NoteRepositoryModel::NEWEST_SUPPORTED_REVISION,
        });
    }

    repository.ensure_ids();
    ensure_unique("note", repository.notes.iter().map(|note| note.id))?;
    ensure_unique("safe", repository.safes.iter().map(|safe| safe.id))?;
    ensure_unique("tag", repository.tags.iter().map(|tag| tag.id))?;

    info!(
        "event=snapshot_parse module=snapshot status=ok revision={} notes={} deleted_notes={} safes={} tags={}",
        repository.revision,
        repository.notes.len(),
        repository.deleted_notes.len(),
        repository.safes.len(),
        repository.tags.len()
    );
    Ok(repository)
}

/// Renders a repository as pretty-printed text.
pub fn render_repository(repository: &NoteRepositoryModel) -> SnapshotResult<String> {
    serde_json::to_string_pretty(&DocumentRef {
        silentnotes: repository,
    })
    .map_err(SnapshotError::Serialize)
}

fn ensure_unique(
    kind: &'static str,
    ids: impl Iterator<Item = EntityId>,
) -> SnapshotResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SnapshotError::InvalidRepository(format!(
                "duplicate {kind} id `{id}`"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_repository, SnapshotError};

    #[test]
    fn rejects_missing_root() {
        let err = parse_repository(r#"{ "id": "3538c76a-eee9-4905-adcf-946f8b527c37" }"#)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidRepository(_)));
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let err = parse_repository(
            r#"{ "silentnotes": { "revision": 4, "order_modified_at": "yesterday" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidRepository(_)));
    }
}
