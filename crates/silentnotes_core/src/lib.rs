//! Core domain logic for SilentNotes repositories.
//! This crate owns the consistency rules a multi-device sync relies on:
//! identity, change fingerprints, and referential-integrity maintenance.

pub mod fingerprint;
pub mod logging;
pub mod maintenance;
pub mod model;
pub mod snapshot;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use maintenance::MaintenanceReport;
pub use model::collection::{FindById, Identified};
pub use model::id::{get_or_create_id, EntityId};
pub use model::note::{NoteModel, NoteType};
pub use model::repository::NoteRepositoryModel;
pub use model::safe::SafeModel;
pub use model::tag::TagModel;
pub use model::ModelError;
pub use snapshot::{parse_repository, render_repository, SnapshotError, SnapshotResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
