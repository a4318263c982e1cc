//! Referential-integrity sweeps and obsolescence clearing.
//!
//! # Responsibility
//! - Remove safes and tags no note references anymore.
//! - Invalidate `maintained_at` markers older than the last modification.
//!
//! # Invariants
//! - Sweeps only remove orphans; dangling references on notes are neither
//!   rejected nor repaired, and no entity is ever created.
//! - Every operation is idempotent and keeps the relative order of the
//!   remaining entities.
//! - Logs carry counts only, never titles, content or key material.

use crate::model::id::EntityId;
use crate::model::repository::NoteRepositoryModel;
use log::info;
use std::collections::HashSet;

/// Outcome of one `run_maintenance()` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Number of `maintained_at` markers cleared on notes and safes.
    pub cleared_markers: usize,
    pub removed_safes: usize,
    pub removed_tags: usize,
    pub fingerprint_before: i64,
    pub fingerprint_after: i64,
}

impl MaintenanceReport {
    /// Whether the pass changed the mergeable state.
    pub fn changed(&self) -> bool {
        self.fingerprint_before != self.fingerprint_after
    }
}

impl NoteRepositoryModel {
    /// Removes all safes which are not used by any note.
    ///
    /// Returns the number of removed safes.
    pub fn remove_unused_safes(&mut self) -> usize {
        let used_safe_ids: HashSet<EntityId> =
            self.notes.iter().filter_map(|note| note.safe_id).collect();

        let before = self.safes.len();
        self.safes.retain(|safe| used_safe_ids.contains(&safe.id));
        let removed = before - self.safes.len();
        if removed > 0 {
            info!(
                "event=unused_safes_removed module=maintenance status=ok removed={} remaining={}",
                removed,
                self.safes.len()
            );
        }
        removed
    }

    /// Removes all tags which are not used by any note.
    ///
    /// Notes without a tag list contribute nothing. Returns the number of
    /// removed tags.
    pub fn remove_unused_tags(&mut self) -> usize {
        let used_tag_ids: HashSet<EntityId> = self
            .notes
            .iter()
            .filter_map(|note| note.tags.as_ref())
            .flatten()
            .copied()
            .collect();

        let before = self.tags.len();
        self.tags.retain(|tag| used_tag_ids.contains(&tag.id));
        let removed = before - self.tags.len();
        if removed > 0 {
            info!(
                "event=unused_tags_removed module=maintenance status=ok removed={} remaining={}",
                removed,
                self.tags.len()
            );
        }
        removed
    }

    /// Clears the `maintained_at` markers of notes and safes which were
    /// modified after they were maintained.
    ///
    /// Returns the number of cleared markers.
    pub fn clear_maintained_at_if_obsolete(&mut self) -> usize {
        let notes = self
            .notes
            .iter_mut()
            .map(|note| note.clear_maintained_at_if_obsolete())
            .filter(|cleared| *cleared)
            .count();
        let safes = self
            .safes
            .iter_mut()
            .map(|safe| safe.clear_maintained_at_if_obsolete())
            .filter(|cleared| *cleared)
            .count();
        notes + safes
    }

    /// Clears obsolete markers, then sweeps unused safes and tags.
    pub fn run_maintenance(&mut self) -> MaintenanceReport {
        let fingerprint_before = self.get_modification_fingerprint();
        let cleared_markers = self.clear_maintained_at_if_obsolete();
        let removed_safes = self.remove_unused_safes();
        let removed_tags = self.remove_unused_tags();
        let fingerprint_after = self.get_modification_fingerprint();

        let report = MaintenanceReport {
            cleared_markers,
            removed_safes,
            removed_tags,
            fingerprint_before,
            fingerprint_after,
        };
        info!(
            "event=maintenance_run module=maintenance status=ok cleared_markers={} removed_safes={} removed_tags={} changed={}",
            report.cleared_markers,
            report.removed_safes,
            report.removed_tags,
            report.changed()
        );
        report
    }
}
