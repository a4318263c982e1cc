//! Modification fingerprint of a note repository.
//!
//! # Responsibility
//! - Summarize the mergeable state of a repository in one `i64`, so sync
//!   callers can tell whether anything changed without comparing content.
//!
//! # Invariants
//! - Only fields a merge looks at contribute: repository id, revision, order
//!   timestamp, note/safe/tag timestamps and tombstone ids.
//! - Content, key material, titles and entity ids never contribute; content
//!   changes always advance `modified_at`.
//! - Equal mergeable state yields equal fingerprints across processes and
//!   devices (no randomized hasher).
//! - Timestamps contribute at full nanosecond precision.
//! - Each mixing step is a bijection of the accumulator, so a single
//!   differing value always changes the result.

use crate::model::id::{id_halves, EntityId};
use crate::model::repository::NoteRepositoryModel;
use chrono::{DateTime, Utc};

const MIX_FACTOR: i64 = 397;

/// Accumulates values with `hash * 397 ^ value` in wrapping arithmetic.
#[derive(Debug, Clone, Copy)]
struct Mixer(i64);

impl Mixer {
    fn mix(&mut self, value: i64) {
        self.0 = self.0.wrapping_mul(MIX_FACTOR) ^ value;
    }

    /// Mixes both halves in sequence, so swapped or equal halves still
    /// produce distinct values.
    fn mix_id(&mut self, value: &EntityId) {
        let (high, low) = id_halves(value);
        self.mix(high);
        self.mix(low);
    }

    /// Mixes whole seconds and the sub-second nanoseconds separately, which
    /// keeps full precision without overflowing.
    fn mix_time(&mut self, value: &DateTime<Utc>) {
        self.mix(value.timestamp());
        self.mix(i64::from(value.timestamp_subsec_nanos()));
    }

    fn mix_optional_time(&mut self, value: Option<&DateTime<Utc>>) {
        if let Some(value) = value {
            self.mix_time(value);
        }
    }
}

impl NoteRepositoryModel {
    /// Returns a fingerprint of the modification state.
    ///
    /// Equal fingerprints mean unchanged repositories; different fingerprints
    /// indicate a modification. Collisions are possible but improbable.
    pub fn get_modification_fingerprint(&self) -> i64 {
        let mut mixer = Mixer(0);
        mixer.mix_id(&self.id);
        mixer.mix(i64::from(self.revision));
        mixer.mix_time(&self.order_modified_at);

        for note in &self.notes {
            mixer.mix_time(&note.modified_at);
            mixer.mix_optional_time(note.maintained_at.as_ref());
        }
        for deleted_note in &self.deleted_notes {
            mixer.mix_id(deleted_note);
        }
        for safe in &self.safes {
            mixer.mix_time(&safe.modified_at);
            mixer.mix_optional_time(safe.maintained_at.as_ref());
        }
        for tag in &self.tags {
            mixer.mix_time(&tag.modified_at);
        }

        mixer.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Mixer, MIX_FACTOR};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn mix_is_multiply_then_xor() {
        let mut mixer = Mixer(3);
        mixer.mix(5);
        assert_eq!(mixer.0, (3 * MIX_FACTOR) ^ 5);
    }

    #[test]
    fn mix_wraps_instead_of_overflowing() {
        let mut mixer = Mixer(i64::MAX);
        mixer.mix(0);
        assert_eq!(mixer.0, i64::MAX.wrapping_mul(MIX_FACTOR));
    }

    #[test]
    fn swapped_id_halves_mix_differently() {
        let mut first = Mixer(0);
        first.mix_id(&Uuid::from_u64_pair(1, 2));
        let mut second = Mixer(0);
        second.mix_id(&Uuid::from_u64_pair(2, 1));
        assert_ne!(first.0, second.0);

        let mut same_halves = Mixer(0);
        same_halves.mix_id(&Uuid::from_u64_pair(7, 7));
        assert_ne!(same_halves.0, Mixer(0).0);
    }

    #[test]
    fn nanoseconds_reach_the_mix() {
        let base = Utc.with_ymd_and_hms(2018, 2, 22, 0, 0, 0).unwrap();
        let mut first = Mixer(0);
        first.mix_time(&base);
        let mut second = Mixer(0);
        second.mix_time(&(base + Duration::nanoseconds(1)));
        assert_ne!(first.0, second.0);
    }
}
