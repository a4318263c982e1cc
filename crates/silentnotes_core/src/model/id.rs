//! Identifier policy shared by every entity kind.
//!
//! # Responsibility
//! - Define the identifier type used for notes, safes, tags and repositories.
//! - Provide the one sanctioned path that fills a nil identifier.
//!
//! # Invariants
//! - A non-nil identifier is never replaced.
//! - Generated identifiers are random (v4), never sequential, because they
//!   cross device boundaries.

use uuid::Uuid;

/// Stable identifier of every entity inside a note repository.
pub type EntityId = Uuid;

/// Returns `current`, generating and storing a fresh identifier first when
/// `current` is nil.
///
/// Repeated calls return the same value.
pub fn get_or_create_id(current: &mut EntityId) -> EntityId {
    if current.is_nil() {
        *current = Uuid::new_v4();
    }
    *current
}

/// Splits a 128-bit identifier into its high and low 64-bit halves.
pub(crate) fn id_halves(id: &EntityId) -> (i64, i64) {
    let (high, low) = id.as_u64_pair();
    (high as i64, low as i64)
}

#[cfg(test)]
mod tests {
    use super::{get_or_create_id, id_halves};
    use uuid::Uuid;

    #[test]
    fn nil_id_is_filled_once() {
        let mut id = Uuid::nil();
        let first = get_or_create_id(&mut id);
        let second = get_or_create_id(&mut id);

        assert!(!first.is_nil());
        assert_eq!(first, second);
        assert_eq!(id, first);
    }

    #[test]
    fn existing_id_is_kept() {
        let existing = Uuid::parse_str("3538c76a-eee9-4905-adcf-946f8b527c37").unwrap();
        let mut id = existing;
        assert_eq!(get_or_create_id(&mut id), existing);
    }

    #[test]
    fn halves_keep_their_position() {
        assert_eq!(id_halves(&Uuid::from_u64_pair(1, 2)), (1, 2));
        assert_eq!(id_halves(&Uuid::from_u64_pair(2, 1)), (2, 1));
        assert_eq!(id_halves(&Uuid::nil()), (0, 0));
    }
}
