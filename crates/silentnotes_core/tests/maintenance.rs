use chrono::{Duration, TimeZone, Utc};
use silentnotes_core::{NoteModel, NoteRepositoryModel, SafeModel, TagModel};
use uuid::Uuid;

fn safe1_id() -> Uuid {
    Uuid::parse_str("10000000000000000000000000000000").unwrap()
}

fn safe2_id() -> Uuid {
    Uuid::parse_str("20000000000000000000000000000000").unwrap()
}

#[test]
fn remove_unused_safes_keeps_referenced_safe() {
    let mut repository = NoteRepositoryModel::new();
    repository.safes.push(SafeModel::with_id(safe1_id()));
    repository.safes.push(SafeModel::with_id(safe2_id()));
    let mut note = NoteModel::new();
    note.safe_id = Some(safe2_id());
    repository.add_note(note);

    assert_eq!(repository.remove_unused_safes(), 1);
    assert_eq!(repository.safes.len(), 1);
    assert_eq!(repository.safes[0].id, safe2_id());

    assert_eq!(repository.remove_unused_safes(), 0);
    assert_eq!(repository.safes.len(), 1);
}

#[test]
fn remove_unused_tags_keeps_referenced_tag() {
    let tag1_id = Uuid::parse_str("10000000000000000000000000000000").unwrap();
    let tag2_id = Uuid::parse_str("20000000000000000000000000000000").unwrap();

    let mut repository = NoteRepositoryModel::new();
    repository.tags.push(TagModel::with_id(tag1_id, "one"));
    repository.tags.push(TagModel::with_id(tag2_id, "two"));
    let mut first = NoteModel::new();
    first.tags_mut().push(tag2_id);
    let mut second = NoteModel::new();
    second.tags_mut().push(tag2_id);
    repository.add_note(first);
    repository.add_note(second);
    repository.add_note(NoteModel::new());

    assert_eq!(repository.remove_unused_tags(), 1);
    assert_eq!(repository.tags.len(), 1);
    assert_eq!(repository.tags[0].id, tag2_id);

    assert_eq!(repository.remove_unused_tags(), 0);
    assert_eq!(repository.tags[0].id, tag2_id);
}

#[test]
fn sweeps_preserve_relative_order() {
    let ids: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();
    let mut repository = NoteRepositoryModel::new();
    for id in &ids {
        repository.tags.push(TagModel::with_id(*id, "tag"));
    }
    let mut note = NoteModel::new();
    note.tags = Some(vec![ids[3], ids[0], ids[2]]);
    repository.add_note(note);

    repository.remove_unused_tags();
    let remaining: Vec<Uuid> = repository.tags.iter().map(|tag| tag.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn clear_maintained_at_if_obsolete_touches_notes_and_safes() {
    let base = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
    let mut repository = NoteRepositoryModel::new();

    let mut stale_note = NoteModel::new();
    stale_note.maintained_at = Some(base);
    stale_note.modified_at = base + Duration::minutes(5);
    let mut valid_note = NoteModel::new();
    valid_note.modified_at = base;
    valid_note.maintained_at = Some(base);
    let mut stale_safe = SafeModel::new();
    stale_safe.maintained_at = Some(base);
    stale_safe.modified_at = base + Duration::minutes(5);
    repository.add_note(stale_note);
    repository.add_note(valid_note);
    repository.safes.push(stale_safe);

    assert_eq!(repository.clear_maintained_at_if_obsolete(), 2);
    assert!(repository.notes[0].maintained_at.is_none());
    assert_eq!(repository.notes[1].maintained_at, Some(base));
    assert!(repository.safes[0].maintained_at.is_none());

    assert_eq!(repository.clear_maintained_at_if_obsolete(), 0);
}

#[test]
fn run_maintenance_reports_counts_and_fingerprint_change() {
    let mut repository = NoteRepositoryModel::new();
    let kept_safe = SafeModel::new();
    let kept_safe_id = kept_safe.id;
    repository.safes.push(kept_safe);
    repository.safes.push(SafeModel::new());
    repository.tags.push(TagModel::new("orphan"));
    let mut note = NoteModel::new();
    note.safe_id = Some(kept_safe_id);
    repository.add_note(note);

    let report = repository.run_maintenance();
    assert_eq!(report.cleared_markers, 0);
    assert_eq!(report.removed_safes, 1);
    assert_eq!(report.removed_tags, 1);
    assert!(report.changed());
    assert_eq!(
        report.fingerprint_after,
        repository.get_modification_fingerprint()
    );

    let second = repository.run_maintenance();
    assert!(!second.changed());
    assert_eq!(second.removed_safes + second.removed_tags, 0);
}
