//! Lookup helpers over ordered entity collections.
//!
//! Collections stay plain `Vec`s; lookup-by-id is provided for any slice of
//! entities implementing `Identified`.

use crate::model::id::EntityId;
use crate::model::note::NoteModel;
use crate::model::safe::SafeModel;
use crate::model::tag::TagModel;

/// Entity exposing a stable identifier.
pub trait Identified {
    fn id(&self) -> EntityId;
}

impl Identified for NoteModel {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Identified for SafeModel {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Identified for TagModel {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Lookup-by-id over an ordered collection.
pub trait FindById<T> {
    /// Returns the first entity with `id`, or `None`.
    fn find_by_id(&self, id: EntityId) -> Option<&T>;
    fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut T>;
    /// Returns the position of the first entity with `id`.
    fn position_of(&self, id: EntityId) -> Option<usize>;
}

impl<T: Identified> FindById<T> for [T] {
    fn find_by_id(&self, id: EntityId) -> Option<&T> {
        self.iter().find(|item| item.id() == id)
    }

    fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.iter_mut().find(|item| item.id() == id)
    }

    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.iter().position(|item| item.id() == id)
    }
}
