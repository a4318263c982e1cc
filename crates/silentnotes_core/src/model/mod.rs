//! Serializable domain model of a note repository.
//!
//! # Responsibility
//! - Define notes, safes, tags and the repository aggregate that owns them.
//! - Keep identity, `modified_at` and `maintained_at` semantics in one place.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - `modified_at` only changes through `refresh_modified_at()`.
//! - `maintained_at` is written by the merge process, never by edit paths.
//! - Deleted notes leave a tombstone id behind instead of disappearing.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection;
pub mod id;
pub mod note;
pub mod repository;
pub mod safe;
pub mod tag;

/// Errors raised by model operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required argument was missing; carries the argument name.
    InvalidArgument(&'static str),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(name) => write!(f, "invalid argument: `{name}` is required"),
        }
    }
}

impl Error for ModelError {}
