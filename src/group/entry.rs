//! Entries held by a group.
//!
//! Only the fields a group operation touches are modeled here.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::icon::IconRef;

/// Unique entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A password entry as seen from its containing group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique ID.
    pub id: EntryId,
    /// Entry title.
    pub title: String,
    /// Entry icon.
    #[serde(default)]
    pub icon: IconRef,
}

impl Entry {
    /// Creates an entry with the default icon.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            title: title.into(),
            icon: IconRef::default(),
        }
    }
}
