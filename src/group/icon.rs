//! Icon references for groups and entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Built-in icon used when a group has no explicit icon (a folder).
pub const DEFAULT_ICON_NUMBER: u32 = 48;

/// Icon of a group or entry: a built-in icon number or a custom icon UUID.
///
/// Custom icons live in the tree's icon registry; a reference whose UUID is no
/// longer registered is dangling and falls back to [`IconRef::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    /// A built-in icon by number.
    Builtin(u32),

    /// A custom icon registered in the database metadata.
    Custom(Uuid),
}

impl IconRef {
    /// Returns the custom icon UUID, if any.
    #[must_use]
    pub const fn custom_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Builtin(_) => None,
            Self::Custom(uuid) => Some(*uuid),
        }
    }

    /// Returns true for a custom icon.
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for IconRef {
    fn default() -> Self {
        Self::Builtin(DEFAULT_ICON_NUMBER)
    }
}

/// Where a group's icon is copied to when the group is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyIconTo {
    /// Only the edited group.
    #[default]
    ThisOnly,

    /// The group and all descendant groups.
    ChildGroups,

    /// The group and all entries in its subtree.
    ChildEntries,

    /// Descendant groups and entries.
    AllChildren,
}

impl ApplyIconTo {
    /// Returns true if descendant groups receive the icon.
    pub const fn includes_groups(&self) -> bool {
        matches!(self, Self::ChildGroups | Self::AllChildren)
    }

    /// Returns true if entries in the subtree receive the icon.
    pub const fn includes_entries(&self) -> bool {
        matches!(self, Self::ChildEntries | Self::AllChildren)
    }
}
