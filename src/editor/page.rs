//! Editor pages: the pluggable page trait and the built-in properties page.

use chrono::{DateTime, Utc};

use crate::group::{CustomData, Group, GroupId};

/// An extra page of the group editor.
///
/// `set` is called when a group is loaded, with the temporary copy being
/// edited. `assign` is called on apply, before the copy is written back.
pub trait EditGroupPage: Send {
    /// Page title.
    fn name(&self) -> &str;

    /// Loads the page from the group being edited.
    fn set(&mut self, group: &Group);

    /// Writes the page's fields into the group being edited.
    fn assign(&mut self, group: &mut Group);
}

/// Built-in "Properties" page: read-only identity and timestamps plus the
/// custom data of the group being edited.
///
/// Obtained from [`GroupEditSession::properties`](super::GroupEditSession::properties),
/// so it always reflects pending edits. Custom data is changed through the
/// session, which marks it modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesPage {
    group_id: GroupId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    custom_data: CustomData,
}

impl PropertiesPage {
    /// Page title.
    pub const NAME: &'static str = "Properties";

    /// Captures the properties of `group`.
    #[must_use]
    pub fn from_group(group: &Group) -> Self {
        Self {
            group_id: group.id,
            created_at: group.time_info.created_at,
            updated_at: group.time_info.updated_at,
            custom_data: group.custom_data.clone(),
        }
    }

    /// ID of the group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Creation time of the group.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time of the group.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Custom data, sorted by key.
    #[must_use]
    pub const fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_group_captures_properties() {
        let mut group = Group::new("g");
        group.set_custom_data("b", "2");
        group.set_custom_data("a", "1");
        let page = PropertiesPage::from_group(&group);

        assert_eq!(page.group_id(), group.id);
        assert_eq!(page.created_at(), group.time_info.created_at);
        assert_eq!(page.updated_at(), group.time_info.updated_at);
        let keys: Vec<&str> = page.custom_data().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
