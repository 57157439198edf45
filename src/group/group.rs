//! Group records and identity.
//!
//! A group is a folder in the password database. It carries its own
//! tri-state settings and a non-owning link to its parent; the
//! [`GroupTree`](crate::tree::GroupTree) owns every group.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::Entry;
use super::icon::IconRef;
use crate::time_delta::TimeDelta;
use crate::tristate::TriState;

/// Globally unique, stable group identifier.
///
/// # Examples
///
/// ```
/// use vaultgroup::GroupId;
///
/// let id = GroupId::new();
/// assert!(!id.is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Creates a new random group ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a group ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns true if this is a nil (all zeros) UUID.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Creates a nil group ID (for testing or sentinel values).
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for GroupId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Free-form key/value data attached to a group by plugins and integrations.
pub type CustomData = BTreeMap<String, String>;

/// Timestamps and expiry of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,

    /// Whether `expiry_time` is in effect.
    pub expires: bool,
    /// Expiry time, meaningful only when `expires` is set.
    pub expiry_time: DateTime<Utc>,
}

impl TimeInfo {
    /// Creates time info stamped now, not expiring.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            expires: false,
            expiry_time: now,
        }
    }

    /// Returns true if the group expires and `at` is past its expiry time.
    #[must_use]
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires && self.expiry_time <= at
    }
}

impl Default for TimeInfo {
    fn default() -> Self {
        Self::now()
    }
}

/// A folder in the password database.
///
/// # Examples
///
/// ```
/// use vaultgroup::{Group, TriState};
///
/// let mut group = Group::new("Banking");
/// group.set_searching_enabled(TriState::Disable);
/// assert_eq!(group.version, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Globally unique identifier.
    pub id: GroupId,

    /// Parent group. `None` only for the root. Never an owning link.
    pub parent: Option<GroupId>,

    /// Display name.
    pub name: String,

    /// Free-form notes.
    #[serde(default)]
    pub notes: String,

    /// Group icon.
    #[serde(default)]
    pub icon: IconRef,

    /// Timestamps and expiry.
    pub time_info: TimeInfo,

    /// Period used when the effective expiration setting is `Enable` here.
    #[serde(default)]
    pub default_expiration_period: TimeDelta,

    /// Local state of the default expiration setting.
    #[serde(default)]
    pub default_expiration_period_enabled: TriState,

    /// Local searching state.
    #[serde(default)]
    pub searching_enabled: TriState,

    /// Local auto-type state.
    #[serde(default)]
    pub auto_type_enabled: TriState,

    /// Empty means inherit from the parent group.
    #[serde(default)]
    pub default_auto_type_sequence: String,

    /// Plugin-defined key/value pairs.
    #[serde(default)]
    pub custom_data: CustomData,

    /// Entries held directly by this group.
    #[serde(default)]
    pub entries: Vec<Entry>,

    /// Version number (incremented on every effective change).
    pub version: u64,
}

impl Group {
    /// Creates a detached group with every setting inherited.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(GroupId::new(), name)
    }

    /// Creates a detached group with a specific ID.
    #[must_use]
    pub fn with_id(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            name: name.into(),
            notes: String::new(),
            icon: IconRef::default(),
            time_info: TimeInfo::now(),
            default_expiration_period: TimeDelta::default(),
            default_expiration_period_enabled: TriState::Inherit,
            searching_enabled: TriState::Inherit,
            auto_type_enabled: TriState::Inherit,
            default_auto_type_sequence: String::new(),
            custom_data: CustomData::new(),
            entries: Vec::new(),
            version: 1,
        }
    }

    /// Returns true if this group has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Sets the group name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.touch();
        }
    }

    /// Sets the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        if self.notes != notes {
            self.notes = notes;
            self.touch();
        }
    }

    /// Sets the group icon.
    pub fn set_icon(&mut self, icon: IconRef) {
        if self.icon != icon {
            self.icon = icon;
            self.touch();
        }
    }

    /// Turns the expiry time on or off.
    pub fn set_expires(&mut self, expires: bool) {
        if self.time_info.expires != expires {
            self.time_info.expires = expires;
            self.touch();
        }
    }

    /// Sets the expiry time.
    pub fn set_expiry_time(&mut self, expiry_time: DateTime<Utc>) {
        if self.time_info.expiry_time != expiry_time {
            self.time_info.expiry_time = expiry_time;
            self.touch();
        }
    }

    /// Sets the period used when the expiration setting is `Enable`.
    pub fn set_default_expiration_period(&mut self, period: TimeDelta) {
        if self.default_expiration_period != period {
            self.default_expiration_period = period;
            self.touch();
        }
    }

    /// Sets the local state of the default expiration setting.
    pub fn set_default_expiration_period_enabled(&mut self, state: TriState) {
        if self.default_expiration_period_enabled != state {
            self.default_expiration_period_enabled = state;
            self.touch();
        }
    }

    /// Sets the local searching state.
    pub fn set_searching_enabled(&mut self, state: TriState) {
        if self.searching_enabled != state {
            self.searching_enabled = state;
            self.touch();
        }
    }

    /// Sets the local auto-type state.
    pub fn set_auto_type_enabled(&mut self, state: TriState) {
        if self.auto_type_enabled != state {
            self.auto_type_enabled = state;
            self.touch();
        }
    }

    /// Sets the default auto-type sequence. An empty string inherits.
    pub fn set_default_auto_type_sequence(&mut self, sequence: impl Into<String>) {
        let sequence = sequence.into();
        if self.default_auto_type_sequence != sequence {
            self.default_auto_type_sequence = sequence;
            self.touch();
        }
    }

    /// Sets a custom data value, returning the previous value.
    pub fn set_custom_data(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if self.custom_data.get(&key) == Some(&value) {
            return Some(value);
        }
        let previous = self.custom_data.insert(key, value);
        self.touch();
        previous
    }

    /// Removes a custom data value, returning it if present.
    pub fn remove_custom_data(&mut self, key: &str) -> Option<String> {
        let removed = self.custom_data.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Appends an entry to this group.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.touch();
    }

    /// Sets `icon` on every entry of this group. Returns how many changed.
    pub fn set_entry_icons(&mut self, icon: IconRef) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            if entry.icon != icon {
                entry.icon = icon;
                changed += 1;
            }
        }
        if changed > 0 {
            self.touch();
        }
        changed
    }

    /// Copies every user-editable field from `other`.
    ///
    /// Identity, parent link, entries and creation time are kept.
    pub fn copy_data_from(&mut self, other: &Self) {
        let before = (
            self.name.clone(),
            self.notes.clone(),
            self.icon,
            self.time_info.expires,
            self.time_info.expiry_time,
            self.default_expiration_period,
            self.default_expiration_period_enabled,
            self.searching_enabled,
            self.auto_type_enabled,
            self.default_auto_type_sequence.clone(),
            self.custom_data.clone(),
        );

        self.name.clone_from(&other.name);
        self.notes.clone_from(&other.notes);
        self.icon = other.icon;
        self.time_info.expires = other.time_info.expires;
        self.time_info.expiry_time = other.time_info.expiry_time;
        self.default_expiration_period = other.default_expiration_period;
        self.default_expiration_period_enabled = other.default_expiration_period_enabled;
        self.searching_enabled = other.searching_enabled;
        self.auto_type_enabled = other.auto_type_enabled;
        self.default_auto_type_sequence.clone_from(&other.default_auto_type_sequence);
        self.custom_data.clone_from(&other.custom_data);

        let after = (
            self.name.clone(),
            self.notes.clone(),
            self.icon,
            self.time_info.expires,
            self.time_info.expiry_time,
            self.default_expiration_period,
            self.default_expiration_period_enabled,
            self.searching_enabled,
            self.auto_type_enabled,
            self.default_auto_type_sequence.clone(),
            self.custom_data.clone(),
        );
        if before != after {
            self.touch();
        }
    }

    /// Updates the `updated_at` timestamp and increments the version.
    fn touch(&mut self) {
        self.time_info.updated_at = Utc::now();
        self.version += 1;
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl std::hash::Hash for Group {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_creation() {
        let id1 = GroupId::new();
        let id2 = GroupId::new();
        assert_ne!(id1, id2);
        assert!(!id1.is_nil());
        assert!(GroupId::nil().is_nil());
    }

    #[test]
    fn test_group_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = GroupId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_group_creation() {
        let group = Group::new("Email");
        assert_eq!(group.name, "Email");
        assert!(group.is_root());
        assert_eq!(group.version, 1);
        assert_eq!(group.searching_enabled, TriState::Inherit);
        assert_eq!(group.auto_type_enabled, TriState::Inherit);
        assert_eq!(group.default_expiration_period_enabled, TriState::Inherit);
        assert!(group.default_auto_type_sequence.is_empty());
        assert_eq!(group.icon, IconRef::default());
    }

    #[test]
    fn test_setter_only_touches_on_change() {
        let mut group = Group::new("Email");
        group.set_name("Email");
        assert_eq!(group.version, 1);

        group.set_name("Mail");
        group.set_auto_type_enabled(TriState::Enable);
        group.set_auto_type_enabled(TriState::Enable);
        assert_eq!(group.version, 3);
    }

    #[test]
    fn test_custom_data() {
        let mut group = Group::new("Email");
        assert_eq!(group.set_custom_data("sync", "on"), None);
        assert_eq!(group.set_custom_data("sync", "off").as_deref(), Some("on"));
        let version = group.version;
        group.set_custom_data("sync", "off");
        assert_eq!(group.version, version);

        assert_eq!(group.remove_custom_data("sync").as_deref(), Some("off"));
        assert_eq!(group.remove_custom_data("sync"), None);
    }

    #[test]
    fn test_copy_data_keeps_identity() {
        let mut live = Group::new("Live");
        let parent = GroupId::new();
        live.parent = Some(parent);
        live.add_entry(Entry::new("bank"));

        let mut edited = live.clone();
        edited.id = GroupId::new();
        edited.parent = None;
        edited.entries.clear();
        edited.set_name("Edited");
        edited.set_searching_enabled(TriState::Disable);
        edited.set_custom_data("k", "v");

        let id = live.id;
        let version = live.version;
        live.copy_data_from(&edited);

        assert_eq!(live.id, id);
        assert_eq!(live.parent, Some(parent));
        assert_eq!(live.entries.len(), 1);
        assert_eq!(live.name, "Edited");
        assert_eq!(live.searching_enabled, TriState::Disable);
        assert_eq!(live.custom_data.get("k").map(String::as_str), Some("v"));
        assert_eq!(live.version, version + 1);
    }

    #[test]
    fn test_copy_identical_data_is_noop() {
        let mut live = Group::new("Live");
        let copy = live.clone();
        live.copy_data_from(&copy);
        assert_eq!(live.version, 1);
    }

    #[test]
    fn test_expiry() {
        let mut group = Group::new("Temp");
        let now = Utc::now();
        group.set_expiry_time(now);
        assert!(!group.time_info.is_expired_at(now));
        group.set_expires(true);
        assert!(group.time_info.is_expired_at(now));
    }

    #[test]
    fn test_group_serialization() {
        let mut group = Group::new("Email");
        group.set_auto_type_enabled(TriState::Disable);
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["auto_type_enabled"], "disable");

        let decoded: Group = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.id, group.id);
        assert_eq!(decoded.auto_type_enabled, TriState::Disable);
    }
}
