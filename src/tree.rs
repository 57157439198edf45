//! The group hierarchy.
//!
//! [`GroupTree`] owns every group by value. Groups refer to their parent by
//! [`GroupId`] only, so there are no ownership cycles. [`SharedGroupTree`]
//! wraps a tree in a `RwLock` so resolutions see a consistent snapshot while
//! another thread may restructure the tree.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::config::SettingsDefaults;
use crate::error::HierarchyError;
use crate::group::{Group, GroupId, IconRef};
use crate::resolver::{Hierarchy, InheritableSetting};
use crate::settings::{
    AutoType, AutoTypeSequence, DefaultExpirationPeriod, DefaultExpirationPeriodEnabled, Searching,
};
use crate::time_delta::TimeDelta;

/// An owning tree of groups with a single root.
///
/// # Examples
///
/// ```
/// use vaultgroup::{Group, GroupTree, SettingsDefaults};
///
/// let mut tree = GroupTree::new(Group::new("Root"));
/// let email = tree.add_group(tree.root_id(), Group::new("Email")).unwrap();
///
/// let defaults = SettingsDefaults::default();
/// assert!(tree.resolve_searching_enabled(email, &defaults).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct GroupTree {
    root: GroupId,
    groups: HashMap<GroupId, Group>,
    children: HashMap<GroupId, Vec<GroupId>>,
    custom_icons: HashSet<Uuid>,
}

/// Serializable form of a [`GroupTree`]. Groups are listed parents first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// ID of the root group.
    pub root: GroupId,
    /// Every group, root included.
    pub groups: Vec<Group>,
    /// Registered custom icons.
    #[serde(default)]
    pub custom_icons: Vec<Uuid>,
}

impl GroupTree {
    /// Creates a tree holding only `root`. Any parent link on `root` is cleared.
    #[must_use]
    pub fn new(mut root: Group) -> Self {
        root.parent = None;
        let root_id = root.id;
        let mut groups = HashMap::new();
        groups.insert(root_id, root);
        let mut children = HashMap::new();
        children.insert(root_id, Vec::new());
        Self {
            root: root_id,
            groups,
            children,
            custom_icons: HashSet::new(),
        }
    }

    /// ID of the root group.
    #[must_use]
    pub const fn root_id(&self) -> GroupId {
        self.root
    }

    /// Number of groups, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the group with `id`, if any.
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Returns true if `id` is in the tree.
    #[must_use]
    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Adds `group` under `parent`, returning its ID.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`: `parent` is not in the tree
    /// - `DuplicateGroup`: a group with the same ID already exists
    pub fn add_group(&mut self, parent: GroupId, mut group: Group) -> Result<GroupId, HierarchyError> {
        if !self.groups.contains_key(&parent) {
            return Err(HierarchyError::GroupNotFound { id: parent });
        }
        let id = group.id;
        if self.groups.contains_key(&id) {
            return Err(HierarchyError::DuplicateGroup { id });
        }
        group.parent = Some(parent);
        self.groups.insert(id, group);
        self.children.insert(id, Vec::new());
        self.children.entry(parent).or_default().push(id);
        Ok(id)
    }

    /// Mutates a group in place. Its ID and parent link are kept as they were;
    /// use [`reparent`](Self::reparent) to move a group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if `id` is not in the tree.
    pub fn update<R>(&mut self, id: GroupId, f: impl FnOnce(&mut Group) -> R) -> Result<R, HierarchyError> {
        let group = self
            .groups
            .get_mut(&id)
            .ok_or(HierarchyError::GroupNotFound { id })?;
        let parent = group.parent;
        let result = f(group);
        group.id = id;
        group.parent = parent;
        Ok(result)
    }

    /// Direct children of `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: GroupId) -> &[GroupId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// All groups below `id`, parents before children. `id` itself is excluded.
    #[must_use]
    pub fn descendants(&self, id: GroupId) -> Vec<GroupId> {
        let mut out = Vec::new();
        let mut stack: Vec<GroupId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Moves `id` under `new_parent`.
    ///
    /// # Errors
    ///
    /// - `RootRemoval`: `id` is the root
    /// - `GroupNotFound`: either group is missing
    /// - `CyclicHierarchy`: `new_parent` is `id` or one of its descendants
    pub fn reparent(&mut self, id: GroupId, new_parent: GroupId) -> Result<(), HierarchyError> {
        if id == self.root {
            return Err(HierarchyError::RootRemoval);
        }
        let old_parent = self
            .groups
            .get(&id)
            .ok_or(HierarchyError::GroupNotFound { id })?
            .parent;
        if !self.groups.contains_key(&new_parent) {
            return Err(HierarchyError::GroupNotFound { id: new_parent });
        }
        if new_parent == id || self.descendants(id).contains(&new_parent) {
            return Err(HierarchyError::CyclicHierarchy { start: new_parent, hops: 0 });
        }

        if let Some(old) = old_parent.and_then(|p| self.children.get_mut(&p)) {
            old.retain(|child| *child != id);
        }
        self.children.entry(new_parent).or_default().push(id);
        if let Some(group) = self.groups.get_mut(&id) {
            group.parent = Some(new_parent);
        }
        Ok(())
    }

    /// Removes `id` and its whole subtree, returning the removed groups.
    ///
    /// # Errors
    ///
    /// - `RootRemoval`: `id` is the root
    /// - `GroupNotFound`: `id` is not in the tree
    pub fn remove(&mut self, id: GroupId) -> Result<Vec<Group>, HierarchyError> {
        if id == self.root {
            return Err(HierarchyError::RootRemoval);
        }
        let parent = self
            .groups
            .get(&id)
            .ok_or(HierarchyError::GroupNotFound { id })?
            .parent;
        if let Some(siblings) = parent.and_then(|p| self.children.get_mut(&p)) {
            siblings.retain(|child| *child != id);
        }

        let mut ids = vec![id];
        ids.extend(self.descendants(id));
        let mut removed = Vec::with_capacity(ids.len());
        for gid in ids {
            self.children.remove(&gid);
            if let Some(group) = self.groups.remove(&gid) {
                removed.push(group);
            }
        }
        Ok(removed)
    }

    /// Registers a custom icon. Returns false if it was already known.
    pub fn add_custom_icon(&mut self, uuid: Uuid) -> bool {
        self.custom_icons.insert(uuid)
    }

    /// Unregisters a custom icon. Returns true if it was known.
    pub fn remove_custom_icon(&mut self, uuid: Uuid) -> bool {
        self.custom_icons.remove(&uuid)
    }

    /// Returns true if the custom icon is registered.
    #[must_use]
    pub fn contains_custom_icon(&self, uuid: Uuid) -> bool {
        self.custom_icons.contains(&uuid)
    }

    /// Returns true if `icon` is built-in or a registered custom icon.
    #[must_use]
    pub fn icon_is_available(&self, icon: IconRef) -> bool {
        icon.custom_uuid().map_or(true, |uuid| self.contains_custom_icon(uuid))
    }

    /// Copies the icon of `id` to every descendant group. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if `id` is not in the tree.
    pub fn apply_group_icon_to_child_groups(&mut self, id: GroupId) -> Result<usize, HierarchyError> {
        let icon = self.icon_of(id)?;
        let mut changed = 0;
        for gid in self.descendants(id) {
            if let Some(group) = self.groups.get_mut(&gid) {
                if group.icon != icon {
                    group.set_icon(icon);
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Copies the icon of `id` to every entry in its subtree. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if `id` is not in the tree.
    pub fn apply_group_icon_to_child_entries(&mut self, id: GroupId) -> Result<usize, HierarchyError> {
        let icon = self.icon_of(id)?;
        let mut targets = vec![id];
        targets.extend(self.descendants(id));
        let mut changed = 0;
        for gid in targets {
            if let Some(group) = self.groups.get_mut(&gid) {
                changed += group.set_entry_icons(icon);
            }
        }
        Ok(changed)
    }

    fn icon_of(&self, id: GroupId) -> Result<IconRef, HierarchyError> {
        self.groups
            .get(&id)
            .map(|group| group.icon)
            .ok_or(HierarchyError::GroupNotFound { id })
    }

    /// Effective searching flag of `id`.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors.
    pub fn resolve_searching_enabled(&self, id: GroupId, defaults: &SettingsDefaults) -> Result<bool, HierarchyError> {
        defaults.resolver().resolve_effective(self, id, &Searching, defaults.searching)
    }

    /// Effective auto-type flag of `id`.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors.
    pub fn resolve_auto_type_enabled(&self, id: GroupId, defaults: &SettingsDefaults) -> Result<bool, HierarchyError> {
        defaults.resolver().resolve_effective(self, id, &AutoType, defaults.auto_type)
    }

    /// Effective default-expiration flag of `id`.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors.
    pub fn resolve_default_expiration_period_enabled(
        &self,
        id: GroupId,
        defaults: &SettingsDefaults,
    ) -> Result<bool, HierarchyError> {
        defaults.resolver().resolve_effective(
            self,
            id,
            &DefaultExpirationPeriodEnabled,
            defaults.default_expiration_period_enabled(),
        )
    }

    /// Effective default expiration period of `id`, `None` when disabled.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors.
    pub fn effective_default_expiration_period(
        &self,
        id: GroupId,
        defaults: &SettingsDefaults,
    ) -> Result<Option<TimeDelta>, HierarchyError> {
        defaults
            .resolver()
            .resolve_effective(self, id, &DefaultExpirationPeriod, defaults.default_expiration_period)
    }

    /// Effective auto-type sequence of `id`.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors.
    pub fn effective_auto_type_sequence(&self, id: GroupId, defaults: &SettingsDefaults) -> Result<String, HierarchyError> {
        defaults
            .resolver()
            .resolve_effective(self, id, &AutoTypeSequence, defaults.auto_type_sequence.clone())
    }

    /// Serializable copy of the tree, parents first.
    #[must_use]
    pub fn snapshot(&self) -> TreeSnapshot {
        let mut order = vec![self.root];
        order.extend(self.descendants(self.root));
        let mut custom_icons: Vec<Uuid> = self.custom_icons.iter().copied().collect();
        custom_icons.sort_unstable();
        TreeSnapshot {
            root: self.root,
            groups: order.iter().filter_map(|id| self.groups.get(id).cloned()).collect(),
            custom_icons,
        }
    }

    /// Rebuilds a tree from a snapshot, checking every parent link.
    ///
    /// Groups may appear in any order. Siblings keep the order in which they
    /// are listed.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`: the root or some parent is missing
    /// - `DuplicateGroup`: an ID appears twice
    /// - `DetachedGroup`: a group other than the root has no parent
    /// - `CyclicHierarchy`: some groups only reach each other, never the root
    pub fn from_snapshot(snapshot: TreeSnapshot) -> Result<Self, HierarchyError> {
        let mut seen: HashSet<GroupId> = HashSet::with_capacity(snapshot.groups.len());
        let mut root = None;
        let mut pending: Vec<Group> = Vec::with_capacity(snapshot.groups.len());
        for group in snapshot.groups {
            let id = group.id;
            if !seen.insert(id) {
                return Err(HierarchyError::DuplicateGroup { id });
            }
            if id == snapshot.root {
                root = Some(group);
            } else if group.parent.is_none() {
                return Err(HierarchyError::DetachedGroup { id });
            } else {
                pending.push(group);
            }
        }

        let root = root.ok_or(HierarchyError::GroupNotFound { id: snapshot.root })?;
        let mut tree = Self::new(root);
        tree.custom_icons.extend(snapshot.custom_icons);

        // Each pass attaches, in listed order, the groups whose parent was
        // already in the tree when the pass started.
        while !pending.is_empty() {
            let (ready, waiting): (Vec<Group>, Vec<Group>) = pending
                .into_iter()
                .partition(|g| g.parent.is_some_and(|p| tree.contains(p)));

            if ready.is_empty() {
                return Err(Self::unattached_error(&waiting));
            }
            for group in ready {
                let parent = group.parent.unwrap_or(tree.root);
                tree.add_group(parent, group)?;
            }
            pending = waiting;
        }
        Ok(tree)
    }

    fn unattached_error(pending: &[Group]) -> HierarchyError {
        let ids: HashSet<GroupId> = pending.iter().map(|g| g.id).collect();
        if let Some(missing) = pending
            .iter()
            .filter_map(|g| g.parent)
            .find(|p| !ids.contains(p))
        {
            return HierarchyError::GroupNotFound { id: missing };
        }
        let start = ids.iter().min().copied().unwrap_or_default();
        warn!(group = %start, unattached = pending.len(), "snapshot contains a parent cycle");
        HierarchyError::CyclicHierarchy {
            start,
            hops: pending.len(),
        }
    }
}

impl Hierarchy for GroupTree {
    type Node = Group;

    fn node(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    fn parent_of(&self, node: &Group) -> Option<GroupId> {
        node.parent
    }
}

/// A [`GroupTree`] shared across threads.
///
/// Every resolution holds the read lock for its whole walk.
#[derive(Debug, Clone)]
pub struct SharedGroupTree {
    inner: Arc<RwLock<GroupTree>>,
}

fn lock_err(context: &'static str) -> HierarchyError {
    warn!(context, "group tree lock poisoned");
    HierarchyError::LockPoisoned { context }
}

impl SharedGroupTree {
    /// Wraps `tree` for shared access.
    #[must_use]
    pub fn new(tree: GroupTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Runs `f` against the tree under the read lock.
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if a writer panicked.
    pub fn read<R>(&self, f: impl FnOnce(&GroupTree) -> R) -> Result<R, HierarchyError> {
        let guard = self.inner.read().map_err(|_| lock_err("read"))?;
        Ok(f(&*guard))
    }

    /// Runs `f` against the tree under the write lock.
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if a writer panicked.
    pub fn write<R>(&self, f: impl FnOnce(&mut GroupTree) -> R) -> Result<R, HierarchyError> {
        let mut guard = self.inner.write().map_err(|_| lock_err("write"))?;
        Ok(f(&mut *guard))
    }

    /// Resolves `setting` for `id` on a consistent view of the tree.
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` or any resolver error.
    pub fn resolve<S>(
        &self,
        id: GroupId,
        setting: &S,
        root_default: S::Value,
        defaults: &SettingsDefaults,
    ) -> Result<S::Value, HierarchyError>
    where
        S: InheritableSetting<Group> + ?Sized,
    {
        self.read(|tree| defaults.resolver().resolve_effective(tree, id, setting, root_default))?
    }
}
