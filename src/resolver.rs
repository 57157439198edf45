//! Inheritance resolution for tri-state settings.
//!
//! A setting's effective value is found by walking from a group towards the
//! root until some group holds an explicit `Enable` or `Disable`. If every
//! group up to the root inherits, the caller's root default applies.
//!
//! The walk is a read-only query. Callers that share a hierarchy across
//! threads must hold it stable for the duration of the walk (see
//! [`SharedGroupTree`](crate::tree::SharedGroupTree)).

use tracing::{debug, warn};

use crate::error::HierarchyError;
use crate::group::GroupId;
use crate::tristate::TriState;

/// Default bound on parent hops before a hierarchy is considered cyclic.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Read access to a parent-linked hierarchy.
///
/// Implementations own the nodes; a node refers to its parent by ID only.
pub trait Hierarchy {
    /// Node type stored in the hierarchy.
    type Node;

    /// Looks up a node by ID.
    fn node(&self, id: GroupId) -> Option<&Self::Node>;

    /// Returns the parent ID of `node`, or `None` at the root.
    fn parent_of(&self, node: &Self::Node) -> Option<GroupId>;
}

/// A setting whose local value may defer to the parent.
///
/// `enabled_value` may read the node itself, for settings where `Enable`
/// selects a node-local value such as a duration.
pub trait InheritableSetting<N> {
    /// Concrete effective value.
    type Value;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The node's own, possibly inheriting, state.
    fn local_state(&self, node: &N) -> TriState;

    /// Value when the nearest explicit state is `Enable`.
    fn enabled_value(&self, node: &N) -> Self::Value;

    /// Value when the nearest explicit state is `Disable`.
    fn disabled_value(&self, node: &N) -> Self::Value;
}

/// Result of a resolution, with the group that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<V> {
    /// Effective value.
    pub value: V,

    /// Group holding the explicit state, or `None` if the root default applied.
    pub source: Option<GroupId>,

    /// Parent hops taken from the starting group.
    pub hops: usize,
}

/// Walks a [`Hierarchy`] to compute effective setting values.
///
/// # Examples
///
/// ```
/// use vaultgroup::{Group, GroupTree, Resolver, TriState};
/// use vaultgroup::settings::Searching;
///
/// let mut root = Group::new("Root");
/// root.set_searching_enabled(TriState::Disable);
/// let mut tree = GroupTree::new(root);
/// let child = tree.add_group(tree.root_id(), Group::new("Child")).unwrap();
///
/// let resolver = Resolver::default();
/// assert!(!resolver.resolve_effective(&tree, child, &Searching, true).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Resolver {
    /// Creates a resolver that allows at most `max_depth` parent hops.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Maximum number of parent hops per walk.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Computes the effective value of `setting` for group `id`.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`: `id` or an ancestor link is not in the hierarchy
    /// - `CyclicHierarchy`: the walk returned to `id` or exceeded `max_depth` hops
    pub fn resolve_effective<H, S>(
        &self,
        hierarchy: &H,
        id: GroupId,
        setting: &S,
        root_default: S::Value,
    ) -> Result<S::Value, HierarchyError>
    where
        H: Hierarchy + ?Sized,
        S: InheritableSetting<H::Node> + ?Sized,
    {
        self.resolve_with_source(hierarchy, id, setting, root_default)
            .map(|resolution| resolution.value)
    }

    /// Like [`resolve_effective`](Self::resolve_effective), also reporting
    /// which group decided the value.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_effective`](Self::resolve_effective).
    pub fn resolve_with_source<H, S>(
        &self,
        hierarchy: &H,
        id: GroupId,
        setting: &S,
        root_default: S::Value,
    ) -> Result<Resolution<S::Value>, HierarchyError>
    where
        H: Hierarchy + ?Sized,
        S: InheritableSetting<H::Node> + ?Sized,
    {
        let mut current = id;
        let mut hops = 0usize;

        loop {
            let node = hierarchy
                .node(current)
                .ok_or(HierarchyError::GroupNotFound { id: current })?;

            let value = match setting.local_state(node) {
                TriState::Enable => setting.enabled_value(node),
                TriState::Disable => setting.disabled_value(node),
                TriState::Inherit => {
                    let Some(parent) = hierarchy.parent_of(node) else {
                        debug!(setting = setting.name(), group = %id, hops, "resolved to root default");
                        return Ok(Resolution {
                            value: root_default,
                            source: None,
                            hops,
                        });
                    };

                    hops += 1;
                    if parent == id || hops > self.max_depth {
                        warn!(
                            setting = setting.name(),
                            group = %id,
                            hops,
                            max_depth = self.max_depth,
                            "parent walk did not terminate"
                        );
                        return Err(HierarchyError::CyclicHierarchy { start: id, hops });
                    }
                    current = parent;
                    continue;
                }
            };

            debug!(setting = setting.name(), group = %id, source = %current, hops, "resolved");
            return Ok(Resolution {
                value,
                source: Some(current),
                hops,
            });
        }
    }

    /// Computes the value group `id` would get by inheriting.
    ///
    /// This is the effective value of its parent, or `root_default` at the root.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_effective`](Self::resolve_effective).
    pub fn resolve_inherited<H, S>(
        &self,
        hierarchy: &H,
        id: GroupId,
        setting: &S,
        root_default: S::Value,
    ) -> Result<S::Value, HierarchyError>
    where
        H: Hierarchy + ?Sized,
        S: InheritableSetting<H::Node> + ?Sized,
    {
        let node = hierarchy
            .node(id)
            .ok_or(HierarchyError::GroupNotFound { id })?;
        match hierarchy.parent_of(node) {
            Some(parent) if parent == id => Err(HierarchyError::CyclicHierarchy { start: id, hops: 1 }),
            Some(parent) => self.resolve_effective(hierarchy, parent, setting, root_default),
            None => Ok(root_default),
        }
    }
}
