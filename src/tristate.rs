//! Three-valued group settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Local state of an inheritable group setting.
///
/// `Inherit` defers to the parent group; `Enable` and `Disable` are explicit.
/// The effective value of an `Inherit` setting is computed by
/// [`Resolver`](crate::resolver::Resolver).
///
/// Persisted by name, never by selector position:
///
/// ```
/// use vaultgroup::TriState;
///
/// let json = serde_json::to_string(&TriState::Disable).unwrap();
/// assert_eq!(json, "\"disable\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    /// Take the effective value from the parent group.
    #[default]
    Inherit,

    /// Explicitly on.
    Enable,

    /// Explicitly off.
    Disable,
}

impl TriState {
    /// All states, in declaration order.
    pub const ALL: [Self; 3] = [Self::Inherit, Self::Enable, Self::Disable];

    /// Returns `true` if this is `Inherit`.
    pub const fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    /// Returns `true` if this is `Enable`.
    pub const fn is_enable(&self) -> bool {
        matches!(self, Self::Enable)
    }

    /// Returns `true` if this is `Disable`.
    pub const fn is_disable(&self) -> bool {
        matches!(self, Self::Disable)
    }

    /// Returns the explicit boolean, or `None` for `Inherit`.
    #[must_use]
    pub const fn as_explicit(&self) -> Option<bool> {
        match self {
            Self::Inherit => None,
            Self::Enable => Some(true),
            Self::Disable => Some(false),
        }
    }
}

impl From<bool> for TriState {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enable
        } else {
            Self::Disable
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Inherit, Self::from)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inherit => write!(f, "inherit"),
            Self::Enable => write!(f, "enable"),
            Self::Disable => write!(f, "disable"),
        }
    }
}
