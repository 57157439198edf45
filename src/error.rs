//! Error types for vaultgroup.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the specific condition instead of parsing messages.

use thiserror::Error;

use crate::group::GroupId;

/// Validation errors raised at input boundaries (selector indices, names, config).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Selector index {index} is out of range [0, 2]")]
    InvalidIndex {
        index: i32,
    },

    #[error("Group name cannot be empty")]
    EmptyGroupName,

    #[error("Edit session has already finished")]
    SessionFinished,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Integrity errors raised while walking or restructuring the group hierarchy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Cyclic hierarchy detected starting at group {start} after {hops} hops")]
    CyclicHierarchy {
        start: GroupId,
        hops: usize,
    },

    #[error("Group not found: {id}")]
    GroupNotFound {
        id: GroupId,
    },

    #[error("Duplicate group: {id}")]
    DuplicateGroup {
        id: GroupId,
    },

    #[error("Group {id} has no parent but is not the root")]
    DetachedGroup {
        id: GroupId,
    },

    #[error("The root group cannot be removed or moved")]
    RootRemoval,

    #[error("Group hierarchy lock poisoned: {context}")]
    LockPoisoned {
        context: &'static str,
    },
}

/// Top-level error type for vaultgroup.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl VaultError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this error indicates a corrupted hierarchy.
    ///
    /// Integrity errors are fatal for the current operation; retrying the same
    /// walk over the same tree will fail again.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::Hierarchy(
                HierarchyError::CyclicHierarchy { .. }
                    | HierarchyError::GroupNotFound { .. }
                    | HierarchyError::DetachedGroup { .. }
            )
        )
    }
}

/// Result type alias for vaultgroup operations.
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = ValidationError::InvalidIndex { index: 7 };
        let msg = format!("{err}");
        assert!(msg.contains('7'));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_cyclic_hierarchy_message() {
        let id = GroupId::new();
        let err = HierarchyError::CyclicHierarchy { start: id, hops: 128 };
        let msg = format!("{err}");
        assert!(msg.contains("Cyclic hierarchy"));
        assert!(msg.contains(&id.to_string()));
        assert!(msg.contains("128"));
    }

    #[test]
    fn test_vault_error_from_validation() {
        let err: VaultError = ValidationError::EmptyGroupName.into();
        assert!(err.is_validation());
        assert!(!err.is_integrity());
    }

    #[test]
    fn test_vault_error_from_hierarchy() {
        let err: VaultError = HierarchyError::CyclicHierarchy {
            start: GroupId::nil(),
            hops: 2,
        }
        .into();
        assert!(err.is_integrity());
        assert!(!err.is_validation());

        let err: VaultError = HierarchyError::DetachedGroup { id: GroupId::nil() }.into();
        assert!(err.is_integrity());
        assert!(err.to_string().contains("not the root"));

        let err: VaultError = HierarchyError::LockPoisoned { context: "resolve" }.into();
        assert!(!err.is_integrity());
    }

    #[test]
    fn test_vault_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: VaultError = json_err.into();
        assert!(err.to_string().contains("parse configuration"));
    }
}
