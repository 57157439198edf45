//! # vaultgroup - Group hierarchy for password databases
//!
//! Groups (folders) in a password database carry settings that may be set
//! explicitly or inherited from the parent group. This crate models the group
//! tree, resolves inherited settings, and provides a headless group editor.
//!
//! ## Core Concepts
//!
//! - **TriState**: a setting's local state, `Inherit`, `Enable` or `Disable`
//! - **Resolver**: walks towards the root to find a setting's effective value
//! - **GroupTree**: owns all groups; groups link to their parent by ID
//! - **GroupEditSession**: edits a copy of a group and commits it on apply
//!
//! ## Usage
//!
//! ```rust
//! use vaultgroup::{Group, GroupTree, SettingsDefaults, TriState};
//!
//! let mut root = Group::new("Root");
//! root.set_auto_type_enabled(TriState::Disable);
//! let mut tree = GroupTree::new(root);
//!
//! let banking = tree.add_group(tree.root_id(), Group::new("Banking")).unwrap();
//! let cards = tree.add_group(banking, Group::new("Cards")).unwrap();
//!
//! let defaults = SettingsDefaults::default();
//! assert!(!tree.resolve_auto_type_enabled(cards, &defaults).unwrap());
//! assert!(tree.resolve_searching_enabled(cards, &defaults).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod editor;
pub mod error;
pub mod group;
pub mod resolver;
pub mod selector;
pub mod settings;
pub mod time_delta;
pub mod tree;
pub mod tristate;

// Re-export primary types at crate root for convenience
pub use config::SettingsDefaults;
pub use editor::{
    AutoTypeSequenceMode, CloseDecision, ConfirmUnsaved, EditGroupPage, EditOutcome, GroupEditSession,
    GroupEditor, GroupForm, IconSelection, PeriodControls, PropertiesPage, TriStateSelectors,
};
pub use error::{HierarchyError, ValidationError, VaultError, VaultResult};
pub use group::{ApplyIconTo, CustomData, Entry, EntryId, Group, GroupId, IconRef, TimeInfo};
pub use resolver::{Hierarchy, InheritableSetting, Resolution, Resolver};
pub use selector::{index_from_tri_state, tri_state_from_index, tri_state_items, SelectorItem};
pub use time_delta::{expiration_presets, ExpirationPreset, TimeDelta};
pub use tree::{GroupTree, SharedGroupTree, TreeSnapshot};
pub use tristate::TriState;
