//! Group layer modules.
//!
//! This module groups the group record, its entries, and icon references.

pub mod entry;
pub mod group;
pub mod icon;

pub use entry::{Entry, EntryId};
pub use group::{CustomData, Group, GroupId, TimeInfo};
pub use icon::{ApplyIconTo, IconRef, DEFAULT_ICON_NUMBER};
