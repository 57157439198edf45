//! Headless group editing.
//!
//! A [`GroupEditor`] loads a group into a [`GroupEditSession`]. The session
//! edits a clone of the group through a [`GroupForm`] and only touches the
//! live group on apply. Pluggable [`EditGroupPage`]s contribute extra fields.

pub mod form;
pub mod page;
pub mod session;

pub use form::{AutoTypeSequenceMode, GroupForm, IconSelection, PeriodControls, TriStateSelectors};
pub use page::{EditGroupPage, PropertiesPage};
pub use session::{CloseDecision, ConfirmUnsaved, EditOutcome, GroupEditSession, GroupEditor};
