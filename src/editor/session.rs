//! Edit transactions over a single group.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::form::{AutoTypeSequenceMode, GroupForm, IconSelection, PeriodControls, TriStateSelectors};
use super::page::{EditGroupPage, PropertiesPage};
use crate::config::SettingsDefaults;
use crate::error::{HierarchyError, ValidationError, VaultResult};
use crate::group::{Group, GroupId, IconRef};
use crate::selector::tri_state_from_index;
use crate::settings::DefaultExpirationPeriod;
use crate::time_delta::TimeDelta;
use crate::tree::GroupTree;
use crate::tristate::TriState;

/// Answer to "the group has unsaved changes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Keep editing.
    Cancel,

    /// Apply the changes, then close.
    Save,

    /// Drop the changes and close.
    Discard,
}

/// Asks the user what to do with unsaved changes.
pub trait ConfirmUnsaved {
    /// Called with the edited name when closing a modified session.
    fn confirm(&mut self, group_name: &str) -> CloseDecision;
}

impl<F> ConfirmUnsaved for F
where
    F: FnMut(&str) -> CloseDecision,
{
    fn confirm(&mut self, group_name: &str) -> CloseDecision {
        self(group_name)
    }
}

/// State of a session after save or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The session is still open.
    Open,

    /// The session ended. `accepted` is true only for [`GroupEditSession::save`].
    Finished { accepted: bool },
}

/// Long-lived editor holding root defaults and extra pages.
///
/// # Examples
///
/// ```
/// use vaultgroup::{Group, GroupEditor, GroupTree, SettingsDefaults};
///
/// let mut tree = GroupTree::new(Group::new("Root"));
/// let id = tree.add_group(tree.root_id(), Group::new("Email")).unwrap();
///
/// let mut editor = GroupEditor::new(SettingsDefaults::default());
/// let mut session = editor.load(&tree, id, false).unwrap();
/// session.set_name("Mail");
/// session.save(&mut tree).unwrap();
/// assert_eq!(tree.get(id).unwrap().name, "Mail");
/// ```
pub struct GroupEditor {
    defaults: SettingsDefaults,
    pages: Vec<Box<dyn EditGroupPage>>,
}

impl GroupEditor {
    /// Creates an editor with no extra pages.
    #[must_use]
    pub fn new(defaults: SettingsDefaults) -> Self {
        Self {
            defaults,
            pages: Vec::new(),
        }
    }

    /// Registers an extra page. Pages are set and assigned in registration order.
    pub fn add_page(&mut self, page: Box<dyn EditGroupPage>) {
        self.pages.push(page);
    }

    /// Titles of all pages in display order. Extra pages sit between the
    /// icon page and the properties page.
    #[must_use]
    pub fn page_names(&self) -> Vec<&str> {
        let mut names = vec!["Group", "Icon"];
        names.extend(self.pages.iter().map(|page| page.name()));
        names.push(PropertiesPage::NAME);
        names
    }

    /// Root defaults used for inherited values.
    #[must_use]
    pub const fn defaults(&self) -> &SettingsDefaults {
        &self.defaults
    }

    /// Starts editing group `id`, which must already be in `tree`.
    ///
    /// `create` marks a group that was just added: the headline changes and
    /// the apply button is hidden so the user must save or discard.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if `id` is not in `tree`, or any resolver error
    /// raised while computing inherited values.
    pub fn load(&mut self, tree: &GroupTree, id: GroupId, create: bool) -> VaultResult<GroupEditSession<'_>> {
        let group = tree.get(id).ok_or(HierarchyError::GroupNotFound { id })?;
        let defaults = &self.defaults;

        let selectors = match group.parent {
            Some(parent) => TriStateSelectors::new(
                tree.resolve_searching_enabled(parent, defaults)?,
                tree.resolve_auto_type_enabled(parent, defaults)?,
                tree.resolve_default_expiration_period_enabled(parent, defaults)?,
            ),
            None => TriStateSelectors::new(
                defaults.searching,
                defaults.auto_type,
                defaults.default_expiration_period_enabled(),
            ),
        };
        let form = GroupForm::from_group(group, tree.effective_auto_type_sequence(id, defaults)?);

        let temporary = group.clone();
        for page in &mut self.pages {
            page.set(&temporary);
        }

        let mut session = GroupEditSession {
            editor: self,
            group_id: id,
            temporary,
            form,
            selectors,
            period_controls: PeriodControls {
                enabled: false,
                period: TimeDelta::default(),
            },
            create,
            modified: false,
            finished: false,
        };
        let index = session.form.expiration_period_index;
        session.update_period_controls(tree, index)?;

        debug!(group = %id, create, "loaded group for editing");
        Ok(session)
    }
}

/// An open edit of one group.
///
/// All edits go to a temporary copy. The live group in the tree changes only
/// on [`apply`](Self::apply), [`save`](Self::save), or a confirmed save
/// during [`cancel`](Self::cancel).
pub struct GroupEditSession<'e> {
    editor: &'e mut GroupEditor,
    group_id: GroupId,
    temporary: Group,
    form: GroupForm,
    selectors: TriStateSelectors,
    period_controls: PeriodControls,
    create: bool,
    modified: bool,
    finished: bool,
}

impl GroupEditSession<'_> {
    /// ID of the group being edited.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Title shown above the editor.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        if self.create {
            "Add group"
        } else {
            "Edit group"
        }
    }

    /// New groups must be saved or discarded, so they get no apply button.
    #[must_use]
    pub const fn show_apply_button(&self) -> bool {
        !self.create
    }

    /// Returns true if there are unapplied edits.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns true once saved or cancelled.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &GroupForm {
        &self.form
    }

    /// Rows of the tri-state selectors.
    #[must_use]
    pub const fn selectors(&self) -> &TriStateSelectors {
        &self.selectors
    }

    /// Current state of the expiration-period controls.
    #[must_use]
    pub const fn period_controls(&self) -> PeriodControls {
        self.period_controls
    }

    /// The temporary copy being edited.
    #[must_use]
    pub const fn temporary(&self) -> &Group {
        &self.temporary
    }

    /// Sets the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
        self.modified = true;
    }

    /// Sets the notes field.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.form.notes = notes.into();
        self.modified = true;
    }

    /// Checks or unchecks the expiry box.
    pub fn set_expires(&mut self, expires: bool) {
        self.form.expires = expires;
        self.modified = true;
    }

    /// Sets the expiry time field.
    pub fn set_expiry_time(&mut self, expiry_time: DateTime<Utc>) {
        self.form.expiry_time = expiry_time;
        self.modified = true;
    }

    /// Sets the period spin boxes, e.g. from a preset.
    pub fn set_expiration_period(&mut self, period: TimeDelta) {
        self.form.set_period(period);
        self.period_controls.period = period;
        self.modified = true;
    }

    /// Selects a row of the expiration-period selector and updates the controls.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` for an index above 2, leaving the form unchanged.
    /// A negative index (nothing selected) disables the controls.
    pub fn select_expiration_period(&mut self, tree: &GroupTree, index: i32) -> VaultResult<PeriodControls> {
        let controls = self.update_period_controls(tree, index)?;
        self.form.expiration_period_index = index;
        self.modified = true;
        Ok(controls)
    }

    /// Records the searching selector row. Validated on apply.
    pub fn select_searching(&mut self, index: i32) {
        self.form.searching_index = index;
        self.modified = true;
    }

    /// Records the auto-type selector row. Validated on apply.
    pub fn select_auto_type(&mut self, index: i32) {
        self.form.auto_type_index = index;
        self.modified = true;
    }

    /// Switches between the inherited and a custom auto-type sequence.
    pub fn set_auto_type_sequence_mode(&mut self, mode: AutoTypeSequenceMode) {
        self.form.auto_type_sequence_mode = mode;
        self.modified = true;
    }

    /// Sets the custom auto-type sequence field.
    pub fn set_auto_type_sequence(&mut self, sequence: impl Into<String>) {
        self.form.auto_type_sequence = sequence.into();
        self.modified = true;
    }

    /// Picks an icon and where to propagate it.
    pub fn select_icon(&mut self, selection: IconSelection) {
        self.form.icon = selection;
        self.modified = true;
    }

    /// Properties page of the temporary copy, including pending custom data edits.
    #[must_use]
    pub fn properties(&self) -> PropertiesPage {
        PropertiesPage::from_group(&self.temporary)
    }

    /// Sets custom data on the temporary copy.
    pub fn set_custom_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.temporary.set_custom_data(key, value);
        self.modified = true;
    }

    /// Removes a custom data key from the temporary copy. Returns true and
    /// marks the session modified if the key was present.
    pub fn remove_custom_data(&mut self, key: &str) -> bool {
        let removed = self.temporary.remove_custom_data(key).is_some();
        if removed {
            self.modified = true;
        }
        removed
    }

    fn update_period_controls(&mut self, tree: &GroupTree, index: i32) -> VaultResult<PeriodControls> {
        let state = if index < 0 {
            TriState::Disable
        } else {
            tri_state_from_index(index)?
        };

        let controls = match state {
            TriState::Enable => PeriodControls {
                enabled: true,
                period: self.form.period(),
            },
            TriState::Inherit => {
                let defaults = &self.editor.defaults;
                let inherited = defaults
                    .resolver()
                    .resolve_inherited(
                        tree,
                        self.group_id,
                        &DefaultExpirationPeriod,
                        defaults.default_expiration_period,
                    )?
                    .unwrap_or_default();
                self.form.set_period(inherited);
                PeriodControls {
                    enabled: false,
                    period: inherited,
                }
            }
            TriState::Disable => PeriodControls {
                enabled: false,
                period: self.form.period(),
            },
        };
        self.period_controls = controls;
        Ok(controls)
    }

    fn ensure_open(&self) -> Result<(), ValidationError> {
        if self.finished {
            return Err(ValidationError::SessionFinished);
        }
        Ok(())
    }

    /// Writes the form into the live group.
    ///
    /// Every selector index is validated before anything is written, so a
    /// failed apply leaves both the temporary copy and the live group as they were.
    ///
    /// # Errors
    ///
    /// - `SessionFinished`: the session was already saved or cancelled
    /// - `InvalidIndex`: a selector holds an index outside 0..=2
    /// - `EmptyGroupName`: the name is blank
    /// - `GroupNotFound`: the group was removed from the tree meanwhile
    pub fn apply(&mut self, tree: &mut GroupTree) -> VaultResult<()> {
        self.ensure_open()?;
        let id = self.group_id;

        let period_state = tri_state_from_index(self.form.expiration_period_index)?;
        let searching = tri_state_from_index(self.form.searching_index)?;
        let auto_type = tri_state_from_index(self.form.auto_type_index)?;
        if self.form.name.trim().is_empty() {
            return Err(ValidationError::EmptyGroupName.into());
        }
        if !tree.contains(id) {
            return Err(HierarchyError::GroupNotFound { id }.into());
        }

        let form = &self.form;
        let group = &mut self.temporary;
        group.set_name(form.name.clone());
        group.set_notes(form.notes.clone());
        group.set_expires(form.expires);
        group.set_expiry_time(form.expiry_time);
        group.set_default_expiration_period_enabled(period_state);
        if period_state.is_enable() {
            group.set_default_expiration_period(form.period());
        }
        group.set_searching_enabled(searching);
        group.set_auto_type_enabled(auto_type);
        match form.auto_type_sequence_mode {
            AutoTypeSequenceMode::Inherit => group.set_default_auto_type_sequence(String::new()),
            AutoTypeSequenceMode::Custom => group.set_default_auto_type_sequence(form.auto_type_sequence.clone()),
        }
        group.set_icon(form.icon.icon.unwrap_or_default());

        for page in &mut self.editor.pages {
            page.assign(&mut self.temporary);
        }

        let temporary = &self.temporary;
        tree.update(id, |live| live.copy_data_from(temporary))?;

        let apply_to = self.form.icon.apply_to;
        if apply_to.includes_groups() {
            tree.apply_group_icon_to_child_groups(id)?;
        }
        if apply_to.includes_entries() {
            tree.apply_group_icon_to_child_entries(id)?;
        }

        self.modified = false;
        info!(group = %id, "applied group edits");
        Ok(())
    }

    /// Applies the form and ends the session.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply); the session stays open on error.
    pub fn save(&mut self, tree: &mut GroupTree) -> VaultResult<EditOutcome> {
        self.apply(tree)?;
        Ok(self.finish(true))
    }

    /// Ends the session without saving, asking `confirm` first if there are
    /// unsaved changes.
    ///
    /// A live group whose custom icon is no longer registered is reset to the
    /// default icon before anything else.
    ///
    /// # Errors
    ///
    /// `SessionFinished`, or any error from [`apply`](Self::apply) when the
    /// user chooses to save.
    pub fn cancel(&mut self, tree: &mut GroupTree, confirm: &mut dyn ConfirmUnsaved) -> VaultResult<EditOutcome> {
        self.ensure_open()?;
        let id = self.group_id;

        let dangling = tree
            .get(id)
            .is_some_and(|group| !tree.icon_is_available(group.icon));
        if dangling {
            tree.update(id, |group| group.set_icon(IconRef::default()))?;
        }

        if self.modified {
            match confirm.confirm(&self.form.name) {
                CloseDecision::Cancel => return Ok(EditOutcome::Open),
                CloseDecision::Save => self.apply(tree)?,
                CloseDecision::Discard => {}
            }
        }

        Ok(self.finish(false))
    }

    fn finish(&mut self, accepted: bool) -> EditOutcome {
        self.finished = true;
        self.modified = false;
        info!(group = %self.group_id, accepted, "group edit finished");
        EditOutcome::Finished { accepted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_child() -> (GroupTree, GroupId) {
        let mut tree = GroupTree::new(Group::new("Root"));
        let id = tree.add_group(tree.root_id(), Group::new("Child")).unwrap();
        (tree, id)
    }

    #[test]
    fn test_load_fresh_session() {
        let (tree, id) = tree_with_child();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        let session = editor.load(&tree, id, true).unwrap();

        assert_eq!(session.headline(), "Add group");
        assert!(!session.show_apply_button());
        assert!(!session.is_modified());
        assert_eq!(session.form().name, "Child");
        assert!(!session.period_controls().enabled);
    }

    #[test]
    fn test_load_missing_group() {
        let (tree, _) = tree_with_child();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        assert!(editor.load(&tree, GroupId::new(), false).is_err());
    }

    #[test]
    fn test_edits_mark_modified() {
        let (tree, id) = tree_with_child();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        let mut session = editor.load(&tree, id, false).unwrap();
        assert_eq!(session.headline(), "Edit group");

        session.select_auto_type(2);
        assert!(session.is_modified());
    }

    #[test]
    fn test_invalid_period_selection_keeps_form() {
        let (tree, id) = tree_with_child();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        let mut session = editor.load(&tree, id, false).unwrap();

        assert!(session.select_expiration_period(&tree, 3).is_err());
        assert_eq!(session.form().expiration_period_index, 0);
        assert!(!session.is_modified());

        let controls = session.select_expiration_period(&tree, -1).unwrap();
        assert!(!controls.enabled);
    }

    #[test]
    fn test_operations_after_finish_fail() {
        let (mut tree, id) = tree_with_child();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        let mut session = editor.load(&tree, id, false).unwrap();

        let outcome = session.cancel(&mut tree, &mut |_: &str| CloseDecision::Discard).unwrap();
        assert_eq!(outcome, EditOutcome::Finished { accepted: false });
        assert!(session.is_finished());
        assert!(session.apply(&mut tree).is_err());
    }

    #[test]
    fn test_page_names() {
        let editor = GroupEditor::new(SettingsDefaults::default());
        assert_eq!(editor.page_names(), vec!["Group", "Icon", "Properties"]);
    }

    #[test]
    fn test_remove_custom_data_marks_modified() {
        let (mut tree, id) = tree_with_child();
        tree.update(id, |g| g.set_custom_data("k", "v")).unwrap();
        let mut editor = GroupEditor::new(SettingsDefaults::default());
        let mut session = editor.load(&tree, id, false).unwrap();

        assert!(!session.remove_custom_data("missing"));
        assert!(!session.is_modified());
        assert!(session.remove_custom_data("k"));
        assert!(session.is_modified());
        assert!(session.properties().custom_data().is_empty());
        assert!(tree.get(id).unwrap().custom_data.contains_key("k"));

        session.save(&mut tree).unwrap();
        assert!(!tree.get(id).unwrap().custom_data.contains_key("k"));
    }
}
