//! Inheritable settings of a [`Group`].

use crate::group::Group;
use crate::resolver::InheritableSetting;
use crate::time_delta::TimeDelta;
use crate::tristate::TriState;

/// Auto-type sequence used when no group in the chain sets one.
pub const DEFAULT_AUTO_TYPE_SEQUENCE: &str = "{USERNAME}{TAB}{PASSWORD}{ENTER}";

/// Whether entries of a group show up in searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Searching;

impl InheritableSetting<Group> for Searching {
    type Value = bool;

    fn name(&self) -> &'static str {
        "searching"
    }

    fn local_state(&self, group: &Group) -> TriState {
        group.searching_enabled
    }

    fn enabled_value(&self, _group: &Group) -> bool {
        true
    }

    fn disabled_value(&self, _group: &Group) -> bool {
        false
    }
}

/// Whether entries of a group take part in auto-type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoType;

impl InheritableSetting<Group> for AutoType {
    type Value = bool;

    fn name(&self) -> &'static str {
        "auto_type"
    }

    fn local_state(&self, group: &Group) -> TriState {
        group.auto_type_enabled
    }

    fn enabled_value(&self, _group: &Group) -> bool {
        true
    }

    fn disabled_value(&self, _group: &Group) -> bool {
        false
    }
}

/// Whether new entries get a default expiration period.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExpirationPeriodEnabled;

impl InheritableSetting<Group> for DefaultExpirationPeriodEnabled {
    type Value = bool;

    fn name(&self) -> &'static str {
        "default_expiration_period_enabled"
    }

    fn local_state(&self, group: &Group) -> TriState {
        group.default_expiration_period_enabled
    }

    fn enabled_value(&self, _group: &Group) -> bool {
        true
    }

    fn disabled_value(&self, _group: &Group) -> bool {
        false
    }
}

/// The default expiration period itself.
///
/// `Enable` yields the period stored on the group that enables it, so a
/// child inherits its nearest enabling ancestor's period.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExpirationPeriod;

impl InheritableSetting<Group> for DefaultExpirationPeriod {
    type Value = Option<TimeDelta>;

    fn name(&self) -> &'static str {
        "default_expiration_period"
    }

    fn local_state(&self, group: &Group) -> TriState {
        group.default_expiration_period_enabled
    }

    fn enabled_value(&self, group: &Group) -> Option<TimeDelta> {
        Some(group.default_expiration_period)
    }

    fn disabled_value(&self, _group: &Group) -> Option<TimeDelta> {
        None
    }
}

/// The default auto-type sequence. An empty local sequence inherits.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTypeSequence;

impl InheritableSetting<Group> for AutoTypeSequence {
    type Value = String;

    fn name(&self) -> &'static str {
        "auto_type_sequence"
    }

    fn local_state(&self, group: &Group) -> TriState {
        if group.default_auto_type_sequence.is_empty() {
            TriState::Inherit
        } else {
            TriState::Enable
        }
    }

    fn enabled_value(&self, group: &Group) -> String {
        group.default_auto_type_sequence.clone()
    }

    // Never reached: a sequence is either empty (inherit) or set.
    fn disabled_value(&self, _group: &Group) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_settings_read_their_own_field() {
        let mut group = Group::new("g");
        group.set_searching_enabled(TriState::Enable);
        group.set_auto_type_enabled(TriState::Disable);

        assert_eq!(Searching.local_state(&group), TriState::Enable);
        assert_eq!(AutoType.local_state(&group), TriState::Disable);
        assert_eq!(DefaultExpirationPeriodEnabled.local_state(&group), TriState::Inherit);
    }

    #[test]
    fn test_expiration_period_value() {
        let mut group = Group::new("g");
        group.set_default_expiration_period(TimeDelta::from_days(30));
        assert_eq!(
            DefaultExpirationPeriod.enabled_value(&group),
            Some(TimeDelta::from_days(30))
        );
        assert_eq!(DefaultExpirationPeriod.disabled_value(&group), None);
    }

    #[test]
    fn test_auto_type_sequence_state() {
        let mut group = Group::new("g");
        assert_eq!(AutoTypeSequence.local_state(&group), TriState::Inherit);
        group.set_default_auto_type_sequence("{PASSWORD}{ENTER}");
        assert_eq!(AutoTypeSequence.local_state(&group), TriState::Enable);
        assert_eq!(AutoTypeSequence.enabled_value(&group), "{PASSWORD}{ENTER}");
    }
}
