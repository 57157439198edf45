//! Form state of the group editor.

use chrono::{DateTime, Utc};

use crate::group::{ApplyIconTo, Group, IconRef};
use crate::selector::{index_from_tri_state, tri_state_items, SelectorItem, TRI_STATE_ROWS};
use crate::time_delta::TimeDelta;

/// Whether the group uses its own auto-type sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoTypeSequenceMode {
    /// Use the parent's sequence; the group stores an empty sequence.
    #[default]
    Inherit,

    /// Use the sequence typed into the form.
    Custom,
}

/// Icon picked in the editor and where to propagate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconSelection {
    /// `None` means no icon picked; the group gets the default icon.
    pub icon: Option<IconRef>,
    /// Where the icon is copied on apply.
    pub apply_to: ApplyIconTo,
}

/// Field values of the group editor.
///
/// Selector fields hold the raw row index reported by the selector. They are
/// validated when the form is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupForm {
    /// Group name.
    pub name: String,
    /// Notes.
    pub notes: String,
    /// Whether the expiry time is in effect.
    pub expires: bool,
    /// Expiry time.
    pub expiry_time: DateTime<Utc>,
    /// Row of the expiration-period selector.
    pub expiration_period_index: i32,
    /// Years spin box.
    pub period_years: u32,
    /// Months spin box.
    pub period_months: u32,
    /// Days spin box.
    pub period_days: u32,
    /// Row of the searching selector.
    pub searching_index: i32,
    /// Row of the auto-type selector.
    pub auto_type_index: i32,
    /// Inherited or custom auto-type sequence.
    pub auto_type_sequence_mode: AutoTypeSequenceMode,

    /// Shown even in inherit mode, prefilled with the effective sequence.
    pub auto_type_sequence: String,
    /// Icon page state.
    pub icon: IconSelection,
}

impl GroupForm {
    /// Fills the form from `group`.
    #[must_use]
    pub fn from_group(group: &Group, effective_sequence: String) -> Self {
        let mode = if group.default_auto_type_sequence.is_empty() {
            AutoTypeSequenceMode::Inherit
        } else {
            AutoTypeSequenceMode::Custom
        };
        let period = group.default_expiration_period;
        Self {
            name: group.name.clone(),
            notes: group.notes.clone(),
            expires: group.time_info.expires,
            expiry_time: group.time_info.expiry_time,
            expiration_period_index: i32::from(index_from_tri_state(group.default_expiration_period_enabled)),
            period_years: period.years,
            period_months: period.months,
            period_days: period.days,
            searching_index: i32::from(index_from_tri_state(group.searching_enabled)),
            auto_type_index: i32::from(index_from_tri_state(group.auto_type_enabled)),
            auto_type_sequence_mode: mode,
            auto_type_sequence: effective_sequence,
            icon: IconSelection {
                icon: Some(group.icon),
                apply_to: ApplyIconTo::ThisOnly,
            },
        }
    }

    /// Period currently entered in the spin boxes.
    #[must_use]
    pub const fn period(&self) -> TimeDelta {
        TimeDelta::new(self.period_days, self.period_months, self.period_years)
    }

    pub(crate) fn set_period(&mut self, period: TimeDelta) {
        self.period_years = period.years;
        self.period_months = period.months;
        self.period_days = period.days;
    }
}

/// State of the expiration-period spin boxes and preset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodControls {
    /// Whether the period can be edited.
    pub enabled: bool,

    /// Period shown in the controls.
    pub period: TimeDelta,
}

/// Rows of the three tri-state selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriStateSelectors {
    /// Searching selector.
    pub searching: [SelectorItem; TRI_STATE_ROWS],
    /// Auto-type selector.
    pub auto_type: [SelectorItem; TRI_STATE_ROWS],
    /// Default expiration selector.
    pub expiration_period: [SelectorItem; TRI_STATE_ROWS],
}

impl TriStateSelectors {
    /// Builds the selectors from the values a group would inherit.
    #[must_use]
    pub fn new(searching: bool, auto_type: bool, expiration_period: bool) -> Self {
        Self {
            searching: tri_state_items(searching),
            auto_type: tri_state_items(auto_type),
            expiration_period: tri_state_items(expiration_period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tristate::TriState;

    #[test]
    fn test_form_from_group() {
        let mut group = Group::new("Work");
        group.set_notes("vpn");
        group.set_searching_enabled(TriState::Disable);
        group.set_default_expiration_period_enabled(TriState::Enable);
        group.set_default_expiration_period(TimeDelta::new(1, 2, 3));

        let form = GroupForm::from_group(&group, "{PASSWORD}".to_string());
        assert_eq!(form.name, "Work");
        assert_eq!(form.notes, "vpn");
        assert_eq!(form.searching_index, 2);
        assert_eq!(form.auto_type_index, 0);
        assert_eq!(form.expiration_period_index, 1);
        assert_eq!(form.period(), TimeDelta::new(1, 2, 3));
        assert_eq!(form.auto_type_sequence_mode, AutoTypeSequenceMode::Inherit);
        assert_eq!(form.auto_type_sequence, "{PASSWORD}");
        assert_eq!(form.icon.icon, Some(IconRef::default()));
    }

    #[test]
    fn test_custom_sequence_mode() {
        let mut group = Group::new("Work");
        group.set_default_auto_type_sequence("{USERNAME}{ENTER}");
        let form = GroupForm::from_group(&group, "{USERNAME}{ENTER}".to_string());
        assert_eq!(form.auto_type_sequence_mode, AutoTypeSequenceMode::Custom);
    }

    #[test]
    fn test_selectors_label_inherited_values() {
        let selectors = TriStateSelectors::new(true, false, false);
        assert!(selectors.searching[0].label.ends_with("(Enable)"));
        assert!(selectors.auto_type[0].label.ends_with("(Disable)"));
        assert!(selectors.expiration_period[0].label.ends_with("(Disable)"));
    }
}
