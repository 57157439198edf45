//! Presentation adapter between [`TriState`] and ordered selector rows.
//!
//! Selector positions are a UI concern. They are mapped here and nowhere else,
//! so reordering the rows never changes what a persisted [`TriState`] means.

use crate::error::ValidationError;
use crate::tristate::TriState;

/// Number of rows in a tri-state selector.
pub const TRI_STATE_ROWS: usize = 3;

/// Maps a state to its selector row: `Inherit → 0`, `Enable → 1`, `Disable → 2`.
///
/// # Examples
///
/// ```
/// use vaultgroup::{index_from_tri_state, TriState};
///
/// assert_eq!(index_from_tri_state(TriState::Enable), 1);
/// ```
#[must_use]
pub const fn index_from_tri_state(state: TriState) -> u8 {
    match state {
        TriState::Inherit => 0,
        TriState::Enable => 1,
        TriState::Disable => 2,
    }
}

/// Maps a selector row back to its state.
///
/// # Errors
///
/// Returns `ValidationError::InvalidIndex` for any index outside `0..=2`,
/// including the `-1` a selector reports when nothing is selected.
///
/// # Examples
///
/// ```
/// use vaultgroup::{tri_state_from_index, TriState};
///
/// assert_eq!(tri_state_from_index(2).unwrap(), TriState::Disable);
/// assert!(tri_state_from_index(3).is_err());
/// ```
pub fn tri_state_from_index(index: i32) -> Result<TriState, ValidationError> {
    match index {
        0 => Ok(TriState::Inherit),
        1 => Ok(TriState::Enable),
        2 => Ok(TriState::Disable),
        _ => Err(ValidationError::InvalidIndex { index }),
    }
}

/// One row of a tri-state selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorItem {
    /// State selected by this row.
    pub state: TriState,

    /// Display label.
    pub label: String,
}

/// Builds the three rows of a tri-state selector.
///
/// The inherit row names the value it would inherit, e.g.
/// `Inherit from parent group (Enable)`.
#[must_use]
pub fn tri_state_items(inherited: bool) -> [SelectorItem; TRI_STATE_ROWS] {
    let inherited_label = enabled_label(inherited);
    [
        SelectorItem {
            state: TriState::Inherit,
            label: format!("Inherit from parent group ({inherited_label})"),
        },
        SelectorItem {
            state: TriState::Enable,
            label: enabled_label(true).to_string(),
        },
        SelectorItem {
            state: TriState::Disable,
            label: enabled_label(false).to_string(),
        },
    ]
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enable"
    } else {
        "Disable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..3 {
            let state = tri_state_from_index(index).unwrap();
            assert_eq!(i32::from(index_from_tri_state(state)), index);
        }
        for state in TriState::ALL {
            let index = i32::from(index_from_tri_state(state));
            assert_eq!(tri_state_from_index(index).unwrap(), state);
        }
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        assert_eq!(
            tri_state_from_index(3),
            Err(ValidationError::InvalidIndex { index: 3 })
        );
        assert_eq!(
            tri_state_from_index(-1),
            Err(ValidationError::InvalidIndex { index: -1 })
        );
        assert!(tri_state_from_index(i32::MAX).is_err());
    }

    #[test]
    fn test_items_follow_index_mapping() {
        let items = tri_state_items(true);
        for (row, item) in items.iter().enumerate() {
            assert_eq!(usize::from(index_from_tri_state(item.state)), row);
        }
    }

    #[test]
    fn test_inherit_label_names_inherited_value() {
        let items = tri_state_items(true);
        assert_eq!(items[0].label, "Inherit from parent group (Enable)");
        assert_eq!(items[1].label, "Enable");
        assert_eq!(items[2].label, "Disable");

        let items = tri_state_items(false);
        assert_eq!(items[0].label, "Inherit from parent group (Disable)");
    }
}
