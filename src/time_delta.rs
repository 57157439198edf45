//! Calendar offsets used for default expiration periods.

use std::fmt;

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};

/// A calendar offset of days, months and years.
///
/// Months and years are calendar units, so applying the same delta to
/// different start dates can yield different absolute durations.
///
/// # Examples
///
/// ```
/// use vaultgroup::TimeDelta;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// let end = TimeDelta::from_months(1).apply_to(start).unwrap();
/// assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeDelta {
    /// Whole days.
    pub days: u32,

    /// Whole months.
    pub months: u32,

    /// Whole years.
    pub years: u32,
}

impl TimeDelta {
    /// Creates a delta from its parts.
    #[must_use]
    pub const fn new(days: u32, months: u32, years: u32) -> Self {
        Self { days, months, years }
    }

    /// A delta of whole days.
    #[must_use]
    pub const fn from_days(days: u32) -> Self {
        Self::new(days, 0, 0)
    }

    /// A delta of whole months.
    #[must_use]
    pub const fn from_months(months: u32) -> Self {
        Self::new(0, months, 0)
    }

    /// A delta of whole years.
    #[must_use]
    pub const fn from_years(years: u32) -> Self {
        Self::new(0, 0, years)
    }

    /// Returns true if every part is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.months == 0 && self.years == 0
    }

    /// Adds this delta to `start`: years and months first, then days.
    ///
    /// Returns `None` if the result is out of range.
    #[must_use]
    pub fn apply_to(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        start
            .checked_add_months(Months::new(months))?
            .checked_add_days(Days::new(u64::from(self.days)))
    }
}

impl fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m {}d", self.years, self.months, self.days)
    }
}

/// One entry of the expiration-period preset menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationPreset {
    /// Display label, e.g. `3 months`.
    pub label: String,

    /// Offset selected by this preset.
    pub delta: TimeDelta,
}

impl ExpirationPreset {
    fn new(count: u32, unit: &str, delta: TimeDelta) -> Self {
        let plural = if count == 1 { "" } else { "s" };
        Self {
            label: format!("{count} {unit}{plural}"),
            delta,
        }
    }
}

/// The preset menu for default expiration periods, one `Vec` per section.
#[must_use]
pub fn expiration_presets() -> Vec<Vec<ExpirationPreset>> {
    vec![
        vec![ExpirationPreset::new(1, "day", TimeDelta::from_days(1))],
        [1, 2, 3]
            .into_iter()
            .map(|weeks| ExpirationPreset::new(weeks, "week", TimeDelta::from_days(weeks * 7)))
            .collect(),
        [1, 3, 6]
            .into_iter()
            .map(|months| ExpirationPreset::new(months, "month", TimeDelta::from_months(months)))
            .collect(),
        [1, 2, 3]
            .into_iter()
            .map(|years| ExpirationPreset::new(years, "year", TimeDelta::from_years(years)))
            .collect(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_constructors() {
        assert_eq!(TimeDelta::from_days(3), TimeDelta::new(3, 0, 0));
        assert_eq!(TimeDelta::from_months(2), TimeDelta::new(0, 2, 0));
        assert_eq!(TimeDelta::from_years(1), TimeDelta::new(0, 0, 1));
        assert!(TimeDelta::default().is_zero());
        assert!(!TimeDelta::from_days(1).is_zero());
    }

    #[test]
    fn test_apply_mixed_delta() {
        let start = Utc.with_ymd_and_hms(2023, 11, 20, 12, 0, 0).unwrap();
        let end = TimeDelta::new(15, 2, 1).apply_to(start).unwrap();
        // 2023-11-20 + 1y2m = 2025-01-20, + 15d = 2025-02-04
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 4, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_apply_overflow_is_none() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(TimeDelta::from_years(u32::MAX).apply_to(start).is_none());
    }

    #[test]
    fn test_presets_layout() {
        let sections = expiration_presets();
        let sizes: Vec<usize> = sections.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 3, 3, 3]);

        assert_eq!(sections[0][0].label, "1 day");
        assert_eq!(sections[1][1].label, "2 weeks");
        assert_eq!(sections[1][2].delta, TimeDelta::from_days(21));
        assert_eq!(sections[2][2].delta, TimeDelta::from_months(6));
        assert_eq!(sections[3][0].label, "1 year");
    }
}
