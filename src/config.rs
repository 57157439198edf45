//! Root defaults and resolver limits.
//!
//! Each inheritable setting has its own root default: the value a group gets
//! when it and every ancestor inherit.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VaultResult};
use crate::resolver::{Resolver, DEFAULT_MAX_DEPTH};
use crate::settings::DEFAULT_AUTO_TYPE_SEQUENCE;
use crate::time_delta::TimeDelta;

/// Per-setting root defaults and the resolver depth guard.
///
/// Missing fields in a config file fall back to [`SettingsDefaults::default`].
///
/// # Examples
///
/// ```
/// use vaultgroup::SettingsDefaults;
///
/// let defaults = SettingsDefaults::from_json_str(r#"{ "searching": false }"#).unwrap();
/// assert!(!defaults.searching);
/// assert!(defaults.auto_type);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDefaults {
    /// Searching at the root.
    pub searching: bool,

    /// Auto-type at the root.
    pub auto_type: bool,

    /// Default expiration period at the root.
    pub default_expiration_period: Option<TimeDelta>,

    /// Auto-type sequence at the root.
    pub auto_type_sequence: String,

    /// Maximum parent hops before a hierarchy is reported as cyclic.
    pub max_depth: usize,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            searching: true,
            auto_type: true,
            default_expiration_period: None,
            auto_type_sequence: DEFAULT_AUTO_TYPE_SEQUENCE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SettingsDefaults {
    /// Whether the default expiration period is enabled at the root.
    #[must_use]
    pub const fn default_expiration_period_enabled(&self) -> bool {
        self.default_expiration_period.is_some()
    }

    /// Resolver configured with this depth guard.
    #[must_use]
    pub const fn resolver(&self) -> Resolver {
        Resolver::new(self.max_depth)
    }

    /// Checks that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if `max_depth` is zero or the
    /// root auto-type sequence is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_depth == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        if self.auto_type_sequence.trim().is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "auto_type_sequence cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates defaults from JSON.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Config` on malformed JSON and
    /// `VaultError::Validation` on unusable values.
    pub fn from_json_str(json: &str) -> VaultResult<Self> {
        let defaults: Self = serde_json::from_str(json)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Loads and validates defaults from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Io` if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> VaultResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let defaults = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded settings defaults");
        Ok(defaults)
    }
}
