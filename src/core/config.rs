//! Session configuration.
//!
//! Sessions are configured at construction by a `SessionConfig`. The collaborator
//! layer may build one in code or load it from a JSON document.

use serde::{Deserialize, Serialize};

use super::error::CodecError;

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cache legality answers until the history changes.
    pub memoize: bool,

    /// When loading a saved game, check that every recorded player move was
    /// legal at its point in the history and that every continuation or skip
    /// was owed there, not just that it replays.
    pub validate_history: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            validate_history: true,
        }
    }
}

impl SessionConfig {
    /// Enable or disable legality memoization.
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Enable or disable legality checks on load.
    #[must_use]
    pub fn with_validate_history(mut self, validate: bool) -> Self {
        self.validate_history = validate;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// ```
    /// use tabletop_rules::core::SessionConfig;
    ///
    /// let config = SessionConfig::from_json(r#"{ "memoize": false }"#).unwrap();
    /// assert!(!config.memoize);
    /// assert!(config.validate_history);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}
