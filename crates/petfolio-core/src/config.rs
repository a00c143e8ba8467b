//! Tracker configuration.
//!
//! Resolved once when the shell starts and handed to the
//! [`Controller`](crate::controller::Controller); nothing reads configuration
//! while commands are being handled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::derived::DEFAULT_MATCH_THRESHOLD;
use crate::nav::Screen;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration of the tracker core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Root screen when no sign-in is required
    pub start_screen: Screen,
    /// Start on the (simulated) sign-in screen
    pub require_sign_in: bool,
    /// Days ahead of a follow-up date at which a pet shows as expiring
    pub expiring_window_days: i64,
    /// Minimum Jaro-Winkler similarity for fuzzy species matches
    pub species_match_threshold: f64,
    /// Prefix of session-local upload references
    pub reference_prefix: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            start_screen: Screen::Pets,
            require_sign_in: false,
            expiring_window_days: 30,
            species_match_threshold: DEFAULT_MATCH_THRESHOLD,
            reference_prefix: "blob:petfolio".into(),
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.species_match_threshold > 0.0 && self.species_match_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "species_match_threshold must be in (0, 1], got {}",
                self.species_match_threshold
            )));
        }

        if self.expiring_window_days < 0 {
            return Err(ConfigError::Invalid(
                "expiring_window_days cannot be negative".into(),
            ));
        }

        if self.reference_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reference_prefix cannot be empty".into(),
            ));
        }

        if self.start_screen.requires_pet() {
            return Err(ConfigError::Invalid(format!(
                "start_screen '{}' needs a selected pet",
                self.start_screen
            )));
        }

        Ok(())
    }

    /// Screen the navigation stack starts on.
    pub fn initial_screen(&self) -> Screen {
        if self.require_sign_in {
            Screen::SignIn
        } else {
            self.start_screen
        }
    }
}
