//! Per-session editor settings.

use std::time::Duration;

use multicaret_primitives::ActionHistory;
use multicaret_primitives::history::{DEFAULT_CAPACITY, DEFAULT_GAP};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Result type for configuration parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings consumed by [`EditSession`](crate::session::EditSession).
///
/// Every field is optional in TOML; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	/// Maximum number of actions kept for repeat detection.
	pub history_capacity: usize,
	/// Pause, in milliseconds, after which the action history starts over.
	pub repeat_gap_ms: u64,
	/// Text inserted by the Tab action.
	pub tab: String,
	/// Rows moved by the page motions.
	pub page_rows: usize,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			history_capacity: DEFAULT_CAPACITY,
			repeat_gap_ms: DEFAULT_GAP.as_millis() as u64,
			tab: "    ".to_string(),
			page_rows: 30,
		}
	}
}

impl EditorConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the settings that have no meaningful zero value.
	pub fn validate(&self) -> Result<()> {
		if self.history_capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if self.page_rows == 0 {
			return Err(ConfigError::ZeroPageRows);
		}
		Ok(())
	}

	pub fn repeat_gap(&self) -> Duration {
		Duration::from_millis(self.repeat_gap_ms)
	}

	/// Builds an empty action history with these limits.
	pub fn history(&self) -> ActionHistory {
		ActionHistory::with_limits(self.history_capacity, self.repeat_gap())
	}
}
