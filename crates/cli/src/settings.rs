//! Host settings file consumed by the driver.
//!
//! ```json
//! {
//!   "runner": { "configChangePauseDelayMs": 1000 },
//!   "preferences": { "gameAreaMode": "duo", "wantsPermissionToken": true },
//!   "display": { "width": 1920, "height": 1080 },
//!   "token": null,
//!   "dialogMs": 0
//! }
//! ```

use std::path::{Path, PathBuf};

use runner::{DisplayMetrics, GameAreaMode, RunnerConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Everything the driver needs to stand in for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostSettings {
	pub runner: RunnerConfig,
	pub preferences: PreferenceSettings,
	/// Display geometry before the first configuration change.
	pub display: DisplayMetrics,
	/// Capture token granted before the coordinator starts.
	pub token: Option<String>,
	/// How long console dialogs stay open before auto-dismissal.
	pub dialog_ms: u64,
}

impl Default for HostSettings {
	fn default() -> Self {
		Self {
			runner: RunnerConfig::default(),
			preferences: PreferenceSettings::default(),
			display: DisplayMetrics::new(1920, 1080),
			token: None,
			dialog_ms: 0,
		}
	}
}

/// Stored user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceSettings {
	pub game_area_mode: GameAreaMode,
	pub wants_permission_token: bool,
}

impl HostSettings {
	pub fn load(path: &Path) -> Result<Self> {
		let settings = runner::load_json(path)?;
		debug!(target = "runner.cli", path = %path.display(), "loaded host settings");
		Ok(settings)
	}

	/// Loads `explicit` if given, else the default path if it exists, else defaults.
	pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}

		match default_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}
}

/// `<config dir>/runner/config.json`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("runner").join("config.json"))
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn empty_object_uses_defaults() {
		let settings: HostSettings = serde_json::from_str("{}").unwrap();
		assert_eq!(settings, HostSettings::default());
		assert_eq!(settings.display, DisplayMetrics::new(1920, 1080));
	}

	#[test]
	fn nested_sections_parse() {
		let settings: HostSettings = serde_json::from_str(
			r#"{
				"runner": { "configChangePauseDelayMs": 200 },
				"preferences": { "gameAreaMode": "duo", "wantsPermissionToken": true },
				"display": { "width": 1080, "height": 2400 },
				"token": "granted"
			}"#,
		)
		.unwrap();
		assert_eq!(settings.runner.config_change_pause_delay(), Duration::from_millis(200));
		assert_eq!(settings.preferences.game_area_mode, GameAreaMode::Duo);
		assert!(settings.preferences.wants_permission_token);
		assert_eq!(settings.token.as_deref(), Some("granted"));
	}

	#[test]
	fn explicit_missing_file_is_an_error() {
		assert!(HostSettings::resolve(Some(Path::new("/nonexistent/runner.json"))).is_err());
	}
}
