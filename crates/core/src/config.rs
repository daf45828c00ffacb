//! Coordinator configuration.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Default wait before a configuration change pauses the session.
///
/// On the hardware this was tuned for, power-off and configuration events
/// for the same physical action arrive within a few hundred milliseconds.
pub const DEFAULT_CONFIG_CHANGE_PAUSE_DELAY: Duration = Duration::from_secs(1);

/// Tunables and user-facing strings for a [`crate::RunnerController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunnerConfig {
	/// Milliseconds a configuration-change pause waits for a power-off to win.
	pub config_change_pause_delay_ms: u64,
	pub messages: Messages,
}

impl Default for RunnerConfig {
	fn default() -> Self {
		Self {
			config_change_pause_delay_ms: DEFAULT_CONFIG_CHANGE_PAUSE_DELAY.as_millis() as u64,
			messages: Messages::default(),
		}
	}
}

/// Reads a JSON config file into `T`, tagging failures with `path`.
///
/// `T` is either a bare [`RunnerConfig`] or a host document embedding one.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let content = std::fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;
	serde_json::from_str(&content).map_err(|source| RunnerError::ConfigParse {
		path: path.to_path_buf(),
		source,
	})
}

impl RunnerConfig {
	pub fn config_change_pause_delay(&self) -> Duration {
		Duration::from_millis(self.config_change_pause_delay_ms)
	}

	/// Overrides the configuration-change pause delay.
	pub fn with_pause_delay(mut self, delay: Duration) -> Self {
		self.config_change_pause_delay_ms = delay.as_millis() as u64;
		self
	}
}

/// Text shown to the user by the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
	pub script_paused: String,
	pub screen_turned_off: String,
	pub capture_failed: String,
	pub engine_failed: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			script_paused: "Script paused".to_string(),
			screen_turned_off: "Screen turned off".to_string(),
			capture_failed: "Could not prepare screen capture".to_string(),
			engine_failed: "Could not start the script".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::NamedTempFile;

	use super::*;

	#[test]
	fn default_delay_is_one_second() {
		let config = RunnerConfig::default();
		assert_eq!(config.config_change_pause_delay(), Duration::from_secs(1));
		assert_eq!(config.messages.script_paused, "Script paused");
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config: RunnerConfig = serde_json::from_str(r#"{"configChangePauseDelayMs": 250}"#).unwrap();
		assert_eq!(config.config_change_pause_delay(), Duration::from_millis(250));
		assert_eq!(config.messages, Messages::default());
	}

	#[test]
	fn load_reads_partial_file() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(br#"{"messages": {"scriptPaused": "Paused"}}"#).unwrap();

		let config: RunnerConfig = load_json(file.path()).unwrap();
		assert_eq!(config.messages.script_paused, "Paused");
		assert_eq!(config.config_change_pause_delay(), DEFAULT_CONFIG_CHANGE_PAUSE_DELAY);
	}

	#[test]
	fn load_reports_path_on_parse_failure() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(b"{ not json").unwrap();

		let err = load_json::<RunnerConfig>(file.path()).unwrap_err();
		assert!(matches!(err, RunnerError::ConfigParse { .. }));
		assert!(err.to_string().contains(&file.path().display().to_string()));
	}

	#[test]
	fn load_missing_file_is_read_error() {
		let err = load_json::<RunnerConfig>(Path::new("/nonexistent/runner.json")).unwrap_err();
		assert!(matches!(err, RunnerError::ConfigRead { .. }));
	}

	#[test]
	fn with_pause_delay_overrides() {
		let config = RunnerConfig::default().with_pause_delay(Duration::from_millis(40));
		assert_eq!(config.config_change_pause_delay_ms, 40);
	}
}
