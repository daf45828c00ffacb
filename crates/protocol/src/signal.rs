//! Inbound signals delivered by the host driver.
//!
//! Each signal is encoded as one JSON object per line, tagged by `signal`:
//!
//! ```json
//! {"signal":"configuration_changed","metrics":{"width":1080,"height":1920}}
//! ```

use serde::{Deserialize, Serialize};

use crate::display::DisplayMetrics;
use crate::token::PermissionToken;

/// Host entry point invoked on the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
	/// The host service was created.
	Init,
	/// The host service is being destroyed.
	Teardown,
	/// The display was powered off.
	PowerOff,
	/// The display configuration changed.
	ConfigurationChanged { metrics: DisplayMetrics },
	/// A capture-permission token was granted.
	PermissionTokenReceived { token: PermissionToken },
	/// The user tapped pause on the overlay.
	Pause,
	/// The user tapped resume on the overlay.
	Resume,
}

impl Signal {
	/// Short stable name used in log fields.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Init => "init",
			Self::Teardown => "teardown",
			Self::PowerOff => "power_off",
			Self::ConfigurationChanged { .. } => "configuration_changed",
			Self::PermissionTokenReceived { .. } => "permission_token_received",
			Self::Pause => "pause",
			Self::Resume => "resume",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn configuration_signal_parses_from_json_line() {
		let line = r#"{"signal":"configuration_changed","metrics":{"width":1080,"height":1920}}"#;
		let signal: Signal = serde_json::from_str(line).unwrap();
		assert_eq!(
			signal,
			Signal::ConfigurationChanged {
				metrics: DisplayMetrics::new(1080, 1920)
			}
		);
		assert_eq!(signal.name(), "configuration_changed");
	}

	#[test]
	fn token_signal_carries_plain_string() {
		let signal: Signal = serde_json::from_str(r#"{"signal":"permission_token_received","token":"abc"}"#).unwrap();
		let Signal::PermissionTokenReceived { token } = signal else {
			panic!("expected token signal");
		};
		assert_eq!(token.as_str(), "abc");
	}

	#[test]
	fn unit_signals_serialize_with_tag_only() {
		assert_eq!(serde_json::to_string(&Signal::PowerOff).unwrap(), r#"{"signal":"power_off"}"#);
	}
}
