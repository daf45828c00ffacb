//! Session lifecycle states and pause reasons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an automation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
	/// No session has been started yet.
	#[default]
	Idle,
	/// The automation engine is executing.
	Running,
	/// The engine is suspended inside a pause episode.
	Paused,
	/// Terminal state; resources have been released.
	Stopped,
}

impl fmt::Display for SessionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Idle => "idle",
			Self::Running => "running",
			Self::Paused => "paused",
			Self::Stopped => "stopped",
		};
		f.write_str(name)
	}
}

/// Why a pause was attempted. Carried for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
	/// The display was powered off.
	PowerOff,
	/// The screen configuration (orientation) changed.
	ConfigChange,
	/// The user asked for a pause.
	Manual,
}

impl fmt::Display for PauseReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::PowerOff => "power_off",
			Self::ConfigChange => "config_change",
			Self::Manual => "manual",
		};
		f.write_str(name)
	}
}
