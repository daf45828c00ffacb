//! JSON-line signal scripts.
//!
//! Each non-empty line is either a [`Signal`] or a driver-only wait step:
//!
//! ```text
//! {"signal":"init"}
//! {"signal":"configuration_changed","metrics":{"width":1080,"height":1920}}
//! {"signal":"wait","ms":1500}
//! ```
//!
//! Lines starting with `#` are comments.

use std::time::Duration;

use runner::Signal;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
	Signal(Signal),
	Wait(Duration),
}

#[derive(Deserialize)]
struct WaitStep {
	ms: u64,
}

/// Parses one script line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptStep>, serde_json::Error> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}

	let value: Value = serde_json::from_str(line)?;
	if value.get("signal").and_then(Value::as_str) == Some("wait") {
		let wait: WaitStep = serde_json::from_value(value)?;
		return Ok(Some(ScriptStep::Wait(Duration::from_millis(wait.ms))));
	}

	serde_json::from_value(value).map(|signal| Some(ScriptStep::Signal(signal)))
}
