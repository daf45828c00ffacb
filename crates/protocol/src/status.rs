//! Point-in-time snapshot of the coordinator.

use serde::{Deserialize, Serialize};

use crate::display::OverlayState;
use crate::session::SessionState;

/// Observable coordinator state, as reported by a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerStatus {
	pub session: SessionState,
	pub overlay: OverlayState,
	pub token_present: bool,
	pub token_request_pending: bool,
	pub resources_prepared: bool,
	/// A configuration-change pause is scheduled and has not fired yet.
	pub delayed_pause_pending: bool,
	pub torn_down: bool,
}
