//! Session state machine and the idempotent pause/stop protocol.
//!
//! Every transition is attempted, never forced: a call made from the wrong
//! state returns `false` and touches nothing, which is what lets the
//! power-off handler and the delayed configuration-change pause race freely.

use std::sync::Arc;

use runner_protocol::{PauseReason, SessionState};
use tracing::{debug, info, warn};

use crate::collaborators::AutomationEngine;

/// Owns the [`SessionState`] of one automation session.
pub struct SessionController {
	engine: Arc<dyn AutomationEngine>,
	state: SessionState,
}

impl SessionController {
	pub fn new(engine: Arc<dyn AutomationEngine>) -> Self {
		Self {
			engine,
			state: SessionState::Idle,
		}
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	/// Idle → Running. Returns `false` from any other state or if the engine fails to start.
	pub fn start(&mut self) -> bool {
		if self.state != SessionState::Idle {
			debug!(target = "runner.session", state = %self.state, "start rejected");
			return false;
		}

		if let Err(err) = self.engine.start() {
			warn!(target = "runner.session", error = %err, "engine failed to start");
			return false;
		}

		self.state = SessionState::Running;
		info!(target = "runner.session", "session started");
		true
	}

	/// Running → Paused. Returns `true` only if this call performed the transition.
	pub fn pause(&mut self, reason: PauseReason) -> bool {
		if self.state != SessionState::Running {
			debug!(target = "runner.session", state = %self.state, %reason, "pause rejected");
			return false;
		}

		if !self.engine.pause() {
			debug!(target = "runner.session", %reason, "engine declined pause");
			return false;
		}

		self.state = SessionState::Paused;
		info!(target = "runner.session", %reason, "session paused");
		true
	}

	/// Paused → Running, closing the current pause episode.
	pub fn resume(&mut self) -> bool {
		if self.state != SessionState::Paused {
			debug!(target = "runner.session", state = %self.state, "resume rejected");
			return false;
		}

		if !self.engine.resume() {
			debug!(target = "runner.session", "engine declined resume");
			return false;
		}

		self.state = SessionState::Running;
		info!(target = "runner.session", "session resumed");
		true
	}

	/// Any state → Stopped. Returns `false` if already stopped.
	///
	/// The engine is only stopped if it was started; an engine failure is
	/// logged and the session is still considered stopped.
	pub fn stop(&mut self) -> bool {
		match self.state {
			SessionState::Stopped => return false,
			SessionState::Running | SessionState::Paused => {
				if let Err(err) = self.engine.stop() {
					warn!(target = "runner.session", error = %err, "engine failed to stop cleanly");
				}
			}
			SessionState::Idle => {}
		}

		info!(target = "runner.session", from = %self.state, "session stopped");
		self.state = SessionState::Stopped;
		true
	}
}
