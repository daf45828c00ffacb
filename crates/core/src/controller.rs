//! Coordinator mapping host signals to session, overlay and token state.
//!
//! # Race avoidance
//!
//! A power-off and a configuration change caused by the same physical action
//! arrive almost together. Power-off pauses synchronously and shows a dialog.
//! Configuration change only schedules a pause after
//! [`RunnerConfig::config_change_pause_delay`]; if power-off won, the delayed
//! `pause()` is rejected by the session and nothing is shown. Correctness
//! rests on that rejection, not on mutual exclusion.
//!
//! # Teardown order
//!
//! 1. Cancel the delayed pause and any open dialog
//! 2. Stop the session
//! 3. Release capture resources, overlay and status notification
//! 4. Unregister signal sources and clear the token
//!
//! Every step runs even if an earlier one failed.

use std::sync::Arc;

use runner_protocol::{DisplayMetrics, PauseReason, PermissionToken, RunnerStatus, Signal};
use runner_runtime::{TaskGroup, TimerSlot};
use tokio::sync::mpsc::{self, WeakUnboundedSender};
use tracing::{debug, info, warn};

use crate::collaborators::Collaborators;
use crate::config::RunnerConfig;
use crate::event_loop::{RunnerEvent, SignalSink};
use crate::overlay::OverlayController;
use crate::session::SessionController;
use crate::token::{InitDecision, PermissionTokenGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
	Created,
	Initialized,
	TornDown,
}

/// Owns all coordinator state. Driven by the event loop in [`crate::spawn`].
pub struct RunnerController {
	collaborators: Collaborators,
	config: RunnerConfig,
	session: SessionController,
	overlay: OverlayController,
	gate: PermissionTokenGate,
	delayed_pause: TimerSlot,
	dialogs: TaskGroup,
	events: WeakUnboundedSender<RunnerEvent>,
	phase: Phase,
}

impl RunnerController {
	pub fn new(collaborators: Collaborators, config: RunnerConfig) -> Self {
		let session = SessionController::new(Arc::clone(&collaborators.engine));
		let overlay = OverlayController::new(Arc::clone(&collaborators.overlay));
		Self {
			collaborators,
			config,
			session,
			overlay,
			gate: PermissionTokenGate::new(),
			delayed_pause: TimerSlot::new(),
			dialogs: TaskGroup::new(),
			events: detached_sender(),
			phase: Phase::Created,
		}
	}

	/// Places a token granted before this controller existed.
	pub fn with_token(mut self, token: PermissionToken) -> Self {
		self.gate.seed(token);
		self
	}

	pub fn config(&self) -> &RunnerConfig {
		&self.config
	}

	/// Connects timers and signal sinks to the loop's queue.
	pub(crate) fn attach(&mut self, events: WeakUnboundedSender<RunnerEvent>) {
		self.events = events;
	}

	pub fn is_torn_down(&self) -> bool {
		self.phase == Phase::TornDown
	}

	pub fn status(&self) -> RunnerStatus {
		RunnerStatus {
			session: self.session.state(),
			overlay: self.overlay.state(),
			token_present: self.gate.token_present(),
			token_request_pending: self.gate.token_request_pending(),
			resources_prepared: self.gate.resources_prepared(),
			delayed_pause_pending: self.delayed_pause.is_pending(),
			torn_down: self.is_torn_down(),
		}
	}

	/// Dispatches a host signal to its entry point.
	pub fn handle_signal(&mut self, signal: Signal) {
		debug!(target = "runner.loop", signal = signal.name(), "signal received");
		match signal {
			Signal::Init => self.on_init(),
			Signal::Teardown => {
				self.on_teardown();
			}
			Signal::PowerOff => self.on_power_off(),
			Signal::ConfigurationChanged { metrics } => self.on_configuration_changed(metrics),
			Signal::PermissionTokenReceived { token } => self.on_permission_token_received(token),
			Signal::Pause => self.on_pause_requested(),
			Signal::Resume => self.on_resume_requested(),
		}
	}

	pub fn on_init(&mut self) {
		if self.phase != Phase::Created {
			debug!(target = "runner.loop", phase = ?self.phase, "init ignored");
			return;
		}
		self.phase = Phase::Initialized;
		info!(target = "runner.loop", "script runner initialized");

		if let Err(err) = self.collaborators.notification.show() {
			warn!(target = "runner.loop", error = %err, "failed to show status notification");
		}

		let sink = SignalSink::new(self.events.clone());
		for source in &self.collaborators.signal_sources {
			if let Err(err) = source.register(sink.clone()) {
				warn!(target = "runner.loop", source = source.name(), error = %err, "failed to register signal source");
			}
		}

		if !self.session.start() {
			warn!(target = "runner.loop", "session did not start; overlay and capture left untouched");
			self.collaborators.notifier.notify(&self.config.messages.engine_failed);
			return;
		}

		let wants_token = self.collaborators.preferences.wants_permission_token();
		match self.gate.on_init(wants_token, self.gate.token_present()) {
			InitDecision::AwaitToken => {}
			InitDecision::PrepareNow => {
				self.refresh_overlay(self.collaborators.display.current_metrics());
				self.prepare_capture();
			}
		}
	}

	pub fn on_power_off(&mut self) {
		if !self.accepts_signals() {
			return;
		}

		if self.session.pause(PauseReason::PowerOff) {
			let messages = &self.config.messages;
			self.collaborators.notifier.notify(&messages.screen_turned_off);

			let notifier = Arc::clone(&self.collaborators.notifier);
			let title = messages.script_paused.clone();
			let message = messages.screen_turned_off.clone();
			self.dialogs.spawn("power_off_dialog", async move {
				notifier.show_dialog(&title, &message).await;
			});
		}
	}

	pub fn on_configuration_changed(&mut self, metrics: DisplayMetrics) {
		if !self.accepts_signals() {
			return;
		}

		if self.refresh_overlay(metrics) {
			return;
		}

		let events = self.events.clone();
		let delay = self.config.config_change_pause_delay();
		let ticket = self.delayed_pause.schedule(delay, move |ticket| {
			if let Some(tx) = events.upgrade() {
				let _ = tx.send(RunnerEvent::DelayedPause { ticket });
			}
		});
		debug!(
			target = "runner.loop",
			ticket,
			delay_ms = delay.as_millis() as u64,
			"scheduled configuration-change pause"
		);
	}

	/// Runs the configuration-change pause scheduled under `ticket`.
	pub fn on_delayed_pause(&mut self, ticket: u64) {
		if !self.delayed_pause.take_if_current(ticket) {
			debug!(target = "runner.loop", ticket, "stale delayed pause dropped");
			return;
		}

		if self.session.pause(PauseReason::ConfigChange) {
			self.collaborators.notifier.toast(&self.config.messages.script_paused);
		}
	}

	pub fn on_permission_token_received(&mut self, token: PermissionToken) {
		match self.phase {
			Phase::Created => {
				debug!(target = "runner.token", "token arrived before init; stored for later");
				self.gate.seed(token);
			}
			Phase::TornDown => {
				debug!(target = "runner.token", "token after teardown ignored");
			}
			Phase::Initialized => {
				if self.gate.on_token_received(token) {
					self.prepare_capture();
				}
				self.refresh_overlay(self.collaborators.display.current_metrics());
			}
		}
	}

	pub fn on_pause_requested(&mut self) {
		if !self.accepts_signals() {
			return;
		}

		if self.session.pause(PauseReason::Manual) {
			self.collaborators.notifier.toast(&self.config.messages.script_paused);
		}
	}

	pub fn on_resume_requested(&mut self) {
		if !self.accepts_signals() {
			return;
		}

		self.session.resume();
	}

	/// Releases everything. Returns `false` if teardown already ran.
	pub fn on_teardown(&mut self) -> bool {
		if self.phase == Phase::TornDown {
			return false;
		}
		let was_initialized = self.phase == Phase::Initialized;
		self.phase = Phase::TornDown;
		info!(target = "runner.loop", "script runner tearing down");

		if self.delayed_pause.cancel() {
			debug!(target = "runner.loop", "cancelled pending configuration-change pause");
		}
		let dialogs = self.dialogs.cancel_all();
		if dialogs > 0 {
			debug!(target = "runner.loop", dialogs, "cancelled open dialogs");
		}

		self.session.stop();

		if self.gate.resources_prepared() {
			if let Err(err) = self.collaborators.capture.release() {
				warn!(target = "runner.loop", error = %err, "failed to release capture resources");
			}
		}
		self.overlay.hide();
		if was_initialized {
			if let Err(err) = self.collaborators.notification.hide() {
				warn!(target = "runner.loop", error = %err, "failed to hide status notification");
			}
			for source in &self.collaborators.signal_sources {
				if let Err(err) = source.unregister() {
					warn!(target = "runner.loop", source = source.name(), error = %err, "failed to unregister signal source");
				}
			}
		}
		self.gate.reset();

		true
	}

	fn accepts_signals(&self) -> bool {
		if self.phase == Phase::Initialized {
			return true;
		}
		debug!(target = "runner.loop", phase = ?self.phase, "signal ignored outside initialized phase");
		false
	}

	/// Applies overlay visibility for `metrics`. Returns the `should_show` verdict.
	fn refresh_overlay(&mut self, metrics: DisplayMetrics) -> bool {
		let mode = self.collaborators.preferences.game_area_mode();
		self.overlay.refresh(metrics, mode, self.gate.overlay_suppressed())
	}

	fn prepare_capture(&mut self) {
		match self.collaborators.capture.prepare() {
			Ok(()) => {
				self.gate.mark_prepared();
				info!(target = "runner.token", "capture resources prepared");
			}
			Err(err) => {
				warn!(target = "runner.token", error = %err, "failed to prepare capture resources");
				self.collaborators.notifier.notify(&self.config.messages.capture_failed);
			}
		}
	}
}

/// A sender whose channel is already closed; used until the loop attaches.
fn detached_sender() -> WeakUnboundedSender<RunnerEvent> {
	let (tx, _rx) = mpsc::unbounded_channel();
	tx.downgrade()
}
