//! Recording fake collaborators for unit and integration testing.
//!
//! [`FakeHost`] implements every collaborator trait on one cloneable value
//! and appends each call to a shared log, so a test can assert on exactly
//! which side effects the coordinator produced and in what order.
//!
//! # Example
//!
//! ```ignore
//! let host = FakeHost::new();
//! let (handle, _join) = runner::spawn(RunnerController::new(host.collaborators(), RunnerConfig::default()));
//! handle.init()?;
//! handle.power_off()?;
//! handle.status().await?;
//! assert_eq!(host.count(&Call::EnginePause), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use runner_protocol::{DisplayMetrics, GameAreaMode, Signal};

use crate::collaborators::{
	AutomationEngine, CaptureResources, Collaborators, DisplayGeometry, Notifier, OverlayRenderer, Preferences, SignalSource, StatusNotification,
};
use crate::event_loop::SignalSink;

const SOURCE_NAME: &str = "fake.power";

/// A side effect observed by the fake host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	EngineStart,
	EnginePause,
	EngineResume,
	EngineStop,
	CapturePrepare,
	CaptureRelease,
	OverlayShow,
	OverlayHide,
	NotificationShow,
	NotificationHide,
	Notify(String),
	Toast(String),
	Dialog { title: String, message: String },
	DialogDismissed,
	Register(String),
	Unregister(String),
}

#[derive(Debug)]
struct FakeState {
	calls: Mutex<Vec<Call>>,
	metrics: Mutex<DisplayMetrics>,
	mode: Mutex<GameAreaMode>,
	sink: Mutex<Option<SignalSink>>,
	wants_token: AtomicBool,
	engine_declines: AtomicBool,
	fail_start: AtomicBool,
	fail_prepare: AtomicBool,
	fail_release: AtomicBool,
	fail_stop: AtomicBool,
	fail_overlay: AtomicBool,
	dialog_ms: AtomicU64,
}

/// In-memory host implementing every collaborator trait.
#[derive(Debug, Clone)]
pub struct FakeHost {
	state: Arc<FakeState>,
}

impl Default for FakeHost {
	fn default() -> Self {
		Self::new()
	}
}

impl FakeHost {
	/// Landscape 1920x1080 display, `Normal` mode, no token wanted.
	pub fn new() -> Self {
		Self {
			state: Arc::new(FakeState {
				calls: Mutex::new(Vec::new()),
				metrics: Mutex::new(DisplayMetrics::new(1920, 1080)),
				mode: Mutex::new(GameAreaMode::Normal),
				sink: Mutex::new(None),
				wants_token: AtomicBool::new(false),
				engine_declines: AtomicBool::new(false),
				fail_start: AtomicBool::new(false),
				fail_prepare: AtomicBool::new(false),
				fail_release: AtomicBool::new(false),
				fail_stop: AtomicBool::new(false),
				fail_overlay: AtomicBool::new(false),
				dialog_ms: AtomicU64::new(0),
			}),
		}
	}

	/// Builds a capability set where every collaborator is this host.
	pub fn collaborators(&self) -> Collaborators {
		Collaborators {
			engine: Arc::new(self.clone()),
			capture: Arc::new(self.clone()),
			overlay: Arc::new(self.clone()),
			notification: Arc::new(self.clone()),
			notifier: Arc::new(self.clone()),
			display: Arc::new(self.clone()),
			preferences: Arc::new(self.clone()),
			signal_sources: vec![Arc::new(self.clone())],
		}
	}

	pub fn set_metrics(&self, metrics: DisplayMetrics) {
		*self.state.metrics.lock() = metrics;
	}

	pub fn set_mode(&self, mode: GameAreaMode) {
		*self.state.mode.lock() = mode;
	}

	pub fn set_wants_token(&self, wants: bool) {
		self.state.wants_token.store(wants, Ordering::SeqCst);
	}

	/// Makes the engine refuse `pause()` and `resume()`.
	pub fn set_engine_declines(&self, declines: bool) {
		self.state.engine_declines.store(declines, Ordering::SeqCst);
	}

	pub fn fail_start(&self, fail: bool) {
		self.state.fail_start.store(fail, Ordering::SeqCst);
	}

	pub fn fail_prepare(&self, fail: bool) {
		self.state.fail_prepare.store(fail, Ordering::SeqCst);
	}

	pub fn fail_release(&self, fail: bool) {
		self.state.fail_release.store(fail, Ordering::SeqCst);
	}

	pub fn fail_stop(&self, fail: bool) {
		self.state.fail_stop.store(fail, Ordering::SeqCst);
	}

	/// Makes both overlay and status-notification rendering fail.
	pub fn fail_overlay(&self, fail: bool) {
		self.state.fail_overlay.store(fail, Ordering::SeqCst);
	}

	/// Keeps dialogs open for `duration` before recording their dismissal.
	pub fn set_dialog_duration(&self, duration: Duration) {
		self.state.dialog_ms.store(duration.as_millis() as u64, Ordering::SeqCst);
	}

	/// Returns a copy of the call log.
	pub fn calls(&self) -> Vec<Call> {
		self.state.calls.lock().clone()
	}

	pub fn clear_calls(&self) {
		self.state.calls.lock().clear();
	}

	/// Counts log entries equal to `call`.
	pub fn count(&self, call: &Call) -> usize {
		self.count_matching(|c| c == call)
	}

	pub fn count_matching(&self, predicate: impl Fn(&Call) -> bool) -> usize {
		self.state.calls.lock().iter().filter(|c| predicate(c)).count()
	}

	pub fn toasts(&self) -> usize {
		self.count_matching(|c| matches!(c, Call::Toast(_)))
	}

	pub fn notifications(&self) -> usize {
		self.count_matching(|c| matches!(c, Call::Notify(_)))
	}

	pub fn dialogs(&self) -> usize {
		self.count_matching(|c| matches!(c, Call::Dialog { .. }))
	}

	/// Position of the first log entry equal to `call`.
	pub fn position(&self, call: &Call) -> Option<usize> {
		self.state.calls.lock().iter().position(|c| c == call)
	}

	/// Pushes `signal` through the sink handed over at registration.
	///
	/// Returns `false` when not registered or the loop has gone away.
	pub fn emit(&self, signal: Signal) -> bool {
		match self.state.sink.lock().as_ref() {
			Some(sink) => sink.push(signal),
			None => false,
		}
	}

	pub fn is_registered(&self) -> bool {
		self.state.sink.lock().is_some()
	}

	fn record(&self, call: Call) {
		self.state.calls.lock().push(call);
	}

	fn flag(flag: &AtomicBool) -> bool {
		flag.load(Ordering::SeqCst)
	}
}

impl AutomationEngine for FakeHost {
	fn start(&self) -> anyhow::Result<()> {
		self.record(Call::EngineStart);
		if Self::flag(&self.state.fail_start) {
			return Err(anyhow!("engine failed to start"));
		}
		Ok(())
	}

	fn pause(&self) -> bool {
		self.record(Call::EnginePause);
		!Self::flag(&self.state.engine_declines)
	}

	fn resume(&self) -> bool {
		self.record(Call::EngineResume);
		!Self::flag(&self.state.engine_declines)
	}

	fn stop(&self) -> anyhow::Result<()> {
		self.record(Call::EngineStop);
		if Self::flag(&self.state.fail_stop) {
			return Err(anyhow!("engine failed to stop"));
		}
		Ok(())
	}
}

impl CaptureResources for FakeHost {
	fn prepare(&self) -> anyhow::Result<()> {
		self.record(Call::CapturePrepare);
		if Self::flag(&self.state.fail_prepare) {
			return Err(anyhow!("capture projection unavailable"));
		}
		Ok(())
	}

	fn release(&self) -> anyhow::Result<()> {
		self.record(Call::CaptureRelease);
		if Self::flag(&self.state.fail_release) {
			return Err(anyhow!("capture release failed"));
		}
		Ok(())
	}
}

impl OverlayRenderer for FakeHost {
	fn show(&self) -> anyhow::Result<()> {
		self.record(Call::OverlayShow);
		if Self::flag(&self.state.fail_overlay) {
			return Err(anyhow!("overlay window rejected"));
		}
		Ok(())
	}

	fn hide(&self) -> anyhow::Result<()> {
		self.record(Call::OverlayHide);
		if Self::flag(&self.state.fail_overlay) {
			return Err(anyhow!("overlay window rejected"));
		}
		Ok(())
	}
}

impl StatusNotification for FakeHost {
	fn show(&self) -> anyhow::Result<()> {
		self.record(Call::NotificationShow);
		if Self::flag(&self.state.fail_overlay) {
			return Err(anyhow!("notification channel rejected"));
		}
		Ok(())
	}

	fn hide(&self) -> anyhow::Result<()> {
		self.record(Call::NotificationHide);
		if Self::flag(&self.state.fail_overlay) {
			return Err(anyhow!("notification channel rejected"));
		}
		Ok(())
	}
}

#[async_trait]
impl Notifier for FakeHost {
	fn notify(&self, message: &str) {
		self.record(Call::Notify(message.to_string()));
	}

	fn toast(&self, message: &str) {
		self.record(Call::Toast(message.to_string()));
	}

	async fn show_dialog(&self, title: &str, message: &str) {
		self.record(Call::Dialog {
			title: title.to_string(),
			message: message.to_string(),
		});
		let hold = self.state.dialog_ms.load(Ordering::SeqCst);
		if hold > 0 {
			tokio::time::sleep(Duration::from_millis(hold)).await;
		}
		self.record(Call::DialogDismissed);
	}
}

impl DisplayGeometry for FakeHost {
	fn current_metrics(&self) -> DisplayMetrics {
		*self.state.metrics.lock()
	}
}

impl Preferences for FakeHost {
	fn game_area_mode(&self) -> GameAreaMode {
		*self.state.mode.lock()
	}

	fn wants_permission_token(&self) -> bool {
		Self::flag(&self.state.wants_token)
	}
}

impl SignalSource for FakeHost {
	fn name(&self) -> &str {
		SOURCE_NAME
	}

	fn register(&self, sink: SignalSink) -> anyhow::Result<()> {
		self.record(Call::Register(SOURCE_NAME.to_string()));
		*self.state.sink.lock() = Some(sink);
		Ok(())
	}

	fn unregister(&self) -> anyhow::Result<()> {
		self.record(Call::Unregister(SOURCE_NAME.to_string()));
		*self.state.sink.lock() = None;
		Ok(())
	}
}
