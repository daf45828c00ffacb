//! Console stand-ins for the host collaborators.
//!
//! The engine, capture and overlay only log what they would do. User
//! feedback is printed to stderr and kept as [`Notice`]s for the final
//! report. Ctrl-C is registered as a signal source that tears the runner
//! down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;
use parking_lot::Mutex;
use runner::{
	AutomationEngine, CaptureResources, Collaborators, DisplayGeometry, DisplayMetrics, GameAreaMode, Notifier, OverlayRenderer, Preferences, Signal,
	SignalSink, SignalSource, StatusNotification,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::settings::HostSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
	Notify,
	Toast,
	Dialog,
}

/// User feedback emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub kind: NoticeKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub message: String,
}

#[derive(Debug)]
struct ConsoleState {
	metrics: Mutex<DisplayMetrics>,
	game_area_mode: GameAreaMode,
	wants_permission_token: bool,
	dialog_hold: Duration,
	notices: Mutex<Vec<Notice>>,
	interrupted: CancellationToken,
}

/// Shared console host; clones observe the same state.
#[derive(Debug, Clone)]
pub struct ConsoleHost {
	state: Arc<ConsoleState>,
}

impl ConsoleHost {
	pub fn new(settings: &HostSettings) -> Self {
		Self {
			state: Arc::new(ConsoleState {
				metrics: Mutex::new(settings.display),
				game_area_mode: settings.preferences.game_area_mode,
				wants_permission_token: settings.preferences.wants_permission_token,
				dialog_hold: Duration::from_millis(settings.dialog_ms),
				notices: Mutex::new(Vec::new()),
				interrupted: CancellationToken::new(),
			}),
		}
	}

	pub fn collaborators(&self) -> Collaborators {
		Collaborators {
			engine: Arc::new(self.clone()),
			capture: Arc::new(self.clone()),
			overlay: Arc::new(self.clone()),
			notification: Arc::new(self.clone()),
			notifier: Arc::new(self.clone()),
			display: Arc::new(self.clone()),
			preferences: Arc::new(self.clone()),
			signal_sources: vec![Arc::new(InterruptSource::new(self.interrupted()))],
		}
	}

	/// Records the geometry reported by a configuration change.
	pub fn set_metrics(&self, metrics: DisplayMetrics) {
		*self.state.metrics.lock() = metrics;
	}

	/// Cancelled once Ctrl-C has posted a teardown.
	pub fn interrupted(&self) -> CancellationToken {
		self.state.interrupted.clone()
	}

	pub fn notices(&self) -> Vec<Notice> {
		self.state.notices.lock().clone()
	}

	fn push_notice(&self, kind: NoticeKind, title: Option<&str>, message: &str) {
		self.state.notices.lock().push(Notice {
			kind,
			title: title.map(str::to_string),
			message: message.to_string(),
		});
	}
}

impl AutomationEngine for ConsoleHost {
	fn start(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "engine started");
		Ok(())
	}

	fn pause(&self) -> bool {
		info!(target = "runner.cli", "engine paused");
		true
	}

	fn resume(&self) -> bool {
		info!(target = "runner.cli", "engine resumed");
		true
	}

	fn stop(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "engine stopped");
		Ok(())
	}
}

impl CaptureResources for ConsoleHost {
	fn prepare(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "capture prepared");
		Ok(())
	}

	fn release(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "capture released");
		Ok(())
	}
}

impl OverlayRenderer for ConsoleHost {
	fn show(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "overlay shown");
		Ok(())
	}

	fn hide(&self) -> anyhow::Result<()> {
		info!(target = "runner.cli", "overlay hidden");
		Ok(())
	}
}

impl StatusNotification for ConsoleHost {
	fn show(&self) -> anyhow::Result<()> {
		debug!(target = "runner.cli", "status notification shown");
		Ok(())
	}

	fn hide(&self) -> anyhow::Result<()> {
		debug!(target = "runner.cli", "status notification hidden");
		Ok(())
	}
}

#[async_trait]
impl Notifier for ConsoleHost {
	fn notify(&self, message: &str) {
		eprintln!("{} {}", "[notify]".cyan(), message);
		self.push_notice(NoticeKind::Notify, None, message);
	}

	fn toast(&self, message: &str) {
		eprintln!("{} {}", "[toast]".yellow(), message);
		self.push_notice(NoticeKind::Toast, None, message);
	}

	async fn show_dialog(&self, title: &str, message: &str) {
		eprintln!("{} {}: {}", "[dialog]".red().bold(), title.bold(), message);
		self.push_notice(NoticeKind::Dialog, Some(title), message);
		if !self.state.dialog_hold.is_zero() {
			tokio::time::sleep(self.state.dialog_hold).await;
		}
		debug!(target = "runner.cli", "dialog dismissed");
	}
}

impl DisplayGeometry for ConsoleHost {
	fn current_metrics(&self) -> DisplayMetrics {
		*self.state.metrics.lock()
	}
}

impl Preferences for ConsoleHost {
	fn game_area_mode(&self) -> GameAreaMode {
		self.state.game_area_mode
	}

	fn wants_permission_token(&self) -> bool {
		self.state.wants_permission_token
	}
}

/// Tears the runner down on Ctrl-C, then cancels `interrupted` so the
/// driver stops feeding the script.
#[derive(Debug)]
pub struct InterruptSource {
	interrupted: CancellationToken,
	listener: Mutex<Option<JoinHandle<()>>>,
}

impl InterruptSource {
	pub fn new(interrupted: CancellationToken) -> Self {
		Self {
			interrupted,
			listener: Mutex::new(None),
		}
	}
}

impl SignalSource for InterruptSource {
	fn name(&self) -> &str {
		"interrupt"
	}

	fn register(&self, sink: SignalSink) -> anyhow::Result<()> {
		let interrupted = self.interrupted.clone();
		let listener = tokio::spawn(async move {
			if tokio::signal::ctrl_c().await.is_ok() {
				info!(target = "runner.cli", "interrupt received");
				sink.push(Signal::Teardown);
				interrupted.cancel();
			}
		});
		if let Some(previous) = self.listener.lock().replace(listener) {
			previous.abort();
		}
		Ok(())
	}

	fn unregister(&self) -> anyhow::Result<()> {
		if let Some(listener) = self.listener.lock().take() {
			listener.abort();
		}
		Ok(())
	}
}
