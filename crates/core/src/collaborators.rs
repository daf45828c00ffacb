//! Interfaces of the external collaborators driven by the coordinator.
//!
//! Everything the controller touches outside its own state goes through one
//! of these traits. The full set is gathered in [`Collaborators`] and passed
//! once at construction.

use std::sync::Arc;

use async_trait::async_trait;
use runner_protocol::{DisplayMetrics, GameAreaMode};

use crate::event_loop::SignalSink;

/// The engine executing the automation script.
pub trait AutomationEngine: Send + Sync {
	fn start(&self) -> anyhow::Result<()>;
	/// Suspends execution. Returns `false` if the engine declined.
	fn pause(&self) -> bool;
	/// Continues a suspended execution. Returns `false` if the engine declined.
	fn resume(&self) -> bool;
	fn stop(&self) -> anyhow::Result<()>;
}

/// Screen-capture resources backing the engine.
pub trait CaptureResources: Send + Sync {
	fn prepare(&self) -> anyhow::Result<()>;
	fn release(&self) -> anyhow::Result<()>;
}

/// The floating control overlay.
pub trait OverlayRenderer: Send + Sync {
	fn show(&self) -> anyhow::Result<()>;
	fn hide(&self) -> anyhow::Result<()>;
}

/// Persistent status indicator shown while the host service lives.
pub trait StatusNotification: Send + Sync {
	fn show(&self) -> anyhow::Result<()>;
	fn hide(&self) -> anyhow::Result<()>;
}

/// User feedback surface.
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Posts a notification-style message.
	fn notify(&self, message: &str);
	/// Shows a short transient message.
	fn toast(&self, message: &str);
	/// Shows a dialog and resolves once the user dismisses it.
	async fn show_dialog(&self, title: &str, message: &str);
}

pub trait DisplayGeometry: Send + Sync {
	fn current_metrics(&self) -> DisplayMetrics;
}

/// Read-only view of the user's preferences.
pub trait Preferences: Send + Sync {
	fn game_area_mode(&self) -> GameAreaMode;
	fn wants_permission_token(&self) -> bool;
}

/// A host emitter registered during init and unregistered during teardown.
pub trait SignalSource: Send + Sync {
	fn name(&self) -> &str;
	fn register(&self, sink: SignalSink) -> anyhow::Result<()>;
	fn unregister(&self) -> anyhow::Result<()>;
}

/// Capability set required by a [`crate::RunnerController`].
#[derive(Clone)]
pub struct Collaborators {
	pub engine: Arc<dyn AutomationEngine>,
	pub capture: Arc<dyn CaptureResources>,
	pub overlay: Arc<dyn OverlayRenderer>,
	pub notification: Arc<dyn StatusNotification>,
	pub notifier: Arc<dyn Notifier>,
	pub display: Arc<dyn DisplayGeometry>,
	pub preferences: Arc<dyn Preferences>,
	pub signal_sources: Vec<Arc<dyn SignalSource>>,
}
