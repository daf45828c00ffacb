//! Single cooperative event loop owning a [`RunnerController`].
//!
//! Host signals, fired timers and status queries are queued on one unbounded
//! channel and handled one at a time, so handlers interleave only at event
//! boundaries. The loop ends after teardown, or tears down by itself once
//! every [`RunnerHandle`] is dropped.

use runner_protocol::{DisplayMetrics, PermissionToken, RunnerStatus, Signal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controller::RunnerController;
use crate::error::{Result, RunnerError};

/// Work item processed by the loop.
#[derive(Debug)]
pub(crate) enum RunnerEvent {
	Signal(Signal),
	DelayedPause { ticket: u64 },
	Status(oneshot::Sender<RunnerStatus>),
	Teardown(oneshot::Sender<RunnerStatus>),
}

/// Push-only entry point handed to registered signal sources.
///
/// A sink does not keep the loop alive; pushes after the loop ended are
/// dropped.
#[derive(Debug, Clone)]
pub struct SignalSink {
	tx: WeakUnboundedSender<RunnerEvent>,
}

impl SignalSink {
	pub(crate) fn new(tx: WeakUnboundedSender<RunnerEvent>) -> Self {
		Self { tx }
	}

	/// Queues `signal`. Returns `false` if the loop is gone.
	pub fn push(&self, signal: Signal) -> bool {
		match self.tx.upgrade() {
			Some(tx) => tx.send(RunnerEvent::Signal(signal)).is_ok(),
			None => false,
		}
	}
}

/// Cloneable host-side handle to a spawned coordinator.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
	tx: UnboundedSender<RunnerEvent>,
}

impl RunnerHandle {
	pub fn send(&self, signal: Signal) -> Result<()> {
		self.post(RunnerEvent::Signal(signal))
	}

	pub fn init(&self) -> Result<()> {
		self.send(Signal::Init)
	}

	pub fn power_off(&self) -> Result<()> {
		self.send(Signal::PowerOff)
	}

	pub fn configuration_changed(&self, metrics: DisplayMetrics) -> Result<()> {
		self.send(Signal::ConfigurationChanged { metrics })
	}

	pub fn permission_token_received(&self, token: PermissionToken) -> Result<()> {
		self.send(Signal::PermissionTokenReceived { token })
	}

	pub fn pause(&self) -> Result<()> {
		self.send(Signal::Pause)
	}

	pub fn resume(&self) -> Result<()> {
		self.send(Signal::Resume)
	}

	/// Returns a sink equivalent to the one given to signal sources.
	pub fn sink(&self) -> SignalSink {
		SignalSink::new(self.tx.downgrade())
	}

	/// Snapshot taken after every previously sent event was handled.
	pub async fn status(&self) -> Result<RunnerStatus> {
		let (reply, rx) = oneshot::channel();
		self.post(RunnerEvent::Status(reply))?;
		rx.await.map_err(|_| RunnerError::LoopClosed)
	}

	/// Tears the coordinator down and returns its final status.
	pub async fn teardown(&self) -> Result<RunnerStatus> {
		let (ack, rx) = oneshot::channel();
		self.post(RunnerEvent::Teardown(ack))?;
		rx.await.map_err(|_| RunnerError::LoopClosed)
	}

	fn post(&self, event: RunnerEvent) -> Result<()> {
		self.tx.send(event).map_err(|_| RunnerError::LoopClosed)
	}
}

/// Moves `controller` onto its event loop.
///
/// Must be called from within a tokio runtime.
pub fn spawn(mut controller: RunnerController) -> (RunnerHandle, JoinHandle<()>) {
	let (tx, rx) = mpsc::unbounded_channel();
	controller.attach(tx.downgrade());
	let join = tokio::spawn(run(controller, rx));
	(RunnerHandle { tx }, join)
}

async fn run(mut controller: RunnerController, mut rx: UnboundedReceiver<RunnerEvent>) {
	debug!(target = "runner.loop", "event loop started");

	while let Some(event) = rx.recv().await {
		match event {
			RunnerEvent::Signal(Signal::Teardown) => {
				controller.on_teardown();
				break;
			}
			RunnerEvent::Signal(signal) => controller.handle_signal(signal),
			RunnerEvent::DelayedPause { ticket } => controller.on_delayed_pause(ticket),
			RunnerEvent::Status(reply) => {
				let _ = reply.send(controller.status());
			}
			RunnerEvent::Teardown(ack) => {
				controller.on_teardown();
				let _ = ack.send(controller.status());
				break;
			}
		}
	}

	if !controller.is_torn_down() {
		info!(target = "runner.loop", "all handles dropped; tearing down");
		controller.on_teardown();
	}

	rx.close();
	debug!(target = "runner.loop", "event loop finished");
}
