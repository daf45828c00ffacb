//! Cancellable one-shot timers.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A single timer that invokes a callback once its delay elapses.
///
/// Cancelling (or dropping) the handle guarantees the callback never runs
/// afterwards. A callback that already ran is unaffected.
#[derive(Debug)]
pub struct DelayedTask {
	ticket: u64,
	token: CancellationToken,
	handle: JoinHandle<()>,
}

impl DelayedTask {
	/// Spawns the timer on the current tokio runtime.
	pub fn spawn<F>(ticket: u64, delay: Duration, on_elapsed: F) -> Self
	where
		F: FnOnce(u64) + Send + 'static,
	{
		let token = CancellationToken::new();
		let cancelled = token.clone();
		let handle = tokio::spawn(async move {
			tokio::select! {
				biased;
				_ = cancelled.cancelled() => {
					trace!(target = "runner.timer", ticket, "delayed task cancelled");
				}
				_ = tokio::time::sleep(delay) => {
					trace!(target = "runner.timer", ticket, "delayed task elapsed");
					on_elapsed(ticket);
				}
			}
		});

		Self { ticket, token, handle }
	}

	pub fn ticket(&self) -> u64 {
		self.ticket
	}

	pub fn cancel(&self) {
		self.token.cancel();
		self.handle.abort();
	}
}

impl Drop for DelayedTask {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// Holds at most one pending [`DelayedTask`] and hands out tickets.
///
/// Scheduling replaces the pending timer. When a timer fires, its owner
/// calls [`TimerSlot::take_if_current`] with the ticket it received; stale
/// tickets from replaced or cancelled timers are rejected.
#[derive(Debug, Default)]
pub struct TimerSlot {
	next_ticket: u64,
	pending: Option<DelayedTask>,
}

impl TimerSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Schedules a timer, cancelling any pending one. Returns the new ticket.
	pub fn schedule<F>(&mut self, delay: Duration, on_elapsed: F) -> u64
	where
		F: FnOnce(u64) + Send + 'static,
	{
		self.cancel();
		self.next_ticket += 1;
		let ticket = self.next_ticket;
		self.pending = Some(DelayedTask::spawn(ticket, delay, on_elapsed));
		ticket
	}

	/// Cancels the pending timer. Returns `true` if one was pending.
	pub fn cancel(&mut self) -> bool {
		match self.pending.take() {
			Some(task) => {
				task.cancel();
				true
			}
			None => false,
		}
	}

	/// Clears the slot if `ticket` belongs to the pending timer.
	pub fn take_if_current(&mut self, ticket: u64) -> bool {
		if self.pending.as_ref().is_some_and(|task| task.ticket() == ticket) {
			self.pending = None;
			true
		} else {
			false
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}
