//! Detached task group with collective cancellation.

use std::future::Future;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Tasks spawned off the event loop that may be awaited by nobody.
///
/// Finished tasks are reaped lazily; [`TaskGroup::cancel_all`] stops every
/// task still running and leaves the group reusable.
#[derive(Debug, Default)]
pub struct TaskGroup {
	tasks: JoinSet<()>,
	token: CancellationToken,
}

impl TaskGroup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Spawns `future` on the current runtime under this group's cancellation.
	pub fn spawn<F>(&mut self, name: &'static str, future: F)
	where
		F: Future<Output = ()> + Send + 'static,
	{
		self.reap();
		let token = self.token.child_token();
		self.tasks.spawn(async move {
			tokio::select! {
				biased;
				_ = token.cancelled() => {
					debug!(target = "runner.tasks", task = name, "detached task cancelled");
				}
				_ = future => {}
			}
		});
	}

	/// Collects finished tasks. Returns how many were reaped.
	pub fn reap(&mut self) -> usize {
		let mut reaped = 0;
		while let Some(result) = self.tasks.try_join_next() {
			if let Err(err) = result {
				if err.is_panic() {
					warn!(target = "runner.tasks", error = %err, "detached task panicked");
				}
			}
			reaped += 1;
		}
		reaped
	}

	/// Cancels and aborts every outstanding task. Returns how many were outstanding.
	pub fn cancel_all(&mut self) -> usize {
		self.reap();
		let outstanding = self.tasks.len();
		self.token.cancel();
		self.tasks.abort_all();
		self.tasks.detach_all();
		self.token = CancellationToken::new();
		outstanding
	}
}
