#![allow(dead_code)]

use std::time::Duration;

use runner::fake::FakeHost;
use runner::{DisplayMetrics, RunnerConfig, RunnerController, RunnerHandle};
use tokio::task::JoinHandle;

pub const DELAY: Duration = Duration::from_secs(1);
pub const PORTRAIT: DisplayMetrics = DisplayMetrics::new(1080, 1920);
pub const LANDSCAPE: DisplayMetrics = DisplayMetrics::new(1920, 1080);

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Spawns an initialized coordinator over `host`.
pub fn start(host: &FakeHost) -> (RunnerHandle, JoinHandle<()>) {
	init_tracing();
	let controller = RunnerController::new(host.collaborators(), RunnerConfig::default().with_pause_delay(DELAY));
	let (handle, join) = runner::spawn(controller);
	handle.init().expect("loop should accept init");
	(handle, join)
}

/// Lets the paused clock run forward so timers and detached tasks complete.
pub async fn advance(duration: Duration) {
	tokio::time::sleep(duration).await;
}
