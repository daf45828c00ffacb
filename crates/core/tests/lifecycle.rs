mod common;

use std::time::Duration;

use common::{DELAY, PORTRAIT, advance, start};
use runner::fake::{Call, FakeHost};
use runner::{OverlayState, PermissionToken, RunnerError, SessionState, Signal};

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_configuration_pause() {
	let host = FakeHost::new();
	let (handle, join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(DELAY / 2).await;
	let final_status = handle.teardown().await.unwrap();
	assert_eq!(final_status.session, SessionState::Stopped);
	assert!(final_status.torn_down);
	assert!(!final_status.delayed_pause_pending);
	join.await.unwrap();
	advance(DELAY * 3).await;

	assert_eq!(host.count(&Call::EnginePause), 0);
	assert_eq!(host.toasts(), 0);
	assert_eq!(host.count(&Call::EngineStop), 1);
	assert!(matches!(handle.status().await, Err(RunnerError::LoopClosed)));
}

#[tokio::test(start_paused = true)]
async fn teardown_aborts_open_dialog() {
	let host = FakeHost::new();
	host.set_dialog_duration(Duration::from_secs(30));
	let (handle, join) = start(&host);

	handle.power_off().unwrap();
	advance(Duration::from_millis(10)).await;
	assert_eq!(host.dialogs(), 1);

	handle.teardown().await.unwrap();
	join.await.unwrap();
	advance(Duration::from_secs(60)).await;
	assert_eq!(host.count(&Call::DialogDismissed), 0);
}

#[tokio::test(start_paused = true)]
async fn dialog_does_not_block_later_signals() {
	let host = FakeHost::new();
	host.set_dialog_duration(Duration::from_secs(30));
	let (handle, _join) = start(&host);

	handle.power_off().unwrap();
	handle.resume().unwrap();
	handle.pause().unwrap();

	let status = handle.status().await.unwrap();
	assert_eq!(status.session, SessionState::Paused);
	assert_eq!(host.count(&Call::EngineResume), 1);
	assert_eq!(host.toasts(), 1);
}

#[tokio::test(start_paused = true)]
async fn signals_after_teardown_have_no_effect() {
	let host = FakeHost::new();
	let (handle, join) = start(&host);

	handle.send(Signal::Teardown).unwrap();
	join.await.unwrap();
	let calls = host.calls();

	assert!(matches!(handle.power_off(), Err(RunnerError::LoopClosed)));
	assert!(!host.emit(Signal::PowerOff));
	assert!(!host.is_registered());
	assert_eq!(host.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_tears_down() {
	let host = FakeHost::new();
	let (handle, join) = start(&host);

	let sink = handle.sink();
	drop(handle);
	join.await.unwrap();

	assert_eq!(host.count(&Call::EngineStop), 1);
	assert_eq!(host.count(&Call::Unregister("fake.power".to_string())), 1);
	assert!(!sink.push(Signal::PowerOff));
}

#[tokio::test(start_paused = true)]
async fn token_gating_through_the_loop() {
	let host = FakeHost::new();
	host.set_wants_token(true);
	let (handle, _join) = start(&host);

	let status = handle.status().await.unwrap();
	assert_eq!(status.overlay, OverlayState::Hidden);
	assert!(status.token_request_pending);
	assert_eq!(host.count(&Call::CapturePrepare), 0);

	handle.permission_token_received(PermissionToken::new("grant")).unwrap();
	let status = handle.status().await.unwrap();
	assert_eq!(status.overlay, OverlayState::Visible);
	assert!(status.token_present);
	assert!(status.resources_prepared);
	assert_eq!(host.count(&Call::CapturePrepare), 1);

	handle.teardown().await.unwrap();
	assert_eq!(host.count(&Call::CaptureRelease), 1);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_work_before_releasing_resources() {
	let host = FakeHost::new();
	let (handle, join) = start(&host);
	handle.power_off().unwrap();
	handle.status().await.unwrap();
	host.clear_calls();

	handle.teardown().await.unwrap();
	join.await.unwrap();

	let stop = host.position(&Call::EngineStop).unwrap();
	let release = host.position(&Call::CaptureRelease).unwrap();
	let overlay = host.position(&Call::OverlayHide).unwrap();
	let notification = host.position(&Call::NotificationHide).unwrap();
	let unregister = host.position(&Call::Unregister("fake.power".to_string())).unwrap();
	assert!(stop < release && release < overlay && overlay < notification && notification < unregister);
}
