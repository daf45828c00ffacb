mod common;

use std::time::Duration;

use common::{DELAY, LANDSCAPE, PORTRAIT, advance, start};
use runner::fake::{Call, FakeHost};
use runner::{OverlayState, SessionState, Signal};

#[tokio::test(start_paused = true)]
async fn power_off_then_configuration_change_pauses_once() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.power_off().unwrap();
	handle.configuration_changed(PORTRAIT).unwrap();
	advance(DELAY * 2).await;

	let status = handle.status().await.unwrap();
	assert_eq!(status.session, SessionState::Paused);
	assert!(!status.delayed_pause_pending);
	assert_eq!(host.count(&Call::EnginePause), 1);
	assert_eq!(host.dialogs(), 1);
	assert_eq!(host.notifications(), 1);
	assert_eq!(host.toasts(), 0);
	assert_eq!(
		host.count(&Call::Dialog {
			title: "Script paused".to_string(),
			message: "Screen turned off".to_string(),
		}),
		1
	);
}

#[tokio::test(start_paused = true)]
async fn configuration_change_then_power_off_within_window_pauses_once() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(Duration::from_millis(300)).await;
	handle.power_off().unwrap();
	advance(DELAY * 2).await;

	assert_eq!(handle.status().await.unwrap().session, SessionState::Paused);
	assert_eq!(host.count(&Call::EnginePause), 1);
	assert_eq!(host.dialogs(), 1);
	assert_eq!(host.toasts(), 0);
}

#[tokio::test(start_paused = true)]
async fn configuration_change_alone_pauses_after_delay_with_toast() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(Duration::from_millis(500)).await;

	let status = handle.status().await.unwrap();
	assert_eq!(status.session, SessionState::Running);
	assert_eq!(status.overlay, OverlayState::Hidden);
	assert!(status.delayed_pause_pending);

	advance(DELAY).await;
	assert_eq!(handle.status().await.unwrap().session, SessionState::Paused);
	assert_eq!(host.count(&Call::EnginePause), 1);
	assert_eq!(host.count(&Call::Toast("Script paused".to_string())), 1);
	assert_eq!(host.dialogs(), 0);
	assert_eq!(host.notifications(), 0);
}

#[tokio::test(start_paused = true)]
async fn late_power_off_after_delayed_pause_is_silent() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(DELAY * 2).await;
	handle.power_off().unwrap();
	advance(Duration::from_millis(10)).await;

	assert_eq!(host.count(&Call::EnginePause), 1);
	assert_eq!(host.toasts(), 1);
	assert_eq!(host.dialogs(), 0);
}

#[tokio::test(start_paused = true)]
async fn repeated_configuration_changes_restart_the_delay() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(Duration::from_millis(600)).await;
	handle.configuration_changed(PORTRAIT).unwrap();
	advance(Duration::from_millis(600)).await;
	assert_eq!(handle.status().await.unwrap().session, SessionState::Running);

	advance(Duration::from_millis(600)).await;
	assert_eq!(handle.status().await.unwrap().session, SessionState::Paused);
	assert_eq!(host.toasts(), 1);
}

#[tokio::test(start_paused = true)]
async fn rotating_back_to_landscape_keeps_the_scheduled_pause() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.configuration_changed(PORTRAIT).unwrap();
	advance(Duration::from_millis(100)).await;
	handle.configuration_changed(LANDSCAPE).unwrap();
	advance(DELAY * 2).await;

	let status = handle.status().await.unwrap();
	assert_eq!(status.overlay, OverlayState::Visible);
	assert_eq!(status.session, SessionState::Paused);
	assert_eq!(host.toasts(), 1);
}

#[tokio::test(start_paused = true)]
async fn registered_source_delivers_power_off() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);
	handle.status().await.unwrap();

	assert!(host.is_registered());
	assert!(host.emit(Signal::PowerOff));
	host.emit(Signal::ConfigurationChanged { metrics: PORTRAIT });
	advance(DELAY * 2).await;

	assert_eq!(handle.status().await.unwrap().session, SessionState::Paused);
	assert_eq!(host.dialogs(), 1);
	assert_eq!(host.toasts(), 0);
}

#[tokio::test(start_paused = true)]
async fn resume_allows_the_next_episode_to_notify() {
	let host = FakeHost::new();
	let (handle, _join) = start(&host);

	handle.power_off().unwrap();
	handle.resume().unwrap();
	handle.configuration_changed(PORTRAIT).unwrap();
	advance(DELAY * 2).await;

	assert_eq!(handle.status().await.unwrap().session, SessionState::Paused);
	assert_eq!(host.count(&Call::EnginePause), 2);
	assert_eq!(host.dialogs(), 1);
	assert_eq!(host.toasts(), 1);
}
