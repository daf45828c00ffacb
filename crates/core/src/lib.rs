//! Lifecycle and pause coordinator for background automation sessions.
//!
//! A running script session is exposed to signals the host delivers
//! independently of each other: the display powering off, the screen
//! configuration changing, and a capture-permission token arriving. Two of
//! them may try to pause the same session within a few hundred milliseconds
//! of each other. The coordinator guarantees one pause transition and one
//! user notification per pause episode.
//!
//! # Architecture
//!
//! * [`SessionController`] owns the session state. `pause()` succeeds only
//!   from `Running`; every other call is rejected without side effects.
//! * [`OverlayController`] decides and applies overlay visibility.
//! * [`PermissionTokenGate`] defers overlay display and capture preparation
//!   until a requested token arrives.
//! * [`RunnerController`] maps host signals to the components above.
//! * [`spawn`] moves the controller onto a single cooperative event loop and
//!   returns a [`RunnerHandle`]. No controller state is ever locked.
//!
//! # Example
//!
//! ```ignore
//! let controller = RunnerController::new(collaborators, RunnerConfig::default());
//! let (handle, join) = runner::spawn(controller);
//!
//! handle.init()?;
//! handle.power_off()?;
//! handle.configuration_changed(DisplayMetrics::new(1080, 1920))?;
//! // Only the power-off path notifies; the delayed pause is rejected.
//!
//! handle.teardown().await?;
//! join.await?;
//! ```

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod error;
pub mod event_loop;
pub mod fake;
pub mod overlay;
pub mod session;
pub mod token;

pub use collaborators::{
	AutomationEngine, CaptureResources, Collaborators, DisplayGeometry, Notifier, OverlayRenderer, Preferences, SignalSource, StatusNotification,
};
pub use config::{DEFAULT_CONFIG_CHANGE_PAUSE_DELAY, Messages, RunnerConfig, load_json};
pub use controller::RunnerController;
pub use error::{Result, RunnerError};
pub use event_loop::{RunnerHandle, SignalSink, spawn};
pub use overlay::{OverlayController, should_show};
pub use runner_protocol as protocol;
pub use runner_protocol::{DisplayMetrics, GameAreaMode, OverlayState, PauseReason, PermissionToken, RunnerStatus, SessionState, Signal};
pub use session::SessionController;
pub use token::{InitDecision, PermissionTokenGate, TokenStore};
