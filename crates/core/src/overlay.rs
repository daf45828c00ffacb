//! Overlay visibility decision and idempotent show/hide.

use std::sync::Arc;

use runner_protocol::{DisplayMetrics, GameAreaMode, OverlayState};
use tracing::{debug, trace, warn};

use crate::collaborators::OverlayRenderer;

/// Returns `true` when the control overlay belongs on screen.
///
/// The overlay is hidden in portrait orientation, unless the device is a
/// dual-screen one where portrait geometry still hosts the game.
pub fn should_show(metrics: DisplayMetrics, mode: GameAreaMode) -> bool {
	let landscape = metrics.is_landscape();
	trace!(
		target = "runner.overlay",
		%metrics,
		orientation = if landscape { "landscape" } else { "portrait" },
		%mode,
		"evaluated orientation"
	);
	landscape || mode == GameAreaMode::Duo
}

/// Owns [`OverlayState`] and forwards actual changes to the renderer.
pub struct OverlayController {
	renderer: Arc<dyn OverlayRenderer>,
	state: OverlayState,
}

impl OverlayController {
	pub fn new(renderer: Arc<dyn OverlayRenderer>) -> Self {
		Self {
			renderer,
			state: OverlayState::Hidden,
		}
	}

	pub fn state(&self) -> OverlayState {
		self.state
	}

	/// Shows the overlay. Returns `true` if the visible state changed.
	pub fn show(&mut self) -> bool {
		self.apply(OverlayState::Visible)
	}

	/// Hides the overlay. Returns `true` if the visible state changed.
	pub fn hide(&mut self) -> bool {
		self.apply(OverlayState::Hidden)
	}

	/// Applies [`should_show`] for `metrics`. While `suppressed`, a visible
	/// verdict leaves the overlay as it is; a hidden verdict always hides.
	///
	/// Returns the `should_show` verdict, not the resulting state.
	pub fn refresh(&mut self, metrics: DisplayMetrics, mode: GameAreaMode, suppressed: bool) -> bool {
		let show = should_show(metrics, mode);
		if !show {
			self.hide();
		} else if suppressed {
			debug!(target = "runner.overlay", "overlay held back until capture token arrives");
		} else {
			self.show();
		}
		show
	}

	fn apply(&mut self, target: OverlayState) -> bool {
		if self.state == target {
			return false;
		}

		let result = match target {
			OverlayState::Visible => self.renderer.show(),
			OverlayState::Hidden => self.renderer.hide(),
		};

		match result {
			Ok(()) => {
				debug!(target = "runner.overlay", state = ?target, "overlay updated");
				self.state = target;
				true
			}
			Err(err) => {
				warn!(target = "runner.overlay", state = ?target, error = %err, "overlay renderer failed");
				false
			}
		}
	}
}
