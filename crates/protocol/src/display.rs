//! Display geometry, game-area preference and overlay visibility.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel dimensions of the current display configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayMetrics {
	/// Horizontal resolution in pixels.
	pub width: u32,
	/// Vertical resolution in pixels.
	pub height: u32,
}

impl DisplayMetrics {
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	/// Square displays count as landscape.
	pub fn is_landscape(&self) -> bool {
		self.width >= self.height
	}
}

impl fmt::Display for DisplayMetrics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}

/// User-configured description of where the game is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameAreaMode {
	#[default]
	Normal,
	Xperia,
	/// Dual-screen device; portrait geometry still shows the overlay.
	Duo,
	Custom,
}

impl fmt::Display for GameAreaMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Normal => "normal",
			Self::Xperia => "xperia",
			Self::Duo => "duo",
			Self::Custom => "custom",
		};
		f.write_str(name)
	}
}

/// Visibility of the floating control overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
	Visible,
	#[default]
	Hidden,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn square_display_is_landscape() {
		assert!(DisplayMetrics::new(1080, 1080).is_landscape());
		assert!(DisplayMetrics::new(1920, 1080).is_landscape());
		assert!(!DisplayMetrics::new(1080, 1920).is_landscape());
	}

	#[test]
	fn game_area_mode_parses_lowercase() {
		let mode: GameAreaMode = serde_json::from_str("\"duo\"").unwrap();
		assert_eq!(mode, GameAreaMode::Duo);
		assert_eq!(GameAreaMode::default(), GameAreaMode::Normal);
	}
}
