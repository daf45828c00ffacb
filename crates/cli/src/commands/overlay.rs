use runner::{DisplayMetrics, GameAreaMode, should_show};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayDecision {
	width: u32,
	height: u32,
	mode: GameAreaMode,
	landscape: bool,
	show: bool,
}

pub fn execute(width: u32, height: u32, mode: GameAreaMode, format: OutputFormat) -> Result<()> {
	let metrics = DisplayMetrics::new(width, height);
	let show = should_show(metrics, mode);
	info!(target = "runner.cli", %metrics, ?mode, show, "overlay decision");

	let result = ResultBuilder::new("overlay")
		.data(OverlayDecision {
			width,
			height,
			mode,
			landscape: metrics.is_landscape(),
			show,
		})
		.build();
	print_result(&result, format);
	Ok(())
}
