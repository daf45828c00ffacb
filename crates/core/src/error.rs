//! Error types for the runner coordinator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the coordinator's outer API.
///
/// Collaborator failures are not represented here: they are logged and
/// absorbed so that teardown always completes.
#[derive(Debug, Error)]
pub enum RunnerError {
	#[error("runner event loop is closed")]
	LoopClosed,

	#[error("failed to read config {}: {source}", .path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config {}: {source}", .path.display())]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

pub type Result<T> = std::result::Result<T, RunnerError>;
