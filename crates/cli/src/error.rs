use runner::RunnerError;
use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Runner(#[from] RunnerError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid script line {line}: {source}")]
	Script {
		line: usize,
		#[source]
		source: serde_json::Error,
	},
}

impl CliError {
	/// Stable code used in failure envelopes.
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Runner(RunnerError::LoopClosed) => ErrorCode::LoopClosed,
			CliError::Runner(_) => ErrorCode::ConfigError,
			CliError::Io(_) => ErrorCode::IoError,
			CliError::Script { .. } => ErrorCode::InvalidInput,
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	#[test]
	fn codes_follow_error_kind() {
		assert_eq!(CliError::Runner(RunnerError::LoopClosed).code(), ErrorCode::LoopClosed);

		let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let config = RunnerError::ConfigParse {
			path: PathBuf::from("config.json"),
			source: parse,
		};
		assert_eq!(CliError::from(config).code(), ErrorCode::ConfigError);

		let line = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
		let script = CliError::Script { line: 4, source: line };
		assert_eq!(script.code(), ErrorCode::InvalidInput);
		assert!(script.to_string().starts_with("invalid script line 4"));
	}
}
