use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandResult, ErrorCode};

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none(),
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
		}
	}
}

/// Writes `result` to stdout in the requested format.
pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	let rendered = match format {
		OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
		OutputFormat::Ndjson => serde_json::to_string(result).unwrap_or_default(),
		OutputFormat::Text => render_text(result),
	};

	let mut stdout = io::stdout().lock();
	let _ = writeln!(stdout, "{rendered}");
	let _ = stdout.flush();
}

fn render_text<T: Serialize>(result: &CommandResult<T>) -> String {
	let mut out = format!("{}: {}", result.command, if result.ok { "ok" } else { "failed" });
	if let Some(err) = &result.error {
		out.push_str(&format!("\n  error [{}]: {}", err.code, err.message));
	}
	if let Some(data) = &result.data {
		if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(data) {
			for (key, value) in fields {
				out.push_str(&format!("\n  {key}: {value}"));
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn builder_marks_errors_as_failed() {
		let result = ResultBuilder::<serde_json::Value>::new("run").error(ErrorCode::LoopClosed, "closed").build();
		assert!(!result.ok);
		assert_eq!(result.error.as_ref().unwrap().code, ErrorCode::LoopClosed);
		assert!(render_text(&result).contains("error [LOOP_CLOSED]: closed"));
	}

	#[test]
	fn error_codes_serialize_screaming_snake_case() {
		let result = ResultBuilder::<()>::new("run").error(ErrorCode::InvalidInput, "bad line").build();
		let value = serde_json::to_value(&result).unwrap();
		assert_eq!(value["error"]["code"], "INVALID_INPUT");
	}

	#[test]
	fn text_rendering_lists_top_level_fields() {
		let result = ResultBuilder::new("overlay").data(json!({"show": true})).build();
		let text = render_text(&result);
		assert!(text.starts_with("overlay: ok"));
		assert!(text.contains("show: true"));
	}
}
