use std::path::Path;

use runner::{PermissionToken, RunnerController, RunnerError, RunnerHandle, RunnerStatus, Signal};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::{CliError, Result};
use crate::host::{ConsoleHost, Notice};
use crate::output::{OutputFormat, ResultBuilder, print_result};
use crate::script::{ScriptStep, parse_line};
use crate::settings::HostSettings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
	/// Signals forwarded to the coordinator, teardown included.
	signals: usize,
	/// Status right before teardown. Absent if the coordinator was interrupted.
	#[serde(skip_serializing_if = "Option::is_none")]
	status: Option<RunnerStatus>,
	#[serde(skip_serializing_if = "Option::is_none")]
	final_status: Option<RunnerStatus>,
	interrupted: bool,
	notices: Vec<Notice>,
}

pub async fn execute(script: Option<&Path>, config: Option<&Path>, format: OutputFormat) -> Result<()> {
	let builder = ResultBuilder::new("run");
	let settings = HostSettings::resolve(config)?;
	let host = ConsoleHost::new(&settings);

	let mut controller = RunnerController::new(host.collaborators(), settings.runner.clone());
	if let Some(token) = settings.token.clone() {
		controller = controller.with_token(PermissionToken::new(token));
	}
	let (handle, join) = runner::spawn(controller);

	let interrupt = host.interrupted();
	let mut signals = 0;
	let fed = match script {
		Some(path) => match tokio::fs::File::open(path).await {
			Ok(file) => {
				tokio::select! {
					fed = feed(BufReader::new(file), &host, &handle, &mut signals) => fed,
					_ = interrupt.cancelled() => Ok(()),
				}
			}
			Err(err) => Err(err.into()),
		},
		None => {
			tokio::select! {
				fed = feed(BufReader::new(tokio::io::stdin()), &host, &handle, &mut signals) => fed,
				_ = interrupt.cancelled() => Ok(()),
			}
		}
	};

	let status = handle.status().await.ok();
	let final_status = match handle.teardown().await {
		Ok(status) => Some(status),
		Err(RunnerError::LoopClosed) => None,
		Err(err) => return Err(err.into()),
	};
	drop(handle);
	if let Err(err) = join.await {
		warn!(target = "runner.cli", error = %err, "event loop task failed");
	}

	fed?;
	let interrupted = interrupt.is_cancelled() || final_status.is_none();
	info!(target = "runner.cli", signals, interrupted, "run finished");

	let result = builder
		.data(RunReport {
			signals,
			status,
			final_status,
			interrupted,
			notices: host.notices(),
		})
		.build();
	print_result(&result, format);
	Ok(())
}

/// Forwards script steps until EOF, a teardown step, or the loop closing.
/// `signals` counts every forwarded signal, teardown included.
async fn feed<R>(reader: R, host: &ConsoleHost, handle: &RunnerHandle, signals: &mut usize) -> Result<()>
where
	R: AsyncBufRead + Unpin,
{
	let mut lines = reader.lines();
	let mut line_no = 0;

	while let Some(line) = lines.next_line().await? {
		line_no += 1;
		let Some(step) = parse_line(&line).map_err(|source| CliError::Script { line: line_no, source })? else {
			continue;
		};

		match step {
			ScriptStep::Wait(delay) => {
				debug!(target = "runner.cli", ms = delay.as_millis() as u64, "waiting");
				tokio::time::sleep(delay).await;
			}
			ScriptStep::Signal(Signal::Teardown) => {
				*signals += 1;
				break;
			}
			ScriptStep::Signal(signal) => {
				if let Signal::ConfigurationChanged { metrics } = &signal {
					host.set_metrics(*metrics);
				}
				match handle.send(signal) {
					Ok(()) => *signals += 1,
					Err(RunnerError::LoopClosed) => {
						warn!(target = "runner.cli", line = line_no, "coordinator already torn down");
						break;
					}
					Err(err) => return Err(err.into()),
				}
			}
		}
	}

	Ok(())
}
