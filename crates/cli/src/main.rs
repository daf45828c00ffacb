use clap::Parser;
use runner_cli::cli::Cli;
use runner_cli::{commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let code = match commands::dispatch(cli).await {
		Ok(()) => 0,
		Err(err) => {
			error!(target = "runner.cli", error = %err, "command failed");
			1
		}
	};

	// An interrupted run may leave a stdin read parked on the blocking pool,
	// which would hold up runtime shutdown.
	std::process::exit(code);
}
