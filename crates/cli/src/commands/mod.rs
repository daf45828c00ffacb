mod overlay;
mod run;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::output::{ResultBuilder, print_result};

pub async fn dispatch(cli: Cli) -> Result<()> {
	let (name, outcome) = match cli.command {
		Commands::Run { script } => ("run", run::execute(script.as_deref(), cli.config.as_deref(), cli.format).await),
		Commands::Overlay { width, height, mode } => ("overlay", overlay::execute(width, height, mode.into(), cli.format)),
	};

	if let Err(err) = &outcome {
		let result = ResultBuilder::<()>::new(name).error(err.code(), err.to_string()).build();
		print_result(&result, cli.format);
	}
	outcome
}
