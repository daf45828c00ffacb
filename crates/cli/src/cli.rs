use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use runner::GameAreaMode;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "runner")]
#[command(about = "Script runner coordinator - drive pause/teardown from host signals")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Host settings file (defaults to <config dir>/runner/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Output format for the command result
	#[arg(short, long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Feed JSON-line signals into a coordinator and report the outcome
	Run {
		/// Signal script; reads stdin when omitted
		#[arg(long, value_name = "FILE")]
		script: Option<PathBuf>,
	},

	/// Report whether the control overlay would be shown for a geometry
	Overlay {
		width: u32,
		height: u32,
		/// Game area mode preference
		#[arg(long, value_enum, default_value = "normal")]
		mode: ModeArg,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
	Normal,
	Xperia,
	Duo,
	Custom,
}

impl From<ModeArg> for GameAreaMode {
	fn from(mode: ModeArg) -> Self {
		match mode {
			ModeArg::Normal => GameAreaMode::Normal,
			ModeArg::Xperia => GameAreaMode::Xperia,
			ModeArg::Duo => GameAreaMode::Duo,
			ModeArg::Custom => GameAreaMode::Custom,
		}
	}
}
