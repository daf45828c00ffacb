pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod logging;
pub mod output;
pub mod script;
pub mod settings;
