//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{parse_gamma, Args, Command, ConfigAction, RenderArgs};
pub use commands::{handle_config_action, resolve_params, run_render, run_session, CliError};
