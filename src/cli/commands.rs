//! Subcommand handlers for render, session, and config actions.

use std::io;
use std::path::{Path, PathBuf};

use super::args::{ConfigAction, RenderArgs};
use crate::config::{default_path as get_config_path, write_default, Config, ConfigError};
use crate::error::LevelsError;
use crate::overlay::GridOverlayRenderer;
use crate::session::console::Console;
use crate::session::{RenderSession, Slot};
use crate::tone::LevelParams;

/// Errors surfaced by the command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Levels(#[from] LevelsError),

    #[error("Nothing to render: no image could be loaded")]
    NothingToRender,
}

/// Merge CLI overrides over the configured parameters.
pub fn resolve_params(
    configured: LevelParams,
    black: Option<u8>,
    white: Option<u8>,
    gamma: Option<f32>,
) -> Result<LevelParams, LevelsError> {
    let mut params = configured;
    if let Some(black) = black {
        params = params.with_black(black);
    }
    if let Some(white) = white {
        params = params.with_white(white);
    }
    if let Some(gamma) = gamma {
        params = params.with_gamma(gamma)?;
    }
    Ok(params)
}

fn build_session(config: &Config, params: LevelParams) -> RenderSession {
    let mut session = RenderSession::new(params, GridOverlayRenderer::new(config.overlay.style()));
    session.set_grid(config.overlay.enabled);
    session
}

/// Load a slot, downgrading an undecodable source to a warning.
fn load_or_skip(
    session: &mut RenderSession,
    slot: Slot,
    path: &Path,
    meta: Option<&Path>,
) -> Result<(), LevelsError> {
    match session.load(slot, path, meta) {
        Err(e @ LevelsError::UnsupportedSource { .. }) => {
            log::warn!("Skipping {} image: {}", slot, e);
            Ok(())
        }
        other => other,
    }
}

/// Render once with the given arguments and export the result.
///
/// Returns the path written.
pub fn run_render(args: &RenderArgs) -> Result<PathBuf, CliError> {
    let config = Config::load(args.config.as_deref())?;
    let params = resolve_params(config.levels, args.black, args.white, args.gamma)?;

    let mut session = build_session(&config, params);
    if args.no_grid {
        session.set_grid(false);
    }

    load_or_skip(
        &mut session,
        Slot::Primary,
        &args.primary,
        args.primary_meta.as_deref(),
    )?;
    if let Some(comparison) = &args.comparison {
        load_or_skip(
            &mut session,
            Slot::Comparison,
            comparison,
            args.comparison_meta.as_deref(),
        )?;
    }

    let pass = session.render()?;
    if pass.is_empty() {
        return Err(CliError::NothingToRender);
    }
    log::info!("Rendered with {}", session.params());

    let path = session.export(args.output.as_deref(), &config.export.directory())?;
    Ok(path)
}

/// Run the interactive console on stdin/stdout until `quit` or end of input.
pub fn run_session(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = Config::load(config_path)?;
    let mut session = build_session(&config, config.levels);
    let export_dir = config.export.directory();

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut session, &export_dir).run(stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = Config::load(path)?;
            let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found, using defaults)", config_path.display());
            }
            println!();
            println!("{}", config.to_toml()?);
            println!("Effective levels: {}", config.levels);
        }
        ConfigAction::Init => match write_default(path) {
            Ok(written) => println!("Created config file: {}", written.display()),
            Err(e @ ConfigError::AlreadyExists { .. }) => {
                eprintln!("Use 'sunspot-levels config show' to view current settings.");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
