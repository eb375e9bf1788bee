//! Line-oriented interactive control of a [`RenderSession`].
//!
//! Reads one command per line and re-renders after every change to the
//! parameters or the loaded images.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::{RenderPass, RenderSession, Slot};
use crate::error::Result;
use crate::tone::{GAMMA_MAX, GAMMA_MIN};

const USAGE: &str = "Commands: load <path> [meta], compare <path> [meta], clear, \
black <0-255>, white <0-255>, gamma <0.1-5.0|+|->, grid on|off, status, export [path], quit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Load the primary slot, as a solar map when a metadata path is given
    Load { path: PathBuf, meta: Option<PathBuf> },
    /// Load the comparison slot
    Compare { path: PathBuf, meta: Option<PathBuf> },
    /// Drop the comparison slot
    Clear,
    Black(u8),
    White(u8),
    Gamma(f32),
    /// Move gamma by this many steps
    GammaStep(i32),
    Grid(bool),
    Status,
    Export(Option<PathBuf>),
    Quit,
}

impl SessionCommand {
    /// Whether running this command should trigger a render pass.
    pub fn triggers_render(&self) -> bool {
        !matches!(
            self,
            SessionCommand::Status | SessionCommand::Export(_) | SessionCommand::Quit
        )
    }
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines and `Err` with a message for anything
/// that isn't a valid command.
pub fn parse_input(input: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        return Ok(None);
    };
    let args = &parts[1..];

    let command = match name.to_lowercase().as_str() {
        "load" | "compare" => {
            let (path, meta) = match args {
                [path] => (PathBuf::from(*path), None),
                [path, meta] => (PathBuf::from(*path), Some(PathBuf::from(*meta))),
                _ => return Err(format!("Usage: {} <path> [meta.toml]", name)),
            };
            if name.eq_ignore_ascii_case("load") {
                SessionCommand::Load { path, meta }
            } else {
                SessionCommand::Compare { path, meta }
            }
        }
        "clear" => SessionCommand::Clear,
        "black" => SessionCommand::Black(parse_level(name, args)?),
        "white" => SessionCommand::White(parse_level(name, args)?),
        "gamma" => match args {
            ["+"] => SessionCommand::GammaStep(1),
            ["-"] => SessionCommand::GammaStep(-1),
            [value] => {
                let gamma = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid gamma value: {}", value))?;
                if !(GAMMA_MIN..=GAMMA_MAX).contains(&gamma) {
                    return Err(format!(
                        "Gamma must be between {} and {}",
                        GAMMA_MIN, GAMMA_MAX
                    ));
                }
                SessionCommand::Gamma(gamma)
            }
            _ => return Err("Usage: gamma <0.1-5.0|+|->".to_string()),
        },
        "grid" => match args {
            ["on"] => SessionCommand::Grid(true),
            ["off"] => SessionCommand::Grid(false),
            _ => return Err("Usage: grid on|off".to_string()),
        },
        "status" => SessionCommand::Status,
        "export" => match args {
            [] => SessionCommand::Export(None),
            [path] => SessionCommand::Export(Some(PathBuf::from(*path))),
            _ => return Err("Usage: export [path]".to_string()),
        },
        "quit" | "exit" => SessionCommand::Quit,
        _ => return Err(format!("Unknown command: {}\n{}", name, USAGE)),
    };
    Ok(Some(command))
}

fn parse_level(name: &str, args: &[&str]) -> std::result::Result<u8, String> {
    match args {
        [value] => value
            .parse::<u8>()
            .map_err(|_| format!("{} point must be 0-255, got {}", name, value)),
        _ => Err(format!("Usage: {} <0-255>", name)),
    }
}

/// Drives a session from a stream of command lines.
pub struct Console<'a> {
    session: &'a mut RenderSession,
    export_dir: PathBuf,
}

impl<'a> Console<'a> {
    pub fn new(session: &'a mut RenderSession, export_dir: &Path) -> Self {
        Self {
            session,
            export_dir: export_dir.to_path_buf(),
        }
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Command failures are reported on `output` and the loop continues; only
    /// I/O errors on the streams themselves end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", USAGE)?;
        for line in input.lines() {
            let line = line?;
            let command = match parse_input(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(output, "{}", message)?;
                    continue;
                }
            };
            if command == SessionCommand::Quit {
                break;
            }
            if let Err(e) = self.execute(&command, &mut output) {
                writeln!(output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    /// Apply one command, rendering afterwards when it changed anything.
    pub fn execute<W: Write>(&mut self, command: &SessionCommand, output: &mut W) -> Result<()> {
        let session = &mut *self.session;
        match command {
            SessionCommand::Load { path, meta } => {
                session.load(Slot::Primary, path, meta.as_deref())?
            }
            SessionCommand::Compare { path, meta } => {
                session.load(Slot::Comparison, path, meta.as_deref())?
            }
            SessionCommand::Clear => session.set_slot(Slot::Comparison, None),
            SessionCommand::Black(black) => {
                session.set_params(session.params().with_black(*black))
            }
            SessionCommand::White(white) => {
                session.set_params(session.params().with_white(*white))
            }
            SessionCommand::Gamma(gamma) => {
                let params = session.params().with_gamma(*gamma)?;
                session.set_params(params)
            }
            SessionCommand::GammaStep(steps) => {
                session.set_params(session.params().step_gamma(*steps))
            }
            SessionCommand::Grid(enabled) => session.set_grid(*enabled),
            SessionCommand::Status => write_status(session, output)?,
            SessionCommand::Export(path) => {
                let written = session.export(path.as_deref(), &self.export_dir)?;
                writeln!(output, "Exported {}", written.display())?;
            }
            SessionCommand::Quit => {}
        }

        if command.triggers_render() {
            let pass = self.session.render()?;
            write_pass(self.session, &pass, output)?;
        }
        Ok(())
    }
}

fn write_status<W: Write>(session: &RenderSession, output: &mut W) -> Result<()> {
    writeln!(output, "{}", session.params())?;
    writeln!(
        output,
        "Grid: {}",
        if session.grid_enabled() { "on" } else { "off" }
    )?;
    for slot in Slot::ALL {
        match session.slot(slot) {
            Some(source) => writeln!(output, "{}: {}", slot, source)?,
            None => writeln!(output, "{}: (empty)", slot)?,
        }
    }
    Ok(())
}

fn write_pass<W: Write>(session: &RenderSession, pass: &RenderPass, output: &mut W) -> Result<()> {
    for skipped in &pass.skipped {
        writeln!(output, "Skipped {}: {}", skipped.slot, skipped.error)?;
    }
    match session.last_render() {
        Some(frame) => writeln!(
            output,
            "Rendered {}x{} | {}",
            frame.width,
            frame.height,
            session.params()
        )?,
        None => writeln!(output, "Nothing to render")?,
    }
    Ok(())
}
