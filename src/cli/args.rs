//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tone::{GAMMA_MAX, GAMMA_MIN};

/// Parse and validate gamma (0.1-5.0)
pub fn parse_gamma(s: &str) -> Result<f32, String> {
    let gamma: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(GAMMA_MIN..=GAMMA_MAX).contains(&gamma) {
        return Err(format!(
            "Gamma must be between {} and {}, got {}",
            GAMMA_MIN, GAMMA_MAX, gamma
        ));
    }
    Ok(gamma)
}

/// Black/white point, gamma, and grid overlay for solar images
#[derive(Parser, Debug)]
#[command(name = "sunspot-levels")]
#[command(version, about = "Tone adjustment and grid overlay for solar images", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one image, or two side by side, and export it as PNG
    Render(RenderArgs),
    /// Adjust levels interactively, one command per line on stdin
    Session {
        /// Config file path
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        /// Config file path
        #[arg(long, short)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Primary (left) image
    pub primary: PathBuf,

    /// Solar map metadata for the primary image (TOML: center_x, center_y, radius)
    #[arg(long)]
    pub primary_meta: Option<PathBuf>,

    /// Comparison (right) image
    #[arg(long)]
    pub comparison: Option<PathBuf>,

    /// Solar map metadata for the comparison image
    #[arg(long, requires = "comparison")]
    pub comparison_meta: Option<PathBuf>,

    /// Black point (0-255)
    #[arg(short, long)]
    pub black: Option<u8>,

    /// White point (0-255)
    #[arg(short, long)]
    pub white: Option<u8>,

    /// Gamma (0.1-5.0)
    #[arg(short, long, value_parser = parse_gamma)]
    pub gamma: Option<f32>,

    /// Skip the compass and latitude/longitude grid
    #[arg(long)]
    pub no_grid: bool,

    /// Output PNG path (default: timestamped name in the export directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
