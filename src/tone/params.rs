//! Black point, white point, and gamma parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LevelsError, Result};

/// Smallest gamma offered by the parameter controls.
pub const GAMMA_MIN: f32 = 0.1;

/// Largest gamma offered by the parameter controls.
pub const GAMMA_MAX: f32 = 5.0;

/// Increment used when stepping gamma up or down (49 steps across the range).
pub const GAMMA_STEP: f32 = 0.1;

/// Tone-mapping parameters.
///
/// `black >= white` is allowed and yields a step function rather than an
/// error; see [`ToneLut::build`](super::ToneLut::build).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelParams {
    /// Input intensity at or below which output is 0
    pub black: u8,
    /// Input intensity at or above which output is 255
    pub white: u8,
    /// Curve exponent for the remaining range (output = x^(1/gamma))
    pub gamma: f32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            black: 0,
            white: 255,
            gamma: 1.0,
        }
    }
}

impl LevelParams {
    /// Create parameters, rejecting a gamma that is not a positive finite number.
    ///
    /// Bounds on `black` and `white` come from the `u8` type; the UI range
    /// for gamma is not enforced here.
    pub fn new(black: u8, white: u8, gamma: f32) -> Result<Self> {
        validate_gamma(gamma)?;
        Ok(Self {
            black,
            white,
            gamma,
        })
    }

    /// Whether the black/white interval is empty.
    pub fn is_degenerate(&self) -> bool {
        self.black >= self.white
    }

    /// Copy with a new black point.
    pub fn with_black(self, black: u8) -> Self {
        Self { black, ..self }
    }

    /// Copy with a new white point.
    pub fn with_white(self, white: u8) -> Self {
        Self { white, ..self }
    }

    /// Copy with a new gamma.
    pub fn with_gamma(self, gamma: f32) -> Result<Self> {
        validate_gamma(gamma)?;
        Ok(Self { gamma, ..self })
    }

    /// Move gamma by `steps` increments of [`GAMMA_STEP`], snapping to the
    /// step grid and clamping to [`GAMMA_MIN`]..=[`GAMMA_MAX`].
    pub fn step_gamma(self, steps: i32) -> Self {
        let ticks = (self.gamma / GAMMA_STEP).round() as i32 + steps;
        let gamma = (ticks as f32 * GAMMA_STEP).clamp(GAMMA_MIN, GAMMA_MAX);
        Self { gamma, ..self }
    }

    /// Label for the black point control, e.g. `Black Point: 12`.
    pub fn black_label(&self) -> String {
        format!("Black Point: {}", self.black)
    }

    /// Label for the white point control, e.g. `White Point: 240`.
    pub fn white_label(&self) -> String {
        format!("White Point: {}", self.white)
    }

    /// Label for the gamma control, e.g. `Gamma: 1.00`.
    pub fn gamma_label(&self) -> String {
        format!("Gamma: {:.2}", self.gamma)
    }
}

impl fmt::Display for LevelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.black_label(),
            self.white_label(),
            self.gamma_label()
        )
    }
}

fn validate_gamma(gamma: f32) -> Result<()> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(LevelsError::InvalidParameter(format!(
            "gamma must be a positive number, got {}",
            gamma
        )));
    }
    Ok(())
}
