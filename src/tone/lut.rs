//! Levels lookup table.

use super::params::LevelParams;

/// Number of entries in a tone lookup table, one per 8-bit intensity.
pub const LUT_SIZE: usize = 256;

/// Precomputed intensity mapping for one set of [`LevelParams`].
///
/// The same table is applied to the red, green, and blue channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLut {
    table: [u8; LUT_SIZE],
}

impl ToneLut {
    /// Build the table for `params`.
    ///
    /// For each intensity `i`:
    /// - `i <= black` maps to 0
    /// - `i >= white` maps to 255
    /// - otherwise `x = (i - black) / (white - black)` and the output is
    ///   `floor(x^(1/gamma) * 255 + 0.5)`
    ///
    /// When `black >= white` the open interval is empty and the table is a hard
    /// step. Inputs at or below `black` map to 0 and the rest to 255, except
    /// that `black == white` steps at the shared value itself.
    pub fn build(params: &LevelParams) -> Self {
        let mut table = [0u8; LUT_SIZE];

        if params.is_degenerate() {
            let step = if params.black == params.white {
                params.black as usize
            } else {
                params.black as usize + 1
            };
            for (i, out) in table.iter_mut().enumerate() {
                *out = if i < step { 0 } else { 255 };
            }
            return Self { table };
        }

        let black = params.black as f64;
        let span = (params.white - params.black) as f64;
        let inv_gamma = 1.0 / params.gamma as f64;

        for (i, out) in table.iter_mut().enumerate() {
            *out = if i <= params.black as usize {
                0
            } else if i >= params.white as usize {
                255
            } else {
                let x = (i as f64 - black) / span;
                let y = x.powf(inv_gamma);
                // `as` saturates, so a NaN from a nonsensical gamma lands on 0
                (y * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
            };
        }

        Self { table }
    }

    /// The table that leaves every intensity unchanged.
    pub fn identity() -> Self {
        Self::build(&LevelParams::default())
    }

    /// Map one intensity through the table.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// The raw table.
    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.table
    }

    /// Whether the table maps every intensity to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| v as usize == i)
    }
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}
