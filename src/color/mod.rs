//! Turning raw channel counts into a colour.
//!
//! [`normalize`] divides each colour channel by the clear channel and runs
//! the ratios through a calibration matrix, giving components in `0.0..=1.0`.
//! [`classify`] then names the colour by looking it up in a table of RGB boxes.
mod classify;
mod normalize;

pub use classify::{classify, classify_with, ColorBox, ColorName, DEFAULT_COLOR_TABLE};
pub use normalize::{
    normalize, normalize_ratios, CalibrationMatrix, CalibrationVariant, NormalizedColor,
    CALIBRATION_MATRICES,
};
