//! Sister colors: reproducible variants of a base color for repeated
//! instances of one entity.
//!
//! The base color is moved into YIQ and expressed in cylindrical form
//! (phase of the chroma plane, chroma magnitude, luminance). Each of the
//! three coordinates is nudged by its own additive recurrence on the
//! generalized golden ratio of dimension three, so consecutive instance
//! indices land far apart without any RNG state.
//!
//! Luminance moves inside a window that always lies within `[0, 1]`, so
//! very light or dark bases still yield distinct sisters. Grays have no
//! chroma to vary and get a wider window. A result that leaves the RGB cube
//! keeps its luminance and loses chroma until it fits.

use glam::{DMat3, DVec3};

use super::Color;

/// Plastic-like constant: the real root of `x^4 = x + 1`, the generalized
/// golden ratio for three-dimensional low-discrepancy sequences.
const GOLDEN_3D: f64 = 1.220_744_084_605_759_6;

const PHASE_RADIUS: f64 = 0.6;
const MAGNITUDE_RADIUS: f64 = 0.4;
const LUMA_RADIUS: f64 = 0.2;
/// Extra luminance radius granted to achromatic bases.
const ACHROMATIC_LUMA_RADIUS: f64 = 0.2;
/// Chroma at and above which a base counts as fully chromatic.
const CHROMA_REFERENCE: f64 = 0.1;

/// RGB → YIQ, rows are Y, I, Q.
const RGB_TO_YIQ: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.595_716, -0.274_453, -0.321_263],
    [0.211_456, -0.522_591, 0.311_135],
];

fn rgb_to_yiq() -> DMat3 {
    DMat3::from_cols_array_2d(&RGB_TO_YIQ).transpose()
}

/// Fractional part of `index * alpha`, recentered to `[-0.5, 0.5)` so that
/// index 0 maps to no perturbation.
fn centered(index: usize, alpha: f64) -> f64 {
    let u = (index as f64 * alpha).fract();
    if u < 0.5 {
        u
    } else {
        u - 1.0
    }
}

/// Luminance for offset `u` in `[-0.5, 0.5)`.
///
/// The window of width `2 * radius` is centered on `luma` where possible and
/// shifted inside `[0, 1]` otherwise; positions wrap within it, so distinct
/// offsets never collapse onto a bound.
fn shifted_luma(luma: f64, chroma: f64, u: f64) -> f64 {
    let grayness = (1.0 - chroma / CHROMA_REFERENCE).max(0.0);
    let radius = ACHROMATIC_LUMA_RADIUS.mul_add(grayness, LUMA_RADIUS);
    let width = 2.0 * radius;
    let low = (luma - radius).clamp(0.0, 1.0 - width);
    let t = ((luma - low) / width + u).rem_euclid(1.0);
    t.mul_add(width, low)
}

/// Bring `rgb` into the unit cube by scaling its offset from the gray of
/// luminance `luma`, which lies inside the cube.
fn fit_gamut(rgb: DVec3, luma: f64) -> DVec3 {
    let gray = DVec3::splat(luma);
    let offset = rgb - gray;
    let mut scale: f64 = 1.0;
    for d in offset.to_array() {
        if d > f64::EPSILON {
            scale = scale.min((1.0 - luma) / d);
        } else if d < -f64::EPSILON {
            scale = scale.min(luma / -d);
        }
    }
    gray + offset * scale
}

/// Color for the `index`-th instance of an entity whose base color is
/// `base`. Index 0 is the base color itself.
#[must_use]
pub fn sister_color(base: Color, index: usize) -> Color {
    if index == 0 {
        return base;
    }
    let to_yiq = rgb_to_yiq();
    let yiq = to_yiq * base.to_unit();
    let (luma, i, q) = (yiq.x, yiq.y, yiq.z);
    let chroma = i.hypot(q);

    let phase = q.atan2(i)
        + 2.0 * centered(index, 1.0 / GOLDEN_3D) * PHASE_RADIUS;
    let magnitude = chroma
        * 2.0f64.mul_add(
            centered(index, 1.0 / GOLDEN_3D.powi(2)) * MAGNITUDE_RADIUS,
            1.0,
        );
    let luma =
        shifted_luma(luma, chroma, centered(index, 1.0 / GOLDEN_3D.powi(3)));

    let shifted =
        DVec3::new(luma, magnitude * phase.cos(), magnitude * phase.sin());
    let rgb = to_yiq.inverse() * shifted;
    Color::from_unit(fit_gamut(rgb, luma))
}
