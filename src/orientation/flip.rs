//! Resolution of the sign ambiguity of principal axes.
//!
//! An eigen decomposition fixes each axis only up to sign; with the
//! determinant forced to +1 four rotations remain, related by half turns
//! about X, Y and Z.

use glam::DVec3;

use super::Orientation;

/// Half turn about X.
pub const ROT_X_180: Orientation = Orientation::from_rows([
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(0.0, -1.0, 0.0),
    DVec3::new(0.0, 0.0, -1.0),
]);

/// Half turn about Y.
pub const ROT_Y_180: Orientation = Orientation::from_rows([
    DVec3::new(-1.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(0.0, 0.0, -1.0),
]);

/// Half turn about Z.
pub const ROT_Z_180: Orientation = Orientation::from_rows([
    DVec3::new(-1.0, 0.0, 0.0),
    DVec3::new(0.0, -1.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
]);

/// Candidate flips in tie-break order.
pub const FLIPS: [Orientation; 4] =
    [Orientation::IDENTITY, ROT_X_180, ROT_Y_180, ROT_Z_180];

/// The flipped rotation closest to `reference`; ties keep the earlier
/// candidate of [`FLIPS`].
pub(crate) fn closest_to_reference(
    rotation: &Orientation,
    reference: &Orientation,
) -> Orientation {
    let mut best = FLIPS[0].compose(rotation);
    let mut best_score = best.inner_product(reference);
    for flip in &FLIPS[1..] {
        let candidate = flip.compose(rotation);
        let score = candidate.inner_product(reference);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    best
}

/// V-shaped weight: large at both ends of the sequence, smallest in the
/// middle.
fn vee(index: usize, len: usize) -> f64 {
    let mid = len / 2;
    let weight = if index < mid {
        if len % 2 == 1 {
            mid - index
        } else {
            mid - index - 1
        }
    } else {
        index - mid
    };
    weight as f64
}

/// Flip that puts the front/back and top-left/bottom-right balance of the
/// ordered, centered `points` the canonical way round under `rotation`.
pub(crate) fn canonical_flip(
    rotation: &Orientation,
    points: &[DVec3],
) -> Orientation {
    let [axis_x, axis_y, axis_z] = rotation.rows();
    let len = points.len();
    let (mut x_cum, mut y_cum, mut z_cum) = (0.0, 0.0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let weight = i as f64;
        x_cum += weight * p.dot(axis_x);
        y_cum += weight * p.dot(axis_y);
        z_cum += vee(i, len) * p.dot(axis_z);
    }

    let wrong_front_back = z_cum < 0.0;
    let wrong_left_right = if wrong_front_back {
        x_cum + y_cum < 0.0
    } else {
        x_cum - y_cum < 0.0
    };
    match (wrong_front_back, wrong_left_right) {
        (true, true) => ROT_Y_180,
        (true, false) => ROT_X_180,
        (false, true) => ROT_Z_180,
        (false, false) => Orientation::IDENTITY,
    }
}
