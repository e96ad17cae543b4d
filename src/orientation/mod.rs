//! Canonical camera orientation of a structure.
//!
//! [`canonical_rotation`] turns a set of atom sites into a proper rotation
//! whose rows are the principal axes of the selected atoms, strongest
//! first. Sign ambiguities are resolved either against a reference
//! rotation (so a sub-selection is framed like its parent structure) or by
//! a fixed balance rule on the atom sequence. Named views are then a fixed
//! rotation composed on top, see [`view_rotation`].

mod flip;
mod pca;

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

pub use flip::{FLIPS, ROT_X_180, ROT_Y_180, ROT_Z_180};

use crate::model::View;

/// Minimum number of atoms an atom-selection stage must yield to be used.
pub const MIN_ATOMS: usize = 3;

/// A 3×3 rotation stored as rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    rows: [DVec3; 3],
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Orientation = Orientation::from_rows([
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
    ]);

    /// Build from rows.
    #[must_use]
    pub const fn from_rows(rows: [DVec3; 3]) -> Self {
        Self { rows }
    }

    /// Build from a glam matrix.
    #[must_use]
    pub fn from_mat3(m: DMat3) -> Self {
        Self::from_rows([m.row(0), m.row(1), m.row(2)])
    }

    /// The rows, first is the primary axis.
    #[must_use]
    pub fn rows(&self) -> [DVec3; 3] {
        self.rows
    }

    /// As a glam matrix.
    #[must_use]
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(self.rows[0], self.rows[1], self.rows[2]).transpose()
    }

    /// Determinant; +1 for every orientation this module produces.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.to_mat3().determinant()
    }

    /// Element-wise inner product, the similarity used to compare
    /// candidate rotations.
    #[must_use]
    pub fn inner_product(&self, other: &Orientation) -> f64 {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| a.dot(*b))
            .sum()
    }

    /// Matrix product `self × other`: `other` is applied first.
    #[must_use]
    pub fn compose(&self, other: &Orientation) -> Orientation {
        Self::from_mat3(self.to_mat3() * other.to_mat3())
    }

    /// Rotate a point.
    #[must_use]
    pub fn apply(&self, point: DVec3) -> DVec3 {
        DVec3::new(
            self.rows[0].dot(point),
            self.rows[1].dot(point),
            self.rows[2].dot(point),
        )
    }

    /// Largest element-wise deviation from `other`.
    #[must_use]
    pub fn max_deviation(&self, other: &Orientation) -> f64 {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| (*a - *b).abs().max_element())
            .fold(0.0, f64::max)
    }
}

/// One atom of the structure being framed, in model order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomSite {
    /// Cartesian coordinates in ångström.
    pub position: DVec3,
    /// Element symbol.
    pub element: String,
    /// Atom name, e.g. `CA`.
    pub atom_name: String,
    /// Whether the atom belongs to a water entity.
    pub is_water: bool,
}

impl AtomSite {
    /// Polymer trace atom: C-alpha of amino acids or P of nucleotides.
    #[must_use]
    pub fn is_trace(&self) -> bool {
        (self.atom_name == "CA" && self.element.eq_ignore_ascii_case("C"))
            || (self.atom_name == "P" && self.element.eq_ignore_ascii_case("P"))
    }

    /// Hydrogen or deuterium.
    #[must_use]
    pub fn is_hydrogen(&self) -> bool {
        self.element.eq_ignore_ascii_case("H")
            || self.element.eq_ignore_ascii_case("D")
    }
}

/// Positions used for orientation: trace atoms, else heavy non-water
/// atoms, else everything. The first stage with at least [`MIN_ATOMS`]
/// atoms wins.
#[must_use]
pub fn select_positions(atoms: &[AtomSite]) -> Vec<DVec3> {
    let stages: [&dyn Fn(&AtomSite) -> bool; 2] = [
        &AtomSite::is_trace,
        &|a: &AtomSite| !a.is_hydrogen() && !a.is_water,
    ];
    for (stage, keep) in stages.iter().enumerate() {
        let selected: Vec<DVec3> = atoms
            .iter()
            .filter(|a| keep(*a))
            .map(|a| a.position)
            .collect();
        if selected.len() >= MIN_ATOMS {
            log::debug!("orientation uses {} atoms from stage {stage}", selected.len());
            return selected;
        }
    }
    atoms.iter().map(|a| a.position).collect()
}

/// Canonical rotation of `atoms`, optionally made consistent with
/// `reference`.
///
/// Returns the identity when no atom is available.
#[must_use]
pub fn canonical_rotation(
    atoms: &[AtomSite],
    reference: Option<&Orientation>,
) -> Orientation {
    rotation_of_points(&select_positions(atoms), reference)
}

/// [`canonical_rotation`] over bare positions, in sequence order.
#[must_use]
pub fn rotation_of_points(
    points: &[DVec3],
    reference: Option<&Orientation>,
) -> Orientation {
    if points.is_empty() {
        return Orientation::IDENTITY;
    }
    let mut rows = pca::principal_axes(points);
    if rows.iter().any(|r| *r == DVec3::ZERO) {
        return Orientation::IDENTITY;
    }
    if Orientation::from_rows(rows).determinant() < 0.0 {
        rows[2] = -rows[2];
    }
    let rotation = Orientation::from_rows(rows);

    match reference {
        Some(reference) => flip::closest_to_reference(&rotation, reference),
        None => {
            let center = pca::centroid(points);
            let centered: Vec<DVec3> =
                points.iter().map(|&p| p - center).collect();
            flip::canonical_flip(&rotation, &centered).compose(&rotation)
        }
    }
}

/// Fixed rotation turning the front view into `view`.
#[must_use]
pub fn view_matrix(view: View) -> Orientation {
    match view {
        View::Front => Orientation::IDENTITY,
        // 270° about Y
        View::Side => Orientation::from_rows([
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        ]),
        // 90° about X
        View::Top => Orientation::from_rows([
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]),
    }
}

/// Camera rotation for `view` of a structure with canonical rotation
/// `canonical`.
#[must_use]
pub fn view_rotation(canonical: &Orientation, view: View) -> Orientation {
    view_matrix(view).compose(canonical)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_cloud(seed: u64, n: usize) -> Vec<DVec3> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                DVec3::new(
                    rng.random_range(-30.0..30.0),
                    rng.random_range(-12.0..12.0),
                    rng.random_range(-4.0..4.0),
                )
            })
            .collect()
    }

    fn atom(position: DVec3, element: &str, name: &str) -> AtomSite {
        AtomSite {
            position,
            element: element.to_owned(),
            atom_name: name.to_owned(),
            is_water: false,
        }
    }

    fn assert_proper(r: &Orientation) {
        let m = r.to_mat3();
        let should_be_identity = m * m.transpose();
        assert!(
            Orientation::from_mat3(should_be_identity)
                .max_deviation(&Orientation::IDENTITY)
                < 1e-9
        );
        assert!((r.determinant() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn random_clouds_give_proper_rotations() {
        for seed in 0..20 {
            let points = random_cloud(seed, 50 + seed as usize);
            assert_proper(&rotation_of_points(&points, None));
            assert_proper(&rotation_of_points(
                &points,
                Some(&ROT_Y_180),
            ));
        }
    }

    #[test]
    fn deterministic() {
        let points = random_cloud(7, 120);
        let a = rotation_of_points(&points, None);
        let b = rotation_of_points(&points, None);
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_frame_is_a_fixed_point() {
        for seed in 0..10 {
            let points = random_cloud(seed, 80);
            let r = rotation_of_points(&points, None);
            let rotated: Vec<DVec3> =
                points.iter().map(|&p| r.apply(p)).collect();
            let again = rotation_of_points(&rotated, None);
            assert!(
                again.max_deviation(&Orientation::IDENTITY) < 1e-6,
                "seed {seed}: {again:?}"
            );
        }
    }

    #[test]
    fn reference_mode_reproduces_parent_framing() {
        let points = random_cloud(3, 60);
        let canonical = rotation_of_points(&points, None);
        for flip in FLIPS {
            let reference = flip.compose(&canonical);
            let r = rotation_of_points(&points, Some(&reference));
            assert!(r.max_deviation(&reference) < 1e-9);
            assert_proper(&r);
        }
    }

    #[test]
    fn flips_preserve_handedness() {
        let r = rotation_of_points(&random_cloud(11, 40), None);
        for flip in FLIPS {
            assert!((flip.compose(&r).determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn no_atoms_is_identity() {
        assert_eq!(canonical_rotation(&[], None), Orientation::IDENTITY);
    }

    #[test]
    fn selection_prefers_trace_atoms() {
        let mut atoms: Vec<AtomSite> = (0..4)
            .map(|i| atom(DVec3::splat(f64::from(i)), "C", "CA"))
            .collect();
        atoms.push(atom(DVec3::new(100.0, 0.0, 0.0), "O", "O"));
        assert_eq!(select_positions(&atoms).len(), 4);
    }

    #[test]
    fn selection_falls_back_to_heavy_atoms_then_all() {
        let ligand = vec![
            atom(DVec3::ZERO, "C", "C1"),
            atom(DVec3::X, "C", "C2"),
            atom(DVec3::Y, "N", "N1"),
            atom(DVec3::Z, "H", "H1"),
        ];
        assert_eq!(select_positions(&ligand).len(), 3);
        let hydrogens = vec![atom(DVec3::ZERO, "H", "H1"), atom(DVec3::X, "H", "H2")];
        assert_eq!(select_positions(&hydrogens).len(), 2);
    }

    #[test]
    fn elongated_molecule_lies_along_x() {
        let points: Vec<DVec3> = (0..30)
            .map(|i| DVec3::new(0.1 * f64::from(i % 3), 2.0 * f64::from(i), 0.3 * f64::from(i % 5)))
            .collect();
        let r = rotation_of_points(&points, None);
        assert!(r.rows()[0].y.abs() > 0.99);
    }

    #[test]
    fn views_are_quarter_turns() {
        let canonical = rotation_of_points(&random_cloud(5, 30), None);
        for view in View::ALL {
            assert_proper(&view_rotation(&canonical, view));
        }
        assert_eq!(view_rotation(&canonical, View::Front), canonical);
        let side = view_matrix(View::Side);
        assert_eq!(side.apply(DVec3::X), DVec3::new(0.0, 0.0, 1.0));
        let top = view_matrix(View::Top);
        assert_eq!(top.apply(DVec3::Y), DVec3::new(0.0, 0.0, 1.0));
    }
}
