//! Principal axes of a point cloud through the Jacobi eigenvalue method on
//! its 3×3 covariance matrix.

use glam::DVec3;

const MAX_SWEEPS: usize = 50;
const OFF_DIAGONAL_EPS: f64 = 1e-30;

/// Centroid of `points`; zero for an empty slice.
pub(crate) fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Row-major covariance of points already centered on their centroid.
fn covariance(centered: &[DVec3]) -> [[f64; 3]; 3] {
    let mut m = [[0.0f64; 3]; 3];
    for p in centered {
        let v = p.to_array();
        for (row, out) in m.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell += v[row] * v[col];
            }
        }
    }
    m
}

/// Zero `a[p][q]` with one Givens rotation, accumulating it into `v`.
fn jacobi_rotate(
    a: &mut [[f64; 3]; 3],
    v: &mut [[f64; 3]; 3],
    p: usize,
    q: usize,
) {
    let app = a[p][p];
    let aqq = a[q][q];
    let apq = a[p][q];

    let tau = (aqq - app) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + tau.hypot(1.0))
    } else {
        -1.0 / (-tau + tau.hypot(1.0))
    };
    let c = 1.0 / t.hypot(1.0);
    let s = t * c;

    a[p][p] = app - t * apq;
    a[q][q] = aqq + t * apq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    let r = 3 - p - q;
    let arp = a[r][p];
    let arq = a[r][q];
    a[r][p] = c * arp - s * arq;
    a[p][r] = a[r][p];
    a[r][q] = s * arp + c * arq;
    a[q][r] = a[r][q];

    for row in v.iter_mut() {
        let vp = row[p];
        let vq = row[q];
        row[p] = c * vp - s * vq;
        row[q] = s * vp + c * vq;
    }
}

/// Eigenvalues and eigenvector columns of a symmetric matrix.
fn jacobi_eigen(m: [[f64; 3]; 3]) -> ([f64; 3], [DVec3; 3]) {
    let mut a = m;
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    for _ in 0..MAX_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < OFF_DIAGONAL_EPS {
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            if a[p][q].abs() > f64::EPSILON * (a[p][p].abs() + a[q][q].abs()) {
                jacobi_rotate(&mut a, &mut v, p, q);
            }
        }
    }
    let column = |j: usize| DVec3::new(v[0][j], v[1][j], v[2][j]);
    ([a[0][0], a[1][1], a[2][2]], [column(0), column(1), column(2)])
}

/// Principal axes of `points`, strongest first, each of unit length.
///
/// The sort is stable, so axes of equal variance keep the order in which
/// the eigen decomposition produced them.
pub(crate) fn principal_axes(points: &[DVec3]) -> [DVec3; 3] {
    let center = centroid(points);
    let centered: Vec<DVec3> = points.iter().map(|&p| p - center).collect();
    let (values, vectors) = jacobi_eigen(covariance(&centered));

    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| values[j].total_cmp(&values[i]));
    order.map(|i| vectors[i].normalize_or(DVec3::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_cloud() {
        let mut points = Vec::new();
        for i in -5..=5 {
            let t = f64::from(i);
            points.push(DVec3::new(0.0, 10.0 * t, 0.0));
            points.push(DVec3::new(3.0 * t, 0.0, 0.0));
            points.push(DVec3::new(0.0, 0.0, 0.5 * t));
        }
        let [primary, secondary, tertiary] = principal_axes(&points);
        assert!((primary.y.abs() - 1.0).abs() < 1e-9);
        assert!((secondary.x.abs() - 1.0).abs() < 1e-9);
        assert!((tertiary.z.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn eigen_decomposition_reconstructs_matrix() {
        let m = [[4.0, 1.0, 0.5], [1.0, 3.0, 0.25], [0.5, 0.25, 1.0]];
        let (values, vectors) = jacobi_eigen(m);
        for (value, vector) in values.iter().zip(vectors) {
            let mv = DVec3::new(
                m[0][0] * vector.x + m[0][1] * vector.y + m[0][2] * vector.z,
                m[1][0] * vector.x + m[1][1] * vector.y + m[1][2] * vector.z,
                m[2][0] * vector.x + m[2][1] * vector.y + m[2][2] * vector.z,
            );
            assert!((mv - *value * vector).length() < 1e-9);
        }
    }

    #[test]
    fn centroid_of_nothing_is_origin() {
        assert_eq!(centroid(&[]), DVec3::ZERO);
    }
}
