use nalgebra::{Point3, Vector3};

/// Wraps a single coordinate difference into the half-open interval
/// `(-box_length / 2, box_length / 2]`.
#[inline]
pub fn wrap_component(delta: f64, box_length: f64) -> f64 {
    let half = 0.5 * box_length;
    let wrapped = delta - box_length * (delta / box_length).round();
    if wrapped <= -half {
        wrapped + box_length
    } else {
        wrapped
    }
}

/// Applies the minimum-image convention to a separation vector in a cubic box.
#[inline]
pub fn minimum_image(delta: &Vector3<f64>, box_length: f64) -> Vector3<f64> {
    delta.map(|component| wrap_component(component, box_length))
}

/// Separation vector from `a` to `b`, wrapped when a box length is given.
#[inline]
pub fn separation(a: &Point3<f64>, b: &Point3<f64>, box_length: Option<f64>) -> Vector3<f64> {
    let raw = b - a;
    match box_length {
        Some(length) => minimum_image(&raw, length),
        None => raw,
    }
}

/// Euclidean distance between two points.
///
/// With `Some(box_length)` the shortest distance to any periodic image of `b`
/// is returned; with `None` the plain distance is used.
#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>, box_length: Option<f64>) -> f64 {
    separation(a, b, box_length).norm()
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn distance_along_single_axis_is_unit() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        assert_eq!(distance(&a, &b, None), 1.0);
    }

    #[test]
    fn distance_along_face_diagonal_is_sqrt_two() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 1.0);
        assert!(f64_approx_equal(distance(&a, &b, None), 2.0_f64.sqrt()));
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let a = Point3::new(0.3, -4.1, 2.2);
        let b = Point3::new(7.9, 1.5, -3.0);
        for box_length in [None, Some(10.0)] {
            let ab = distance(&a, &b, box_length);
            let ba = distance(&b, &a, box_length);
            assert!(ab >= 0.0);
            assert!(f64_approx_equal(ab, ba));
        }
    }

    #[test]
    fn minimum_image_matches_raw_distance_inside_half_box() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(3.0, -2.0, 4.5);
        let box_length = 10.0;
        assert!(f64_approx_equal(
            distance(&a, &b, Some(box_length)),
            distance(&a, &b, None)
        ));
    }

    #[test]
    fn minimum_image_wraps_points_displaced_by_box_length() {
        let box_length = 8.0;
        let a = Point3::new(0.5, 0.5, 0.5);
        let b = Point3::new(1.5, 2.0, 0.0);
        let b_shifted = b + Vector3::new(box_length, -box_length, 2.0 * box_length);

        let unwrapped = distance(&a, &b, None);
        assert!(f64_approx_equal(
            distance(&a, &b_shifted, Some(box_length)),
            unwrapped
        ));
    }

    #[test]
    fn minimum_image_picks_nearest_image_across_boundary() {
        let box_length = 10.0;
        let a = Point3::new(0.5, 0.0, 0.0);
        let b = Point3::new(9.5, 0.0, 0.0);
        assert!(f64_approx_equal(distance(&a, &b, Some(box_length)), 1.0));
        assert!(f64_approx_equal(distance(&a, &b, None), 9.0));
    }

    #[test]
    fn wrap_component_maps_half_box_ties_to_positive_half() {
        assert_eq!(wrap_component(5.0, 10.0), 5.0);
        assert_eq!(wrap_component(-5.0, 10.0), 5.0);
        assert_eq!(wrap_component(15.0, 10.0), 5.0);
    }

    #[test]
    fn minimum_image_is_idempotent() {
        let box_length = 6.0;
        let delta = Vector3::new(7.3, -11.9, 3.0);
        let once = minimum_image(&delta, box_length);
        let twice = minimum_image(&once, box_length);
        assert_eq!(once, twice);
        for component in once.iter() {
            assert!(*component > -0.5 * box_length && *component <= 0.5 * box_length);
        }
    }

    #[test]
    fn calculate_rmsd_returns_none_for_mismatched_lengths() {
        let a = vec![Point3::origin()];
        let b = vec![Point3::origin(), Point3::origin()];
        assert!(calculate_rmsd(&a, &b).is_none());
        assert!(calculate_rmsd(&[], &[]).is_none());
    }

    #[test]
    fn calculate_rmsd_of_uniform_shift_equals_shift_length() {
        let a = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        let b: Vec<_> = a.iter().map(|p| p + Vector3::new(0.0, 3.0, 4.0)).collect();
        assert!(f64_approx_equal(calculate_rmsd(&a, &b).unwrap(), 5.0));
    }
}
