//! Rotation about a pivot with a single screen-space y-flip.
//!
//! Survey coordinates use the mathematical convention of +Y pointing
//! upward; screen space inverts the vertical axis. The flip is applied
//! exactly once, **after** rotation -- flipping first would mirror the
//! rotation direction.

use crate::types::Point;

/// Rotate `(x, y)` by `angle_degrees` about `pivot`, then negate the
/// resulting y coordinate.
///
/// Pure and total: defined for all finite inputs.
#[must_use]
pub fn rotate(x: f64, y: f64, angle_degrees: f64, pivot: Point) -> Point {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let x = x - pivot.x;
    let y = y - pivot.y;

    let rotated_x = x.mul_add(cos, -(y * sin));
    let rotated_y = y.mul_add(cos, x * sin);

    Point::new(rotated_x + pivot.x, -(rotated_y + pivot.y))
}

/// The rotation pivot used throughout: half the coordinate range of
/// each axis, measured from zero.
///
/// This is `(max - min) / 2` per axis, **not** the absolute midpoint
/// `(min + max) / 2`. The distinction matters whenever the data does
/// not start at the origin: the pivot deliberately lands at the
/// half-range offset, and both the static track transform and the
/// per-frame car projection depend on that exact placement.
///
/// `xs` and `ys` must be non-empty; callers validate this before
/// computing a pivot.
#[must_use]
pub fn range_midpoint_pivot(xs: &[f64], ys: &[f64]) -> Point {
    Point::new(half_range(xs), half_range(ys))
}

fn half_range(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (max - min) / 2.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "expected ({}, {}), got ({}, {})",
            expected.x,
            expected.y,
            actual.x,
            actual.y,
        );
    }

    #[test]
    fn zero_angle_is_pure_y_flip() {
        // With no rotation the transform reduces to (x, -y), regardless
        // of the pivot.
        let p = rotate(3.0, 7.0, 0.0, Point::new(100.0, -50.0));
        assert_close(p, Point::new(3.0, -7.0));
    }

    #[test]
    fn quarter_turn_about_origin() {
        // (1, 0) rotated 90 degrees lands at (0, 1); the flip then
        // sends it to (0, -1).
        let p = rotate(1.0, 0.0, 90.0, Point::new(0.0, 0.0));
        assert_close(p, Point::new(0.0, -1.0));
    }

    #[test]
    fn rotation_about_offset_pivot() {
        // Rotating (2, 0) by 180 degrees about (1, 0) lands at (0, 0);
        // the flip leaves the origin fixed.
        let p = rotate(2.0, 0.0, 180.0, Point::new(1.0, 0.0));
        assert_close(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn double_application_with_x_axis_pivot_is_identity() {
        // The y-flip conjugates the rotation into its inverse, so for
        // pivots on the x axis applying the transform twice with the
        // same angle returns the original point.
        let pivot = Point::new(12.5, 0.0);
        for angle in [0.0, 17.0, 45.0, 90.0, 133.7, 270.0] {
            let original = Point::new(3.25, -8.5);
            let once = rotate(original.x, original.y, angle, pivot);
            let twice = rotate(once.x, once.y, angle, pivot);
            assert!(
                (twice.x - original.x).abs() < EPSILON
                    && (twice.y - original.y).abs() < EPSILON,
                "angle {angle}: expected ({}, {}), got ({}, {})",
                original.x,
                original.y,
                twice.x,
                twice.y,
            );
        }
    }

    #[test]
    fn pivot_is_half_range_not_absolute_midpoint() {
        // xs span [10, 20]: half-range pivot is 5, not the midpoint 15.
        let pivot = range_midpoint_pivot(&[10.0, 12.0, 20.0], &[100.0, 140.0]);
        assert!((pivot.x - 5.0).abs() < EPSILON, "got {}", pivot.x);
        assert!((pivot.y - 20.0).abs() < EPSILON, "got {}", pivot.y);
    }

    #[test]
    fn pivot_of_origin_anchored_range() {
        // When the data starts at zero the half-range and the midpoint
        // coincide.
        let pivot = range_midpoint_pivot(&[0.0, 10.0], &[0.0, 10.0]);
        assert_close(pivot, Point::new(5.0, 5.0));
    }
}
