//! Pure point helpers used to size and orient the emoji features.

use crate::shared::point::Point;

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Direction of the vector from `a` to `b` in radians, in `(-π, π]`.
pub fn angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    // ── distance ────────────────────────────────────────────────────

    #[test]
    fn test_distance_3_4_5() {
        assert_relative_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }

    #[rstest]
    #[case(Point::new(0.0, 0.0), Point::new(3.0, 4.0))]
    #[case(Point::new(-12.5, 8.0), Point::new(40.0, -3.25))]
    #[case(Point::new(100.0, 100.0), Point::new(100.0, 100.0))]
    fn test_distance_symmetric(#[case] a: Point, #[case] b: Point) {
        assert_relative_eq!(distance(a, b), distance(b, a));
    }

    #[rstest]
    #[case(Point::new(0.0, 0.0))]
    #[case(Point::new(-7.0, 311.5))]
    fn test_distance_to_self_is_zero(#[case] a: Point) {
        assert_relative_eq!(distance(a, a), 0.0);
    }

    // ── midpoint ────────────────────────────────────────────────────

    #[test]
    fn test_midpoint() {
        let m = midpoint(Point::new(0.0, 10.0), Point::new(10.0, 20.0));
        assert_relative_eq!(m.x, 5.0);
        assert_relative_eq!(m.y, 15.0);
    }

    // ── angle ───────────────────────────────────────────────────────

    #[rstest]
    #[case::right(Point::new(1.0, 0.0), 0.0)]
    #[case::down(Point::new(0.0, 1.0), FRAC_PI_2)]
    #[case::diagonal(Point::new(1.0, 1.0), FRAC_PI_4)]
    #[case::left(Point::new(-1.0, 0.0), PI)]
    fn test_angle_cardinal_directions(#[case] b: Point, #[case] expected: f64) {
        assert_relative_eq!(angle(Point::new(0.0, 0.0), b), expected);
    }

    #[rstest]
    #[case(0.5)]
    #[case(3.0)]
    #[case(250.0)]
    fn test_angle_invariant_under_scaling(#[case] k: f64) {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(14.0, 17.0);
        let scaled = Point::new(a.x + (b.x - a.x) * k, a.y + (b.y - a.y) * k);
        assert_relative_eq!(angle(a, b), angle(a, scaled), epsilon = 1e-12);
    }
}
