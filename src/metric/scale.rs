use std::f64::consts::PI;

/// Smallest scaled value before the radius transform
pub const SCALE_FLOOR: f64 = 1.0;

/// Radius of a bubble at the floor; also returned when min == max
pub const MIN_RADIUS: f64 = SCALE_FLOOR * PI / 4.0;

/// Map a raw metric value into a bubble radius given the observed bounds.
///
/// The value is expressed in hundredths of the observed range, floored at 1,
/// then multiplied by π/4. Values outside `[min, max]` are not special-cased.
#[inline]
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return MIN_RADIUS;
    }

    let per_unit = range / 100.0;
    let mut scaled = value / per_unit;
    // Keeps radii finite: NaN and overflow land on the floor
    if !scaled.is_finite() || scaled < SCALE_FLOOR {
        scaled = SCALE_FLOOR;
    }

    scaled * PI / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_bounds_returns_min_radius() {
        assert_eq!(scale(5.0, 5.0, 5.0), MIN_RADIUS);
        assert_eq!(scale(0.0, 0.0, 0.0), MIN_RADIUS);
    }

    #[test]
    fn test_max_maps_to_hundred() {
        assert!((scale(100.0, 0.0, 100.0) - 100.0 * PI / 4.0).abs() < 1e-9);
        assert!((scale(50.0, 0.0, 200.0) - 25.0 * PI / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_applies_at_and_below_min() {
        for v in [-50.0, 0.0, 0.5, 1.0] {
            assert_eq!(scale(v, 1.0, 101.0), MIN_RADIUS, "value {v}");
        }
        assert_eq!(scale(f64::NAN, 0.0, 10.0), MIN_RADIUS);
    }

    #[test]
    fn test_non_finite_results_land_on_floor() {
        assert_eq!(scale(f64::INFINITY, 0.0, 10.0), MIN_RADIUS);
        assert_eq!(scale(f64::NEG_INFINITY, 0.0, 10.0), MIN_RADIUS);
        // 1e307 / 0.01 overflows to +inf
        assert_eq!(scale(1e307, 0.0, 1.0), MIN_RADIUS);
        assert!(scale(1e300, 0.0, 1.0).is_finite());
    }

    #[test]
    fn test_values_above_max_are_not_clamped() {
        assert!(scale(300.0, 0.0, 100.0) > scale(100.0, 0.0, 100.0));
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let (min, max) = (3.0, 1_000.0);
        let mut prev = scale(min, min, max);
        assert!(prev >= MIN_RADIUS);
        let mut v = min;
        while v <= max {
            let r = scale(v, min, max);
            assert!(r >= prev, "scale dropped at {v}");
            prev = r;
            v += 7.5;
        }
    }
}
