//! Grid snapping.

/// Round `value` to the nearest multiple of `step`.
///
/// A non-positive or non-finite step leaves the value untouched.
pub fn snap(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_half_days() {
        assert_eq!(snap(1.2, 0.5), 1.0);
        assert_eq!(snap(1.3, 0.5), 1.5);
        assert_eq!(snap(-0.8, 0.5), -1.0);
    }

    #[test]
    fn snaps_to_transfer_grid() {
        assert!((snap(0.123, 0.05) - 0.1).abs() < 1e-12);
        assert!((snap(0.126, 0.05) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn snapping_twice_changes_nothing() {
        for value in [0.0, 0.26, 1.74, -3.3, 12.345] {
            for step in [0.5, 0.05] {
                let once = snap(value, step);
                assert_eq!(snap(once, step), once);
            }
        }
    }

    #[test]
    fn invalid_step_is_identity() {
        assert_eq!(snap(1.23, 0.0), 1.23);
        assert_eq!(snap(1.23, f64::NAN), 1.23);
    }
}
