/// Number of stations and their spacing for distributing points along `length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iterations {
    /// Number of intervals; always at least 1.
    pub count: usize,
    /// Actual distance between consecutive stations.
    pub spacing: f64,
}

/// Splits `length` into equal intervals no longer than `max_spacing`.
///
/// When `max_spacing` exceeds `length` a single interval spanning the whole
/// length is returned, so at least one station is always placed.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn establish_iterations(length: f64, max_spacing: f64) -> Iterations {
    let count = if max_spacing > length || max_spacing <= 0.0 {
        1
    } else {
        ((length / max_spacing).ceil() as usize).max(1)
    };
    Iterations {
        count,
        spacing: length / count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ten_over_eight_twenty_two() {
        let it = establish_iterations(10.0, 8.22);
        assert_eq!(it.count, 2);
        assert_relative_eq!(it.spacing, 5.0);
    }

    #[test]
    fn shorter_than_spacing_places_one() {
        let it = establish_iterations(5.0, 8.22);
        assert_eq!(it.count, 1);
        assert_relative_eq!(it.spacing, 5.0);
    }

    #[test]
    fn twenty_over_eight_twenty_two() {
        let it = establish_iterations(20.0, 8.22);
        assert_eq!(it.count, 3);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn spacing_never_exceeds_maximum() {
        for length in [8.22, 9.0, 16.44, 16.45, 33.3, 100.0] {
            let it = establish_iterations(length, 8.22);
            assert!(it.count >= 1);
            assert!(it.spacing <= 8.22 + 1e-12, "length={length}");
            assert_relative_eq!(it.spacing * it.count as f64, length, epsilon = 1e-9);
        }
    }
}
