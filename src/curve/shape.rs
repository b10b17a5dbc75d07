use super::config::Algorithm;

impl Algorithm {
    /// Map a normalized position `t` in the passing segment to a normalized grade.
    ///
    /// `forward(0) == 0` and `forward(1) == 1` for every algorithm. Values of `t`
    /// above 1 extrapolate the same law; negative values are treated as 0.
    pub fn forward(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        match self {
            Algorithm::Linear => t,
            Algorithm::Nice => t.sqrt(),
            Algorithm::Hard => t * t,
        }
    }

    /// Exact inverse of [`Algorithm::forward`] on non-negative input.
    pub fn inverse(&self, v: f64) -> f64 {
        let v = v.max(0.0);
        match self {
            Algorithm::Linear => v,
            Algorithm::Nice => v * v,
            Algorithm::Hard => v.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Algorithm; 3] = [Algorithm::Linear, Algorithm::Nice, Algorithm::Hard];

    #[test]
    fn test_shapes_hit_both_anchors() {
        for algorithm in ALL {
            assert_eq!(algorithm.forward(0.0), 0.0, "{}", algorithm);
            assert_eq!(algorithm.forward(1.0), 1.0, "{}", algorithm);
            assert_eq!(algorithm.inverse(0.0), 0.0, "{}", algorithm);
            assert_eq!(algorithm.inverse(1.0), 1.0, "{}", algorithm);
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        for algorithm in ALL {
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let back = algorithm.inverse(algorithm.forward(t));
                assert!((back - t).abs() < 1e-12, "{} at t={}", algorithm, t);
            }
        }
    }

    #[test]
    fn test_nice_above_linear_above_hard() {
        for i in 1..20 {
            let t = i as f64 / 20.0;
            let nice = Algorithm::Nice.forward(t);
            let linear = Algorithm::Linear.forward(t);
            let hard = Algorithm::Hard.forward(t);
            assert!(nice > linear && linear > hard, "t={}", t);
        }
    }

    #[test]
    fn test_negative_input_is_zero() {
        for algorithm in ALL {
            assert_eq!(algorithm.forward(-0.5), 0.0);
            assert_eq!(algorithm.inverse(-0.5), 0.0);
        }
    }

    #[test]
    fn test_extrapolates_beyond_one() {
        assert_eq!(Algorithm::Linear.forward(2.0), 2.0);
        assert_eq!(Algorithm::Hard.forward(2.0), 4.0);
        assert!((Algorithm::Nice.forward(4.0) - 2.0).abs() < 1e-12);
    }
}
