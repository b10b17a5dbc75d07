use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Grade that separates passing from failing results.
///
/// Fixed on the Swiss scale regardless of `grade_min` and `grade_max`.
pub const PASSING_GRADE: f64 = 4.0;

/// Rounding steps a configuration is expected to use.
pub const ROUNDING_STEPS: [f64; 4] = [0.1, 0.25, 0.5, 1.0];

/// Shape of the curve between the points for a 4 and the points for a 6.
///
/// The failing zone below the points for a 4 is always linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// Every point is worth the same grade increment
    #[default]
    Linear,
    /// Concave: generous just above the passing mark, flattens towards the top
    Nice,
    /// Convex: slow just above the passing mark, steepens towards the top
    Hard,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Linear => "LINEAR",
            Algorithm::Nice => "NICE",
            Algorithm::Hard => "HARD",
        };
        f.write_str(name)
    }
}

/// Grading configuration.
///
/// Describes how point totals map onto the grade axis. Missing fields fall back
/// to the defaults (60 points, 55 for a 6, 33 for a 4, grades 1 to 6 in half
/// steps, linear curve).
///
/// Example YAML:
/// ```yaml
/// grading:
///   max_possible_points: 60
///   points_for_6: 55
///   points_for_4: 33
///   rounding_step: 0.5
///   algorithm: NICE
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GradingConfig {
    /// Nominal maximum of the exam. Only bounds display (scale table, curve samples).
    pub max_possible_points: f64,

    /// Points at which the curve reaches `grade_max`
    pub points_for_6: f64,

    /// Points at which the curve reaches the passing grade 4.0
    pub points_for_4: f64,

    pub grade_min: f64,
    pub grade_max: f64,

    /// Quantization step for reported grades (0.1, 0.25, 0.5 or 1.0)
    pub rounding_step: f64,

    pub algorithm: Algorithm,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            max_possible_points: 60.0,
            points_for_6: 55.0,
            points_for_4: 33.0,
            grade_min: 1.0,
            grade_max: 6.0,
            rounding_step: 0.5,
            algorithm: Algorithm::Linear,
        }
    }
}

impl GradingConfig {
    /// Move the points for a 6, keeping the points for a 4 below it.
    ///
    /// If the current points for a 4 would no longer sit below the new value
    /// they are reset to 60% of it.
    pub fn with_points_for_6(mut self, points_for_6: f64) -> Self {
        self.points_for_6 = points_for_6;
        if self.points_for_4 >= points_for_6 {
            self.points_for_4 = points_for_6 * 0.6;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grading_config() {
        let config = GradingConfig::default();

        assert_eq!(config.max_possible_points, 60.0);
        assert_eq!(config.points_for_6, 55.0);
        assert_eq!(config.points_for_4, 33.0);
        assert_eq!(config.grade_min, 1.0);
        assert_eq!(config.grade_max, 6.0);
        assert_eq!(config.rounding_step, 0.5);
        assert_eq!(config.algorithm, Algorithm::Linear);
    }

    #[test]
    fn test_grading_config_serde_roundtrip() {
        let config = GradingConfig {
            algorithm: Algorithm::Hard,
            rounding_step: 0.25,
            ..GradingConfig::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: GradingConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_grading_config_parse() {
        let yaml = r#"
points_for_6: 50
algorithm: NICE
"#;
        let config: GradingConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.points_for_6, 50.0);
        assert_eq!(config.algorithm, Algorithm::Nice);
        // Untouched fields keep their defaults
        assert_eq!(config.points_for_4, 33.0);
        assert_eq!(config.rounding_step, 0.5);
    }

    #[test]
    fn test_empty_grading_config_parse() {
        let config: GradingConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, GradingConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "points_for_5: 40\n";
        assert!(serde_saphyr::from_str::<GradingConfig>(yaml).is_err());
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::Linear.to_string(), "LINEAR");
        assert_eq!(Algorithm::Nice.to_string(), "NICE");
        assert_eq!(Algorithm::Hard.to_string(), "HARD");
    }

    #[test]
    fn test_with_points_for_6_keeps_valid_points_for_4() {
        let config = GradingConfig::default().with_points_for_6(58.0);
        assert_eq!(config.points_for_6, 58.0);
        assert_eq!(config.points_for_4, 33.0);
    }

    #[test]
    fn test_with_points_for_6_resets_points_for_4() {
        let config = GradingConfig::default().with_points_for_6(30.0);
        assert_eq!(config.points_for_6, 30.0);
        assert!((config.points_for_4 - 18.0).abs() < 1e-9);
    }
}
