use super::config::{GradingConfig, PASSING_GRADE, ROUNDING_STEPS};

/// Widest grade axis accepted, in whole grades.
pub const MAX_GRADE_SPAN: f64 = 20.0;

/// Validate grading configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// The curve functions themselves accept any configuration; this is where a
/// caller rejects the ones that would only produce degraded grades.
pub fn validate_grading(config: &GradingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(config.max_possible_points > 0.0 && config.max_possible_points.is_finite()) {
        errors.push("grading.max_possible_points: must be a positive number".to_string());
    }

    if !(config.points_for_4 > 0.0 && config.points_for_4.is_finite()) {
        errors.push("grading.points_for_4: must be a positive number".to_string());
    }

    if !(config.points_for_6 > config.points_for_4 && config.points_for_6.is_finite()) {
        errors.push(format!(
            "grading.points_for_6: must be greater than points_for_4 ({})",
            config.points_for_4
        ));
    }

    if config.points_for_6 > config.max_possible_points {
        errors.push(format!(
            "grading.points_for_6: must not exceed max_possible_points ({})",
            config.max_possible_points
        ));
    }

    if !(config.grade_min < config.grade_max) {
        errors.push("grading.grade_min: must be lower than grade_max".to_string());
    }

    if config.grade_max - config.grade_min > MAX_GRADE_SPAN {
        errors.push(format!(
            "grading.grade_max: grade axis must not span more than {} grades",
            MAX_GRADE_SPAN
        ));
    }

    if !(config.grade_min <= PASSING_GRADE && PASSING_GRADE <= config.grade_max) {
        errors.push(format!(
            "grading: passing grade {:.1} must lie between grade_min and grade_max",
            PASSING_GRADE
        ));
    }

    if !ROUNDING_STEPS
        .iter()
        .any(|step| (step - config.rounding_step).abs() < 1e-9)
    {
        errors.push(format!(
            "grading.rounding_step: invalid '{}' - expected one of 0.1, 0.25, 0.5, 1.0",
            config.rounding_step
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
