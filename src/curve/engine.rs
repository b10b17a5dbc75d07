use super::config::{GradingConfig, PASSING_GRADE};

/// Smallest width a curve segment may have. Keeps degenerate configurations finite.
const SEGMENT_EPSILON: f64 = 1e-9;

/// Points outside `[0, inf)` or non-finite points count as zero.
fn sanitize_points(points: f64) -> f64 {
    if points.is_finite() {
        points.max(0.0)
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Segment boundaries `(points_for_4, points_for_6)`, widened so both segments
/// have a strictly positive width.
fn segment_bounds(config: &GradingConfig) -> (f64, f64) {
    let points_for_4 = finite_or_zero(config.points_for_4).max(SEGMENT_EPSILON);
    let points_for_6 = finite_or_zero(config.points_for_6).max(points_for_4 + SEGMENT_EPSILON);
    (points_for_4, points_for_6)
}

/// Unrounded, unclamped grade for a point total.
///
/// Below the points for a 4 the grade is linear between `(0, grade_min)` and
/// `(points_for_4, 4.0)`. From there up the configured algorithm shapes the
/// curve towards `(points_for_6, grade_max)`. Outside those ranges the same law
/// is extrapolated, so the value may leave `[grade_min, grade_max]`.
pub fn raw_grade(points: f64, config: &GradingConfig) -> f64 {
    let points = sanitize_points(points);
    let (points_for_4, points_for_6) = segment_bounds(config);

    if points < points_for_4 {
        config.grade_min + points / points_for_4 * (PASSING_GRADE - config.grade_min)
    } else {
        let t = (points - points_for_4) / (points_for_6 - points_for_4);
        PASSING_GRADE + config.algorithm.forward(t) * (config.grade_max - PASSING_GRADE)
    }
}

/// Grade as reported for a student: clamped to the grade axis and rounded to
/// the configured step.
pub fn grade(points: f64, config: &GradingConfig) -> f64 {
    let raw = raw_grade(points, config);
    let clamped = raw.max(config.grade_min).min(config.grade_max);
    quantize(clamped, config.rounding_step)
        .max(config.grade_min)
        .min(config.grade_max)
}

/// Round to the nearest multiple of `step`, ties away from zero.
///
/// A step that is not a positive finite number leaves the value untouched.
pub fn quantize(value: f64, step: f64) -> f64 {
    if !(step > 0.0 && step.is_finite()) {
        return value;
    }
    // Snap the ratio first so decimal ties like 1.15 / 0.1 land on .5
    let ratio = ((value / step) * 1e9).round() / 1e9;
    let quantized = ratio.round() * step;
    // Drop float noise such as 4.800000000000001
    (quantized * 1e6).round() / 1e6
}

/// Smallest point total whose raw grade reaches `target`.
///
/// Inverts the segment that contains `target` in closed form. Targets at or
/// below `grade_min` need 0 points; targets above `grade_max` extrapolate.
/// The result is never negative and is not capped at `max_possible_points`.
pub fn min_points_for_grade(target: f64, config: &GradingConfig) -> f64 {
    let (points_for_4, points_for_6) = segment_bounds(config);

    if target.is_nan() || target <= config.grade_min {
        return 0.0;
    }
    if target == f64::INFINITY {
        return points_for_6;
    }

    let points = if target <= PASSING_GRADE {
        // target > grade_min here, so the span is positive
        let span = PASSING_GRADE - config.grade_min;
        (target - config.grade_min) / span * points_for_4
    } else {
        let span = config.grade_max - PASSING_GRADE;
        if !(span > 0.0) {
            // Nothing above 4.0 is reachable; settle on the top anchor
            return points_for_6;
        }
        let v = (target - PASSING_GRADE) / span;
        points_for_4 + config.algorithm.inverse(v) * (points_for_6 - points_for_4)
    };

    if points.is_finite() {
        points.max(0.0)
    } else {
        points_for_6
    }
}
