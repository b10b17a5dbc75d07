use serde::Serialize;

use super::config::{GradingConfig, PASSING_GRADE};
use super::engine::{min_points_for_grade, raw_grade};

/// Nudge applied to the rounding boundary so a lookup never lands exactly on a
/// segment joint or reports points that still belong to the grade below.
const BOUNDARY_EPSILON: f64 = 0.0001;

/// Upper bound on scale table rows, reached only with absurdly small steps.
const MAX_SCALE_ROWS: usize = 1_000;

/// Default number of intervals used when sampling the curve for plotting.
pub const DEFAULT_CURVE_STEPS: usize = 50;

/// One row of a grade scale table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleRow {
    pub grade: f64,
    /// Points needed to be rounded up to `grade`
    pub min_points: f64,
    pub passing: bool,
}

/// A point on the continuous (unrounded) grading curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub points: f64,
    pub grade: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build the grade scale table from `grade_max` down to `grade_min`.
///
/// Each row reports the points needed to reach the rounding boundary of its
/// grade, i.e. half a step below it. The `grade_min` row is always 0 points.
/// Points are capped to `[0, max_possible_points]`.
pub fn grade_scale(config: &GradingConfig) -> Vec<ScaleRow> {
    let step = config.rounding_step;
    if !(step > 0.0 && step.is_finite()) || !(config.grade_max >= config.grade_min) {
        return Vec::new();
    }

    let max_points = config.max_possible_points.max(0.0);
    let mut rows = Vec::new();

    for i in 0..MAX_SCALE_ROWS {
        let current = round_to(config.grade_max - i as f64 * step, 2);
        if current < config.grade_min {
            break;
        }

        if current == config.grade_min {
            rows.push(ScaleRow {
                grade: current,
                min_points: 0.0,
                passing: current >= PASSING_GRADE,
            });
            continue;
        }

        let boundary = (current - step / 2.0).max(config.grade_min);
        let points = min_points_for_grade(boundary + BOUNDARY_EPSILON, config)
            .max(0.0)
            .min(max_points);

        rows.push(ScaleRow {
            grade: current,
            min_points: points,
            passing: current >= PASSING_GRADE,
        });
    }

    rows
}

/// Sample the raw curve at `steps + 1` evenly spaced point totals across
/// `[0, max_possible_points]`, plus both anchors, ordered by points.
pub fn sample_curve(config: &GradingConfig, steps: usize) -> Vec<CurvePoint> {
    let steps = steps.max(1);
    let max_points = if config.max_possible_points.is_finite() {
        config.max_possible_points.max(0.0)
    } else {
        0.0
    };
    let step_size = max_points / steps as f64;

    let mut samples: Vec<CurvePoint> = (0..=steps)
        .map(|i| {
            let points = i as f64 * step_size;
            CurvePoint {
                points: round_to(points, 1),
                grade: raw_grade(points, config),
            }
        })
        .collect();

    samples.push(CurvePoint {
        points: config.points_for_4,
        grade: PASSING_GRADE,
    });
    samples.push(CurvePoint {
        points: config.points_for_6,
        grade: config.grade_max,
    });

    samples.sort_by(|a, b| {
        a.points
            .partial_cmp(&b.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    samples
}
