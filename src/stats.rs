use serde::Serialize;

use crate::curve::{GradingConfig, PASSING_GRADE};

/// Descriptive statistics over a roster's grades.
///
/// Every field is 0 for an empty roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Percentage of grades at or above 4.0, 0 to 100
    pub pass_rate: u32,
    /// Population standard deviation
    pub std_dev: f64,
}

/// A whole-grade band of the grade distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub label: String,
    pub lower: f64,
    pub count: usize,
    pub passing: bool,
}

/// Upper bound on distribution bands; wider grade axes get no distribution.
const MAX_DISTRIBUTION_BANDS: f64 = 100.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute roster statistics from scratch.
///
/// Non-finite grades are skipped.
pub fn compute_stats(grades: &[f64]) -> Stats {
    let mut sorted: Vec<f64> = grades.iter().copied().filter(|g| g.is_finite()).collect();
    if sorted.is_empty() {
        return Stats::default();
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let passing = sorted.iter().filter(|g| **g >= PASSING_GRADE).count();
    let pass_rate = (passing as f64 / n as f64 * 100.0).round() as u32;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n as f64;
        variance.sqrt()
    };

    Stats {
        average: round2(mean),
        median: round2(median),
        min: sorted[0],
        max: sorted[n - 1],
        pass_rate,
        std_dev: round2(std_dev),
    }
}

/// Count grades per whole-grade band, from `floor(grade_min)` up to
/// `floor(grade_max)`.
///
/// Grades below the first band land in it, grades above the last band land in
/// the last. An integral `grade_max` gets its own band labelled e.g. "6.0".
/// Axes spanning more than 100 bands yield no buckets.
pub fn grade_distribution(grades: &[f64], config: &GradingConfig) -> Vec<DistributionBucket> {
    if !(config.grade_min.is_finite() && config.grade_max.is_finite())
        || config.grade_max < config.grade_min
        || config.grade_max.floor() - config.grade_min.floor() >= MAX_DISTRIBUTION_BANDS
    {
        return Vec::new();
    }

    let first = config.grade_min.floor() as i64;
    let last = config.grade_max.floor() as i64;

    let mut buckets: Vec<DistributionBucket> = (first..=last)
        .map(|band| {
            let lower = band as f64;
            let label = if band == last && lower == config.grade_max {
                format!("{:.1}", lower)
            } else {
                format!("{:.1}-{:.1}", lower, lower + 0.9)
            };
            DistributionBucket {
                label,
                lower,
                count: 0,
                passing: lower >= PASSING_GRADE,
            }
        })
        .collect();

    for g in grades.iter().filter(|g| g.is_finite()) {
        let band = (g.floor() as i64).clamp(first, last);
        buckets[(band - first) as usize].count += 1;
    }

    buckets
}
