pub mod config;
pub mod engine;
pub mod scale;
pub mod shape;
pub mod validation;

pub use config::*;
pub use engine::{grade, min_points_for_grade, quantize, raw_grade};
pub use scale::{grade_scale, sample_curve, CurvePoint, ScaleRow, DEFAULT_CURVE_STEPS};
pub use validation::validate_grading;
