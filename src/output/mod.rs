pub mod formatter;

pub use formatter::{
    format_curve_tsv, format_distribution, format_grade, format_points, format_scale_table,
    format_scale_tsv, format_stats, format_stats_tsv, format_student_table, format_students_tsv,
    should_use_colors, GradedStudent,
};
