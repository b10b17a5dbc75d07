use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::curve::{CurvePoint, ScaleRow};
use crate::stats::{DistributionBucket, Stats};

/// A roster entry with its computed grade, for display
#[derive(Debug, Clone, Serialize)]
pub struct GradedStudent<'a> {
    pub name: &'a str,
    pub points: f64,
    pub grade: f64,
    pub passing: bool,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a grade with as many decimals as the rounding step needs
/// ("5" for whole steps, "4.75" for quarter steps, "4.5" otherwise)
pub fn format_grade(grade: f64, rounding_step: f64) -> String {
    let decimals = if rounding_step == 1.0 {
        0
    } else if rounding_step == 0.25 {
        2
    } else {
        1
    };
    format!("{:.*}", decimals, grade)
}

/// Format a point total, dropping a trailing ".0"
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{}", points)
    }
}

fn paint_grade(text: &str, passing: bool, use_colors: bool) -> String {
    if !use_colors {
        text.to_string()
    } else if passing {
        text.green().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format graded students as a table with columns: Index, Name, Points, Grade
/// Index column: 3 chars (fits "99."), right-aligned
/// Points column is right-aligned, 8 chars wide
pub fn format_student_table(
    students: &[GradedStudent],
    rounding_step: f64,
    use_colors: bool,
) -> String {
    if students.is_empty() {
        return "No students to grade.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let points_width = 8;
    let grade_width = 5;
    let separator = "  ";
    let fixed_width = index_width + points_width + grade_width + separator.len() * 3;

    let longest = students
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    let name_width = match term_width {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    students
        .iter()
        .enumerate()
        .map(|(idx, student)| {
            let index_str = format!("{:>2}.", idx + 1);
            let name = truncate_name(student.name, name_width);
            let name_padded = format!("{:<width$}", name, width = name_width);
            let points_str = format!(
                "{:>width$}",
                format_points(student.points),
                width = points_width
            );
            let grade_str = format!(
                "{:>width$}",
                format_grade(student.grade, rounding_step),
                width = grade_width
            );
            let grade_str = paint_grade(&grade_str, student.passing, use_colors);

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    separator,
                    name_padded,
                    separator,
                    points_str,
                    separator,
                    grade_str
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    index_str, separator, name_padded, separator, points_str, separator, grade_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format graded students as tab-separated values for scripting
/// Columns: name, points, grade, passing (no headers, no colors)
pub fn format_students_tsv(students: &[GradedStudent], rounding_step: f64) -> String {
    students
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}\t{}",
                s.name,
                format_points(s.points),
                format_grade(s.grade, rounding_step),
                s.passing
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the grade scale table: one row per grade with the minimum points
/// needed to reach it
pub fn format_scale_table(rows: &[ScaleRow], rounding_step: f64, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No grade scale for this configuration.".to_string();
    }

    let header = format!("{:>5}  {:>11}", "Grade", "Min. points");
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    for row in rows {
        let grade_str = format!("{:>5}", format_grade(row.grade, rounding_step));
        lines.push(format!(
            "{}  {:>11.2}",
            paint_grade(&grade_str, row.passing, use_colors),
            row.min_points
        ));
    }
    lines.join("\n")
}

/// Format the grade scale as tab-separated values
/// Columns: grade, min points
pub fn format_scale_tsv(rows: &[ScaleRow], rounding_step: f64) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{:.2}",
                format_grade(row.grade, rounding_step),
                row.min_points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format roster statistics as a short block
pub fn format_stats(stats: &Stats, use_colors: bool) -> String {
    let pass_rate = format!("{}%", stats.pass_rate);
    // 80% or more counts as a healthy class
    let pass_rate = if !use_colors {
        pass_rate
    } else if stats.pass_rate >= 80 {
        pass_rate.green().to_string()
    } else {
        pass_rate.yellow().to_string()
    };

    format!(
        "Average: {}\nMedian: {}\nMin: {}\nMax: {}\nPass rate: {}\nStd. dev.: {}",
        stats.average, stats.median, stats.min, stats.max, pass_rate, stats.std_dev
    )
}

/// Format roster statistics as tab-separated key/value pairs
pub fn format_stats_tsv(stats: &Stats) -> String {
    format!(
        "average\t{}\nmedian\t{}\nmin\t{}\nmax\t{}\npass_rate\t{}\nstd_dev\t{}",
        stats.average, stats.median, stats.min, stats.max, stats.pass_rate, stats.std_dev
    )
}

/// Format the grade distribution as a horizontal bar chart
pub fn format_distribution(buckets: &[DistributionBucket], use_colors: bool) -> String {
    let label_width = buckets
        .iter()
        .map(|b| b.label.len())
        .max()
        .unwrap_or(0);

    buckets
        .iter()
        .map(|bucket| {
            let bar = "#".repeat(bucket.count);
            let bar = if !use_colors {
                bar
            } else if bucket.passing {
                bar.green().to_string()
            } else {
                bar.red().to_string()
            };
            format!(
                "{:>width$} | {} {}",
                bucket.label,
                bar,
                bucket.count,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format curve samples as tab-separated values
/// Columns: points, raw grade
pub fn format_curve_tsv(samples: &[CurvePoint]) -> String {
    samples
        .iter()
        .map(|s| format!("{}\t{:.4}", format_points(s.points), s.grade))
        .collect::<Vec<_>>()
        .join("\n")
}
