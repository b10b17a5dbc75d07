use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use grade_curve::config::Config;
use grade_curve::curve::{self, Algorithm, GradingConfig};
use grade_curve::output::{self, GradedStudent};
use grade_curve::stats::{self, Stats};

const EXIT_SUCCESS: i32 = 0;
const EXIT_OUTPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum Format {
    /// Aligned table (colored on a terminal)
    #[default]
    Table,
    /// Tab-separated values, no header
    Tsv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grade point totals (default if no subcommand). Without points, grades the
    /// roster from the config file
    Grade {
        /// Point totals to grade
        #[arg(allow_negative_numbers = true)]
        points: Vec<f64>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the grade scale: minimum points for every grade
    Scale {
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Statistics over already computed grades
    Stats {
        /// Grades to summarize
        #[arg(allow_negative_numbers = true)]
        grades: Vec<f64>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Sample the unrounded curve for plotting (points<TAB>grade)
    Curve {
        /// Number of intervals across the point axis
        #[arg(short, long, default_value_t = curve::DEFAULT_CURVE_STEPS)]
        steps: usize,
    },
    /// Write a starter config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "grade-curve")]
#[command(about = "Turn exam points into grades", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/grade-curve/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Curve shape between the points for a 4 and the points for a 6
    #[arg(long, value_enum, global = true)]
    algorithm: Option<Algorithm>,

    /// Rounding step for grades (0.1, 0.25, 0.5 or 1.0)
    #[arg(long, global = true)]
    step: Option<f64>,

    /// Maximum points of the exam
    #[arg(long, global = true)]
    max_points: Option<f64>,

    /// Points needed for a 6
    #[arg(long, global = true)]
    points_for_6: Option<f64>,

    /// Points needed for a 4
    #[arg(long, global = true)]
    points_for_4: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Layer command line overrides on top of the configured grading.
    fn apply_overrides(&self, mut grading: GradingConfig) -> GradingConfig {
        if let Some(max_points) = self.max_points {
            grading.max_possible_points = max_points;
        }
        if let Some(points_for_6) = self.points_for_6 {
            grading = grading.with_points_for_6(points_for_6);
        }
        if let Some(points_for_4) = self.points_for_4 {
            grading.points_for_4 = points_for_4;
        }
        if let Some(step) = self.step {
            grading.rounding_step = step;
        }
        if let Some(algorithm) = self.algorithm {
            grading.algorithm = algorithm;
        }
        grading
    }
}

#[derive(Serialize)]
struct GradeReport<'a> {
    students: &'a [GradedStudent<'a>],
    stats: &'a Stats,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_OUTPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let path = match cli.config.as_ref().map(PathBuf::from) {
            Some(p) => p,
            None => match grade_curve::config::get_config_path() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            },
        };
        if let Err(e) = grade_curve::config::write_starter_config(&path) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote starter config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let config: Config = match grade_curve::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let grading = cli.apply_overrides(config.grading.clone());

    if cli.verbose {
        eprintln!(
            "Grading: {} curve, {} for a 4, {} for a 6, max {}, grades {}-{} in steps of {}",
            grading.algorithm,
            grading.points_for_4,
            grading.points_for_6,
            grading.max_possible_points,
            grading.grade_min,
            grading.grade_max,
            grading.rounding_step
        );
        eprintln!("Loaded {} students from config", config.students.len());
    }

    // Validate grading config at startup
    if let Err(errors) = curve::validate_grading(&grading) {
        eprintln!("Grading config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();
    let step = grading.rounding_step;
    let command = cli.command.unwrap_or(Commands::Grade {
        points: Vec::new(),
        format: Format::Table,
    });

    match command {
        Commands::Grade { points, format } => {
            let labels: Vec<String>;
            let entries: Vec<(&str, f64)> = if points.is_empty() {
                config
                    .students
                    .iter()
                    .map(|s| (s.name.as_str(), s.points))
                    .collect()
            } else {
                labels = (1..=points.len()).map(|i| format!("#{}", i)).collect();
                labels
                    .iter()
                    .map(String::as_str)
                    .zip(points.iter().copied())
                    .collect()
            };

            if cli.verbose {
                eprintln!("Grading {} entries", entries.len());
            }

            let graded: Vec<GradedStudent> = entries
                .into_iter()
                .map(|(name, points)| {
                    let grade = curve::grade(points, &grading);
                    GradedStudent {
                        name,
                        points,
                        grade,
                        passing: grade >= curve::PASSING_GRADE,
                    }
                })
                .collect();

            let grades: Vec<f64> = graded.iter().map(|s| s.grade).collect();
            let summary = stats::compute_stats(&grades);

            match format {
                Format::Table => {
                    println!("{}", output::format_student_table(&graded, step, use_colors));
                    if !graded.is_empty() {
                        println!();
                        println!("{}", output::format_stats(&summary, use_colors));
                        println!();
                        let buckets = stats::grade_distribution(&grades, &grading);
                        println!("{}", output::format_distribution(&buckets, use_colors));
                    }
                }
                Format::Tsv => println!("{}", output::format_students_tsv(&graded, step)),
                Format::Json => print_json(&GradeReport {
                    students: &graded,
                    stats: &summary,
                }),
            }
        }
        Commands::Scale { format } => {
            let rows = curve::grade_scale(&grading);
            if cli.verbose {
                eprintln!("Scale has {} rows", rows.len());
            }
            match format {
                Format::Table => {
                    println!("{}", output::format_scale_table(&rows, step, use_colors))
                }
                Format::Tsv => println!("{}", output::format_scale_tsv(&rows, step)),
                Format::Json => print_json(&rows),
            }
        }
        Commands::Stats { grades, format } => {
            let summary = stats::compute_stats(&grades);
            match format {
                Format::Table => println!("{}", output::format_stats(&summary, use_colors)),
                Format::Tsv => println!("{}", output::format_stats_tsv(&summary)),
                Format::Json => print_json(&summary),
            }
        }
        Commands::Curve { steps } => {
            let samples = curve::sample_curve(&grading, steps);
            println!("{}", output::format_curve_tsv(&samples));
        }
        // Handled before the config is loaded
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("grade-curve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = parse(&["scale"]);
        assert_eq!(cli.apply_overrides(GradingConfig::default()), GradingConfig::default());
    }

    #[test]
    fn test_points_for_6_override_resets_points_for_4() {
        let cli = parse(&["--points-for-6", "30", "scale"]);
        let grading = cli.apply_overrides(GradingConfig::default());
        assert_eq!(grading.points_for_6, 30.0);
        assert!((grading.points_for_4 - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_points_for_4_wins_over_reset() {
        let cli = parse(&["--points-for-6", "30", "--points-for-4", "20", "scale"]);
        let grading = cli.apply_overrides(GradingConfig::default());
        assert_eq!(grading.points_for_6, 30.0);
        assert_eq!(grading.points_for_4, 20.0);
    }

    #[test]
    fn test_step_and_algorithm_overrides() {
        let cli = parse(&["--step", "0.25", "--algorithm", "nice", "--max-points", "70"]);
        let grading = cli.apply_overrides(GradingConfig::default());
        assert_eq!(grading.rounding_step, 0.25);
        assert_eq!(grading.algorithm, Algorithm::Nice);
        assert_eq!(grading.max_possible_points, 70.0);
        assert!(cli.command.is_none());
    }
}
