use serde::{Deserialize, Serialize};

use crate::curve::GradingConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub grading: GradingConfig,

    /// Roster graded when no points are given on the command line
    #[serde(default)]
    pub students: Vec<StudentEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StudentEntry {
    pub name: String,
    pub points: f64,
}

impl Config {
    /// Starter configuration written by `grade-curve init`.
    pub fn starter() -> Self {
        let students = [
            ("Anna Muster", 42.0),
            ("Beat Beispiel", 35.0),
            ("Charlie Code", 58.0),
            ("Dora Demo", 21.0),
            ("Emil Example", 49.0),
        ]
        .into_iter()
        .map(|(name, points)| StudentEntry {
            name: name.to_string(),
            points,
        })
        .collect();

        Self {
            grading: GradingConfig::default(),
            students,
        }
    }
}
