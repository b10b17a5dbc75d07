mod schema;

pub use schema::{Config, StudentEntry};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/grade-curve/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("grade-curve"))
}

/// Get the default config file path (~/.config/grade-curve/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/grade-curve/config.yaml) and falls back to the built-in
///   defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Write the starter configuration to `path`, creating parent directories.
///
/// Refuses to overwrite an existing file.
pub fn write_starter_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    let yaml = serde_saphyr::to_string(&Config::starter())
        .context("Failed to serialize starter config")?;
    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Algorithm;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp_path = env::temp_dir().join("grade_curve_test_missing.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_full_config() {
        let temp_path = env::temp_dir().join("grade_curve_test_full.yaml");
        let yaml = r#"
grading:
  max_possible_points: 40
  points_for_6: 38
  points_for_4: 24
  rounding_step: 0.25
  algorithm: HARD
students:
  - name: Anna
    points: 30
  - name: Beat
    points: 12.5
"#;
        fs::write(&temp_path, yaml).unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.grading.max_possible_points, 40.0);
        assert_eq!(config.grading.points_for_6, 38.0);
        assert_eq!(config.grading.points_for_4, 24.0);
        assert_eq!(config.grading.grade_min, 1.0);
        assert_eq!(config.grading.rounding_step, 0.25);
        assert_eq!(config.grading.algorithm, Algorithm::Hard);
        assert_eq!(config.students.len(), 2);
        assert_eq!(config.students[1].points, 12.5);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.students.is_empty());
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let temp_path = env::temp_dir().join("grade_curve_test_invalid.yaml");
        fs::write(&temp_path, "grading: [not, a, map]\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_write_starter_config_roundtrip() {
        let dir = env::temp_dir().join("grade_curve_test_init");
        let temp_path = dir.join("config.yaml");
        let _ = fs::remove_file(&temp_path);

        write_starter_config(&temp_path).unwrap();
        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(loaded, Config::starter());

        // Second write must not clobber the file
        assert!(write_starter_config(&temp_path).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
