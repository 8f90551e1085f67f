//! Configuration management for report generation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};
use crate::LOGGERS;

/// Main report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of Criterion's output tree
    pub criterion_dir: PathBuf,
    /// Directory the markdown report is written into
    pub results_dir: PathBuf,
    pub report_file: String,
    /// Logger base names, in report row order
    pub loggers: Vec<String>,
}

/// Config file contents; unset keys leave the base configuration alone
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    criterion_dir: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    report_file: Option<String>,
    loggers: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            criterion_dir: PathBuf::from("target/criterion"),
            results_dir: PathBuf::from("results"),
            report_file: "benchmark_results.md".to_string(),
            loggers: LOGGERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReportError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay the keys present in a TOML file onto this configuration.
    /// Keys the file leaves out keep their current value.
    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        let overlay: ConfigOverlay = toml::from_str(&content)?;

        if let Some(dir) = overlay.criterion_dir {
            self.criterion_dir = dir;
        }
        if let Some(dir) = overlay.results_dir {
            self.results_dir = dir;
        }
        if let Some(file) = overlay.report_file {
            self.report_file = file;
        }
        if let Some(loggers) = overlay.loggers {
            self.loggers = loggers;
        }

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay `LOGBENCH_*` environment variables onto this configuration
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("LOGBENCH_CRITERION_DIR") {
            self.criterion_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("LOGBENCH_RESULTS_DIR") {
            self.results_dir = PathBuf::from(dir);
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.results_dir.join(&self.report_file)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.criterion_dir.as_os_str().is_empty() {
            return Err(ReportError::Config("criterion_dir must not be empty".to_string()));
        }

        if self.results_dir.as_os_str().is_empty() {
            return Err(ReportError::Config("results_dir must not be empty".to_string()));
        }

        if self.report_file.is_empty() || self.report_file.contains(|c: char| c == '/' || c == '\\') {
            return Err(ReportError::Config(format!(
                "report_file must be a plain file name, got '{}'",
                self.report_file
            )));
        }

        if self.loggers.is_empty() {
            return Err(ReportError::Config("logger list must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for logger in &self.loggers {
            if logger.is_empty() {
                return Err(ReportError::Config("logger names must not be empty".to_string()));
            }
            if !seen.insert(logger.as_str()) {
                return Err(ReportError::Config(format!("duplicate logger '{}'", logger)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.loggers, LOGGERS);
        assert_eq!(
            config.report_path(),
            PathBuf::from("results").join("benchmark_results.md")
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logbench.toml");

        let mut config = Config::default();
        config.criterion_dir = PathBuf::from("/tmp/criterion");
        config.loggers = vec!["fern".to_string(), "slog".to_string()];
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logbench.toml");
        std::fs::write(&path, "results_dir = \"out\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.criterion_dir, PathBuf::from("target/criterion"));
        assert_eq!(config.loggers.len(), 6);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logbench.toml");
        std::fs::write(&path, "loggers = 3\n").unwrap();

        assert!(matches!(
            Config::load_from_file(&path),
            Err(ReportError::Toml(_))
        ));
    }

    #[test]
    fn test_merge_file_only_overrides_present_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logbench.toml");
        std::fs::write(&path, "results_dir = \"from_file\"\nloggers = [\"slog\"]\n").unwrap();

        let mut config = Config {
            criterion_dir: PathBuf::from("from_env/criterion"),
            results_dir: PathBuf::from("from_env/results"),
            ..Config::default()
        };
        config.merge_file(&path).unwrap();

        assert_eq!(config.criterion_dir, PathBuf::from("from_env/criterion"));
        assert_eq!(config.results_dir, PathBuf::from("from_file"));
        assert_eq!(config.report_file, "benchmark_results.md");
        assert_eq!(config.loggers, ["slog"]);
    }

    #[test]
    fn test_merge_file_rejects_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logbench.toml");
        std::fs::write(&path, "result_dir = \"typo\"\n").unwrap();

        let mut config = Config::default();
        assert!(matches!(config.merge_file(&path), Err(ReportError::Toml(_))));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.loggers.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.loggers.push("fern".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report_file = "nested/report.md".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.criterion_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
