//! Error types for report generation

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Criterion results not found at {}", path.display())]
    CriterionDirNotFound { path: PathBuf },

    #[error("Failed to parse estimates file {}: {source}", path.display())]
    Estimates {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Estimates file {} is missing field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::CriterionDirNotFound { .. } => 1,
            ReportError::Config(_) | ReportError::Toml(_) => 2,
            ReportError::Io(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Format error for user-friendly display
pub fn format_error(error: &ReportError) -> String {
    match error {
        ReportError::CriterionDirNotFound { path } => {
            format!(
                "Error: Criterion results not found at {}. Please run benchmarks with 'cargo bench' first.",
                path.display()
            )
        }
        ReportError::Config(msg) => {
            format!("Configuration Error: {}\n\nCheck the file passed with --config.", msg)
        }
        _ => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_exits_with_one() {
        let err = ReportError::CriterionDirNotFound {
            path: PathBuf::from("target/criterion"),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(format_error(&err).contains("cargo bench"));
        assert!(format_error(&err).contains("target/criterion"));
    }

    #[test]
    fn test_config_error_exit_code() {
        let err = ReportError::Config("logger list is empty".to_string());
        assert_eq!(err.exit_code(), 2);
        assert!(format_error(&err).starts_with("Configuration Error"));
    }
}
