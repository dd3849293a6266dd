use crate::cli::OutputFormat;
use crate::core::ztest::Alternative;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub color: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Where the observations come from and which columns hold them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub file: PathBuf,
    #[serde(
        default = "default_delimiter",
        serialize_with = "crate::utils::format::serialize_delimiter",
        deserialize_with = "crate::utils::format::deserialize_delimiter"
    )]
    pub delimiter: u8,
    pub group_column: String,
    pub outcome_column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    pub treatment: String,
    pub control: String,
    pub alpha: f64,
    #[serde(default)]
    pub alternative: Alternative,
}

fn default_delimiter() -> u8 {
    b','
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("data").join("marketing_AB.csv"),
            delimiter: default_delimiter(),
            group_column: "test group".to_string(),
            outcome_column: "converted".to_string(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            treatment: "ad".to_string(),
            control: "psa".to_string(),
            alpha: 0.05,
            alternative: Alternative::TwoSided,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save()?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.data.group_column.trim().is_empty() {
            return Err(AppError::Config("Group column cannot be empty".to_string()));
        }

        if self.data.outcome_column.trim().is_empty() {
            return Err(AppError::Config(
                "Outcome column cannot be empty".to_string(),
            ));
        }

        if self.data.group_column == self.data.outcome_column {
            return Err(AppError::Config(
                "Group and outcome columns must be different".to_string(),
            ));
        }

        if !self.data.delimiter.is_ascii() {
            return Err(AppError::Config(
                "Delimiter must be a single ASCII character".to_string(),
            ));
        }

        if self.test.treatment.is_empty() || self.test.control.is_empty() {
            return Err(AppError::Config(
                "Treatment and control labels cannot be empty".to_string(),
            ));
        }

        if self.test.treatment == self.test.control {
            return Err(AppError::Config(format!(
                "Treatment and control labels must differ (both are '{}')",
                self.test.treatment
            )));
        }

        if !(self.test.alpha > 0.0 && self.test.alpha < 1.0) {
            return Err(AppError::Config(format!(
                "Alpha must be between 0 and 1 (exclusive), got {}",
                self.test.alpha
            )));
        }

        Ok(())
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file_path())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("abtest")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_marketing_dataset() {
        let config = Config::default();
        assert_eq!(config.data.file, PathBuf::from("data/marketing_AB.csv"));
        assert_eq!(config.data.group_column, "test group");
        assert_eq!(config.data.outcome_column, "converted");
        assert_eq!(config.test.treatment, "ad");
        assert_eq!(config.test.control, "psa");
        assert_eq!(config.test.alpha, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.data.delimiter = b';';
        config.test.alpha = 0.01;
        config.test.alternative = Alternative::Larger;
        config.save_to(&path).unwrap();

        let loaded = Config::load_custom(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_custom_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_custom(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[test]\ntreatment = \"B\"\ncontrol = \"A\"\nalpha = 0.1\n",
        )
        .unwrap();

        let config = Config::load_custom(&path).unwrap();
        assert_eq!(config.test.treatment, "B");
        assert_eq!(config.test.alternative, Alternative::TwoSided);
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn test_tab_delimiter_alias() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[data]\nfile = \"x.tsv\"\ndelimiter = \"tab\"\ngroup_column = \"g\"\noutcome_column = \"y\"\n",
        )
        .unwrap();

        let config = Config::load_custom(&path).unwrap();
        assert_eq!(config.data.delimiter, b'\t');
    }

    #[test]
    fn test_validate_rejects_bad_alpha() {
        let mut config = Config::default();
        config.test.alpha = 1.0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.test.alpha = 0.0;
        assert!(config.validate().is_err());

        config.test.alpha = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_equal_labels() {
        let mut config = Config::default();
        config.test.control = "ad".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_rejects_empty_column() {
        let mut config = Config::default();
        config.data.outcome_column = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[test\nalpha = ").unwrap();

        assert!(matches!(
            Config::load_custom(&path),
            Err(AppError::Config(_))
        ));
    }
}
