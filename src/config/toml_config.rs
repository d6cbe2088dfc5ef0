use crate::config::{join_document_url, DEFAULT_ASSET_PATH, DEFAULT_BASE_URL};
use crate::core::bucket::{BucketPolicy, DEFAULT_EARLY_BUCKET, DEFAULT_LATE_BUCKET, DEFAULT_THRESHOLD_DAY};
use crate::core::ConfigProvider;
use crate::utils::error::{HoroscopeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub buckets: BucketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_asset_path")]
    pub asset_path: String,
    pub file: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_path: default_asset_path(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketConfig {
    #[serde(default = "default_threshold_day")]
    pub threshold_day: u32,
    #[serde(default = "default_early_bucket")]
    pub early: String,
    #[serde(default = "default_late_bucket")]
    pub late: String,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            threshold_day: default_threshold_day(),
            early: default_early_bucket(),
            late: default_late_bucket(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_asset_path() -> String {
    DEFAULT_ASSET_PATH.to_string()
}

fn default_threshold_day() -> u32 {
    DEFAULT_THRESHOLD_DAY
}

fn default_early_bucket() -> String {
    DEFAULT_EARLY_BUCKET.to_string()
}

fn default_late_bucket() -> String {
    DEFAULT_LATE_BUCKET.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HoroscopeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HoroscopeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LUCKY_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HoroscopeError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案設定
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(base_url) = &cli.base_url {
            self.source.base_url = base_url.clone();
        }
        if let Some(asset_path) = &cli.asset_path {
            self.source.asset_path = asset_path.clone();
        }
        if let Some(file) = &cli.file {
            self.source.file = Some(file.clone());
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn document_url(&self) -> String {
        join_document_url(&self.source.base_url, &self.source.asset_path)
    }

    fn document_file(&self) -> Option<&str> {
        self.source.file.as_deref()
    }

    fn bucket_policy(&self) -> BucketPolicy {
        BucketPolicy {
            threshold_day: self.buckets.threshold_day,
            early: self.buckets.early.clone(),
            late: self.buckets.late.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match &self.source.file {
            Some(file) => validation::validate_path("source.file", file)?,
            None => {
                validation::validate_url("source.base_url", &self.source.base_url)?;
                validation::validate_asset_path("source.asset_path", &self.source.asset_path)?;
            }
        }

        validation::validate_range("buckets.threshold_day", self.buckets.threshold_day, 1, 31)?;
        validation::validate_iso_date("buckets.early", &self.buckets.early)?;
        validation::validate_iso_date("buckets.late", &self.buckets.late)?;

        if self.buckets.early == self.buckets.late {
            return Err(HoroscopeError::InvalidConfigValueError {
                field: "buckets.late".to_string(),
                value: self.buckets.late.clone(),
                reason: "Must differ from buckets.early".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.bucket_policy(), BucketPolicy::default());
        assert_eq!(
            config.document_url(),
            "http://localhost:3000/horoscope_2025-09-27_28.json"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "https://lucky.example.com"
asset_path = "/data/horoscope.json"

[buckets]
threshold_day = 10
early = "2025-10-01"
late = "2025-10-02"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.document_url(), "https://lucky.example.com/data/horoscope.json");
        let policy = config.bucket_policy();
        assert_eq!(policy.threshold_day, 10);
        assert_eq!(policy.select_day(11), "2025-10-02");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LUCKY_TEST_BASE_URL", "https://env.example.com");

        let toml_content = r#"
[source]
base_url = "${LUCKY_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.base_url, "https://env.example.com");

        std::env::remove_var("LUCKY_TEST_BASE_URL");
    }

    #[test]
    fn test_bad_bucket_config_fails_validation() {
        let same = TomlConfig::from_toml_str(
            r#"
[buckets]
early = "2025-09-27"
late = "2025-09-27"
"#,
        )
        .unwrap();
        assert!(same.validate().is_err());

        let threshold = TomlConfig::from_toml_str("[buckets]\nthreshold_day = 0\n").unwrap();
        assert!(threshold.validate().is_err());

        let not_a_date = TomlConfig::from_toml_str("[buckets]\nearly = \"soon\"\n").unwrap();
        assert!(not_a_date.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nbase_url = 1").unwrap_err();
        assert!(matches!(err, HoroscopeError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nfile = \"./horoscope.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.document_file(), Some("./horoscope.json"));
    }
}
