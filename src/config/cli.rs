use crate::config::{join_document_url, DEFAULT_ASSET_PATH, DEFAULT_BASE_URL};
use crate::core::bucket::BucketPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Parser)]
#[command(name = "lucky-horoscope")]
#[command(about = "Daily horoscope by birthday, read from a static JSON document")]
pub struct CliConfig {
    /// Base URL of the static asset server
    #[arg(long)]
    pub base_url: Option<String>,

    /// Server path of the horoscope document
    #[arg(long)]
    pub asset_path: Option<String>,

    /// Read the horoscope document from a local file instead of HTTP
    #[arg(long)]
    pub file: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Birth year (defaults to today)
    #[arg(long)]
    pub year: Option<i32>,

    /// Birth month, 1-12 (defaults to today)
    #[arg(long)]
    pub month: Option<u32>,

    /// Birth day of month (defaults to today)
    #[arg(long)]
    pub day: Option<u32>,

    /// Keep the picker open and read commands from stdin
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn document_url(&self) -> String {
        join_document_url(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            self.asset_path.as_deref().unwrap_or(DEFAULT_ASSET_PATH),
        )
    }

    fn document_file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    fn bucket_policy(&self) -> BucketPolicy {
        BucketPolicy::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            return validation::validate_path("file", file);
        }
        if let Some(base_url) = &self.base_url {
            validation::validate_url("base_url", base_url)?;
        }
        if let Some(asset_path) = &self.asset_path {
            validation::validate_asset_path("asset_path", asset_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_point_at_local_asset() {
        let config = CliConfig::parse_from(["lucky-horoscope"]);
        assert_eq!(
            config.document_url(),
            "http://localhost:3000/horoscope_2025-09-27_28.json"
        );
        assert!(config.document_file().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_url_and_date() {
        let config = CliConfig::parse_from([
            "lucky-horoscope",
            "--base-url",
            "https://lucky.example.com/app/",
            "--year",
            "1990",
            "--month",
            "3",
            "--day",
            "21",
        ]);
        assert_eq!(
            config.document_url(),
            "https://lucky.example.com/horoscope_2025-09-27_28.json"
        );
        assert_eq!((config.year, config.month, config.day), (Some(1990), Some(3), Some(21)));
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let config = CliConfig::parse_from(["lucky-horoscope", "--base-url", "not a url"]);
        assert!(config.validate().is_err());
    }
}
