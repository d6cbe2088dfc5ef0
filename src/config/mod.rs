pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_ASSET_PATH: &str = "/horoscope_2025-09-27_28.json";

/// `base_url` + server-absolute `asset_path`.
pub fn join_document_url(base_url: &str, asset_path: &str) -> String {
    match url::Url::parse(base_url).and_then(|base| base.join(asset_path)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", base_url.trim_end_matches('/'), asset_path),
    }
}
