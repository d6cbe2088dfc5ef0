// Adapters layer: concrete horoscope sources.

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::HttpSource;

use crate::domain::ports::{ConfigProvider, HoroscopeSource};

/// Picks the source a config asks for: a local file wins over the URL.
pub fn source_from_config<C: ConfigProvider>(config: &C) -> Box<dyn HoroscopeSource> {
    match config.document_file() {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(config.document_url())),
    }
}

#[async_trait::async_trait]
impl HoroscopeSource for Box<dyn HoroscopeSource> {
    async fn fetch_document(&self) -> crate::utils::error::Result<String> {
        (**self).fetch_document().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
