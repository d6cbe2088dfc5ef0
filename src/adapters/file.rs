use crate::domain::ports::HoroscopeSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Reads the horoscope document from disk, same format as the served asset.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl HoroscopeSource for FileSource {
    async fn fetch_document(&self) -> Result<String> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
