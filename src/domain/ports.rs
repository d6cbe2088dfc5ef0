use crate::core::bucket::BucketPolicy;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw horoscope document comes from.
#[async_trait]
pub trait HoroscopeSource: Send + Sync {
    /// One read of the document, returned unparsed.
    async fn fetch_document(&self) -> Result<String>;

    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn document_url(&self) -> String;
    fn document_file(&self) -> Option<&str>;
    fn bucket_policy(&self) -> BucketPolicy;
}
