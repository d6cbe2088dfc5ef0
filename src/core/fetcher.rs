use crate::core::bucket::BucketPolicy;
use crate::core::zodiac;
use crate::domain::model::{CalendarDate, HoroscopeDocument, HoroscopeReading};
use crate::domain::ports::HoroscopeSource;
use crate::utils::error::Result;

pub struct HoroscopeFetcher<S: HoroscopeSource> {
    source: S,
    policy: BucketPolicy,
}

impl<S: HoroscopeSource> HoroscopeFetcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, BucketPolicy::default())
    }

    pub fn with_policy(source: S, policy: BucketPolicy) -> Self {
        Self { source, policy }
    }

    /// Resolves the sign for `date` and reads its text out of a freshly
    /// fetched document. Exactly one read per call.
    pub async fn fetch_horoscope(&self, date: &CalendarDate) -> Result<HoroscopeReading> {
        let sign = zodiac::resolve(date.month(), date.day());
        let bucket = self.policy.select(date);
        tracing::debug!("Date {} resolved to {} (bucket {})", date, sign, bucket);

        tracing::debug!("Reading horoscope document from {}", self.source.describe());
        let raw = self.source.fetch_document().await?;
        let document = HoroscopeDocument::from_json_str(&raw)?;

        let text = document.lookup(bucket, sign).inspect_err(|_| {
            let buckets: Vec<&str> = document.bucket_keys().collect();
            tracing::warn!("No entry for {} under {} (buckets: {:?})", sign, bucket, buckets);
            let unknown = document.unknown_sign_keys(bucket);
            if !unknown.is_empty() {
                tracing::warn!("Unrecognized sign keys under {}: {:?}", bucket, unknown);
            }
        })?;
        tracing::info!("Horoscope found for {} in bucket {}", sign, bucket);

        Ok(HoroscopeReading {
            sign,
            bucket: bucket.to_string(),
            text: text.to_string(),
        })
    }
}
