use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoroscopeError {
    #[error("Horoscope request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Horoscope request to {url} returned HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed horoscope document: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("No horoscope for {sign} in bucket {bucket}")]
    LookupError { bucket: String, sign: String },

    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDateError { year: i32, month: u32, day: u32 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Parse,
    Lookup,
    Config,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HoroscopeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HoroscopeError::FetchError(_)
            | HoroscopeError::HttpStatusError { .. }
            | HoroscopeError::IoError(_) => ErrorCategory::Fetch,
            HoroscopeError::ParseError(_) => ErrorCategory::Parse,
            HoroscopeError::LookupError { .. } => ErrorCategory::Lookup,
            HoroscopeError::InvalidDateError { .. } => ErrorCategory::Input,
            HoroscopeError::ConfigError { .. }
            | HoroscopeError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Fetch => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Lookup | ErrorCategory::Input => {
                ErrorSeverity::High
            }
            ErrorCategory::Config => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Fetch | ErrorCategory::Parse => {
                "운세 데이터를 불러오는데 실패했습니다.".to_string()
            }
            ErrorCategory::Lookup => "선택한 날짜의 운세를 찾을 수 없습니다.".to_string(),
            ErrorCategory::Input => format!("잘못된 날짜입니다: {}", self),
            ErrorCategory::Config => format!("설정 오류: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HoroscopeError::FetchError(_) => "Check that the static asset server is reachable",
            HoroscopeError::HttpStatusError { .. } => {
                "Check --base-url and --asset-path point at the horoscope document"
            }
            HoroscopeError::IoError(_) => "Check that the horoscope document file exists",
            HoroscopeError::ParseError(_) => "The horoscope document must be valid JSON",
            HoroscopeError::LookupError { .. } => {
                "The horoscope document has no entry for this bucket and sign"
            }
            HoroscopeError::InvalidDateError { .. } => "Pick a date that exists on the calendar",
            HoroscopeError::ConfigError { .. }
            | HoroscopeError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HoroscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_is_not_a_fetch_failure() {
        let err = HoroscopeError::LookupError {
            bucket: "2025-09-28".to_string(),
            sign: "양자리".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.to_string(), "No horoscope for 양자리 in bucket 2025-09-28");
    }

    #[test]
    fn test_parse_and_fetch_share_user_message() {
        let parse = HoroscopeError::ParseError(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        );
        let status = HoroscopeError::HttpStatusError {
            url: "http://localhost/x.json".to_string(),
            status: 404,
        };
        assert_eq!(parse.user_friendly_message(), status.user_friendly_message());
        assert_eq!(status.severity(), ErrorSeverity::Medium);
        assert_eq!(parse.severity(), ErrorSeverity::High);
    }
}
