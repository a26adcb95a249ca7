use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Feed HTTP error: {0}")]
    Status(reqwest::StatusCode),
    #[error("Feed parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid feed data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_status() {
        let err = FeedError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Feed HTTP error: 502 Bad Gateway");
    }

    #[test]
    fn error_display_invalid_data() {
        let err = FeedError::InvalidData("lastUpdated must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid feed data: lastUpdated must be positive"
        );
    }

    #[test]
    fn error_from_json_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json!!!");
        if let Err(json_err) = result {
            let err: FeedError = json_err.into();
            assert!(matches!(err, FeedError::Parse(_)));
        }
    }
}
